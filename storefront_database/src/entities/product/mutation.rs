use chrono::Utc;
use sqlx::PgConnection;
use storefront_core::ids::CategoryId;

use super::{InternalProductModel, ProductModel};
use crate::{IntoExternalModel, QueryResult};



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub price_in_cents: i64,
}



pub struct ProductMutation;

impl ProductMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        new_product: NewProduct,
    ) -> QueryResult<ProductModel> {
        let new_product_created_at = Utc::now();
        let new_product_last_modified_at = new_product_created_at;

        let newly_created_product = sqlx::query_as::<_, InternalProductModel>(
            "INSERT INTO storefront.product \
                (category_id, name, description, price_in_cents, \
                 created_at, last_modified_at) \
                VALUES ($1, $2, $3, $4, $5, $6) \
                RETURNING \
                    id, category_id, name, description, price_in_cents, \
                    created_at, last_modified_at",
        )
        .bind(new_product.category_id.into_inner())
        .bind(new_product.name)
        .bind(new_product.description)
        .bind(new_product.price_in_cents)
        .bind(new_product_created_at)
        .bind(new_product_last_modified_at)
        .fetch_one(database_connection)
        .await?;

        Ok(newly_created_product.into_external_model())
    }

    /// Returns the number of deleted products.
    pub async fn delete_all_by_category_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<u64> {
        let query_result = sqlx::query(
            "DELETE FROM storefront.product \
                WHERE category_id = $1",
        )
        .bind(category_id.into_inner())
        .execute(database_connection)
        .await?;

        Ok(query_result.rows_affected())
    }
}
