use sqlx::PgConnection;
use storefront_core::ids::CategoryId;

use super::{InternalProductModel, ProductModel};
use crate::{IntoExternalModel, QueryError, QueryResult};


pub struct ProductQuery;

impl ProductQuery {
    /// Returns all products, ordered by category ID and then by product ID.
    pub async fn get_all(database_connection: &mut PgConnection) -> QueryResult<Vec<ProductModel>> {
        let internal_products = sqlx::query_as::<_, InternalProductModel>(
            "SELECT \
                    id, category_id, name, description, price_in_cents, \
                    created_at, last_modified_at \
                FROM storefront.product \
                ORDER BY category_id ASC, id ASC",
        )
        .fetch_all(database_connection)
        .await?;

        Ok(internal_products
            .into_iter()
            .map(InternalProductModel::into_external_model)
            .collect())
    }

    pub async fn get_all_by_category_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<Vec<ProductModel>> {
        let internal_products = sqlx::query_as::<_, InternalProductModel>(
            "SELECT \
                    id, category_id, name, description, price_in_cents, \
                    created_at, last_modified_at \
                FROM storefront.product \
                WHERE category_id = $1 \
                ORDER BY id ASC",
        )
        .bind(category_id.into_inner())
        .fetch_all(database_connection)
        .await?;

        Ok(internal_products
            .into_iter()
            .map(InternalProductModel::into_external_model)
            .collect())
    }

    pub async fn count_by_category_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<u64> {
        let product_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) \
                FROM storefront.product \
                WHERE category_id = $1",
        )
        .bind(category_id.into_inner())
        .fetch_one(database_connection)
        .await?;

        u64::try_from(product_count).map_err(|_| {
            QueryError::database_inconsistency("product count query returned a negative number")
        })
    }
}
