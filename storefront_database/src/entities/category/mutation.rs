use chrono::Utc;
use sqlx::PgConnection;
use storefront_core::ids::CategoryId;

use super::{CategoryModel, InternalCategoryModel};
use crate::{IntoExternalModel, QueryError, QueryResult};



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewCategory {
    pub name: String,
}



pub struct CategoryMutation;

impl CategoryMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        new_category: NewCategory,
    ) -> QueryResult<CategoryModel> {
        let new_category_created_at = Utc::now();
        let new_category_last_modified_at = new_category_created_at;

        let newly_created_category = sqlx::query_as::<_, InternalCategoryModel>(
            "INSERT INTO storefront.category \
                (name, created_at, last_modified_at) \
                VALUES ($1, $2, $3) \
                RETURNING id, name, created_at, last_modified_at",
        )
        .bind(new_category.name)
        .bind(new_category_created_at)
        .bind(new_category_last_modified_at)
        .fetch_one(database_connection)
        .await?;

        Ok(newly_created_category.into_external_model())
    }

    /// Returns `None` if no category with the given ID exists.
    pub async fn update_name(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
        new_name: String,
    ) -> QueryResult<Option<CategoryModel>> {
        let updated_category = sqlx::query_as::<_, InternalCategoryModel>(
            "UPDATE storefront.category \
                SET name = $1, last_modified_at = $2 \
                WHERE id = $3 \
                RETURNING id, name, created_at, last_modified_at",
        )
        .bind(new_name)
        .bind(Utc::now())
        .bind(category_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(updated_category.map(InternalCategoryModel::into_external_model))
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM storefront.category \
                WHERE id = $1",
        )
        .bind(category_id.into_inner())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "attempted to delete a category by ID, but more than one row matched",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}
