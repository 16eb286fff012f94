use sqlx::PgConnection;
use storefront_core::ids::CategoryId;

use super::{
    CategoryModel,
    CategorySummaryModel,
    InternalCategoryModel,
    InternalCategorySummaryModel,
};
use crate::{IntoExternalModel, QueryResult};


pub struct CategoryQuery;

impl CategoryQuery {
    /// Returns all categories, ordered by name (and ID for identical names).
    pub async fn get_all(database_connection: &mut PgConnection) -> QueryResult<Vec<CategoryModel>> {
        let internal_categories = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, name, created_at, last_modified_at \
                FROM storefront.category \
                ORDER BY name ASC, id ASC",
        )
        .fetch_all(database_connection)
        .await?;

        Ok(internal_categories
            .into_iter()
            .map(InternalCategoryModel::into_external_model)
            .collect())
    }

    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>> {
        let internal_category = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, name, created_at, last_modified_at \
                FROM storefront.category \
                WHERE id = $1",
        )
        .bind(category_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_category.map(InternalCategoryModel::into_external_model))
    }

    pub async fn get_summary_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategorySummaryModel>> {
        let internal_summary = sqlx::query_as::<_, InternalCategorySummaryModel>(
            "SELECT id, name \
                FROM storefront.category \
                WHERE id = $1",
        )
        .bind(category_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_summary.map(InternalCategorySummaryModel::into_external_model))
    }

    pub async fn exists_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 \
                    FROM storefront.category \
                    WHERE id = $1\
            )",
        )
        .bind(category_id.into_inner())
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    /// Locks the category row until the end of the current transaction.
    ///
    /// Concurrent product inserts referencing this category wait for the lock.
    /// Returns `false` if the category does not exist.
    pub async fn lock_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let locked_id = sqlx::query_scalar::<_, i64>(
            "SELECT id \
                FROM storefront.category \
                WHERE id = $1 \
                FOR UPDATE",
        )
        .bind(category_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(locked_id.is_some())
    }

    /// Returns `true` if a category other than `excluding_category_id` already uses `name`.
    pub async fn exists_by_name(
        database_connection: &mut PgConnection,
        name: &str,
        excluding_category_id: Option<CategoryId>,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 \
                    FROM storefront.category \
                    WHERE name = $1 \
                        AND ($2::BIGINT IS NULL OR id <> $2)\
            )",
        )
        .bind(name)
        .bind(excluding_category_id.map(CategoryId::into_inner))
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }
}
