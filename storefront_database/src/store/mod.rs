//! The catalog store: every operation the HTTP layer performs on categories and products.
//!
//! Each method runs atomically with respect to the backing store.
//! [`PostgresCatalogStore`] wraps multi-statement operations in a transaction
//! (reads use a single `REPEATABLE READ` snapshot), while
//! [`InMemoryCatalogStore`] holds its lock for the duration of a call.

mod in_memory;
mod postgres;

use async_trait::async_trait;
pub use in_memory::*;
pub use postgres::*;
use storefront_core::{ids::CategoryId, policy::CategoryDeletionPolicy};

use crate::{
    entities::{
        CategoryModel,
        CategorySummaryModel,
        CategoryWithProducts,
        NewCategory,
        NewProduct,
        ProductModel,
    },
    QueryResult,
};



#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CategoryCreationOutcome {
    Created(CategoryModel),

    /// Another category with the same name exists (possibly created concurrently).
    NameAlreadyTaken,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CategoryUpdateOutcome {
    Updated(CategoryWithProducts),

    NotFound,

    NameAlreadyTaken,
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CategoryDeletionOutcome {
    /// The category was deleted, together with `deleted_product_count` products
    /// (always zero under [`CategoryDeletionPolicy::Restrict`]).
    Deleted { deleted_product_count: u64 },

    NotFound,

    /// Only returned under [`CategoryDeletionPolicy::Restrict`].
    HasProducts { product_count: u64 },
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ProductCreationOutcome {
    Created {
        product: ProductModel,
        category: CategorySummaryModel,
    },

    /// The referenced category does not exist (or was deleted concurrently).
    CategoryNotFound,
}



#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All categories ordered by name (then ID), each with its products ordered by ID.
    async fn categories_with_products(&self) -> QueryResult<Vec<CategoryWithProducts>>;

    async fn category_with_products(
        &self,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryWithProducts>>;

    async fn category_exists_by_id(&self, category_id: CategoryId) -> QueryResult<bool>;

    /// Returns `true` if a category other than `excluding_category_id` uses `name`.
    async fn category_name_taken(
        &self,
        name: &str,
        excluding_category_id: Option<CategoryId>,
    ) -> QueryResult<bool>;

    async fn create_category(&self, new_category: NewCategory)
        -> QueryResult<CategoryCreationOutcome>;

    async fn update_category_name(
        &self,
        category_id: CategoryId,
        new_name: String,
    ) -> QueryResult<CategoryUpdateOutcome>;

    async fn delete_category(
        &self,
        category_id: CategoryId,
        deletion_policy: CategoryDeletionPolicy,
    ) -> QueryResult<CategoryDeletionOutcome>;

    async fn create_product(&self, new_product: NewProduct) -> QueryResult<ProductCreationOutcome>;
}
