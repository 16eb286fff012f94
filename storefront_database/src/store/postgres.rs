use std::collections::HashMap;

use async_trait::async_trait;
use itertools::Itertools;
use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::{ids::CategoryId, policy::CategoryDeletionPolicy};
use tracing::debug;

use super::{
    CatalogStore,
    CategoryCreationOutcome,
    CategoryDeletionOutcome,
    CategoryUpdateOutcome,
    ProductCreationOutcome,
};
use crate::{
    entities::{
        CategoryMutation,
        CategoryQuery,
        CategoryWithProducts,
        NewCategory,
        NewProduct,
        ProductModel,
        ProductMutation,
        ProductQuery,
    },
    QueryError,
    QueryResult,
};


/// [`CatalogStore`] backed by the `storefront` PostgreSQL schema.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    database_pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(database_pool: PgPool) -> Self {
        Self { database_pool }
    }
}


/// Begins a read-only transaction in which every statement sees the same snapshot,
/// so that categories and their products are read as of a single point in time.
async fn begin_snapshot_transaction(
    database_pool: &PgPool,
) -> QueryResult<Transaction<'static, Postgres>> {
    let mut transaction = database_pool.begin().await?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *transaction)
        .await?;

    Ok(transaction)
}


#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn categories_with_products(&self) -> QueryResult<Vec<CategoryWithProducts>> {
        let mut transaction = begin_snapshot_transaction(&self.database_pool).await?;

        let categories = CategoryQuery::get_all(&mut transaction).await?;
        let products = ProductQuery::get_all(&mut transaction).await?;

        transaction.commit().await?;


        let mut products_by_category: HashMap<CategoryId, Vec<ProductModel>> = products
            .into_iter()
            .into_group_map_by(|product| product.category_id);

        Ok(categories
            .into_iter()
            .map(|category| CategoryWithProducts {
                products: products_by_category
                    .remove(&category.id)
                    .unwrap_or_default(),
                category,
            })
            .collect())
    }

    async fn category_with_products(
        &self,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryWithProducts>> {
        let mut transaction = begin_snapshot_transaction(&self.database_pool).await?;

        let Some(category) = CategoryQuery::get_by_id(&mut transaction, category_id).await? else {
            return Ok(None);
        };

        let products = ProductQuery::get_all_by_category_id(&mut transaction, category_id).await?;

        transaction.commit().await?;


        Ok(Some(CategoryWithProducts { category, products }))
    }

    async fn category_exists_by_id(&self, category_id: CategoryId) -> QueryResult<bool> {
        let mut database_connection = self.database_pool.acquire().await?;

        CategoryQuery::exists_by_id(&mut database_connection, category_id).await
    }

    async fn category_name_taken(
        &self,
        name: &str,
        excluding_category_id: Option<CategoryId>,
    ) -> QueryResult<bool> {
        let mut database_connection = self.database_pool.acquire().await?;

        CategoryQuery::exists_by_name(&mut database_connection, name, excluding_category_id).await
    }

    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> QueryResult<CategoryCreationOutcome> {
        let mut database_connection = self.database_pool.acquire().await?;

        match CategoryMutation::create(&mut database_connection, new_category).await {
            Ok(category) => Ok(CategoryCreationOutcome::Created(category)),
            Err(error) if error.is_unique_violation() => {
                debug!("category insert hit the unique name constraint");
                Ok(CategoryCreationOutcome::NameAlreadyTaken)
            }
            Err(error) => Err(error),
        }
    }

    async fn update_category_name(
        &self,
        category_id: CategoryId,
        new_name: String,
    ) -> QueryResult<CategoryUpdateOutcome> {
        let mut transaction = self.database_pool.begin().await?;

        let updated_category =
            match CategoryMutation::update_name(&mut transaction, category_id, new_name).await {
                Ok(Some(category)) => category,
                Ok(None) => return Ok(CategoryUpdateOutcome::NotFound),
                Err(error) if error.is_unique_violation() => {
                    debug!(
                        category_id = %category_id,
                        "category update hit the unique name constraint"
                    );

                    return Ok(CategoryUpdateOutcome::NameAlreadyTaken);
                }
                Err(error) => return Err(error),
            };

        let products = ProductQuery::get_all_by_category_id(&mut transaction, category_id).await?;

        transaction.commit().await?;


        Ok(CategoryUpdateOutcome::Updated(CategoryWithProducts {
            category: updated_category,
            products,
        }))
    }

    async fn delete_category(
        &self,
        category_id: CategoryId,
        deletion_policy: CategoryDeletionPolicy,
    ) -> QueryResult<CategoryDeletionOutcome> {
        let mut transaction = self.database_pool.begin().await?;

        let category_exists = CategoryQuery::lock_by_id(&mut transaction, category_id).await?;
        if !category_exists {
            return Ok(CategoryDeletionOutcome::NotFound);
        }


        let deleted_product_count = match deletion_policy {
            CategoryDeletionPolicy::Restrict => {
                let product_count =
                    ProductQuery::count_by_category_id(&mut transaction, category_id).await?;

                if product_count > 0 {
                    return Ok(CategoryDeletionOutcome::HasProducts { product_count });
                }

                0
            }
            CategoryDeletionPolicy::Cascade => {
                ProductMutation::delete_all_by_category_id(&mut transaction, category_id).await?
            }
        };


        let category_deleted = CategoryMutation::delete(&mut transaction, category_id).await?;
        if !category_deleted {
            return Err(QueryError::database_inconsistency(
                "category row was locked, but the subsequent delete affected no rows",
            ));
        }

        transaction.commit().await?;


        Ok(CategoryDeletionOutcome::Deleted {
            deleted_product_count,
        })
    }

    async fn create_product(&self, new_product: NewProduct) -> QueryResult<ProductCreationOutcome> {
        let mut transaction = self.database_pool.begin().await?;

        let category_id = new_product.category_id;

        let product = match ProductMutation::create(&mut transaction, new_product).await {
            Ok(product) => product,
            Err(error) if error.is_foreign_key_violation() => {
                debug!(
                    category_id = %category_id,
                    "product insert referenced a missing category"
                );

                return Ok(ProductCreationOutcome::CategoryNotFound);
            }
            Err(error) => return Err(error),
        };

        let Some(category) = CategoryQuery::get_summary_by_id(&mut transaction, category_id).await?
        else {
            return Err(QueryError::database_inconsistency(
                "product was inserted, but its category could not be loaded afterwards",
            ));
        };

        transaction.commit().await?;


        Ok(ProductCreationOutcome::Created { product, category })
    }
}



/// These tests run against the database at `DATABASE_URL` (migrations are applied
/// first) and are skipped when it is not set. Every test works on categories with
/// names unique to that test run, so they can share one database.
#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicU64, Ordering};

    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::{apply_pending_migrations, entities::CategoryModel};

    static CATEGORY_NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn unique_category_name(label: &str) -> String {
        format!(
            "{} {}-{}-{}",
            label,
            std::process::id(),
            Utc::now().timestamp_micros(),
            CATEGORY_NAME_COUNTER.fetch_add(1, Ordering::Relaxed)
        )
    }

    async fn connect_to_test_database() -> Option<PostgresCatalogStore> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set, skipping PostgreSQL store test");
            return None;
        };

        let database_pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&database_url)
            .await
            .expect("failed to connect to DATABASE_URL");

        apply_pending_migrations(&database_pool)
            .await
            .expect("failed to apply migrations");

        Some(PostgresCatalogStore::new(database_pool))
    }

    async fn create_category(store: &PostgresCatalogStore, name: &str) -> CategoryModel {
        match store
            .create_category(NewCategory {
                name: name.to_string(),
            })
            .await
            .unwrap()
        {
            CategoryCreationOutcome::Created(category) => category,
            outcome => panic!("unexpected category creation outcome: {:?}", outcome),
        }
    }

    async fn create_product(
        store: &PostgresCatalogStore,
        category_id: CategoryId,
        price_in_cents: i64,
    ) -> ProductModel {
        match store
            .create_product(NewProduct {
                category_id,
                name: format!("Product at {}", price_in_cents),
                description: Some("Stored in PostgreSQL.".to_string()),
                price_in_cents,
            })
            .await
            .unwrap()
        {
            ProductCreationOutcome::Created { product, category } => {
                assert_eq!(category.id, category_id);
                product
            }
            outcome => panic!("unexpected product creation outcome: {:?}", outcome),
        }
    }

    #[tokio::test]
    async fn duplicate_category_names_hit_the_unique_constraint() {
        let Some(store) = connect_to_test_database().await else {
            return;
        };

        let name = unique_category_name("Books");
        let books = create_category(&store, &name).await;

        let outcome = store
            .create_category(NewCategory { name: name.clone() })
            .await
            .unwrap();
        assert!(matches!(outcome, CategoryCreationOutcome::NameAlreadyTaken));


        assert!(store.category_name_taken(&name, None).await.unwrap());
        assert!(!store
            .category_name_taken(&name, Some(books.id))
            .await
            .unwrap());

        let other = create_category(&store, &unique_category_name("Other")).await;
        assert!(store
            .category_name_taken(&name, Some(other.id))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn renames_respect_uniqueness_and_existence() {
        let Some(store) = connect_to_test_database().await else {
            return;
        };

        let books_name = unique_category_name("Books");
        let books = create_category(&store, &books_name).await;
        let audio_name = unique_category_name("Audio");
        create_category(&store, &audio_name).await;
        create_product(&store, books.id, 1299).await;


        let outcome = store
            .update_category_name(books.id, audio_name)
            .await
            .unwrap();
        assert!(matches!(outcome, CategoryUpdateOutcome::NameAlreadyTaken));

        let outcome = store
            .update_category_name(books.id, books_name.clone())
            .await
            .unwrap();
        match outcome {
            CategoryUpdateOutcome::Updated(updated) => {
                assert_eq!(updated.category.name, books_name);
                assert_eq!(updated.products.len(), 1);
            }
            outcome => panic!("unexpected category update outcome: {:?}", outcome),
        }


        store
            .delete_category(books.id, CategoryDeletionPolicy::Cascade)
            .await
            .unwrap();

        let outcome = store
            .update_category_name(books.id, unique_category_name("Gone"))
            .await
            .unwrap();
        assert!(matches!(outcome, CategoryUpdateOutcome::NotFound));
    }

    #[tokio::test]
    async fn products_for_missing_categories_hit_the_foreign_key() {
        let Some(store) = connect_to_test_database().await else {
            return;
        };

        let removed = create_category(&store, &unique_category_name("Removed")).await;
        store
            .delete_category(removed.id, CategoryDeletionPolicy::Restrict)
            .await
            .unwrap();

        assert!(!store.category_exists_by_id(removed.id).await.unwrap());

        let outcome = store
            .create_product(NewProduct {
                category_id: removed.id,
                name: "Orphan".to_string(),
                description: None,
                price_in_cents: 500,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, ProductCreationOutcome::CategoryNotFound));
    }

    #[tokio::test]
    async fn deletion_follows_the_policy() {
        let Some(store) = connect_to_test_database().await else {
            return;
        };

        let books = create_category(&store, &unique_category_name("Books")).await;
        create_product(&store, books.id, 1299).await;
        create_product(&store, books.id, 1099).await;

        let outcome = store
            .delete_category(books.id, CategoryDeletionPolicy::Restrict)
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            CategoryDeletionOutcome::HasProducts { product_count: 2 }
        ));
        assert!(store.category_exists_by_id(books.id).await.unwrap());


        let outcome = store
            .delete_category(books.id, CategoryDeletionPolicy::Cascade)
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            CategoryDeletionOutcome::Deleted {
                deleted_product_count: 2
            }
        ));

        assert!(store
            .category_with_products(books.id)
            .await
            .unwrap()
            .is_none());

        let outcome = store
            .delete_category(books.id, CategoryDeletionPolicy::Cascade)
            .await
            .unwrap();
        assert!(matches!(outcome, CategoryDeletionOutcome::NotFound));
    }

    #[tokio::test]
    async fn categories_are_listed_with_their_products() {
        let Some(store) = connect_to_test_database().await else {
            return;
        };

        let books = create_category(&store, &unique_category_name("Books")).await;
        let audio = create_category(&store, &unique_category_name("Audio")).await;
        create_product(&store, books.id, 1299).await;
        create_product(&store, books.id, 1099).await;
        let headphones = create_product(&store, audio.id, 4999).await;

        let listed = store.categories_with_products().await.unwrap();

        let listed_books = listed
            .iter()
            .find(|entry| entry.category.id == books.id)
            .unwrap();
        let listed_audio = listed
            .iter()
            .find(|entry| entry.category.id == audio.id)
            .unwrap();

        assert_eq!(listed_books.products.len(), 2);
        assert_eq!(listed_audio.products, vec![headphones]);

        let fetched = store.category_with_products(books.id).await.unwrap().unwrap();
        assert_eq!(fetched.category, books);
        assert_eq!(fetched.products.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_reads_ignore_concurrent_deletions() {
        let Some(store) = connect_to_test_database().await else {
            return;
        };

        let books = create_category(&store, &unique_category_name("Books")).await;
        create_product(&store, books.id, 1299).await;
        create_product(&store, books.id, 1099).await;


        let mut snapshot = begin_snapshot_transaction(&store.database_pool)
            .await
            .unwrap();

        let categories = CategoryQuery::get_all(&mut snapshot).await.unwrap();
        assert!(categories.iter().any(|category| category.id == books.id));

        let outcome = store
            .delete_category(books.id, CategoryDeletionPolicy::Cascade)
            .await
            .unwrap();
        assert!(matches!(outcome, CategoryDeletionOutcome::Deleted { .. }));

        let products = ProductQuery::get_all_by_category_id(&mut snapshot, books.id)
            .await
            .unwrap();
        assert_eq!(products.len(), 2);

        snapshot.commit().await.unwrap();


        assert!(!store.category_exists_by_id(books.id).await.unwrap());
    }
}
