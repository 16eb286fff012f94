use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use itertools::Itertools;
use storefront_core::{
    ids::{CategoryId, ProductId},
    policy::CategoryDeletionPolicy,
};
use tokio::sync::RwLock;

use super::{
    CatalogStore,
    CategoryCreationOutcome,
    CategoryDeletionOutcome,
    CategoryUpdateOutcome,
    ProductCreationOutcome,
};
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


#[derive(Debug)]
struct InMemoryCatalog {
    categories: BTreeMap<CategoryId, CategoryModel>,
    products: BTreeMap<ProductId, ProductModel>,
    next_category_id: i64,
    next_product_id: i64,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            products: BTreeMap::new(),
            next_category_id: 1,
            next_product_id: 1,
        }
    }
}

impl InMemoryCatalog {
    fn name_taken(&self, name: &str, excluding_category_id: Option<CategoryId>) -> bool {
        self.categories.values().any(|category| {
            category.name == name && Some(category.id) != excluding_category_id
        })
    }

    /// Products of the given category, ordered by ID.
    fn products_of(&self, category_id: CategoryId) -> Vec<ProductModel> {
        self.products
            .values()
            .filter(|product| product.category_id == category_id)
            .cloned()
            .collect()
    }

    fn with_products(&self, category: &CategoryModel) -> CategoryWithProducts {
        CategoryWithProducts {
            category: category.clone(),
            products: self.products_of(category.id),
        }
    }
}


/// [`CatalogStore`] that keeps everything in process memory.
///
/// Used by the test harness; data is lost when the store is dropped.
/// Category names are compared exactly (case-sensitive).
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    catalog: RwLock<InMemoryCatalog>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn category_count(&self) -> usize {
        self.catalog.read().await.categories.len()
    }

    pub async fn product_count(&self) -> usize {
        self.catalog.read().await.products.len()
    }
}


#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn categories_with_products(&self) -> QueryResult<Vec<CategoryWithProducts>> {
        let catalog = self.catalog.read().await;

        // BTreeMap iteration is by ID, so every group keeps its products in ID order.
        let mut products_by_category: HashMap<CategoryId, Vec<ProductModel>> = catalog
            .products
            .values()
            .cloned()
            .into_group_map_by(|product| product.category_id);

        Ok(catalog
            .categories
            .values()
            .sorted_by(|first, second| {
                first
                    .name
                    .cmp(&second.name)
                    .then_with(|| first.id.cmp(&second.id))
            })
            .map(|category| CategoryWithProducts {
                category: category.clone(),
                products: products_by_category
                    .remove(&category.id)
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn category_with_products(
        &self,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryWithProducts>> {
        let catalog = self.catalog.read().await;

        Ok(catalog
            .categories
            .get(&category_id)
            .map(|category| catalog.with_products(category)))
    }

    async fn category_exists_by_id(&self, category_id: CategoryId) -> QueryResult<bool> {
        Ok(self
            .catalog
            .read()
            .await
            .categories
            .contains_key(&category_id))
    }

    async fn category_name_taken(
        &self,
        name: &str,
        excluding_category_id: Option<CategoryId>,
    ) -> QueryResult<bool> {
        Ok(self
            .catalog
            .read()
            .await
            .name_taken(name, excluding_category_id))
    }

    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> QueryResult<CategoryCreationOutcome> {
        let mut catalog = self.catalog.write().await;

        if catalog.name_taken(&new_category.name, None) {
            return Ok(CategoryCreationOutcome::NameAlreadyTaken);
        }

        let id = CategoryId::new(catalog.next_category_id);
        catalog.next_category_id += 1;

        let created_at = Utc::now();
        let category = CategoryModel {
            id,
            name: new_category.name,
            created_at,
            last_modified_at: created_at,
        };

        catalog.categories.insert(id, category.clone());

        Ok(CategoryCreationOutcome::Created(category))
    }

    async fn update_category_name(
        &self,
        category_id: CategoryId,
        new_name: String,
    ) -> QueryResult<CategoryUpdateOutcome> {
        let mut catalog = self.catalog.write().await;

        if !catalog.categories.contains_key(&category_id) {
            return Ok(CategoryUpdateOutcome::NotFound);
        }

        if catalog.name_taken(&new_name, Some(category_id)) {
            return Ok(CategoryUpdateOutcome::NameAlreadyTaken);
        }

        let Some(category) = catalog.categories.get_mut(&category_id) else {
            return Ok(CategoryUpdateOutcome::NotFound);
        };

        category.name = new_name;
        category.last_modified_at = Utc::now();

        let updated_category = category.clone();

        Ok(CategoryUpdateOutcome::Updated(
            catalog.with_products(&updated_category),
        ))
    }

    async fn delete_category(
        &self,
        category_id: CategoryId,
        deletion_policy: CategoryDeletionPolicy,
    ) -> QueryResult<CategoryDeletionOutcome> {
        let mut catalog = self.catalog.write().await;

        if !catalog.categories.contains_key(&category_id) {
            return Ok(CategoryDeletionOutcome::NotFound);
        }

        let product_count = catalog
            .products
            .values()
            .filter(|product| product.category_id == category_id)
            .count() as u64;

        let deleted_product_count = match deletion_policy {
            CategoryDeletionPolicy::Restrict => {
                if product_count > 0 {
                    return Ok(CategoryDeletionOutcome::HasProducts { product_count });
                }

                0
            }
            CategoryDeletionPolicy::Cascade => {
                catalog
                    .products
                    .retain(|_, product| product.category_id != category_id);

                product_count
            }
        };

        catalog.categories.remove(&category_id);

        Ok(CategoryDeletionOutcome::Deleted {
            deleted_product_count,
        })
    }

    async fn create_product(&self, new_product: NewProduct) -> QueryResult<ProductCreationOutcome> {
        let mut catalog = self.catalog.write().await;

        let Some(category) = catalog.categories.get(&new_product.category_id) else {
            return Ok(ProductCreationOutcome::CategoryNotFound);
        };

        let category_summary = CategorySummaryModel::from(category);

        let id = ProductId::new(catalog.next_product_id);
        catalog.next_product_id += 1;

        let created_at = Utc::now();
        let product = ProductModel {
            id,
            category_id: new_product.category_id,
            name: new_product.name,
            description: new_product.description,
            price_in_cents: new_product.price_in_cents,
            created_at,
            last_modified_at: created_at,
        };

        catalog.products.insert(id, product.clone());

        Ok(ProductCreationOutcome::Created {
            product,
            category: category_summary,
        })
    }
}
