//! Deterministic sample data for development databases.

use tracing::{info, warn};

use crate::{
    entities::{NewCategory, NewProduct},
    store::{CatalogStore, CategoryCreationOutcome, ProductCreationOutcome},
    QueryResult,
};


pub const DEFAULT_SAMPLE_CATEGORY_COUNT: usize = 10;

pub const DEFAULT_SAMPLE_PRODUCTS_PER_CATEGORY: usize = 5;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SeedingReport {
    pub created_categories: usize,

    /// Categories whose name was already present and were left untouched
    /// (their products are not seeded either).
    pub skipped_categories: usize,

    pub created_products: usize,
}


pub fn sample_category_name(category_number: usize) -> String {
    format!("Sample category {}", category_number)
}

/// Prices cycle deterministically through `1..=999` cents.
fn sample_price_in_cents(sequence_number: usize) -> i64 {
    ((sequence_number * 137) % 999) as i64 + 1
}


/// Creates `category_count` categories named `Sample category N` (`N` starting at 1),
/// each with `products_per_category` products.
pub async fn seed_sample_catalog(
    store: &dyn CatalogStore,
    category_count: usize,
    products_per_category: usize,
) -> QueryResult<SeedingReport> {
    let mut report = SeedingReport::default();

    for category_number in 1..=category_count {
        let category_name = sample_category_name(category_number);

        let category = match store
            .create_category(NewCategory {
                name: category_name.clone(),
            })
            .await?
        {
            CategoryCreationOutcome::Created(category) => category,
            CategoryCreationOutcome::NameAlreadyTaken => {
                info!(
                    category_name = %category_name,
                    "Sample category already exists, skipping."
                );

                report.skipped_categories += 1;
                continue;
            }
        };

        report.created_categories += 1;


        for product_number in 1..=products_per_category {
            let sequence_number = (category_number - 1) * products_per_category + product_number;

            let outcome = store
                .create_product(NewProduct {
                    category_id: category.id,
                    name: format!("Sample product {}.{}", category_number, product_number),
                    description: Some(format!(
                        "Sample product number {} in {}.",
                        product_number, category_name
                    )),
                    price_in_cents: sample_price_in_cents(sequence_number),
                })
                .await?;

            match outcome {
                ProductCreationOutcome::Created { .. } => report.created_products += 1,
                ProductCreationOutcome::CategoryNotFound => {
                    warn!(
                        category_id = %category.id,
                        "Sample category disappeared while seeding its products."
                    );

                    break;
                }
            }
        }
    }


    info!(
        created_categories = report.created_categories,
        skipped_categories = report.skipped_categories,
        created_products = report.created_products,
        "Sample catalog seeded."
    );

    Ok(report)
}



#[cfg(test)]
mod test {
    use storefront_core::{ids::CategoryId, validation::PRODUCT_DESCRIPTION_MIN_CHARACTERS};

    use super::*;
    use crate::store::InMemoryCatalogStore;

    #[test]
    fn sample_prices_stay_in_range() {
        for sequence_number in 0..5000 {
            let price = sample_price_in_cents(sequence_number);
            assert!((1..=999).contains(&price));
        }
    }

    #[tokio::test]
    async fn seeds_requested_amount_of_data() {
        let store = InMemoryCatalogStore::new();

        let report = seed_sample_catalog(&store, 3, 4).await.unwrap();

        assert_eq!(
            report,
            SeedingReport {
                created_categories: 3,
                skipped_categories: 0,
                created_products: 12,
            }
        );

        let categories = store.categories_with_products().await.unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].category.name, "Sample category 1");

        for category in &categories {
            assert_eq!(category.products.len(), 4);

            for product in &category.products {
                assert!(
                    product.description.as_ref().unwrap().chars().count()
                        >= PRODUCT_DESCRIPTION_MIN_CHARACTERS
                );
            }
        }
    }

    #[tokio::test]
    async fn skips_existing_categories() {
        let store = InMemoryCatalogStore::new();

        store
            .create_category(NewCategory {
                name: sample_category_name(2),
            })
            .await
            .unwrap();

        let report = seed_sample_catalog(&store, 3, 2).await.unwrap();

        assert_eq!(report.created_categories, 2);
        assert_eq!(report.skipped_categories, 1);
        assert_eq!(report.created_products, 4);

        let pre_existing = store
            .category_with_products(CategoryId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert!(pre_existing.products.is_empty());
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let store = InMemoryCatalogStore::new();

        seed_sample_catalog(&store, 2, 2).await.unwrap();
        let second_report = seed_sample_catalog(&store, 2, 2).await.unwrap();

        assert_eq!(second_report.created_categories, 0);
        assert_eq!(second_report.skipped_categories, 2);
        assert_eq!(store.product_count().await, 4);
    }
}
