use storefront_core::{
    api_models::{CategorySummary, Product},
    price::{format_price, PriceFormattingError},
};
use storefront_database::entities::{CategorySummaryModel, ProductModel};

use crate::api::traits::{IntoApiModel, TryIntoApiModel};


impl IntoApiModel for CategorySummaryModel {
    type ApiModel = CategorySummary;

    fn into_api_model(self) -> Self::ApiModel {
        CategorySummary {
            id: self.id,
            name: self.name,
        }
    }
}


/// The formatted price is computed here, on every conversion.
impl TryIntoApiModel for ProductModel {
    type Error = PriceFormattingError;
    type ApiModel = Product;

    fn try_into_api_model(self) -> Result<Self::ApiModel, Self::Error> {
        let formatted_price = format_price(self.price_in_cents)?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price_in_cents: self.price_in_cents,
            formatted_price,
            category_id: self.category_id,
            category: None,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        })
    }
}

/// A product together with the summary of the category it was loaded with.
impl TryIntoApiModel for (ProductModel, CategorySummaryModel) {
    type Error = PriceFormattingError;
    type ApiModel = Product;

    fn try_into_api_model(self) -> Result<Self::ApiModel, Self::Error> {
        let (product, category) = self;

        let mut product = product.try_into_api_model()?;
        product.category = Some(category.into_api_model());

        Ok(product)
    }
}



#[cfg(test)]
mod test {
    use chrono::Utc;
    use storefront_core::ids::{CategoryId, ProductId};

    use super::*;

    fn sample_product(price_in_cents: i64) -> ProductModel {
        let now = Utc::now();

        ProductModel {
            id: ProductId::new(3),
            category_id: CategoryId::new(1),
            name: "Chess set".to_string(),
            description: None,
            price_in_cents,
            created_at: now,
            last_modified_at: now,
        }
    }

    #[test]
    fn formats_price_on_conversion() {
        let product = sample_product(105000).try_into_api_model().unwrap();

        assert_eq!(product.price_in_cents, 105000);
        assert_eq!(product.formatted_price, "1.050,00 €");
        assert!(product.category.is_none());
    }

    #[test]
    fn attaches_category_summary() {
        let product = (
            sample_product(100),
            CategorySummaryModel {
                id: CategoryId::new(1),
                name: "Games".to_string(),
            },
        )
            .try_into_api_model()
            .unwrap();

        assert_eq!(product.formatted_price, "1,00 €");
        assert_eq!(
            product.category,
            Some(CategorySummary {
                id: CategoryId::new(1),
                name: "Games".to_string()
            })
        );
    }

    #[test]
    fn refuses_to_render_negative_price() {
        assert!(sample_product(-1).try_into_api_model().is_err());
    }
}
