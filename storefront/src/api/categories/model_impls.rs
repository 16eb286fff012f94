use storefront_core::{api_models::Category, price::PriceFormattingError};
use storefront_database::entities::CategoryWithProducts;

use crate::api::traits::TryIntoApiModel;


impl TryIntoApiModel for CategoryWithProducts {
    type Error = PriceFormattingError;
    type ApiModel = Category;

    fn try_into_api_model(self) -> Result<Self::ApiModel, Self::Error> {
        let products = self
            .products
            .into_iter()
            .map(TryIntoApiModel::try_into_api_model)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Category {
            id: self.category.id,
            name: self.category.name,
            created_at: self.category.created_at,
            last_modified_at: self.category.last_modified_at,
            products,
        })
    }
}
