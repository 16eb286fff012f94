use chrono::{DateTime, Utc};
use storefront_core::ids::{CategoryId, ProductId};

use crate::IntoExternalModel;


/// A stored product. The display-formatted price is not part of the model;
/// it is derived from `price_in_cents` whenever the product is rendered.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProductModel {
    pub id: ProductId,

    pub category_id: CategoryId,

    pub name: String,

    pub description: Option<String>,

    pub price_in_cents: i64,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalProductModel {
    pub(crate) id: i64,

    pub(crate) category_id: i64,

    pub(crate) name: String,

    pub(crate) description: Option<String>,

    pub(crate) price_in_cents: i64,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) last_modified_at: DateTime<Utc>,
}

impl IntoExternalModel for InternalProductModel {
    type ExternalModel = ProductModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: ProductId::new(self.id),
            category_id: CategoryId::new(self.category_id),
            name: self.name,
            description: self.description,
            price_in_cents: self.price_in_cents,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        }
    }
}
