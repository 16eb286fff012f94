use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{CategoryId, ProductId};


/// The `id` and `name` of a product's category,
/// attached to a product without the category's own product list.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct CategorySummary {
    #[schema(value_type = i64)]
    pub id: CategoryId,

    pub name: String,
}


#[derive(Serialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct Product {
    #[schema(value_type = i64)]
    pub id: ProductId,

    pub name: String,

    pub description: Option<String>,

    pub price_in_cents: i64,

    /// Display version of `price_in_cents` (e.g. `"1.050,00 €"`).
    /// Derived on every response, never stored.
    pub formatted_price: String,

    #[schema(value_type = i64)]
    pub category_id: CategoryId,

    /// Only present when the product's category was loaded alongside it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategorySummary>,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,
}



#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[schema(
    example = json!({
        "name": "Chess set",
        "description": "Wooden pieces with a folding board.",
        "price_in_cents": 2599,
        "category_id": 1
    })
)]
pub struct ProductCreationRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub price_in_cents: i64,

    #[schema(value_type = i64)]
    pub category_id: CategoryId,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct ProductCreationResponse {
    pub success: bool,

    pub product: Product,
}
