use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Product;
use crate::ids::CategoryId;


/// A category, including all of its products.
#[derive(Serialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct Category {
    #[schema(value_type = i64)]
    pub id: CategoryId,

    pub name: String,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,

    /// Products owned by this category, ordered by their ID.
    pub products: Vec<Product>,
}



#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[schema(
    example = json!({
        "name": "Board games"
    })
)]
pub struct CategoryCreationRequest {
    pub name: String,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
#[schema(
    example = json!({
        "category": {
            "id": 1,
            "name": "Board games",
            "created_at": "2024-03-02T10:21:07.217273Z",
            "last_modified_at": "2024-03-02T10:21:07.217273Z",
            "products": []
        }
    })
)]
pub struct CategoryCreationResponse {
    pub category: Category,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryResponse {
    /// ID of the requested category (same as `category.id`).
    #[schema(value_type = i64)]
    pub id: CategoryId,

    pub category: Category,
}



#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[schema(
    example = json!({
        "name": "Card games"
    })
)]
pub struct CategoryUpdateRequest {
    pub name: String,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryUpdateResponse {
    pub success: bool,

    pub category: Category,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryDeletionResponse {
    pub success: bool,
}
