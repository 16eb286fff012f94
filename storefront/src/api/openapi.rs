//! The generated OpenAPI document, served at `/api/openapi.json`.

use actix_web::get;
use storefront_core::api_models;
use utoipa::OpenApi;

use super::{categories, health, products};
use crate::api::errors::{EndpointResponseBuilder, EndpointResult};


#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Categories and the products they own."
    ),
    servers(
        (url = "/api", description = "This server")
    ),
    paths(
        // storefront::api::health
        health::ping,

        // storefront::api::categories
        categories::get_all_categories,
        categories::create_category,
        categories::get_specific_category,
        categories::update_specific_category,
        categories::delete_specific_category,

        // storefront::api::products
        products::create_product,
    ),
    components(
        schemas(
            // storefront_core::api_models::error_reason
            api_models::ErrorReason,
            api_models::CategoryErrorReason,
            api_models::ResponseWithErrorReason,

            // storefront_core::api_models::health
            api_models::PingResponse,

            // storefront_core::api_models::categories
            api_models::Category,
            api_models::CategoriesResponse,
            api_models::CategoryCreationRequest,
            api_models::CategoryCreationResponse,
            api_models::CategoryResponse,
            api_models::CategoryUpdateRequest,
            api_models::CategoryUpdateResponse,
            api_models::CategoryDeletionResponse,

            // storefront_core::api_models::products
            api_models::CategorySummary,
            api_models::Product,
            api_models::ProductCreationRequest,
            api_models::ProductCreationResponse,
        )
    ),
    tags(
        (name = "health", description = "Server status."),
        (name = "categories", description = "Category management."),
        (name = "products", description = "Product management."),
    )
)]
pub struct StorefrontApiDocumentation;


/// OpenAPI document
///
/// Returns this document.
#[get("/openapi.json")]
pub async fn get_openapi_document() -> EndpointResult {
    EndpointResponseBuilder::ok()
        .with_json_body(StorefrontApiDocumentation::openapi())
        .build()
}
