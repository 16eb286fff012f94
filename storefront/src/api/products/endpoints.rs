use actix_web::{post, web};
use storefront_core::{
    api_models::ProductCreationResponse,
    validation::{FieldErrors, UnvalidatedProductFields, INVALID_CATEGORY_REFERENCE_MESSAGE},
};
use storefront_database::{entities::NewProduct, store::ProductCreationOutcome};
use tracing::info;

use crate::{
    api::{
        errors::{EndpointResponseBuilder, EndpointResult},
        traits::TryIntoApiModel,
        validation_failure_response,
    },
    state::ApplicationState,
};



/// Create a new product
///
/// Every violated field is reported at once. `price_in_cents` and `category_id`
/// accept integers as well as strings holding an integer.
/// The response includes the display-formatted price and the `id` and `name`
/// of the product's category.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body(
        content = storefront_core::api_models::ProductCreationRequest
    ),
    responses(
        (
            status = 200,
            description = "The product has been created.",
            body = ProductCreationResponse,
        ),
        (
            status = 422,
            description = "Validation failed (the status code is configurable).",
            body = storefront_core::api_models::ResponseWithErrorReason,
            example = json!({
                "reason": {
                    "type": "validation",
                    "data": {
                        "fields": {
                            "category_id": ["The selected category id is invalid."],
                            "price_in_cents": ["The price in cents must be at least 1."]
                        }
                    }
                }
            })
        ),
        (status = 400, description = "Missing or malformed JSON body.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 500, description = "Internal server error."),
    )
)]
#[post("")]
pub async fn create_product(
    state: ApplicationState,
    request_body: web::Json<UnvalidatedProductFields>,
) -> EndpointResult {
    let request_body = request_body.into_inner();

    let referenced_category_exists = match request_body.category_id_candidate() {
        Some(category_id) => state.store.category_exists_by_id(category_id).await?,
        None => false,
    };

    let validated_fields = match request_body.validate(referenced_category_exists) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure_response(&state, errors),
    };


    let creation_outcome = state
        .store
        .create_product(NewProduct {
            category_id: validated_fields.category_id,
            name: validated_fields.name,
            description: validated_fields.description,
            price_in_cents: validated_fields.price_in_cents,
        })
        .await?;

    let (product, category) = match creation_outcome {
        ProductCreationOutcome::Created { product, category } => (product, category),
        ProductCreationOutcome::CategoryNotFound => {
            return validation_failure_response(
                &state,
                FieldErrors::single("category_id", INVALID_CATEGORY_REFERENCE_MESSAGE),
            );
        }
    };

    info!(
        product_id = %product.id,
        category_id = %product.category_id,
        "Product created."
    );


    EndpointResponseBuilder::ok()
        .with_json_body(ProductCreationResponse {
            success: true,
            product: (product, category).try_into_api_model()?,
        })
        .build()
}
