use actix_web::{delete, get, post, route, web};
use storefront_core::{
    api_models::{
        CategoriesResponse,
        CategoryCreationResponse,
        CategoryDeletionResponse,
        CategoryErrorReason,
        CategoryResponse,
        CategoryUpdateResponse,
    },
    ids::CategoryId,
    validation::{FieldErrors, UnvalidatedCategoryFields, CATEGORY_NAME_TAKEN_MESSAGE},
};
use storefront_database::{
    entities::{CategoryWithProducts, NewCategory},
    store::{CategoryCreationOutcome, CategoryDeletionOutcome, CategoryUpdateOutcome},
};
use tracing::info;

use crate::{
    api::{
        errors::{EndpointResponseBuilder, EndpointResult},
        parse_id,
        traits::TryIntoApiModel,
        validation_failure_response,
    },
    state::ApplicationState,
};



fn category_not_found_response() -> EndpointResult {
    EndpointResponseBuilder::not_found()
        .with_error_reason(CategoryErrorReason::category_not_found())
        .build()
}



/// List all categories
///
/// This endpoint lists all categories, ordered by name,
/// each with all of its products.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (
            status = 200,
            description = "The category list.",
            body = CategoriesResponse,
        ),
        (status = 500, description = "Internal server error."),
    )
)]
#[get("")]
pub async fn get_all_categories(state: ApplicationState) -> EndpointResult {
    let categories = state
        .store
        .categories_with_products()
        .await?
        .into_iter()
        .map(TryIntoApiModel::try_into_api_model)
        .collect::<Result<Vec<_>, _>>()?;


    EndpointResponseBuilder::ok()
        .with_json_body(CategoriesResponse { categories })
        .build()
}



/// Create a new category
///
/// The name is trimmed, must be at most 80 characters long
/// and must not belong to any other category.
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body(
        content = storefront_core::api_models::CategoryCreationRequest
    ),
    responses(
        (
            status = 200,
            description = "The category has been created.",
            body = CategoryCreationResponse,
        ),
        (
            status = 422,
            description = "Validation failed (the status code is configurable).",
            body = storefront_core::api_models::ResponseWithErrorReason,
            example = json!({
                "reason": {
                    "type": "validation",
                    "data": { "fields": { "name": ["The name has already been taken."] } }
                }
            })
        ),
        (status = 400, description = "Missing or malformed JSON body.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 500, description = "Internal server error."),
    )
)]
#[post("")]
pub async fn create_category(
    state: ApplicationState,
    request_body: web::Json<UnvalidatedCategoryFields>,
) -> EndpointResult {
    let request_body = request_body.into_inner();

    let name_is_taken = match request_body.name_candidate() {
        Some(name) => state.store.category_name_taken(&name, None).await?,
        None => false,
    };

    let validated_fields = match request_body.validate(name_is_taken) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure_response(&state, errors),
    };


    let creation_outcome = state
        .store
        .create_category(NewCategory {
            name: validated_fields.name,
        })
        .await?;

    let newly_created_category = match creation_outcome {
        CategoryCreationOutcome::Created(category) => category,
        CategoryCreationOutcome::NameAlreadyTaken => {
            return validation_failure_response(
                &state,
                FieldErrors::single("name", CATEGORY_NAME_TAKEN_MESSAGE),
            );
        }
    };

    info!(
        category_id = %newly_created_category.id,
        "Category created."
    );


    let category = CategoryWithProducts {
        category: newly_created_category,
        products: Vec::new(),
    }
    .try_into_api_model()?;

    EndpointResponseBuilder::ok()
        .with_json_body(CategoryCreationResponse { category })
        .build()
}



/// Get category
///
/// This endpoint returns a single category with all of its products.
#[utoipa::path(
    get,
    path = "/categories/{category_id}",
    tag = "categories",
    params(
        (
            "category_id" = i64,
            Path,
            description = "ID of the category."
        )
    ),
    responses(
        (
            status = 200,
            description = "Category information.",
            body = CategoryResponse,
        ),
        (
            status = 404,
            description = "Category does not exist.",
            body = storefront_core::api_models::ResponseWithErrorReason,
            example = json!({
                "reason": {
                    "type": "category",
                    "data": { "category-error-type": "category-not-found" }
                }
            })
        ),
        (status = 400, description = "The ID is not an integer.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 500, description = "Internal server error."),
    )
)]
#[get("/{category_id}")]
pub async fn get_specific_category(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
) -> EndpointResult {
    let target_category_id = parse_id::<CategoryId>(parameters.into_inner().0)?;


    let Some(category) = state
        .store
        .category_with_products(target_category_id)
        .await?
    else {
        return category_not_found_response();
    };


    EndpointResponseBuilder::ok()
        .with_json_body(CategoryResponse {
            id: target_category_id,
            category: category.try_into_api_model()?,
        })
        .build()
}



/// Update category
///
/// Renames a category. Accepts both `PUT` and `PATCH`.
/// Keeping the category's current name is allowed.
#[utoipa::path(
    put,
    path = "/categories/{category_id}",
    tag = "categories",
    params(
        (
            "category_id" = i64,
            Path,
            description = "ID of the category to update."
        )
    ),
    request_body(
        content = storefront_core::api_models::CategoryUpdateRequest
    ),
    responses(
        (
            status = 200,
            description = "Updated category information.",
            body = CategoryUpdateResponse,
        ),
        (
            status = 422,
            description = "Validation failed (the status code is configurable).",
            body = storefront_core::api_models::ResponseWithErrorReason,
        ),
        (status = 404, description = "Category does not exist.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 400, description = "Invalid ID or malformed JSON body.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 500, description = "Internal server error."),
    )
)]
#[route("/{category_id}", method = "PUT", method = "PATCH")]
pub async fn update_specific_category(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
    request_body: web::Json<UnvalidatedCategoryFields>,
) -> EndpointResult {
    let target_category_id = parse_id::<CategoryId>(parameters.into_inner().0)?;

    let target_category_exists = state
        .store
        .category_exists_by_id(target_category_id)
        .await?;

    if !target_category_exists {
        return category_not_found_response();
    }


    let request_body = request_body.into_inner();

    let name_is_taken = match request_body.name_candidate() {
        Some(name) => {
            state
                .store
                .category_name_taken(&name, Some(target_category_id))
                .await?
        }
        None => false,
    };

    let validated_fields = match request_body.validate(name_is_taken) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure_response(&state, errors),
    };


    let update_outcome = state
        .store
        .update_category_name(target_category_id, validated_fields.name)
        .await?;

    let updated_category = match update_outcome {
        CategoryUpdateOutcome::Updated(category) => category,
        CategoryUpdateOutcome::NotFound => return category_not_found_response(),
        CategoryUpdateOutcome::NameAlreadyTaken => {
            return validation_failure_response(
                &state,
                FieldErrors::single("name", CATEGORY_NAME_TAKEN_MESSAGE),
            );
        }
    };

    info!(
        category_id = %target_category_id,
        "Category updated."
    );


    EndpointResponseBuilder::ok()
        .with_json_body(CategoryUpdateResponse {
            success: true,
            category: updated_category.try_into_api_model()?,
        })
        .build()
}



/// Delete category
///
/// What happens to the category's products depends on the configured
/// deletion policy: `restrict` refuses with `409 Conflict` while the category
/// has products, `cascade` deletes them together with the category.
#[utoipa::path(
    delete,
    path = "/categories/{category_id}",
    tag = "categories",
    params(
        (
            "category_id" = i64,
            Path,
            description = "ID of the category to delete."
        )
    ),
    responses(
        (
            status = 200,
            description = "The category has been deleted.",
            body = CategoryDeletionResponse,
        ),
        (
            status = 409,
            description = "The category still has products (only under the `restrict` policy).",
            body = storefront_core::api_models::ResponseWithErrorReason,
            example = json!({
                "reason": {
                    "type": "category",
                    "data": {
                        "category-error-type": "category-has-products",
                        "product_count": 3
                    }
                }
            })
        ),
        (status = 404, description = "Category does not exist.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 400, description = "The ID is not an integer.", body = storefront_core::api_models::ResponseWithErrorReason),
        (status = 500, description = "Internal server error."),
    )
)]
#[delete("/{category_id}")]
pub async fn delete_specific_category(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
) -> EndpointResult {
    let target_category_id = parse_id::<CategoryId>(parameters.into_inner().0)?;


    let deletion_outcome = state
        .store
        .delete_category(target_category_id, state.catalog.category_deletion_policy)
        .await?;

    match deletion_outcome {
        CategoryDeletionOutcome::Deleted {
            deleted_product_count,
        } => {
            info!(
                category_id = %target_category_id,
                deleted_product_count,
                deletion_policy = state.catalog.category_deletion_policy.name(),
                "Category deleted."
            );

            EndpointResponseBuilder::ok()
                .with_json_body(CategoryDeletionResponse { success: true })
                .build()
        }
        CategoryDeletionOutcome::NotFound => category_not_found_response(),
        CategoryDeletionOutcome::HasProducts { product_count } => {
            EndpointResponseBuilder::conflict()
                .with_error_reason(CategoryErrorReason::category_has_products(product_count))
                .build()
        }
    }
}
