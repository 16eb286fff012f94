//! API definitions and annotations for the storefront.

use std::str::FromStr;

use actix_web::{error::JsonPayloadError, web, HttpRequest, Scope};
use storefront_core::{
    api_models::{ErrorReason, InvalidJsonBodyReason},
    ids::StorefrontIdNewtype,
    validation::FieldErrors,
};
use tracing::debug;

use self::categories::categories_router;
use self::errors::{EndpointError, EndpointResponseBuilder, EndpointResult};
use self::health::health_router;
use self::openapi::get_openapi_document;
use self::products::products_router;
use crate::state::ApplicationState;

pub mod categories;
pub mod errors;
pub mod health;
pub mod openapi;
pub mod products;
pub mod traits;



/// Parses an ID from a URL path segment, responding with `400 Bad Request`
/// (`invalid-id-format`) if it isn't an integer.
pub fn parse_id<I>(string: impl AsRef<str>) -> Result<I, EndpointError>
where
    I: StorefrontIdNewtype + FromStr<Err = std::num::ParseIntError>,
{
    I::from_str(string.as_ref()).map_err(|error| EndpointError::InvalidIdFormat { error })
}


/// Responds with the configured validation failure status code
/// and a `validation` error reason listing `errors`.
pub(crate) fn validation_failure_response(
    state: &ApplicationState,
    errors: FieldErrors,
) -> EndpointResult {
    EndpointResponseBuilder::new(state.validation_failure_status_code())
        .with_error_reason(ErrorReason::validation(errors))
        .build()
}



fn json_payload_error_to_endpoint_error(error: JsonPayloadError) -> EndpointError {
    match error {
        JsonPayloadError::ContentType => EndpointError::missing_json_body(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            EndpointError::invalid_json_body(InvalidJsonBodyReason::TooLarge)
        }
        JsonPayloadError::Deserialize(deserialization_error) => {
            if deserialization_error.is_data() {
                EndpointError::invalid_json_body(InvalidJsonBodyReason::InvalidData)
            } else {
                EndpointError::invalid_json_body(InvalidJsonBodyReason::NotJson)
            }
        }
        other_error => {
            debug!(error = %other_error, "Failed to read JSON payload.");
            EndpointError::invalid_json_body(InvalidJsonBodyReason::NotJson)
        }
    }
}

/// JSON extractor configuration that turns body errors into [`EndpointError`]s,
/// so that they are answered with the usual error reason body.
pub fn json_extractor_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error: JsonPayloadError, _: &HttpRequest| {
        json_payload_error_to_endpoint_error(error).into()
    })
}



/// Router for the entire public API.
///
/// Lives under the `/api` path.
#[rustfmt::skip]
pub fn api_router() -> Scope {
    web::scope("/api")
        .service(categories_router())
        .service(products_router())
        .service(health_router())
        .service(get_openapi_document)
}
