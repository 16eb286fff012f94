use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::FieldErrors;



/// Pertains to all endpoints under `/categories`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, ToSchema)]
#[serde(tag = "category-error-type")]
#[non_exhaustive]
pub enum CategoryErrorReason {
    #[serde(rename = "category-not-found")]
    CategoryNotFound,

    /// This error is returned when attempting to delete a category
    /// that still owns products while the deletion policy is `restrict`.
    #[serde(rename = "category-has-products")]
    CategoryHasProducts { product_count: u64 },
}

impl CategoryErrorReason {
    pub const fn category_not_found() -> Self {
        Self::CategoryNotFound
    }

    pub const fn category_has_products(product_count: u64) -> Self {
        Self::CategoryHasProducts { product_count }
    }
}



/// Reasons for a JSON body to not be accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidJsonBodyReason {
    /// Indicates that the provided JSON data was invalid,
    /// possibly due to an IO / syntax / EOF error while parsing.
    #[serde(rename = "not-json")]
    NotJson,

    /// Indicates that the provided JSON data was valid,
    /// but its data did not match the expected scheme / format
    /// (deserialization error).
    #[serde(rename = "invalid-data")]
    InvalidData,

    /// Indicates that the provided JSON data was too large.
    #[serde(rename = "too-large")]
    TooLarge,
}



#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, ToSchema)]
#[serde(tag = "type", content = "data")]
pub enum ErrorReason {
    /// Indicates that the request is missing a JSON body
    /// (or that its `Content-Type` is not `application/json`).
    #[serde(rename = "missing-json-body")]
    MissingJsonBody,

    /// Indicates that the request has an invalid JSON body (see [`InvalidJsonBodyReason`]).
    #[serde(rename = "invalid-json-body")]
    InvalidJsonBody {
        /// Describes why the JSON body is invalid.
        #[schema(value_type = String)]
        reason: InvalidJsonBodyReason,
    },

    /// Indicates that an ID in the URL path was not an integer.
    #[serde(rename = "invalid-id-format")]
    InvalidIdFormat,

    /// Indicates that one or more fields of the request body failed validation.
    /// `fields` maps each offending field name to its validation messages.
    #[serde(rename = "validation")]
    Validation {
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Pertains to all category-related endpoints.
    #[serde(rename = "category")]
    Category(CategoryErrorReason),
}

impl ErrorReason {
    pub const fn missing_json_body() -> Self {
        Self::MissingJsonBody
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub const fn invalid_id_format() -> Self {
        Self::InvalidIdFormat
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation {
            fields: errors.into_map(),
        }
    }
}

impl From<CategoryErrorReason> for ErrorReason {
    fn from(value: CategoryErrorReason) -> Self {
        Self::Category(value)
    }
}

impl From<FieldErrors> for ErrorReason {
    fn from(value: FieldErrors) -> Self {
        Self::validation(value)
    }
}



/// A JSON-serializable model containing a single field named `reason` ([`ErrorReason`]).
///
/// This type is used when responding with strongly-typed error reasons,
/// **do not use directly in endpoint code**, use the endpoint response builder
/// with its `with_error_reason` method instead.
#[derive(Serialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[cfg_attr(
    feature = "serde_impls_for_client_on_models",
    derive(serde::Deserialize)
)]
pub struct ResponseWithErrorReason {
    pub reason: ErrorReason,
}

impl ResponseWithErrorReason {
    #[inline]
    pub fn new<R>(reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        Self {
            reason: reason.into(),
        }
    }
}
