//! Endpoint errors and the response builder.
//!
//! An endpoint returning `Err(EndpointError)` is answered by [`ResponseError`]:
//! client errors carry an error reason body, internal errors are logged and
//! answered with an empty `500 Internal Server Error`.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use storefront_core::api_models::{ErrorReason, InvalidJsonBodyReason, ResponseWithErrorReason};
use storefront_core::price::PriceFormattingError;
use storefront_database::QueryError;
use thiserror::Error;
use tracing::error;



#[derive(Debug, Error)]
pub enum EndpointError {
    /*
     * Client errors.
     *
     * Exposed as a HTTP status code and a JSON body with an error reason.
     */
    MissingJsonBody,

    InvalidJsonBody {
        reason: InvalidJsonBodyReason,
    },

    InvalidIdFormat {
        #[source]
        error: ParseIntError,
    },

    /*
     * Server errors.
     *
     * Reasons are logged, but not shown externally.
     */
    InternalGenericError {
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    InternalDatabaseError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    InvalidDatabaseState {
        problem: Cow<'static, str>,
    },

    PriceFormattingError {
        #[from]
        #[source]
        error: PriceFormattingError,
    },
}

impl EndpointError {
    pub const fn missing_json_body() -> Self {
        Self::MissingJsonBody
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub fn internal_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InternalGenericError {
            error: Box::new(error),
        }
    }

    fn is_internal(&self) -> bool {
        !matches!(
            self,
            Self::MissingJsonBody | Self::InvalidJsonBody { .. } | Self::InvalidIdFormat { .. }
        )
    }
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJsonBody => {
                write!(f, "Expected a JSON body.")
            }
            Self::InvalidJsonBody { reason } => match reason {
                InvalidJsonBodyReason::NotJson => {
                    write!(f, "Invalid JSON body: not JSON.")
                }
                InvalidJsonBodyReason::InvalidData => {
                    write!(f, "Invalid JSON body: invalid data.")
                }
                InvalidJsonBodyReason::TooLarge => {
                    write!(f, "Invalid JSON body: too large.")
                }
            },
            Self::InvalidIdFormat { error } => {
                write!(f, "Invalid ID format: {}.", error)
            }
            Self::InternalGenericError { error } => {
                write!(f, "Internal server error (generic): {error:?}")
            }
            Self::InternalDatabaseError { error } => {
                write!(
                    f,
                    "Internal server error (database error): {error}."
                )
            }
            Self::InvalidDatabaseState { problem } => {
                write!(
                    f,
                    "Inconsistent internal database state: {}",
                    problem
                )
            }
            Self::PriceFormattingError { error } => {
                write!(f, "Internal server error (price formatting): {error}.")
            }
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingJsonBody => StatusCode::BAD_REQUEST,
            Self::InvalidJsonBody { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidIdFormat { .. } => StatusCode::BAD_REQUEST,
            Self::InternalGenericError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalDatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidDatabaseState { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PriceFormattingError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if self.is_internal() {
            error!(error = %self, "Endpoint failed with an internal error.");
        }

        let fallibly_built_response = match self {
            Self::MissingJsonBody => EndpointResponseBuilder::bad_request()
                .with_error_reason(ErrorReason::missing_json_body())
                .build(),
            Self::InvalidJsonBody { reason } => EndpointResponseBuilder::bad_request()
                .with_error_reason(ErrorReason::invalid_json_body(*reason))
                .build(),
            Self::InvalidIdFormat { .. } => EndpointResponseBuilder::bad_request()
                .with_error_reason(ErrorReason::invalid_id_format())
                .build(),
            _ => EndpointResponseBuilder::internal_server_error().build(),
        };


        fallibly_built_response.unwrap_or_else(|_| HttpResponse::InternalServerError().finish())
    }
}


impl From<QueryError> for EndpointError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::SqlxError { error } => Self::InternalDatabaseError { error },
            QueryError::DatabaseInconsistencyError { problem } => {
                Self::InvalidDatabaseState { problem }
            }
        }
    }
}



pub struct EndpointResponseBuilder {
    status_code: StatusCode,

    body: Option<Result<Vec<u8>, serde_json::Error>>,

    additional_headers: Vec<(HeaderName, HeaderValue)>,
}

impl EndpointResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            additional_headers: Vec::with_capacity(1),
        }
    }

    #[inline]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    #[inline]
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    #[inline]
    pub fn conflict() -> Self {
        Self::new(StatusCode::CONFLICT)
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    #[inline]
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_json_body<S>(mut self, data: S) -> Self
    where
        S: Serialize,
    {
        let body = serde_json::to_vec(&data);

        self.additional_headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ));

        Self {
            status_code: self.status_code,
            body: Some(body),
            additional_headers: self.additional_headers,
        }
    }

    /// Sets the body to `{"reason": <reason>}`.
    pub fn with_error_reason<R>(self, reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        self.with_json_body(ResponseWithErrorReason::new(reason))
    }

    pub fn build(self) -> Result<HttpResponse<BoxBody>, EndpointError> {
        let optional_body = match self.body {
            Some(body_or_error) => match body_or_error {
                Ok(body) => Some(body),
                Err(serialization_error) => {
                    return Err(EndpointError::internal_error(serialization_error))
                }
            },
            None => None,
        };


        let mut response_builder = HttpResponse::build(self.status_code);

        for (header_name, header_value) in self.additional_headers {
            response_builder.insert_header((header_name, header_value));
        }


        match optional_body {
            Some(body) => Ok(response_builder.body(body.boxed())),
            None => Ok(response_builder.body(().boxed())),
        }
    }
}



/// Short for [`Result`]`<`[`HttpResponse`]`, `[`EndpointError`]`>`, intended to be used in most
/// places in handlers of the storefront API.
pub type EndpointResult<Body = BoxBody> = Result<HttpResponse<Body>, EndpointError>;
