pub use reqwest::{header, Method, StatusCode};
pub use serde_json::{json, Value};
pub use storefront_core::api_models::*;
pub use storefront_core::ids::{CategoryId, ProductId};
pub use storefront_core::policy::CategoryDeletionPolicy;
pub use storefront_configuration::CatalogConfiguration;

pub use super::sample_categories::*;
pub use super::sample_products::*;
pub use super::server::{TestRequestBuilder, TestServer};
pub use super::TestResponse;
