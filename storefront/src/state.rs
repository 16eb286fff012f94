//! State shared by all endpoint handlers.

use std::sync::Arc;

use actix_web::{http::StatusCode, web::Data};
use storefront_configuration::CatalogConfiguration;
use storefront_database::store::CatalogStore;


/// Everything endpoint handlers share. Handlers extract it as [`ApplicationState`].
pub struct ApplicationStateInner {
    /// Catalog behaviour the server was configured with.
    pub catalog: CatalogConfiguration,

    /// Where categories and products live.
    pub store: Arc<dyn CatalogStore>,
}

impl ApplicationStateInner {
    pub fn new(catalog: CatalogConfiguration, store: Arc<dyn CatalogStore>) -> Self {
        Self { catalog, store }
    }

    /// Status code of responses to requests that fail field validation.
    pub fn validation_failure_status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.catalog.validation_failure_status_code)
            .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY)
    }
}


/// [`ApplicationStateInner`] as registered with `App::app_data`.
pub type ApplicationState = Data<ApplicationStateInner>;
