use serde::Deserialize;
use storefront_core::policy::CategoryDeletionPolicy;

use crate::{traits::TryResolve, CatalogConfigurationError};


const DEFAULT_VALIDATION_FAILURE_STATUS_CODE: u16 = 422;

fn default_validation_failure_status_code() -> u16 {
    DEFAULT_VALIDATION_FAILURE_STATUS_CODE
}


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedCatalogConfiguration {
    #[serde(default)]
    category_deletion_policy: CategoryDeletionPolicy,

    #[serde(default = "default_validation_failure_status_code")]
    validation_failure_status_code: u16,
}

impl Default for UnresolvedCatalogConfiguration {
    fn default() -> Self {
        Self {
            category_deletion_policy: CategoryDeletionPolicy::default(),
            validation_failure_status_code: DEFAULT_VALIDATION_FAILURE_STATUS_CODE,
        }
    }
}


/// Catalog behaviour that is a product decision rather than a fixed contract.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CatalogConfiguration {
    /// What happens to a category's products when the category is deleted.
    pub category_deletion_policy: CategoryDeletionPolicy,

    /// HTTP status code used for responses to requests that fail field validation.
    pub validation_failure_status_code: u16,
}

impl Default for CatalogConfiguration {
    fn default() -> Self {
        Self {
            category_deletion_policy: CategoryDeletionPolicy::default(),
            validation_failure_status_code: DEFAULT_VALIDATION_FAILURE_STATUS_CODE,
        }
    }
}

impl TryResolve for UnresolvedCatalogConfiguration {
    type Resolved = CatalogConfiguration;
    type Error = CatalogConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        if !(400..=499).contains(&self.validation_failure_status_code) {
            return Err(
                CatalogConfigurationError::InvalidValidationFailureStatusCode {
                    status_code: self.validation_failure_status_code,
                },
            );
        }

        Ok(CatalogConfiguration {
            category_deletion_policy: self.category_deletion_policy,
            validation_failure_status_code: self.validation_failure_status_code,
        })
    }
}
