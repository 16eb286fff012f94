use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod catalog;
mod database;
mod http;
mod logging;

pub use catalog::*;
pub use database::*;
pub use http::*;
pub use logging::*;

use crate::traits::{Resolve, TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Configuration related to the HTTP server.
    http: UnresolvedHttpConfiguration,

    /// Configuration related to the database.
    database: UnresolvedDatabaseConfiguration,

    /// Catalog behaviour (deletion policy, validation status code).
    #[serde(default)]
    catalog: UnresolvedCatalogConfiguration,
}


/// The entire storefront backend configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Where this configuration was read from.
    pub configuration_file_path: PathBuf,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Configuration related to the HTTP server.
    pub http: HttpConfiguration,

    /// Configuration related to the database.
    pub database: DatabaseConfiguration,

    /// Catalog behaviour.
    pub catalog: CatalogConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}


impl TryResolveWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let logging = self.logging.try_resolve()?;
        let http = self.http.resolve();
        let database = self.database.resolve();
        let catalog = self.catalog.try_resolve()?;

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            logging,
            http,
            database,
            catalog,
        })
    }
}


impl Configuration {
    /// Parse and resolve the configuration from a TOML string.
    ///
    /// `configuration_file_path` is only recorded, not read.
    pub fn load_from_string<S: AsRef<Path>>(
        configuration_string: &str,
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .map_err(|error| ConfigurationLoadingError::ParsingError { error })?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path: configuration_file_path.as_ref().to_path_buf(),
            })?;

        Ok(resolved_configuration)
    }

    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        let configuration_file_path = configuration_file_path.as_ref();

        let configuration_string = fs::read_to_string(configuration_file_path).map_err(|error| {
            ConfigurationLoadingError::UnableToReadConfigurationFile {
                path: configuration_file_path.to_path_buf(),
                error,
            }
        })?;

        let canonical_file_path = dunce::canonicalize(configuration_file_path)
            .unwrap_or_else(|_| configuration_file_path.to_path_buf());

        Self::load_from_string(&configuration_string, canonical_file_path)
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Configuration::load_from_path(get_default_configuration_file_path()?)
    }
}



#[cfg(test)]
mod test {
    use storefront_core::policy::CategoryDeletionPolicy;

    use super::*;
    use crate::CatalogConfigurationError;

    const BASE_CONFIGURATION: &str = r#"
[logging]
console_output_level_filter = "info"
log_file_output_level_filter = "debug,sqlx=warn"
log_file_output_directory = "./data/logs"

[http]
host = "127.0.0.1"
port = 8866

[database]
host = "localhost"
port = 5432
username = "storefront"
password = "storefront"
database_name = "storefront"
"#;

    #[test]
    fn loads_configuration_with_default_catalog_table() {
        let configuration =
            Configuration::load_from_string(BASE_CONFIGURATION, "configuration.toml").unwrap();

        assert_eq!(configuration.http.host, "127.0.0.1");
        assert_eq!(configuration.http.port, 8866);
        assert_eq!(configuration.database.database_name, "storefront");
        assert_eq!(configuration.database.statement_cache_capacity, None);
        assert_eq!(
            configuration.logging.log_file_output_directory,
            PathBuf::from("./data/logs")
        );

        assert_eq!(configuration.catalog, CatalogConfiguration::default());
        assert_eq!(
            configuration.catalog.category_deletion_policy,
            CategoryDeletionPolicy::Restrict
        );
        assert_eq!(configuration.catalog.validation_failure_status_code, 422);
    }

    #[test]
    fn loads_explicit_catalog_table() {
        let configuration_string = format!(
            "{}\n[catalog]\ncategory_deletion_policy = \"cascade\"\nvalidation_failure_status_code = 400\n",
            BASE_CONFIGURATION
        );

        let configuration =
            Configuration::load_from_string(&configuration_string, "configuration.toml").unwrap();

        assert_eq!(
            configuration.catalog.category_deletion_policy,
            CategoryDeletionPolicy::Cascade
        );
        assert_eq!(configuration.catalog.validation_failure_status_code, 400);
    }

    #[test]
    fn rejects_non_client_error_validation_status_code() {
        let configuration_string = format!(
            "{}\n[catalog]\nvalidation_failure_status_code = 200\n",
            BASE_CONFIGURATION
        );

        let error =
            Configuration::load_from_string(&configuration_string, "configuration.toml")
                .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::CatalogConfigurationError {
                    error: CatalogConfigurationError::InvalidValidationFailureStatusCode {
                        status_code: 200
                    }
                }
            }
        ));
    }

    #[test]
    fn rejects_unknown_deletion_policy() {
        let configuration_string = format!(
            "{}\n[catalog]\ncategory_deletion_policy = \"orphan\"\n",
            BASE_CONFIGURATION
        );

        let error =
            Configuration::load_from_string(&configuration_string, "configuration.toml")
                .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ParsingError { .. }
        ));
    }

    #[test]
    fn rejects_invalid_tracing_filter() {
        let configuration_string =
            BASE_CONFIGURATION.replace("debug,sqlx=warn", "sqlx=notalevel");

        let error =
            Configuration::load_from_string(&configuration_string, "configuration.toml")
                .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::LoggingConfigurationError { .. }
            }
        ));
    }

    #[test]
    fn reports_missing_configuration_file() {
        let error = Configuration::load_from_path("./this/path/does/not/exist.toml").unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::UnableToReadConfigurationFile { .. }
        ));
    }
}
