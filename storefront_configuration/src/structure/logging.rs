use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::{traits::TryResolve, LoggingConfigurationError, MissingLoggingDirectoryCreationError};


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    log_file_output_directory: String,
}


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}


fn validate_tracing_filter(
    filter: &str,
    kind: &'static str,
) -> Result<(), LoggingConfigurationError> {
    EnvFilter::try_new(filter)
        .map(|_| ())
        .map_err(|error| LoggingConfigurationError::InvalidTracingFilter {
            invalid_filter: filter.to_string(),
            kind: kind.into(),
            error,
        })
}

impl TryResolve for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Error = LoggingConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        validate_tracing_filter(
            &self.console_output_level_filter,
            "console_output_level_filter",
        )?;

        validate_tracing_filter(
            &self.log_file_output_level_filter,
            "log_file_output_level_filter",
        )?;

        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory: PathBuf::from(self.log_file_output_directory),
        })
    }
}


impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> EnvFilter {
        // PANIC SAFETY: This is safe because we checked that the input is valid in `try_resolve`.
        EnvFilter::try_new(&self.console_output_level_filter).unwrap()
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        // PANIC SAFETY: This is safe because we checked that the input is valid in `try_resolve`.
        EnvFilter::try_new(&self.log_file_output_level_filter).unwrap()
    }

    pub fn create_log_file_output_directory_if_missing(
        &self,
    ) -> Result<(), MissingLoggingDirectoryCreationError> {
        let directory_path = &self.log_file_output_directory;

        if directory_path.exists() && !directory_path.is_dir() {
            return Err(MissingLoggingDirectoryCreationError::NotADirectory {
                path: directory_path.clone(),
            });
        }

        std::fs::create_dir_all(directory_path).map_err(|error| {
            MissingLoggingDirectoryCreationError::UnableToCreateDirectory {
                directory_path: directory_path.clone(),
                error,
            }
        })
    }
}
