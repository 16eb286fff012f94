//! Tracing setup: console output plus a daily-rolling log file,
//! each with its own level filter.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
    Layer,
};


#[derive(Debug, Error)]
pub enum TracingInitializationError {
    #[error("failed to set the global tracing subscriber")]
    SubscriberInitializationError {
        #[from]
        #[source]
        error: TryInitError,
    },
}


/// Installs the global tracing subscriber.
///
/// The returned [`WorkerGuard`] flushes the log file writer when dropped,
/// so it must be kept alive for as long as logging is needed.
pub fn initialize_tracing<P>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: P,
    log_file_name_prefix: &str,
) -> Result<WorkerGuard, TracingInitializationError>
where
    P: AsRef<Path>,
{
    let file_appender =
        tracing_appender::rolling::daily(log_file_output_directory, log_file_name_prefix);
    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);


    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(console_level_filter);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking_file_writer)
        .with_filter(log_file_level_filter);


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
