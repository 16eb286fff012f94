use std::{net::TcpListener, sync::Arc};

use actix_web::web;
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use storefront::{
    cli::CLIArgs,
    establish_database_connection_pool,
    logging::initialize_tracing,
    start_http_server,
    state::ApplicationStateInner,
};
use storefront_configuration::Configuration;
use storefront_database::{
    apply_pending_migrations,
    seed::{
        seed_sample_catalog,
        DEFAULT_SAMPLE_CATEGORY_COUNT,
        DEFAULT_SAMPLE_PRODUCTS_PER_CATEGORY,
    },
    store::{CatalogStore, PostgresCatalogStore},
};
use tracing::info;



#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    configuration
        .logging
        .create_log_file_output_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to prepare the log file output directory.")?;

    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "storefront.log",
    )
    .into_diagnostic()
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = %configuration.configuration_file_path.display(),
        deletion_policy = configuration.catalog.category_deletion_policy.name(),
        validation_failure_status_code = configuration.catalog.validation_failure_status_code,
        "Configuration loaded."
    );


    // Initialize database connection and the catalog store.
    let database_pool = establish_database_connection_pool(&configuration.database)
        .await
        .into_diagnostic()
        .wrap_err("Failed to connect to the database.")?;

    if arguments.apply_pending_migrations {
        apply_pending_migrations(&database_pool)
            .await
            .into_diagnostic()
            .wrap_err("Failed to apply pending database migrations.")?;

        info!("Pending database migrations applied.");
    }

    let store: Arc<dyn CatalogStore> = Arc::new(PostgresCatalogStore::new(database_pool));

    if arguments.seed_sample_data {
        seed_sample_catalog(
            store.as_ref(),
            DEFAULT_SAMPLE_CATEGORY_COUNT,
            DEFAULT_SAMPLE_PRODUCTS_PER_CATEGORY,
        )
        .await
        .into_diagnostic()
        .wrap_err("Failed to seed sample data.")?;
    }


    let state = web::Data::new(ApplicationStateInner::new(
        configuration.catalog,
        store,
    ));


    // Initialize and start the actix HTTP server.
    let listener = TcpListener::bind((
        configuration.http.host.as_str(),
        configuration.http.port,
    ))
    .into_diagnostic()
    .wrap_err("Failed to bind the HTTP server address.")?;

    let server = start_http_server(state, listener)
        .into_diagnostic()
        .wrap_err("Failed to set up actix HTTP server.")?;

    info!(
        host = configuration.http.host.as_str(),
        port = configuration.http.port,
        "HTTP server initialized and running."
    );

    // Run HTTP server until stopped.
    server
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;


    drop(guard);

    Ok(())
}
