use std::{net::TcpListener, time::Duration};

use actix_web::{dev::Server, HttpServer};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use storefront_configuration::DatabaseConfiguration;

pub mod api;
pub mod cli;
pub mod logging;
pub mod state;

use crate::api::{api_router, json_extractor_config};
use crate::state::ApplicationState;


pub async fn establish_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, sqlx::Error> {
    let mut connection_options = PgConnectOptions::new_without_pgpass()
        .application_name(&format!(
            "storefront-backend_v{}",
            env!("CARGO_PKG_VERSION")
        ))
        .statement_cache_capacity(
            database_configuration
                .statement_cache_capacity
                .unwrap_or(200),
        )
        .host(&database_configuration.host)
        .port(database_configuration.port)
        .username(&database_configuration.username)
        .database(&database_configuration.database_name);

    if let Some(password) = &database_configuration.password {
        connection_options = connection_options.password(password.as_str());
    }


    PgPoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .min_connections(1)
        .max_connections(10)
        .test_before_acquire(true)
        .connect_with(connection_options)
        .await
}


/// Sets up the actix HTTP server on an already-bound `listener`.
///
/// The returned [`Server`] does nothing until it is awaited (or spawned).
pub fn start_http_server(state: ApplicationState, listener: TcpListener) -> std::io::Result<Server> {
    #[rustfmt::skip]
    let server = HttpServer::new(move || {
        // FIXME Modify permissive CORS to something more safe in production.
        let cors = actix_cors::Cors::permissive().expose_headers(vec![
            "Date",
            "Content-Type",
            "Content-Length",
        ]);

        actix_web::App::new()
            .wrap(actix_web::middleware::NormalizePath::trim())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(json_extractor_config())
            .app_data(state.clone())
            .service(api_router())
    })
        .listen(listener)?
        .run();

    Ok(server)
}
