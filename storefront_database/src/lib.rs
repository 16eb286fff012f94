//! Persistence for the catalog: entity models, PostgreSQL queries and mutations,
//! and the [`CatalogStore`][store::CatalogStore] abstraction the HTTP layer talks to.

use std::borrow::Cow;

use sqlx::{migrate::MigrateError, PgPool};
use thiserror::Error;

pub mod entities;
pub mod seed;
pub mod store;



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("database inconsistency: {}", .problem)]
    DatabaseInconsistencyError { problem: Cow<'static, str> },
}

impl QueryError {
    pub fn database_inconsistency<R>(problem: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::DatabaseInconsistencyError {
            problem: problem.into(),
        }
    }

    /// Returns `true` if this is a PostgreSQL unique constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::SqlxError {
                error: sqlx::Error::Database(database_error),
            } => database_error.is_unique_violation(),
            _ => false,
        }
    }

    /// Returns `true` if this is a PostgreSQL foreign key violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::SqlxError {
                error: sqlx::Error::Database(database_error),
            } => database_error.is_foreign_key_violation(),
            _ => false,
        }
    }
}



pub type QueryResult<R, E = QueryError> = Result<R, E>;



pub trait IntoExternalModel {
    type ExternalModel;

    fn into_external_model(self) -> Self::ExternalModel;
}



/// Applies all embedded migrations (`storefront_database/migrations`) that
/// have not yet been applied to the database.
pub async fn apply_pending_migrations(database_pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(database_pool).await
}
