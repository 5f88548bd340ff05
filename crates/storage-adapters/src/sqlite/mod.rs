//! # SQLite store
//!
//! Maps the relational model onto the domain models. Ids are stored as 16-byte
//! UUID blobs, timestamps as RFC 3339 text.

mod admins;
mod articles;
mod personas;
mod settings;
mod sql;

use std::str::FromStr;

use domains::DomainError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{error, info};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects (creating the database file if needed) and runs pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_error)?
            .create_if_missing(true)
            .foreign_keys(true);

        if let Some(dir) = options.get_filename().parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DomainError::Internal(format!("cannot create {}: {e}", dir.display()))
                })?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        Self::migrate(pool, url).await
    }

    /// A private database living as long as the store. Single connection, since
    /// every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(db_error)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        Self::migrate(pool, "sqlite::memory:").await
    }

    async fn migrate(pool: SqlitePool, url: &str) -> Result<Self, DomainError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::Internal(format!("failed to run migrations: {e}")))?;

        info!(backend = "sqlite", url = %url, "database connected");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Translates driver errors: constraint violations become domain errors the
/// API can report, everything else is an internal failure.
fn db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::Conflict(db.message().to_string())
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            DomainError::ValidationError("referenced persona does not exist".to_string())
        }
        _ => {
            error!(error = %err, "database error");
            DomainError::Internal(err.to_string())
        }
    }
}

/// Enum columns are written by this crate only, so a bad value means corruption.
fn parse_column<T>(column: &str, raw: &str) -> Result<T, DomainError>
where
    T: FromStr,
{
    raw.parse()
        .map_err(|_| DomainError::Internal(format!("invalid value '{raw}' in column {column}")))
}
