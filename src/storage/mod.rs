//! Storage layer: one shared database handle behind the [`Database`] trait.
//!
//! Two backends implement it:
//! - [`remote::RemoteDatabase`]: a remote libSQL/Turso database reached through the
//!   `libsql` client (`libsql://`, `https://`, `http://`, `wss://`, `ws://` URLs).
//! - [`sqlite::SqliteDatabase`]: a local SQLite database through sqlx (`sqlite:` URLs),
//!   used for development and tests.

pub mod remote;
pub mod schema;
pub mod sqlite;
mod value;

pub use value::{Row, Statement, Value};

use crate::infra::config::DatabaseConfig;
use async_trait::async_trait;
use std::sync::Arc;

pub type SharedDatabase = Arc<dyn Database>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A UNIQUE / PRIMARY KEY constraint rejected the write.
    #[error("UNIQUE constraint failed: {table}.{column}")]
    UniqueViolation { table: String, column: String },

    #[error("sqlite error: {0}")]
    Sqlite(sqlx::Error),

    #[error("libsql error: {0}")]
    Libsql(libsql::Error),

    #[error("database handle is closed")]
    Closed,

    #[error("unsupported database url '{0}' (expected libsql://, http(s)://, ws(s):// or sqlite:)")]
    UnsupportedUrl(String),

    #[error("column {index}: expected {expected}, got {got}")]
    Decode {
        index: usize,
        expected: &'static str,
        got: &'static str,
    },
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(violation) = parse_unique_violation(db_err.message()) {
                return violation;
            }
        }
        StorageError::Sqlite(err)
    }
}

impl From<libsql::Error> for StorageError {
    fn from(err: libsql::Error) -> Self {
        parse_unique_violation(&err.to_string()).unwrap_or(StorageError::Libsql(err))
    }
}

/// Recognizes SQLite's `UNIQUE constraint failed: <table>.<column>` message, which both
/// backends surface verbatim (the remote one wrapped in the server's error text).
///
/// For composite keys only the first column is reported.
pub fn parse_unique_violation(message: &str) -> Option<StorageError> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = message.find(MARKER)? + MARKER.len();
    let rest = &message[start..];
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(rest.len());
    let target = &rest[..end];
    let (table, column) = target.split_once('.')?;
    if table.is_empty() || column.is_empty() {
        return None;
    }
    Some(StorageError::UniqueViolation {
        table: table.to_string(),
        column: column.to_string(),
    })
}

/// The narrow call interface every caller goes through.
#[async_trait]
pub trait Database: Send + Sync {
    /// Runs a single write statement and returns the number of rows it changed.
    async fn execute(&self, stmt: Statement) -> Result<u64, StorageError>;

    /// Runs a single read statement and returns every row.
    async fn query(&self, stmt: Statement) -> Result<Vec<Row>, StorageError>;

    /// Runs the statements in one transaction: either all apply or none do.
    /// Returns the total number of rows changed.
    async fn execute_batch(&self, stmts: Vec<Statement>) -> Result<u64, StorageError>;

    /// Releases the handle. Further calls fail.
    async fn close(&self);

    async fn query_one(&self, stmt: Statement) -> Result<Option<Row>, StorageError> {
        Ok(self.query(stmt).await?.into_iter().next())
    }
}

/// Opens the process-wide handle and verifies it with `SELECT 1`, so bad credentials or an
/// unreachable endpoint fail at startup instead of on the first request.
pub async fn connect(config: &DatabaseConfig) -> Result<SharedDatabase, StorageError> {
    let url = config.url.trim();
    let db: SharedDatabase = if url.starts_with("sqlite:") {
        Arc::new(sqlite::SqliteDatabase::connect(url).await?)
    } else if remote::is_remote_url(url) {
        Arc::new(remote::RemoteDatabase::connect(url, &config.auth_token).await?)
    } else {
        return Err(StorageError::UnsupportedUrl(url.to_string()));
    };

    db.query(Statement::new("SELECT 1")).await?;
    tracing::info!(backend = backend_name(url), "database connection established");
    Ok(db)
}

fn backend_name(url: &str) -> &'static str {
    if url.starts_with("sqlite:") {
        "sqlite"
    } else {
        "libsql"
    }
}
