//! Remote libSQL/Turso backend over the `libsql` client.
//!
//! The [`libsql::Database`] is the process-wide handle; every call opens a fresh
//! [`libsql::Connection`] from it, so a batch's transaction never shares a stream with
//! concurrent requests.

use super::{Database, Row, Statement, StorageError, Value};
use async_trait::async_trait;
use libsql::params::Params;
use libsql::Builder;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn is_remote_url(url: &str) -> bool {
    ["libsql://", "https://", "http://", "wss://", "ws://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// The client speaks HTTP; websocket URLs are mapped onto the same host.
fn http_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{}", rest)
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{}", rest)
    } else {
        url.to_string()
    }
}

pub struct RemoteDatabase {
    db: libsql::Database,
    closed: AtomicBool,
}

impl RemoteDatabase {
    pub async fn connect(url: &str, auth_token: &str) -> Result<Self, StorageError> {
        if !is_remote_url(url) {
            return Err(StorageError::UnsupportedUrl(url.to_string()));
        }
        let db = Builder::new_remote(http_url(url), auth_token.to_string())
            .build()
            .await?;
        Ok(Self {
            db,
            closed: AtomicBool::new(false),
        })
    }

    fn connection(&self) -> Result<libsql::Connection, StorageError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(self.db.connect()?)
    }
}

fn params(args: Vec<Value>) -> Params {
    Params::Positional(args.into_iter().map(libsql::Value::from).collect())
}

impl From<Value> for libsql::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => libsql::Value::Null,
            Value::Integer(i) => libsql::Value::Integer(i),
            Value::Real(f) => libsql::Value::Real(f),
            Value::Text(s) => libsql::Value::Text(s),
            Value::Blob(b) => libsql::Value::Blob(b),
        }
    }
}

impl From<libsql::Value> for Value {
    fn from(v: libsql::Value) -> Self {
        match v {
            libsql::Value::Null => Value::Null,
            libsql::Value::Integer(i) => Value::Integer(i),
            libsql::Value::Real(f) => Value::Real(f),
            libsql::Value::Text(s) => Value::Text(s),
            libsql::Value::Blob(b) => Value::Blob(b),
        }
    }
}

async fn execute_all(conn: &libsql::Connection, stmts: Vec<Statement>) -> Result<u64, StorageError> {
    let mut affected = 0;
    for stmt in stmts {
        affected += conn.execute(&stmt.sql, params(stmt.args)).await?;
    }
    Ok(affected)
}

#[async_trait]
impl Database for RemoteDatabase {
    async fn execute(&self, stmt: Statement) -> Result<u64, StorageError> {
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "libsql execute");
        let conn = self.connection()?;
        Ok(conn.execute(&stmt.sql, params(stmt.args)).await?)
    }

    async fn query(&self, stmt: Statement) -> Result<Vec<Row>, StorageError> {
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "libsql query");
        let conn = self.connection()?;
        let mut rows = conn.query(&stmt.sql, params(stmt.args)).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            let values = (0..row.column_count())
                .map(|i| row.get_value(i).map(Value::from))
                .collect::<Result<Vec<_>, _>>()?;
            out.push(Row::new(values));
        }
        Ok(out)
    }

    async fn execute_batch(&self, stmts: Vec<Statement>) -> Result<u64, StorageError> {
        tracing::debug!(statements = stmts.len(), "libsql batch");
        let conn = self.connection()?;
        let tx = conn.transaction().await?;
        match execute_all(&tx, stmts).await {
            Ok(affected) => {
                tx.commit().await?;
                Ok(affected)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!("rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_schemes_are_recognized() {
        assert!(is_remote_url("libsql://db-org.turso.io"));
        assert!(is_remote_url("https://db-org.turso.io"));
        assert!(is_remote_url("ws://127.0.0.1:8080"));
        assert!(!is_remote_url("sqlite::memory:"));
        assert!(!is_remote_url("postgres://localhost/db"));
    }

    #[test]
    fn websocket_urls_map_to_http() {
        assert_eq!(http_url("wss://db.turso.io"), "https://db.turso.io");
        assert_eq!(http_url("ws://127.0.0.1:8080"), "http://127.0.0.1:8080");
        assert_eq!(http_url("libsql://db.turso.io"), "libsql://db.turso.io");
    }

    #[test]
    fn values_map_to_and_from_libsql() {
        let values = vec![
            Value::Null,
            Value::Integer(7),
            Value::Real(1.5),
            Value::Text("Dune".into()),
            Value::Blob(vec![0, 1, 2]),
        ];
        let Params::Positional(wire) = params(values.clone()) else {
            panic!("positional params expected");
        };
        assert!(matches!(wire[1], libsql::Value::Integer(7)));
        let back: Vec<Value> = wire.into_iter().map(Value::from).collect();
        assert_eq!(back, values);
    }

    #[tokio::test]
    async fn closed_handle_rejects_calls_without_touching_the_network() {
        let db = RemoteDatabase::connect("http://127.0.0.1:9", "token")
            .await
            .unwrap();
        db.close().await;
        assert!(matches!(
            db.query(Statement::new("SELECT 1")).await,
            Err(StorageError::Closed)
        ));
        assert!(matches!(
            db.execute_batch(vec![Statement::new("DELETE FROM users")]).await,
            Err(StorageError::Closed)
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_storage_error() {
        let db = RemoteDatabase::connect("http://127.0.0.1:9", "token")
            .await
            .unwrap();
        assert!(matches!(
            db.query(Statement::new("SELECT 1")).await,
            Err(StorageError::Libsql(_))
        ));
    }
}
