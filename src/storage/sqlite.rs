//! Local SQLite backend (sqlx).

use super::{Database, Row, Statement, StorageError, Value};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row as _, Sqlite, TypeInfo, ValueRef};
use std::str::FromStr;

/// A single pooled connection, so the handle behaves like one shared connection and an
/// in-memory database lives as long as the handle does.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }
}

fn bind_args<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(v) => query.bind(*v),
            Value::Real(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.as_str()),
            Value::Blob(v) => query.bind(v.as_slice()),
        };
    }
    query
}

fn decode_row(row: &SqliteRow) -> Result<Row, StorageError> {
    let mut values = Vec::with_capacity(row.len());
    for index in 0..row.len() {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            values.push(Value::Null);
            continue;
        }
        let type_name = raw.type_info().name().to_string();
        let value = match type_name.as_str() {
            "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get::<i64, _>(index)?),
            "REAL" => Value::Real(row.try_get::<f64, _>(index)?),
            "BLOB" => Value::Blob(row.try_get::<Vec<u8>, _>(index)?),
            _ => Value::Text(row.try_get::<String, _>(index)?),
        };
        values.push(value);
    }
    Ok(Row::new(values))
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn execute(&self, stmt: Statement) -> Result<u64, StorageError> {
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "sqlite execute");
        let result = bind_args(sqlx::query(&stmt.sql), &stmt.args)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn query(&self, stmt: Statement) -> Result<Vec<Row>, StorageError> {
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "sqlite query");
        let rows = bind_args(sqlx::query(&stmt.sql), &stmt.args)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute_batch(&self, stmts: Vec<Statement>) -> Result<u64, StorageError> {
        tracing::debug!(statements = stmts.len(), "sqlite batch");
        let mut tx = self.pool.begin().await?;
        let mut affected = 0;
        for stmt in &stmts {
            // Dropping `tx` on error rolls the transaction back.
            affected += bind_args(sqlx::query(&stmt.sql), &stmt.args)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;
        Ok(affected)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
