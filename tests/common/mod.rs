use std::sync::Arc;
use turso_crud_example::domain::model::{BookModel, StudentModel};
use turso_crud_example::storage::schema::ensure_tables;
use turso_crud_example::storage::sqlite::SqliteDatabase;
use turso_crud_example::transport;

/// Starts the real router over a fresh in-memory database on an ephemeral port and
/// returns its base URL.
pub async fn spawn_app() -> Result<String, Box<dyn std::error::Error>> {
    let db = SqliteDatabase::connect("sqlite::memory:").await?;
    ensure_tables(&db, &[&BookModel, &StudentModel]).await?;

    let router = transport::http::create_router(transport::http::AppState::new(Arc::new(db)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}
