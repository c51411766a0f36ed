// src/bin/api_server.rs

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use turso_crud_example::domain::model::{BookModel, StudentModel};
use turso_crud_example::infra::logging::init_tracing;
use turso_crud_example::storage::{self, schema};
use turso_crud_example::transport;
use turso_crud_example::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing("info,tower_http=debug")?;

    // --- Configuration (fails fast when credentials are missing) ---
    let config = Config::from_env()?;

    // --- Connection + schema ---
    tracing::info!(url = %config.database.url, "connecting to database");
    let db = storage::connect(&config.database).await?;
    schema::ensure_tables(db.as_ref(), &[&BookModel, &StudentModel]).await?;

    // --- API Server Initialization ---
    let app_state = transport::http::AppState::new(db.clone());
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("API server listening on http://{}", config.bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    db.close().await;
    tracing::info!("database handle closed");
    Ok(())
}
