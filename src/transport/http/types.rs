use crate::app::{BookService, StudentService};
use crate::storage::SharedDatabase;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub db: SharedDatabase,
    pub books: BookService,
    pub students: StudentService,
}

impl AppState {
    /// All handlers share the one database handle.
    pub fn new(db: SharedDatabase) -> Self {
        Self {
            books: BookService::new(db.clone()),
            students: StudentService::new(db.clone()),
            db,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable kind: `not_found`, `conflict`, `validation_error`, `internal_error`.
    pub error: String,
    pub detail: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RootResponse {
    pub ok: bool,
    pub msg: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
