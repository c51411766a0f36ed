pub mod app;
pub mod console;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{AppError, BookService, ConflictCause, StudentService, UserService};
pub use domain::model::{Book, BookPatch, Patch, Student, StudentPatch, User};
pub use infra::config::{Config, DatabaseConfig};
pub use storage::{Database, SharedDatabase, Statement, StorageError};
