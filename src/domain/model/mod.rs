//! Record types, partial-update overlays and table definitions.

pub mod book;
pub mod patch;
pub mod student;
pub mod tables;
pub mod user;
pub mod validation;

pub use book::{Book, BookPatch};
pub use patch::Patch;
pub use student::{Student, StudentPatch};
pub use tables::{BookModel, StudentModel, UserModel};
pub use user::User;
pub use validation::ValidationError;

/// Contract for a table the service owns.
///
/// Each implementation provides its table name and an idempotent
/// `CREATE TABLE IF NOT EXISTS` statement run by the schema initializer at startup.
pub trait TableModel: Send + Sync {
    /// Returns the name of the database table for this model.
    fn table_name(&self) -> &str;

    /// Returns the SQL CREATE TABLE statement for this model.
    fn get_create_table_sql(&self) -> &str;
}
