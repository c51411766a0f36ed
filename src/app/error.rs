use crate::domain::model::ValidationError;
use crate::storage::StorageError;
use std::fmt;

/// Which uniqueness rule a write ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCause {
    IdExists,
    EmailExists,
}

impl fmt::Display for ConflictCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictCause::IdExists => f.write_str("id"),
            ConflictCause::EmailExists => f.write_str("email"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("{resource} with this {cause} already exists")]
    Conflict {
        resource: &'static str,
        cause: ConflictCause,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Translates a write failure: unique-constraint violations on `id` / `email` are the
    /// authoritative conflict signal, everything else stays a storage failure.
    pub fn from_write(resource: &'static str, err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { ref column, .. } if column == "id" => {
                AppError::Conflict {
                    resource,
                    cause: ConflictCause::IdExists,
                }
            }
            StorageError::UniqueViolation { ref column, .. } if column == "email" => {
                AppError::Conflict {
                    resource,
                    cause: ConflictCause::EmailExists,
                }
            }
            other => AppError::Storage(other),
        }
    }
}
