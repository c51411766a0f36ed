use super::patch::Patch;
use super::validation::{validate_email, validate_id, ValidationError};
use crate::storage::{Row, StorageError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of `students`. `email` is unique across all students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
}

pub(crate) const STUDENT_COLUMNS: &str = "id, name, email";

impl Student {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        validate_email(&self.email)
    }

    /// Maps a `SELECT id, name, email` row.
    pub fn from_row(row: &Row) -> Result<Self, StorageError> {
        Ok(Self {
            id: row.get_i64(0)?,
            name: row.get_text(1)?,
            email: row.get_text(2)?,
        })
    }

    pub fn merge(self, patch: StudentPatch) -> Result<Self, ValidationError> {
        if let Patch::Value(email) = &patch.email {
            validate_email(email)?;
        }
        Ok(Self {
            id: self.id,
            name: patch.name.merge_required(self.name, "name")?,
            email: patch.email.merge_required(self.email, "email")?,
        })
    }
}

/// Body of `PUT /students/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct StudentPatch {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,
}
