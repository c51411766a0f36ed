use super::patch::Patch;
use super::validation::{validate_id, ValidationError};
use crate::storage::{Row, StorageError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of `books`. Also the create payload: the caller assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: Option<i64>,
}

pub(crate) const BOOK_COLUMNS: &str = "id, title, author, year";

impl Book {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)
    }

    /// Maps a `SELECT id, title, author, year` row.
    pub fn from_row(row: &Row) -> Result<Self, StorageError> {
        Ok(Self {
            id: row.get_i64(0)?,
            title: row.get_text(1)?,
            author: row.get_text(2)?,
            year: row.get_opt_i64(3)?,
        })
    }

    /// Applies a partial update; fields the patch leaves absent keep their value.
    pub fn merge(self, patch: BookPatch) -> Result<Self, ValidationError> {
        Ok(Self {
            id: self.id,
            title: patch.title.merge_required(self.title, "title")?,
            author: patch.author.merge_required(self.author, "author")?,
            year: patch.year.merge_optional(self.year),
        })
    }
}

/// Body of `PUT /books/{id}`. `"year": null` clears the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookPatch {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub author: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub year: Patch<i64>,
}
