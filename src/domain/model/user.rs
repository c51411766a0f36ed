use crate::storage::{Row, StorageError};
use std::fmt;

/// A row of the playground `users` table. `name` and `email` are nullable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub(crate) const USER_COLUMNS: &str = "id, name, email";

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    pub fn from_row(row: &Row) -> Result<Self, StorageError> {
        Ok(Self {
            id: row.get_i64(0)?,
            name: row.get_opt_text(1)?,
            email: row.get_opt_text(2)?,
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} | name={} | email={}",
            self.id,
            self.name.as_deref().unwrap_or("None"),
            self.email.as_deref().unwrap_or("None")
        )
    }
}
