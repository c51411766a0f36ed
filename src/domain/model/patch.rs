//! Tri-state field used by partial updates.
//!
//! In a JSON body a missing key deserializes to [`Patch::Absent`] (the field must carry
//! `#[serde(default)]`), an explicit `null` to [`Patch::Null`], and anything else to
//! [`Patch::Value`].

use super::validation::ValidationError;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Merge for a NOT NULL column: `Null` is rejected.
    pub fn merge_required(self, current: T, field: &'static str) -> Result<T, ValidationError> {
        match self {
            Patch::Absent => Ok(current),
            Patch::Null => Err(ValidationError::NullField { field }),
            Patch::Value(v) => Ok(v),
        }
    }

    /// Merge for a nullable column: `Null` clears it.
    pub fn merge_optional(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
