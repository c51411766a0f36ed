//! Backend-neutral statement, value and row types.

use super::StorageError;

/// A single SQLite value as it travels to and from the database.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// SQL text plus positional (`?`) arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// One result row; columns are addressed by position, in SELECT order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get_i64(&self, index: usize) -> Result<i64, StorageError> {
        match self.values.get(index) {
            Some(Value::Integer(v)) => Ok(*v),
            other => Err(decode_error(index, "integer", other)),
        }
    }

    pub fn get_opt_i64(&self, index: usize) -> Result<Option<i64>, StorageError> {
        match self.values.get(index) {
            Some(Value::Null) => Ok(None),
            Some(Value::Integer(v)) => Ok(Some(*v)),
            other => Err(decode_error(index, "integer or null", other)),
        }
    }

    pub fn get_text(&self, index: usize) -> Result<String, StorageError> {
        match self.values.get(index) {
            Some(Value::Text(v)) => Ok(v.clone()),
            other => Err(decode_error(index, "text", other)),
        }
    }

    pub fn get_opt_text(&self, index: usize) -> Result<Option<String>, StorageError> {
        match self.values.get(index) {
            Some(Value::Null) => Ok(None),
            Some(Value::Text(v)) => Ok(Some(v.clone())),
            other => Err(decode_error(index, "text or null", other)),
        }
    }
}

fn decode_error(index: usize, expected: &'static str, got: Option<&Value>) -> StorageError {
    StorageError::Decode {
        index,
        expected,
        got: got.map(Value::type_name).unwrap_or("missing column"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_collects_positional_args() {
        let stmt = Statement::new("UPDATE books SET year = ? WHERE id = ?")
            .bind(None::<i64>)
            .bind(7_i64);
        assert_eq!(stmt.args, vec![Value::Null, Value::Integer(7)]);
    }

    #[test]
    fn typed_getters_reject_mismatches() {
        let row = Row::new(vec![Value::Integer(1), Value::Null, Value::Text("x".into())]);
        assert_eq!(row.get_i64(0).unwrap(), 1);
        assert_eq!(row.get_opt_i64(1).unwrap(), None);
        assert_eq!(row.get_text(2).unwrap(), "x");

        let err = row.get_text(0).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Decode { index: 0, got: "integer", .. }
        ));
        assert!(matches!(
            row.get_i64(9).unwrap_err(),
            StorageError::Decode { got: "missing column", .. }
        ));
    }
}
