//! Database session abstraction
//!
//! Every schema operation talks to a live database through a [`DatabaseSession`].
//! The trait is deliberately small: run one statement, or run one query with
//! positional text parameters and collect the rows. Engine-specific SQL is
//! produced by the syntax providers, never by the session.

use anyhow::{anyhow, Result};
use rusqlite::types::Value;

/// A single cell returned by [`DatabaseSession::query_rows`]
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row
pub type SqlRow = Vec<SqlValue>;

impl SqlValue {
    /// Borrow the value as text, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Read the value as an integer, accepting numeric text
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(i) => Some(*i),
            SqlValue::Real(f) => Some(*f as i64),
            SqlValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Read the value as a boolean flag (non-zero is true)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                other => other.parse::<i64>().ok().map(|i| i != 0),
            },
            other => other.as_i64().map(|i| i != 0),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<Value> for SqlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(i),
            Value::Real(f) => SqlValue::Real(f),
            Value::Text(s) => SqlValue::Text(s),
            Value::Blob(b) => SqlValue::Blob(b),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

/// A live connection the schema engine can issue SQL against
///
/// Sessions are used from a single thread for the duration of one
/// install, uninstall or validate call.
pub trait DatabaseSession {
    /// Execute a single statement, returning the number of affected rows
    fn execute(&self, sql: &str) -> Result<usize>;

    /// Run a query with positional text parameters and collect every row
    fn query_rows(&self, sql: &str, params: &[&str]) -> Result<Vec<SqlRow>>;
}

/// Fetch a text cell from a row, failing with a descriptive error
pub fn text_at(row: &SqlRow, idx: usize) -> Result<String> {
    row.get(idx)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("Expected text value in column {} of {:?}", idx, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_accessors() {
        assert_eq!(SqlValue::from("abc").as_str(), Some("abc"));
        assert_eq!(SqlValue::Integer(3).as_str(), None);
        assert_eq!(SqlValue::Text(" 42 ".to_string()).as_i64(), Some(42));
        assert_eq!(SqlValue::Integer(0).as_bool(), Some(false));
        assert_eq!(SqlValue::Integer(1).as_bool(), Some(true));
        assert_eq!(SqlValue::from("True").as_bool(), Some(true));
        assert_eq!(SqlValue::Null.as_bool(), None);
        assert!(SqlValue::Null.is_null());
    }

    #[test]
    fn test_text_at() {
        let row = vec![SqlValue::from("node"), SqlValue::Integer(1)];
        assert_eq!(text_at(&row, 0).unwrap(), "node");
        assert!(text_at(&row, 1).is_err());
        assert!(text_at(&row, 5).is_err());
    }
}
