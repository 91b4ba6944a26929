//! Database connection management
//!
//! This module provides the SQLite connection wrapper used as the live
//! session for schema installation and validation.

use super::session::{DatabaseSession, SqlRow, SqlValue};
use anyhow::{anyhow, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Core database connection wrapper
///
/// `DatabaseConn` provides a thin wrapper around SQLite connections,
/// handling both file-based and in-memory databases with consistent
/// configuration and error handling.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Open a database at the specified path
    ///
    /// If the path is `None`, an in-memory database is created.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p)
                .map_err(|e| anyhow!("Failed to open database at '{}': {}", p, e))?,
            None => Connection::open_in_memory()
                .map_err(|e| anyhow!("Failed to create in-memory database: {}", e))?,
        };

        let db = DatabaseConn { conn };
        db.configure()?;
        Ok(db)
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> Result<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    fn configure(&self) -> Result<()> {
        // in-memory databases answer "memory" here, which is fine
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|e| anyhow!("Failed to set journal mode: {}", e))?;

        self.conn
            .execute("PRAGMA synchronous=NORMAL", [])
            .map_err(|e| anyhow!("Failed to set synchronous mode: {}", e))?;

        self.conn
            .execute("PRAGMA temp_store=MEMORY", [])
            .map_err(|e| anyhow!("Failed to set temp store: {}", e))?;

        // Foreign keys must be enforced so that drop order matters the same
        // way it does on server engines
        self.conn
            .execute("PRAGMA foreign_keys=ON", [])
            .map_err(|e| anyhow!("Failed to enable foreign keys: {}", e))?;

        Ok(())
    }
}

impl DatabaseSession for DatabaseConn {
    fn execute(&self, sql: &str) -> Result<usize> {
        self.conn
            .execute(sql, [])
            .map_err(|e| anyhow!("Failed to execute SQL: {}", e))
    }

    fn query_rows(&self, sql: &str, params: &[&str]) -> Result<Vec<SqlRow>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| anyhow!("Failed to prepare query: {}", e))?;
        let width = stmt.column_count();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i).map(SqlValue::from))
                    .collect::<rusqlite::Result<SqlRow>>()
            })
            .map_err(|e| anyhow!("Failed to run query: {}", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| anyhow!("Failed to read query rows: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = DatabaseConn::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemata.sqlite3");
        let db = DatabaseConn::open_path(path.to_str().unwrap()).unwrap();
        db.execute("CREATE TABLE test (id INTEGER PRIMARY KEY)")
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_query_rows_with_params() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute("CREATE TABLE kv (k TEXT NOT NULL, v INTEGER)")
            .unwrap();
        db.execute("INSERT INTO kv (k, v) VALUES ('a', 1), ('b', NULL)")
            .unwrap();

        let rows = db
            .query_rows("SELECT k, v FROM kv WHERE k = ?1", &["a"])
            .unwrap();
        assert_eq!(
            rows,
            vec![vec![SqlValue::Text("a".to_string()), SqlValue::Integer(1)]]
        );

        let rows = db.query_rows("SELECT v FROM kv WHERE k = 'b'", &[]).unwrap();
        assert!(rows[0][0].is_null());
    }

    #[test]
    fn test_execute_failure_is_error() {
        let db = DatabaseConn::open_in_memory().unwrap();
        assert!(db.execute("DROP TABLE missing").is_err());
    }
}
