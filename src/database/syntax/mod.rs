//! Engine-specific SQL syntax
//!
//! A [`SqlSyntaxProvider`] knows how to introspect a live database of one
//! engine (tables, columns, indexes, constraints) and how to generate the DDL
//! that installs or drops a [`TableDefinition`] on it.
//!
//! ```text
//! syntax/
//! ├── sqlite     # full introspection, parses named constraints from stored DDL
//! ├── sqlserver  # INFORMATION_SCHEMA + sys.indexes
//! └── mysql      # information_schema, no reliable constraint naming
//! ```

mod mysql;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlSyntaxProvider;
pub use sqlite::SqliteSyntaxProvider;
pub use sqlserver::SqlServerSyntaxProvider;

use crate::database::core::{text_at, DatabaseSession};
use crate::database::schema::{ColumnDefinition, ColumnType, IndexDefinition, TableDefinition};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Supported database engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Sqlite,
    SqlServer,
    MySql,
}

impl DatabaseEngine {
    pub fn all() -> Vec<DatabaseEngine> {
        vec![
            DatabaseEngine::Sqlite,
            DatabaseEngine::SqlServer,
            DatabaseEngine::MySql,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatabaseEngine::Sqlite => "sqlite",
            DatabaseEngine::SqlServer => "sqlserver",
            DatabaseEngine::MySql => "mysql",
        }
    }

    /// The syntax provider for this engine
    pub fn syntax_provider(&self) -> Box<dyn SqlSyntaxProvider> {
        match self {
            DatabaseEngine::Sqlite => Box::new(SqliteSyntaxProvider),
            DatabaseEngine::SqlServer => Box::new(SqlServerSyntaxProvider),
            DatabaseEngine::MySql => Box::new(MySqlSyntaxProvider),
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DatabaseEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "sqlserver" | "mssql" | "sql-server" => Ok(Self::SqlServer),
            "mysql" | "mariadb" => Ok(Self::MySql),
            _ => Err(format!(
                "Unknown database engine '{}'. Valid engines: sqlite, sqlserver, mysql",
                s
            )),
        }
    }
}

/// Result of asking whether a table exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableExistence {
    Exists,
    Absent,
    /// The engine could not answer (e.g. no default database selected)
    Unknown,
}

/// A `(table, column)` pair found in a live database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub table_name: String,
    pub column_name: String,
}

/// A `(table, index, column, unique)` tuple found in a live database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub table_name: String,
    pub index_name: String,
    pub column_name: String,
    pub is_unique: bool,
}

/// A `(table, column, constraint)` tuple found in a live database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintInfo {
    pub table_name: String,
    pub column_name: String,
    pub constraint_name: String,
}

/// Engine-specific introspection and DDL generation
///
/// Introspection queries are issued through the session passed to each call.
/// Query parameters use the placeholder style of the engine's driver.
pub trait SqlSyntaxProvider {
    fn engine(&self) -> DatabaseEngine;

    /// Whether constraint names can be reliably read back from this engine
    fn supports_constraint_introspection(&self) -> bool {
        true
    }

    fn quote_identifier(&self, name: &str) -> String;

    /// Concrete type for a logical column type
    fn format_column_type(&self, data_type: ColumnType) -> String;

    /// Suffix marking an auto-incrementing column, if the engine needs one
    fn identity_suffix(&self) -> Option<&'static str>;

    /// Query returning one row per base table: `(table)`
    fn tables_sql(&self) -> &'static str;

    /// Query returning `(table, column)`
    fn columns_sql(&self) -> &'static str;

    /// Query returning `(table, index, column, unique)`
    fn indexes_sql(&self) -> &'static str;

    /// Query returning `(table, column, constraint)`
    fn constraints_sql(&self) -> &'static str;

    /// Query taking the table name as its single parameter and returning a count
    fn table_exists_sql(&self) -> &'static str;

    fn table_exists(&self, session: &dyn DatabaseSession, table: &str) -> Result<TableExistence> {
        let rows = session.query_rows(self.table_exists_sql(), &[table])?;
        let count = rows
            .first()
            .and_then(|r| r.first())
            .and_then(|v| v.as_i64())
            .ok_or_else(|| anyhow!("Table existence query returned no count"))?;
        Ok(if count > 0 {
            TableExistence::Exists
        } else {
            TableExistence::Absent
        })
    }

    fn tables_in_schema(&self, session: &dyn DatabaseSession) -> Result<Vec<String>> {
        let rows = session
            .query_rows(self.tables_sql(), &[])
            .map_err(|e| anyhow!("Failed to list tables: {}", e))?;
        let tables = rows
            .iter()
            .map(|r| text_at(r, 0))
            .collect::<Result<Vec<_>>>()?;
        debug!("found {} tables on {}", tables.len(), self.engine());
        Ok(tables)
    }

    fn columns_in_schema(&self, session: &dyn DatabaseSession) -> Result<Vec<ColumnInfo>> {
        let rows = session
            .query_rows(self.columns_sql(), &[])
            .map_err(|e| anyhow!("Failed to list columns: {}", e))?;
        let columns = rows
            .iter()
            .map(|r| {
                Ok(ColumnInfo {
                    table_name: text_at(r, 0)?,
                    column_name: text_at(r, 1)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("found {} columns on {}", columns.len(), self.engine());
        Ok(columns)
    }

    fn defined_indexes(&self, session: &dyn DatabaseSession) -> Result<Vec<IndexInfo>> {
        let rows = session
            .query_rows(self.indexes_sql(), &[])
            .map_err(|e| anyhow!("Failed to list indexes: {}", e))?;
        let indexes = rows
            .iter()
            .map(|r| {
                Ok(IndexInfo {
                    table_name: text_at(r, 0)?,
                    index_name: text_at(r, 1)?,
                    column_name: text_at(r, 2)?,
                    is_unique: r.get(3).and_then(|v| v.as_bool()).unwrap_or(false),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("found {} index columns on {}", indexes.len(), self.engine());
        Ok(indexes)
    }

    fn constraints_per_column(&self, session: &dyn DatabaseSession) -> Result<Vec<ConstraintInfo>> {
        let rows = session
            .query_rows(self.constraints_sql(), &[])
            .map_err(|e| anyhow!("Failed to list constraints: {}", e))?;
        rows.iter()
            .map(|r| {
                Ok(ConstraintInfo {
                    table_name: text_at(r, 0)?,
                    column_name: text_at(r, 1)?,
                    constraint_name: text_at(r, 2)?,
                })
            })
            .collect()
    }

    fn format_column(&self, column: &ColumnDefinition) -> String {
        let mut sql = format!(
            "{} {} {}",
            self.quote_identifier(&column.name),
            self.format_column_type(column.data_type),
            if column.nullable { "NULL" } else { "NOT NULL" }
        );
        if let Some(default) = &column.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }
        if column.identity {
            if let Some(suffix) = self.identity_suffix() {
                sql.push(' ');
                sql.push_str(suffix);
            }
        }
        sql
    }

    fn format_create_index(&self, table: &str, index: &IndexDefinition) -> String {
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            if index.is_unique { "UNIQUE " } else { "" },
            self.quote_identifier(&index.name),
            self.quote_identifier(table),
            self.quote_identifier(&index.column_name)
        )
    }

    /// Statements creating a table, its keys, and its indexes, in execution order
    fn format_create_table(&self, table: &TableDefinition) -> Vec<String> {
        let mut parts: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("  {}", self.format_column(c)))
            .collect();

        if let Some((name, columns)) = table.primary_key() {
            let cols = columns
                .iter()
                .map(|c| self.quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!(
                "  CONSTRAINT {} PRIMARY KEY ({})",
                self.quote_identifier(name),
                cols
            ));
        }

        for fk in &table.foreign_keys {
            parts.push(format!(
                "  CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                self.quote_identifier(&fk.name),
                self.quote_identifier(&fk.column_name),
                self.quote_identifier(&fk.references_table),
                self.quote_identifier(&fk.references_column)
            ));
        }

        let mut statements = vec![format!(
            "CREATE TABLE {} (\n{}\n)",
            self.quote_identifier(&table.name),
            parts.join(",\n")
        )];
        statements.extend(
            table
                .indexes
                .iter()
                .map(|i| self.format_create_index(&table.name, i)),
        );
        statements
    }

    fn format_drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quote_identifier(table))
    }
}

/// Quote an identifier by wrapping it in `open`/`close`, doubling any embedded `close`
pub(crate) fn quote_with(name: &str, open: char, close: char) -> String {
    let escaped = name.replace(close, &format!("{}{}", close, close));
    format!("{}{}{}", open, escaped, close)
}
