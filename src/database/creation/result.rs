//! Schema validation result
//!
//! A [`DatabaseSchemaResult`] is built fresh by each validation run and
//! describes how one live database compares to the schema in code. Drift is
//! recorded as data in `errors`; it is never raised as a failure.

use crate::database::schema::TableDefinition;
use crate::database::syntax::IndexInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category of a schema mismatch
///
/// The string forms are consumed by reporting tools and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaErrorKind {
    Table,
    Column,
    Index,
    Constraint,
    Unknown,
}

impl SchemaErrorKind {
    pub fn all() -> [SchemaErrorKind; 5] {
        [
            SchemaErrorKind::Table,
            SchemaErrorKind::Column,
            SchemaErrorKind::Index,
            SchemaErrorKind::Constraint,
            SchemaErrorKind::Unknown,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaErrorKind::Table => "Table",
            SchemaErrorKind::Column => "Column",
            SchemaErrorKind::Index => "Index",
            SchemaErrorKind::Constraint => "Constraint",
            SchemaErrorKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One mismatched identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub identifier: String,
}

impl SchemaError {
    pub fn new(kind: SchemaErrorKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
        }
    }
}

/// An index column as found in the live database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbIndexDefinition {
    pub table_name: String,
    pub index_name: String,
    pub column_name: String,
    pub is_unique: bool,
}

impl From<IndexInfo> for DbIndexDefinition {
    fn from(info: IndexInfo) -> Self {
        DbIndexDefinition {
            table_name: info.table_name,
            index_name: info.index_name,
            column_name: info.column_name,
            is_unique: info.is_unique,
        }
    }
}

/// Coarse installation status derived from a validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InstallationState {
    /// None of the schema's tables exist
    NotInstalled,
    /// Every table, column, index and constraint matches
    Installed,
    /// Some of the schema exists but differs from the code
    Drifted {
        missing_tables: Vec<String>,
        error_count: usize,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseSchemaResult {
    pub table_definitions: Vec<TableDefinition>,
    pub db_index_definitions: Vec<DbIndexDefinition>,
    pub valid_tables: BTreeSet<String>,
    /// Keyed as `table,column`
    pub valid_columns: BTreeSet<String>,
    pub valid_indexes: BTreeSet<String>,
    pub valid_constraints: BTreeSet<String>,
    pub errors: Vec<SchemaError>,
}

impl DatabaseSchemaResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, kind: SchemaErrorKind, identifier: impl Into<String>) {
        self.errors.push(SchemaError::new(kind, identifier));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Identifiers of every error of one kind, in the order recorded
    pub fn errors_of(&self, kind: SchemaErrorKind) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.identifier.as_str())
            .collect()
    }

    /// Tables declared in code that the database does not have
    pub fn missing_tables(&self) -> Vec<String> {
        self.table_definitions
            .iter()
            .filter(|def| {
                !self
                    .valid_tables
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(&def.name))
            })
            .map(|def| def.name.clone())
            .collect()
    }

    pub fn installation_state(&self) -> InstallationState {
        if self.valid_tables.is_empty() {
            return InstallationState::NotInstalled;
        }
        if self.is_valid() {
            return InstallationState::Installed;
        }
        InstallationState::Drifted {
            missing_tables: self.missing_tables(),
            error_count: self.errors.len(),
        }
    }

    /// Multi-line report of all errors grouped by kind
    pub fn error_summary(&self) -> String {
        if self.is_valid() {
            return "No schema errors found".to_string();
        }

        let mut lines = Vec::new();
        for kind in SchemaErrorKind::all() {
            let identifiers = self.errors_of(kind);
            if identifiers.is_empty() {
                continue;
            }
            lines.push(format!(
                "{} errors ({}): {}",
                kind,
                identifiers.len(),
                identifiers.join(", ")
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::TableDefinition;

    fn table(name: &str) -> TableDefinition {
        TableDefinition {
            name: name.to_string(),
            columns: vec![],
            indexes: vec![],
            foreign_keys: vec![],
        }
    }

    #[test]
    fn test_kind_strings() {
        let names: Vec<_> = SchemaErrorKind::all().iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["Table", "Column", "Index", "Constraint", "Unknown"]);
        assert_eq!(
            serde_json::to_string(&SchemaErrorKind::Constraint).unwrap(),
            "\"Constraint\""
        );
    }

    #[test]
    fn test_errors_of_and_summary() {
        let mut result = DatabaseSchemaResult::new();
        assert!(result.is_valid());
        assert_eq!(result.error_summary(), "No schema errors found");

        result.add_error(SchemaErrorKind::Table, "Foo");
        result.add_error(SchemaErrorKind::Table, "Bar");
        result.add_error(SchemaErrorKind::Unknown, "DF_x");

        assert!(!result.is_valid());
        assert_eq!(result.errors_of(SchemaErrorKind::Table), vec!["Foo", "Bar"]);
        assert!(result.errors_of(SchemaErrorKind::Column).is_empty());
        assert_eq!(
            result.error_summary(),
            "Table errors (2): Foo, Bar\nUnknown errors (1): DF_x"
        );
    }

    #[test]
    fn test_installation_state() {
        let mut result = DatabaseSchemaResult::new();
        result.table_definitions = vec![table("appNode"), table("cmsTags")];
        result.add_error(SchemaErrorKind::Table, "appNode");
        result.add_error(SchemaErrorKind::Table, "cmsTags");
        assert_eq!(result.installation_state(), InstallationState::NotInstalled);

        result.errors.clear();
        result.valid_tables.insert("APPNODE".to_string());
        result.add_error(SchemaErrorKind::Table, "cmsTags");
        assert_eq!(
            result.installation_state(),
            InstallationState::Drifted {
                missing_tables: vec!["cmsTags".to_string()],
                error_count: 1,
            }
        );

        result.errors.clear();
        result.valid_tables.insert("cmsTags".to_string());
        assert_eq!(result.installation_state(), InstallationState::Installed);
    }

    #[test]
    fn test_json_output() {
        let mut result = DatabaseSchemaResult::new();
        result.valid_tables.insert("appNode".to_string());
        result.add_error(SchemaErrorKind::Index, "IX_gone");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid_tables"][0], "appNode");
        assert_eq!(json["errors"][0]["kind"], "Index");
        assert_eq!(json["errors"][0]["identifier"], "IX_gone");
    }
}
