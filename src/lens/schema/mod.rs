//! Schema lens
//!
//! Combines the schema creation engine with report formatting so that the
//! CLI (or any other front end) can install, inspect and validate a database
//! through one entry point.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemata::database::{DatabaseConn, SchemaRegistry, SqliteSyntaxProvider};
//! use schemata::lens::schema::SchemaLens;
//! use schemata::lens::utils::OutputFormat;
//!
//! let db = DatabaseConn::open_path("/tmp/cms.sqlite3")?;
//! let registry = SchemaRegistry::cms();
//! let lens = SchemaLens::new(&db, &SqliteSyntaxProvider, &registry);
//!
//! let result = lens.validate()?;
//! println!("{}", lens.format_validation(&result, OutputFormat::Table)?);
//! ```

use crate::database::{
    CreationOutcome, DatabaseSchemaResult, DatabaseSession, InstallationState, SchemaCreation,
    SchemaRegistry, SqlSyntaxProvider, TableDefinition, UninstallSummary,
};
use crate::lens::utils::{format_rows, OutputFormat};
use anyhow::{anyhow, Result};
use serde::Serialize;
use tabled::Tabled;

// =============================================================================
// Report rows
// =============================================================================

/// One table of the schema in code
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TableSummaryRow {
    pub rank: usize,
    pub table: String,
    pub entity: String,
    pub columns: usize,
    pub indexes: usize,
    pub foreign_keys: usize,
    pub primary_key: String,
}

/// One validation error
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SchemaErrorRow {
    pub kind: String,
    pub identifier: String,
}

/// Counts of matched objects per kind, plus the error count
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ValidationCountRow {
    pub object: String,
    pub valid: usize,
    pub errors: usize,
}

/// Overall installation status of one database
#[derive(Debug, Clone, Serialize)]
pub struct SchemaStatusReport {
    pub engine: String,
    pub schema_tables: usize,
    pub installed_tables: usize,
    pub state: InstallationState,
}

impl SchemaStatusReport {
    pub fn headline(&self) -> String {
        match &self.state {
            InstallationState::NotInstalled => {
                format!("schema not installed ({} tables expected)", self.schema_tables)
            }
            InstallationState::Installed => {
                format!("schema installed ({} tables)", self.installed_tables)
            }
            InstallationState::Drifted {
                missing_tables,
                error_count,
            } => format!(
                "schema drifted: {}/{} tables present, {} missing, {} errors",
                self.installed_tables,
                self.schema_tables,
                missing_tables.len(),
                error_count
            ),
        }
    }
}

// =============================================================================
// Lens
// =============================================================================

pub struct SchemaLens<'a> {
    session: &'a dyn DatabaseSession,
    syntax: &'a dyn SqlSyntaxProvider,
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaLens<'a> {
    pub fn new(
        session: &'a dyn DatabaseSession,
        syntax: &'a dyn SqlSyntaxProvider,
        registry: &'a SchemaRegistry,
    ) -> Self {
        Self {
            session,
            syntax,
            registry,
        }
    }

    fn engine(&self) -> SchemaCreation<'a> {
        SchemaCreation::new(self.session, self.syntax, self.registry)
    }

    /// Install the schema, refusing if any of its tables already exist
    pub fn install(&self) -> Result<CreationOutcome> {
        let result = self.validate()?;
        if !result.valid_tables.is_empty() {
            return Err(anyhow!(
                "Refusing to install: {} schema tables already exist",
                result.valid_tables.len()
            ));
        }
        self.engine().initialize_database_schema()
    }

    pub fn uninstall(&self) -> UninstallSummary {
        self.engine().uninstall_database_schema()
    }

    pub fn validate(&self) -> Result<DatabaseSchemaResult> {
        self.engine().validate_schema()
    }

    pub fn status(&self) -> Result<SchemaStatusReport> {
        let result = self.validate()?;
        Ok(SchemaStatusReport {
            engine: self.syntax.engine().to_string(),
            schema_tables: self.registry.len(),
            installed_tables: result.valid_tables.len(),
            state: result.installation_state(),
        })
    }

    /// Summary of every table in the registry, in creation order
    pub fn table_rows(&self) -> Vec<TableSummaryRow> {
        self.registry
            .ascending()
            .map(|entry| {
                let def = TableDefinition::from_shape(entry.shape);
                TableSummaryRow {
                    rank: entry.rank,
                    table: def.name.clone(),
                    entity: entry.shape.ident.to_string(),
                    columns: def.columns.len(),
                    indexes: def.indexes.len(),
                    foreign_keys: def.foreign_keys.len(),
                    primary_key: def
                        .primary_key()
                        .map(|(name, cols)| format!("{} ({})", name, cols.join(", ")))
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    /// DDL installing the whole registry, one statement per line
    pub fn script(&self) -> String {
        self.registry
            .table_definitions()
            .iter()
            .flat_map(|def| self.syntax.format_create_table(def))
            .map(|stmt| format!("{};", stmt))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn error_rows(result: &DatabaseSchemaResult) -> Vec<SchemaErrorRow> {
        result
            .errors
            .iter()
            .map(|e| SchemaErrorRow {
                kind: e.kind.to_string(),
                identifier: e.identifier.clone(),
            })
            .collect()
    }

    pub fn count_rows(result: &DatabaseSchemaResult) -> Vec<ValidationCountRow> {
        use crate::database::SchemaErrorKind;

        let errors = |kind| result.errors_of(kind).len();
        vec![
            ValidationCountRow {
                object: "tables".to_string(),
                valid: result.valid_tables.len(),
                errors: errors(SchemaErrorKind::Table),
            },
            ValidationCountRow {
                object: "columns".to_string(),
                valid: result.valid_columns.len(),
                errors: errors(SchemaErrorKind::Column),
            },
            ValidationCountRow {
                object: "indexes".to_string(),
                valid: result.valid_indexes.len(),
                errors: errors(SchemaErrorKind::Index),
            },
            ValidationCountRow {
                object: "constraints".to_string(),
                valid: result.valid_constraints.len(),
                errors: errors(SchemaErrorKind::Constraint) + errors(SchemaErrorKind::Unknown),
            },
        ]
    }

    /// Render a validation result
    ///
    /// JSON formats emit the whole result; other formats emit the per-kind
    /// counts followed by the error list.
    pub fn format_validation(
        &self,
        result: &DatabaseSchemaResult,
        format: OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Json | OutputFormat::JsonLine => serde_json::to_string(result)
                .map_err(|e| anyhow!("Failed to serialize validation result: {}", e)),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result)
                .map_err(|e| anyhow!("Failed to serialize validation result: {}", e)),
            _ => {
                let mut out = format_rows(&Self::count_rows(result), format)?;
                if !result.is_valid() {
                    out.push_str("\n\n");
                    out.push_str(&format_rows(&Self::error_rows(result), format)?);
                }
                Ok(out)
            }
        }
    }
}
