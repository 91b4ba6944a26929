//! Schema creation engine
//!
//! [`SchemaCreation`] installs, uninstalls and validates the schema described
//! by a [`SchemaRegistry`] against one live database session, using a
//! [`SqlSyntaxProvider`] for everything engine-specific.
//!
//! - install walks the registry in ascending rank and stops at the first
//!   failing statement
//! - uninstall walks it in descending rank and never stops early
//! - validation reports drift as data and only fails when the database
//!   cannot be introspected

mod events;
mod result;
mod validation;

pub use events::{
    AfterCreationObserver, BeforeCreationObserver, CreationObservers, DatabaseCreationEvent,
};
pub use result::{
    DatabaseSchemaResult, DbIndexDefinition, InstallationState, SchemaError, SchemaErrorKind,
};

use crate::database::core::DatabaseSession;
use crate::database::schema::{SchemaRegistry, TableDefinition};
use crate::database::syntax::{SqlSyntaxProvider, TableExistence};
use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Result of [`SchemaCreation::initialize_database_schema`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreationOutcome {
    /// Tables created, in creation order
    Created { tables: Vec<String> },
    /// A before-creation observer cancelled the install
    Cancelled,
}

/// What [`SchemaCreation::uninstall_database_schema`] did to each table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UninstallSummary {
    pub dropped: Vec<String>,
    pub absent: Vec<String>,
    pub failed: Vec<String>,
}

impl UninstallSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SchemaCreation<'a> {
    session: &'a dyn DatabaseSession,
    syntax: &'a dyn SqlSyntaxProvider,
    registry: &'a SchemaRegistry,
    observers: CreationObservers<'a>,
}

impl<'a> SchemaCreation<'a> {
    pub fn new(
        session: &'a dyn DatabaseSession,
        syntax: &'a dyn SqlSyntaxProvider,
        registry: &'a SchemaRegistry,
    ) -> Self {
        Self {
            session,
            syntax,
            registry,
            observers: CreationObservers::new(),
        }
    }

    /// Register an observer run before tables are created; it may cancel creation
    pub fn on_before_creation(&mut self, observer: impl FnMut(&mut DatabaseCreationEvent) + 'a) {
        self.observers.add_before(observer);
    }

    /// Register an observer run after creation, whether or not it was cancelled
    pub fn on_after_creation(&mut self, observer: impl FnMut(&DatabaseCreationEvent) + 'a) {
        self.observers.add_after(observer);
    }

    // =========================================================================
    // Uninstall
    // =========================================================================

    /// Drop every table in the registry, dependents first
    ///
    /// Failures are logged and recorded in the summary; the walk always
    /// reaches every table.
    pub fn uninstall_database_schema(&self) -> UninstallSummary {
        let mut summary = UninstallSummary::default();

        for entry in self.registry.descending() {
            let table = entry.table_name();

            let existence = match self.syntax.table_exists(self.session, table) {
                Ok(existence) => existence,
                Err(e) => {
                    warn!("could not check whether {} exists: {}", table, e);
                    TableExistence::Unknown
                }
            };

            if existence == TableExistence::Absent {
                debug!("table {} does not exist, skipping drop", table);
                summary.absent.push(table.to_string());
                continue;
            }

            match self.session.execute(&self.syntax.format_drop_table(table)) {
                Ok(_) => {
                    info!("dropped table {}", table);
                    summary.dropped.push(table.to_string());
                }
                Err(e) => {
                    if existence == TableExistence::Unknown {
                        warn!("could not drop table {}: {}", table, e);
                    } else {
                        error!("failed to drop table {}: {}", table, e);
                    }
                    summary.failed.push(table.to_string());
                }
            }
        }

        info!(
            "uninstall finished: {} dropped, {} absent, {} failed",
            summary.dropped.len(),
            summary.absent.len(),
            summary.failed.len()
        );
        summary
    }

    // =========================================================================
    // Install
    // =========================================================================

    /// Create every table in the registry, dependencies first
    ///
    /// The after-creation observers run exactly once, including when creation
    /// was cancelled. A failing statement aborts the install and is not
    /// rolled back.
    pub fn initialize_database_schema(&mut self) -> Result<CreationOutcome> {
        let mut event = DatabaseCreationEvent::default();
        self.observers.raise_before(&mut event);

        let outcome = if event.cancel {
            info!("schema creation cancelled by observer");
            CreationOutcome::Cancelled
        } else {
            let mut tables = Vec::with_capacity(self.registry.len());
            for entry in self.registry.ascending() {
                let definition = TableDefinition::from_shape(entry.shape);
                self.create_table(&definition)?;
                tables.push(definition.name);
            }
            info!("created {} tables", tables.len());
            CreationOutcome::Created { tables }
        };

        self.observers.raise_after(&event);
        Ok(outcome)
    }

    fn create_table(&self, definition: &TableDefinition) -> Result<()> {
        for statement in self.syntax.format_create_table(definition) {
            self.session
                .execute(&statement)
                .map_err(|e| anyhow!("Failed to create table {}: {}", definition.name, e))?;
        }
        info!("created table {}", definition.name);
        Ok(())
    }

    // =========================================================================
    // Validate
    // =========================================================================

    /// Compare the live database with the registry
    pub fn validate_schema(&self) -> Result<DatabaseSchemaResult> {
        let mut result = DatabaseSchemaResult::new();

        result.db_index_definitions = self
            .syntax
            .defined_indexes(self.session)?
            .into_iter()
            .map(DbIndexDefinition::from)
            .collect();
        result.table_definitions = self.registry.table_definitions();

        let tables = self.syntax.tables_in_schema(self.session)?;
        validation::validate_tables(&mut result, &tables);

        let columns = self.syntax.columns_in_schema(self.session)?;
        validation::validate_columns(&mut result, &columns);

        validation::validate_indexes(&mut result);

        if self.syntax.supports_constraint_introspection() {
            let constraints = self.syntax.constraints_per_column(self.session)?;
            validation::validate_constraints(&mut result, &constraints);
        } else {
            debug!(
                "{} cannot report constraint names, skipping constraint validation",
                self.syntax.engine()
            );
        }

        info!(
            "validated {} tables: {} errors",
            result.table_definitions.len(),
            result.errors.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::{DatabaseConn, SqlRow};
    use crate::database::schema::{
        column, foreign_key, index, ColumnType, EntityShape, RegistryEntry,
    };
    use crate::database::syntax::{
        quote_with, ColumnInfo, ConstraintInfo, DatabaseEngine, IndexInfo, SqliteSyntaxProvider,
    };
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;

    /// Session recording executed statements, failing those containing `fail_on`
    #[derive(Default)]
    struct RecordingSession {
        executed: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingSession {
        fn failing_on(pattern: &'static str) -> Self {
            Self {
                fail_on: Some(pattern),
                ..Default::default()
            }
        }

        fn executed_starting_with(&self, prefix: &str) -> Vec<String> {
            self.executed
                .borrow()
                .iter()
                .filter(|s| s.starts_with(prefix))
                .cloned()
                .collect()
        }
    }

    impl DatabaseSession for RecordingSession {
        fn execute(&self, sql: &str) -> Result<usize> {
            if let Some(pattern) = self.fail_on {
                if sql.contains(pattern) {
                    return Err(anyhow!("simulated failure"));
                }
            }
            self.executed.borrow_mut().push(sql.to_string());
            Ok(0)
        }

        fn query_rows(&self, _sql: &str, _params: &[&str]) -> Result<Vec<SqlRow>> {
            Ok(vec![])
        }
    }

    /// Syntax provider answering introspection from fixed lists
    struct StaticSyntaxProvider {
        existence: TableExistence,
        constraint_introspection: bool,
        tables: Vec<String>,
        columns: Vec<ColumnInfo>,
        indexes: Vec<IndexInfo>,
        constraints: Vec<ConstraintInfo>,
    }

    impl StaticSyntaxProvider {
        fn new(existence: TableExistence) -> Self {
            Self {
                existence,
                constraint_introspection: true,
                tables: vec![],
                columns: vec![],
                indexes: vec![],
                constraints: vec![],
            }
        }
    }

    impl SqlSyntaxProvider for StaticSyntaxProvider {
        fn engine(&self) -> DatabaseEngine {
            DatabaseEngine::Sqlite
        }

        fn supports_constraint_introspection(&self) -> bool {
            self.constraint_introspection
        }

        fn quote_identifier(&self, name: &str) -> String {
            quote_with(name, '<', '>')
        }

        fn format_column_type(&self, data_type: ColumnType) -> String {
            data_type.to_string()
        }

        fn identity_suffix(&self) -> Option<&'static str> {
            None
        }

        fn tables_sql(&self) -> &'static str {
            "tables"
        }

        fn columns_sql(&self) -> &'static str {
            "columns"
        }

        fn indexes_sql(&self) -> &'static str {
            "indexes"
        }

        fn constraints_sql(&self) -> &'static str {
            "constraints"
        }

        fn table_exists_sql(&self) -> &'static str {
            "exists"
        }

        fn table_exists(&self, _: &dyn DatabaseSession, _: &str) -> Result<TableExistence> {
            Ok(self.existence)
        }

        fn tables_in_schema(&self, _: &dyn DatabaseSession) -> Result<Vec<String>> {
            Ok(self.tables.clone())
        }

        fn columns_in_schema(&self, _: &dyn DatabaseSession) -> Result<Vec<ColumnInfo>> {
            Ok(self.columns.clone())
        }

        fn defined_indexes(&self, _: &dyn DatabaseSession) -> Result<Vec<IndexInfo>> {
            Ok(self.indexes.clone())
        }

        fn constraints_per_column(&self, _: &dyn DatabaseSession) -> Result<Vec<ConstraintInfo>> {
            Ok(self.constraints.clone())
        }
    }

    /// Table name from `CREATE TABLE <name> (` or `DROP TABLE <name>`
    fn table_of(statement: &str) -> String {
        let start = statement.find('<').unwrap() + 1;
        let end = statement[start..].find('>').unwrap() + start;
        statement[start..end].to_string()
    }

    const BAR: EntityShape = EntityShape {
        ident: "Bar",
        table_name: None,
        columns: &[column("id", ColumnType::Integer).primary_key("PK_Bar")],
        indexes: &[index("IX_Custom", "id")],
        foreign_keys: &[],
    };

    const CHILD: EntityShape = EntityShape {
        ident: "ChildDto",
        table_name: Some("child"),
        columns: &[
            column("id", ColumnType::Integer).primary_key("PK_child"),
            column("barId", ColumnType::Integer),
        ],
        indexes: &[],
        foreign_keys: &[foreign_key("FK_child_Bar", "barId", "Bar", "id")],
    };

    fn small_registry() -> SchemaRegistry {
        SchemaRegistry::new(&[RegistryEntry::new(0, &BAR), RegistryEntry::new(1, &CHILD)])
            .unwrap()
    }

    #[test]
    fn test_drop_order_reverses_create_order() {
        let registry = SchemaRegistry::cms();
        let session = RecordingSession::default();
        let syntax = StaticSyntaxProvider::new(TableExistence::Exists);
        let mut engine = SchemaCreation::new(&session, &syntax, &registry);

        engine.initialize_database_schema().unwrap();
        let summary = engine.uninstall_database_schema();

        let created: Vec<_> = session
            .executed_starting_with("CREATE TABLE")
            .iter()
            .map(|s| table_of(s))
            .collect();
        let mut dropped: Vec<_> = session
            .executed_starting_with("DROP TABLE")
            .iter()
            .map(|s| table_of(s))
            .collect();

        assert_eq!(created.len(), 42);
        assert_eq!(created, registry.table_names());
        dropped.reverse();
        assert_eq!(created, dropped);
        assert_eq!(summary.dropped.len(), 42);
    }

    #[test]
    fn test_uninstall_empty_database() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let registry = SchemaRegistry::cms();
        let engine = SchemaCreation::new(&db, &SqliteSyntaxProvider, &registry);

        let summary = engine.uninstall_database_schema();
        assert_eq!(summary.absent.len(), 42);
        assert!(summary.dropped.is_empty());
        assert!(summary.is_clean());
    }

    #[test]
    fn test_uninstall_continues_past_failures() {
        let registry = small_registry();
        let session = RecordingSession::failing_on("child");
        let syntax = StaticSyntaxProvider::new(TableExistence::Unknown);
        let engine = SchemaCreation::new(&session, &syntax, &registry);

        let summary = engine.uninstall_database_schema();
        assert_eq!(summary.failed, vec!["child"]);
        assert_eq!(summary.dropped, vec!["Bar"]);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_cancelled_creation() {
        let registry = small_registry();
        let session = RecordingSession::default();
        let syntax = StaticSyntaxProvider::new(TableExistence::Absent);
        let after_calls = Cell::new(0);

        let outcome = {
            let mut engine = SchemaCreation::new(&session, &syntax, &registry);
            engine.on_before_creation(|e| e.cancel = true);
            engine.on_after_creation(|e| {
                assert!(e.cancel);
                after_calls.set(after_calls.get() + 1);
            });
            engine.initialize_database_schema().unwrap()
        };

        assert_eq!(outcome, CreationOutcome::Cancelled);
        assert!(session.executed.borrow().is_empty());
        assert_eq!(after_calls.get(), 1);
    }

    #[test]
    fn test_create_failure_names_table() {
        let registry = small_registry();
        let session = RecordingSession::failing_on("CREATE TABLE <child>");
        let syntax = StaticSyntaxProvider::new(TableExistence::Absent);
        let after_calls = Cell::new(0);

        let err = {
            let mut engine = SchemaCreation::new(&session, &syntax, &registry);
            engine.on_after_creation(|_| after_calls.set(after_calls.get() + 1));
            engine.initialize_database_schema().unwrap_err()
        };

        assert!(err.to_string().contains("child"));
        assert_eq!(session.executed_starting_with("CREATE TABLE").len(), 1);
        assert_eq!(after_calls.get(), 0);
    }

    #[test]
    fn test_install_then_validate_round_trip() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let registry = SchemaRegistry::cms();
        let mut engine = SchemaCreation::new(&db, &SqliteSyntaxProvider, &registry);

        let outcome = engine.initialize_database_schema().unwrap();
        assert_eq!(
            outcome,
            CreationOutcome::Created {
                tables: registry.table_names().iter().map(|s| s.to_string()).collect()
            }
        );

        let result = engine.validate_schema().unwrap();
        assert!(result.is_valid(), "{}", result.error_summary());
        assert_eq!(result.installation_state(), InstallationState::Installed);

        let lower = |names: &BTreeSet<String>| -> BTreeSet<String> {
            names.iter().map(|n| n.to_ascii_lowercase()).collect()
        };
        let definitions = registry.table_definitions();
        let tables: BTreeSet<String> = definitions
            .iter()
            .map(|d| d.name.to_ascii_lowercase())
            .collect();
        let columns: BTreeSet<String> = definitions
            .iter()
            .flat_map(|d| d.columns.iter())
            .map(|c| format!("{},{}", c.table_name, c.name).to_ascii_lowercase())
            .collect();
        let indexes: BTreeSet<String> = definitions
            .iter()
            .flat_map(|d| d.indexes.iter())
            .map(|i| i.name.to_ascii_lowercase())
            .collect();

        assert_eq!(tables.len(), 42);
        assert_eq!(lower(&result.valid_tables), tables);
        assert_eq!(lower(&result.valid_columns), columns);
        assert_eq!(lower(&result.valid_indexes), indexes);
        assert!(!result.valid_constraints.is_empty());
    }

    #[test]
    fn test_live_only_sqlite_objects_are_drift() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let registry = SchemaRegistry::cms();
        let mut engine = SchemaCreation::new(&db, &SqliteSyntaxProvider, &registry);
        engine.initialize_database_schema().unwrap();

        db.execute("CREATE INDEX IX_extra_expr ON appNode (lower(path))")
            .unwrap();
        db.execute(
            "CREATE TABLE extra (
                id INTEGER CONSTRAINT pk_inline PRIMARY KEY,
                code TEXT CONSTRAINT uq_inline UNIQUE,
                a INTEGER,
                CONSTRAINT CK_extra_a CHECK (a > 0)
            )",
        )
        .unwrap();

        let result = engine.validate_schema().unwrap();
        assert_eq!(result.errors_of(SchemaErrorKind::Table), vec!["extra"]);
        assert_eq!(result.errors_of(SchemaErrorKind::Index), vec!["IX_extra_expr"]);
        assert_eq!(
            result.errors_of(SchemaErrorKind::Unknown),
            vec!["uq_inline", "CK_extra_a"]
        );
        // prefix matching ignores case, so the inline key lands with primary keys
        let constraint_errors = result.errors_of(SchemaErrorKind::Constraint);
        assert!(constraint_errors.contains(&"pk_inline"));
        assert!(constraint_errors.contains(&"IX_extra_expr"));
    }

    #[test]
    fn test_install_then_uninstall_leaves_empty_database() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let registry = SchemaRegistry::cms();
        let mut engine = SchemaCreation::new(&db, &SqliteSyntaxProvider, &registry);

        engine.initialize_database_schema().unwrap();
        let summary = engine.uninstall_database_schema();
        assert_eq!(summary.dropped.len(), 42);
        assert!(summary.is_clean());

        let result = engine.validate_schema().unwrap();
        assert!(result.valid_tables.is_empty());
        assert_eq!(result.installation_state(), InstallationState::NotInstalled);
    }

    #[test]
    fn test_validate_reports_drift() {
        let registry = small_registry();
        let session = RecordingSession::default();
        let mut syntax = StaticSyntaxProvider::new(TableExistence::Exists);
        syntax.tables = vec!["Foo".to_string(), "CHILD".to_string()];
        syntax.constraints = vec![ConstraintInfo {
            table_name: "child".to_string(),
            column_name: "id".to_string(),
            constraint_name: "PK_child".to_string(),
        }];
        let engine = SchemaCreation::new(&session, &syntax, &registry);

        let result = engine.validate_schema().unwrap();
        assert_eq!(result.errors_of(SchemaErrorKind::Table), vec!["Foo", "Bar"]);
        assert!(result.valid_tables.contains("CHILD"));
        assert_eq!(result.errors_of(SchemaErrorKind::Index), vec!["IX_Custom"]);
        assert_eq!(
            result.errors_of(SchemaErrorKind::Constraint),
            vec!["FK_child_Bar", "PK_Bar", "IX_Custom"]
        );
    }

    #[test]
    fn test_reduced_capability_skips_constraints() {
        let registry = small_registry();
        let session = RecordingSession::default();
        let mut syntax = StaticSyntaxProvider::new(TableExistence::Exists);
        syntax.constraint_introspection = false;
        syntax.constraints = vec![ConstraintInfo {
            table_name: "child".to_string(),
            column_name: "id".to_string(),
            constraint_name: "DF_junk".to_string(),
        }];
        let engine = SchemaCreation::new(&session, &syntax, &registry);

        let result = engine.validate_schema().unwrap();
        assert!(result.valid_constraints.is_empty());
        assert!(result.errors_of(SchemaErrorKind::Constraint).is_empty());
        assert!(result.errors_of(SchemaErrorKind::Unknown).is_empty());
    }

    #[test]
    fn test_introspection_failure_propagates() {
        struct BrokenSession;

        impl DatabaseSession for BrokenSession {
            fn execute(&self, _sql: &str) -> Result<usize> {
                Err(anyhow!("connection lost"))
            }

            fn query_rows(&self, _sql: &str, _params: &[&str]) -> Result<Vec<SqlRow>> {
                Err(anyhow!("connection lost"))
            }
        }

        let registry = small_registry();
        let engine = SchemaCreation::new(&BrokenSession, &SqliteSyntaxProvider, &registry);
        assert!(engine.validate_schema().is_err());

        // uninstall still walks every table
        let summary = engine.uninstall_database_schema();
        assert_eq!(summary.failed.len(), 2);
    }
}
