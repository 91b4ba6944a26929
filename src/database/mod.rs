//! Database module
//!
//! This module provides all database functionality for schemata, organized into:
//!
//! - **core**: Session abstraction and the SQLite connection that implements it
//! - **schema**: Entity shapes, table definitions and the ordered registry
//! - **syntax**: Per-engine introspection queries and DDL generation
//! - **creation**: The install / uninstall / validate engine and its result model
//!
//! # Architecture
//!
//! ```text
//! database/
//! ├── core/           # Foundation
//! │   ├── session     # DatabaseSession trait, SqlValue rows
//! │   └── connection  # SQLite DatabaseConn wrapper
//! │
//! ├── schema/         # Schema in code
//! │   ├── definition  # EntityShape builders, TableDefinition
//! │   ├── registry    # Rank-ordered SchemaRegistry, const checks
//! │   └── cms         # Built-in 42-table schema
//! │
//! ├── syntax/         # Engine dialects
//! │   ├── sqlite
//! │   ├── sqlserver
//! │   └── mysql
//! │
//! └── creation/       # Lifecycle engine
//!     ├── events      # Before/after creation observers
//!     ├── validation  # Table, column, index and constraint passes
//!     └── result      # DatabaseSchemaResult
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use schemata::database::{DatabaseConn, SchemaCreation, SchemaRegistry, SqliteSyntaxProvider};
//!
//! let db = DatabaseConn::open_path("/tmp/cms.sqlite3")?;
//! let registry = SchemaRegistry::cms();
//! let mut engine = SchemaCreation::new(&db, &SqliteSyntaxProvider, &registry);
//!
//! engine.initialize_database_schema()?;
//!
//! let result = engine.validate_schema()?;
//! if !result.is_valid() {
//!     println!("{}", result.error_summary());
//! }
//! ```

pub mod core;
pub mod creation;
pub mod schema;
pub mod syntax;

// =============================================================================
// Re-exports
// =============================================================================

pub use core::{DatabaseConn, DatabaseSession, SqlRow, SqlValue};

pub use schema::{RegistryEntry, SchemaRegistry, TableDefinition};

pub use syntax::{
    DatabaseEngine, MySqlSyntaxProvider, SqlServerSyntaxProvider, SqlSyntaxProvider,
    SqliteSyntaxProvider, TableExistence,
};

pub use creation::{
    CreationOutcome, DatabaseCreationEvent, DatabaseSchemaResult, InstallationState,
    SchemaCreation, SchemaError, SchemaErrorKind, UninstallSummary,
};

// =============================================================================
// Helper function
// =============================================================================

/// Ensure the data directory exists
pub fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))
}
