#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Schemata - a database schema lifecycle engine
//!
//! Schemata installs, uninstalls and validates a relational schema whose
//! tables are declared once in code, against live databases of several
//! engines. Validation produces a structured report of drift rather than a
//! pass/fail answer.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | (none) | Schema model, syntax providers, creation engine | `rusqlite`, `regex` |
//! | `display` | Report lenses with table formatting | `tabled` |
//! | `cli` | The `schemata` command-line binary | All above + `clap`, `tracing-subscriber` |
//!
//! ```toml
//! # Library only
//! schemata = { version = "0.1", default-features = false }
//!
//! # Library with report formatting
//! schemata = { version = "0.1", default-features = false, features = ["display"] }
//! ```
//!
//! # Architecture
//!
//! - **[`database`]**: All database functionality (always available)
//!   - `core`: The `DatabaseSession` trait and the SQLite connection
//!   - `schema`: Entity shapes, `TableDefinition`, and the ordered `SchemaRegistry`
//!   - `syntax`: SQLite, SQL Server and MySQL introspection and DDL
//!   - `creation`: The `SchemaCreation` engine and `DatabaseSchemaResult`
//!
//! - **`lens`**: Report formatting on top of the engine (requires `display`)
//!
//! - **[`config`]**: Configuration management
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use schemata::database::{DatabaseConn, SchemaCreation, SchemaRegistry, SqliteSyntaxProvider};
//!
//! let db = DatabaseConn::open_in_memory()?;
//! let registry = SchemaRegistry::cms();
//! let mut engine = SchemaCreation::new(&db, &SqliteSyntaxProvider, &registry);
//!
//! // Observers may cancel creation before any table is touched
//! engine.on_before_creation(|event| event.cancel = false);
//! engine.initialize_database_schema()?;
//!
//! let result = engine.validate_schema()?;
//! assert!(result.is_valid());
//!
//! // Best effort; failures are reported in the summary, never raised
//! let summary = engine.uninstall_database_schema();
//! println!("dropped {} tables", summary.dropped.len());
//! ```

pub mod config;
pub mod database;

// Lens module - feature gated
#[cfg(feature = "display")]
pub mod lens;

// =============================================================================
// Configuration (always available)
// =============================================================================

pub use config::SchemataConfig;

pub use config::{format_size, get_database_info, DatabaseInfo};

// =============================================================================
// Database Module - Re-export commonly used types (always available)
// =============================================================================

pub use database::{
    CreationOutcome, DatabaseConn, DatabaseCreationEvent, DatabaseEngine, DatabaseSchemaResult,
    DatabaseSession, InstallationState, SchemaCreation, SchemaError, SchemaErrorKind,
    SchemaRegistry, SqlSyntaxProvider, TableExistence, UninstallSummary,
};

// =============================================================================
// Lens Module - Feature-gated exports
// =============================================================================

#[cfg(feature = "display")]
pub use lens::utils::OutputFormat;
