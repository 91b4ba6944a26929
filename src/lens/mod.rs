//! Lens module
//!
//! Lenses combine business logic with output formatting so that the same
//! operations can back different interfaces (CLI today, anything else later).
//!
//! # Feature Requirements
//!
//! The lens module requires the `display` feature, which pulls in `tabled`.
//!
//! # Architecture
//!
//! Each lens module exports:
//! - A **Lens struct** (e.g. `SchemaLens`) - the main entry point for all operations
//! - **Row types** - serializable, tabled report rows
//!
//! ```rust,ignore
//! use schemata::lens::schema::{SchemaLens, SchemaStatusReport};
//! use schemata::lens::utils::OutputFormat;
//! ```

pub mod utils;

// SchemaLens - install, uninstall, validate and describe the schema
pub mod schema;
