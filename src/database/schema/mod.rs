//! Schema model
//!
//! Entities are declared statically in [`cms`] and collected into a
//! [`SchemaRegistry`], which fixes their creation and drop order.

pub mod cms;
mod definition;
mod registry;

pub use definition::{
    column, foreign_key, index, unique_index, ColumnDefinition, ColumnShape, ColumnType,
    EntityShape, ForeignKeyDefinition, ForeignKeyShape, IndexDefinition, IndexShape,
    TableDefinition,
};
pub use registry::{check_entries, RegistryEntry, SchemaRegistry};
