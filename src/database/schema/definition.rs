//! Table definitions
//!
//! Entities are described once as `'static` [`EntityShape`] values built with
//! `const fn` builders. [`TableDefinition::from_shape`] turns a shape into the
//! owned definition that DDL generation and validation work from.

use serde::Serialize;
use std::fmt;

/// Logical column type, mapped to a concrete type by each syntax provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    BigInt,
    Boolean,
    /// Bounded text column (`None` falls back to the provider default length)
    Text(Option<u32>),
    /// Unbounded text
    LongText,
    DateTime,
    Guid,
    Decimal,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::BigInt => write!(f, "bigint"),
            ColumnType::Boolean => write!(f, "boolean"),
            ColumnType::Text(Some(len)) => write!(f, "text({})", len),
            ColumnType::Text(None) => write!(f, "text"),
            ColumnType::LongText => write!(f, "longtext"),
            ColumnType::DateTime => write!(f, "datetime"),
            ColumnType::Guid => write!(f, "guid"),
            ColumnType::Decimal => write!(f, "decimal"),
        }
    }
}

// =============================================================================
// Static shapes
// =============================================================================

/// Static description of one column
#[derive(Debug, Clone, Copy)]
pub struct ColumnShape {
    pub name: &'static str,
    pub data_type: ColumnType,
    pub nullable: bool,
    pub identity: bool,
    /// Name of the primary-key constraint this column belongs to
    pub primary_key: Option<&'static str>,
    /// Literal SQL default, emitted verbatim
    pub default: Option<&'static str>,
}

impl ColumnShape {
    pub const fn new(name: &'static str, data_type: ColumnType) -> Self {
        Self {
            name,
            data_type,
            nullable: false,
            identity: false,
            primary_key: None,
            default: None,
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Auto-incrementing key column
    pub const fn identity(self) -> Self {
        Self {
            identity: true,
            ..self
        }
    }

    pub const fn primary_key(self, constraint: &'static str) -> Self {
        Self {
            primary_key: Some(constraint),
            ..self
        }
    }

    pub const fn default(self, literal: &'static str) -> Self {
        Self {
            default: Some(literal),
            ..self
        }
    }
}

/// Shorthand for [`ColumnShape::new`]
pub const fn column(name: &'static str, data_type: ColumnType) -> ColumnShape {
    ColumnShape::new(name, data_type)
}

/// Static description of a single-column index
#[derive(Debug, Clone, Copy)]
pub struct IndexShape {
    pub name: &'static str,
    pub column: &'static str,
    pub unique: bool,
}

pub const fn index(name: &'static str, column: &'static str) -> IndexShape {
    IndexShape {
        name,
        column,
        unique: false,
    }
}

pub const fn unique_index(name: &'static str, column: &'static str) -> IndexShape {
    IndexShape {
        name,
        column,
        unique: true,
    }
}

/// Static description of a foreign key
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyShape {
    pub name: &'static str,
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

pub const fn foreign_key(
    name: &'static str,
    column: &'static str,
    references_table: &'static str,
    references_column: &'static str,
) -> ForeignKeyShape {
    ForeignKeyShape {
        name,
        column,
        references_table,
        references_column,
    }
}

/// Static description of one entity
#[derive(Debug, Clone, Copy)]
pub struct EntityShape {
    /// Identifier of the entity in code
    pub ident: &'static str,
    /// Physical table name, when it differs from `ident`
    pub table_name: Option<&'static str>,
    pub columns: &'static [ColumnShape],
    pub indexes: &'static [IndexShape],
    pub foreign_keys: &'static [ForeignKeyShape],
}

impl EntityShape {
    /// The physical table name: the override if declared, otherwise the identifier
    pub const fn physical_name(&self) -> &'static str {
        match self.table_name {
            Some(name) => name,
            None => self.ident,
        }
    }
}

// =============================================================================
// Owned definitions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub table_name: String,
    pub name: String,
    pub data_type: ColumnType,
    pub nullable: bool,
    pub identity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDefinition {
    pub name: String,
    pub column_name: String,
    pub is_unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDefinition {
    pub name: String,
    pub column_name: String,
    pub references_table: String,
    pub references_column: String,
}

/// Definition of one table as declared in code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
    pub foreign_keys: Vec<ForeignKeyDefinition>,
}

impl TableDefinition {
    /// Extract the table definition for an entity shape
    pub fn from_shape(shape: &EntityShape) -> Self {
        let name = shape.physical_name().to_string();

        let columns = shape
            .columns
            .iter()
            .map(|c| ColumnDefinition {
                table_name: name.clone(),
                name: c.name.to_string(),
                data_type: c.data_type,
                nullable: c.nullable,
                identity: c.identity,
                primary_key_name: c.primary_key.map(|s| s.to_string()),
                default: c.default.map(|s| s.to_string()),
            })
            .collect();

        let indexes = shape
            .indexes
            .iter()
            .map(|i| IndexDefinition {
                name: i.name.to_string(),
                column_name: i.column.to_string(),
                is_unique: i.unique,
            })
            .collect();

        let foreign_keys = shape
            .foreign_keys
            .iter()
            .map(|fk| ForeignKeyDefinition {
                name: fk.name.to_string(),
                column_name: fk.column.to_string(),
                references_table: fk.references_table.to_string(),
                references_column: fk.references_column.to_string(),
            })
            .collect();

        TableDefinition {
            name,
            columns,
            indexes,
            foreign_keys,
        }
    }

    /// The primary key of this table as `(constraint name, columns)`
    ///
    /// Blank constraint names are ignored.
    pub fn primary_key(&self) -> Option<(&str, Vec<&str>)> {
        let mut key: Option<(&str, Vec<&str>)> = None;
        for col in &self.columns {
            let Some(pk) = col.primary_key_name.as_deref() else {
                continue;
            };
            if pk.trim().is_empty() {
                continue;
            }
            match key.as_mut() {
                Some((_, cols)) => cols.push(col.name.as_str()),
                None => key = Some((pk, vec![col.name.as_str()])),
            }
        }
        key
    }
}
