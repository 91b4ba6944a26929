//! Ordered schema registry
//!
//! The registry maps a dependency rank to an entity shape. Ascending rank is a
//! safe creation order and descending rank a safe drop order. Well-formedness
//! is checked by [`check_entries`], a `const fn` so that static registries can
//! be verified at compile time.

use super::definition::{EntityShape, TableDefinition};
use anyhow::{anyhow, Result};

/// One `(rank, shape)` pair
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub rank: usize,
    pub shape: &'static EntityShape,
}

impl RegistryEntry {
    pub const fn new(rank: usize, shape: &'static EntityShape) -> Self {
        Self { rank, shape }
    }

    pub fn table_name(&self) -> &'static str {
        self.shape.physical_name()
    }
}

/// Immutable, rank-ordered list of entities making up a schema
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entries: Vec<RegistryEntry>,
}

impl SchemaRegistry {
    /// Build a registry from entries in any order
    ///
    /// Fails if the entries are not a well-formed dependency ordering.
    pub fn new(entries: &[RegistryEntry]) -> Result<Self> {
        check_entries(entries).map_err(|e| anyhow!("Invalid schema registry: {}", e))?;

        let mut entries = entries.to_vec();
        entries.sort_by_key(|e| e.rank);
        Ok(Self { entries })
    }

    /// The built-in content-management schema
    pub fn cms() -> Self {
        let mut entries = super::cms::CMS_SCHEMA.to_vec();
        entries.sort_by_key(|e| e.rank);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in creation order
    pub fn ascending(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Entries in drop order
    pub fn descending(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter().rev()
    }

    /// Physical table names in creation order
    pub fn table_names(&self) -> Vec<&'static str> {
        self.ascending().map(|e| e.table_name()).collect()
    }

    /// Extract every table definition in creation order
    pub fn table_definitions(&self) -> Vec<TableDefinition> {
        self.ascending()
            .map(|e| TableDefinition::from_shape(e.shape))
            .collect()
    }
}

// =============================================================================
// const validation
// =============================================================================

const fn eq_ignore_case(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}

const fn is_blank(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

/// Rank of the entry whose physical table is `table`
const fn rank_of(entries: &[RegistryEntry], table: &str) -> Option<usize> {
    let mut i = 0;
    while i < entries.len() {
        if eq_ignore_case(entries[i].shape.physical_name(), table) {
            return Some(entries[i].rank);
        }
        i += 1;
    }
    None
}

const fn ranks_are_dense(entries: &[RegistryEntry]) -> bool {
    let mut rank = 0;
    while rank < entries.len() {
        let mut seen = 0;
        let mut i = 0;
        while i < entries.len() {
            if entries[i].rank == rank {
                seen += 1;
            }
            i += 1;
        }
        if seen != 1 {
            return false;
        }
        rank += 1;
    }
    true
}

const fn table_names_unique(entries: &[RegistryEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let mut j = i + 1;
        while j < entries.len() {
            if eq_ignore_case(
                entries[i].shape.physical_name(),
                entries[j].shape.physical_name(),
            ) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn foreign_keys_point_down(entries: &[RegistryEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let fks = entries[i].shape.foreign_keys;
        let mut k = 0;
        while k < fks.len() {
            match rank_of(entries, fks[k].references_table) {
                Some(rank) if rank <= entries[i].rank => {}
                _ => return false,
            }
            k += 1;
        }
        i += 1;
    }
    true
}

const fn single_primary_key_per_table(entries: &[RegistryEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let columns = entries[i].shape.columns;
        let mut first: Option<&str> = None;
        let mut c = 0;
        while c < columns.len() {
            if let Some(pk) = columns[c].primary_key {
                if !is_blank(pk) {
                    match first {
                        None => first = Some(pk),
                        Some(existing) => {
                            if !eq_ignore_case(existing, pk) {
                                return false;
                            }
                        }
                    }
                }
            }
            c += 1;
        }
        i += 1;
    }
    true
}

const fn index_names_unique(entries: &[RegistryEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let mut a = 0;
        while a < entries[i].shape.indexes.len() {
            let name = entries[i].shape.indexes[a].name;
            let mut j = i;
            while j < entries.len() {
                let start = if j == i { a + 1 } else { 0 };
                let mut b = start;
                while b < entries[j].shape.indexes.len() {
                    if eq_ignore_case(name, entries[j].shape.indexes[b].name) {
                        return false;
                    }
                    b += 1;
                }
                j += 1;
            }
            a += 1;
        }
        i += 1;
    }
    true
}

const fn foreign_key_names_unique(entries: &[RegistryEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let mut a = 0;
        while a < entries[i].shape.foreign_keys.len() {
            let name = entries[i].shape.foreign_keys[a].name;
            let mut j = i;
            while j < entries.len() {
                let start = if j == i { a + 1 } else { 0 };
                let mut b = start;
                while b < entries[j].shape.foreign_keys.len() {
                    if eq_ignore_case(name, entries[j].shape.foreign_keys[b].name) {
                        return false;
                    }
                    b += 1;
                }
                j += 1;
            }
            a += 1;
        }
        i += 1;
    }
    true
}

/// Check that entries form a well-formed dependency ordering
pub const fn check_entries(entries: &[RegistryEntry]) -> Result<(), &'static str> {
    if !ranks_are_dense(entries) {
        return Err("ranks must be unique and dense starting at 0");
    }
    if !table_names_unique(entries) {
        return Err("table names must be unique");
    }
    if !foreign_keys_point_down(entries) {
        return Err("foreign keys must reference a table of lower or equal rank");
    }
    if !single_primary_key_per_table(entries) {
        return Err("a table may declare only one primary key name");
    }
    if !index_names_unique(entries) {
        return Err("index names must be unique");
    }
    if !foreign_key_names_unique(entries) {
        return Err("foreign key names must be unique");
    }
    Ok(())
}
