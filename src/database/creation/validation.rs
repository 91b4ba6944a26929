//! Validation passes
//!
//! Each pass compares one kind of object found in the live database with the
//! objects declared in the schema and appends to the result. Names are
//! compared ASCII case-insensitively. Matches are recorded under the database
//! spelling; every name found on only one side becomes an error.

use super::result::{DatabaseSchemaResult, SchemaErrorKind};
use crate::database::syntax::{ColumnInfo, ConstraintInfo};

/// Outcome of comparing database-side names against schema-side names
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct NameComparison {
    /// Database names also present in the schema, distinct
    pub matched: Vec<String>,
    /// Database-only names followed by schema-only names, distinct
    pub mismatched: Vec<String>,
}

fn contains_ignore_case(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

fn push_distinct(names: &mut Vec<String>, name: &str) {
    if !contains_ignore_case(names, name) {
        names.push(name.to_string());
    }
}

pub(crate) fn compare_names(database: &[String], schema: &[String]) -> NameComparison {
    let mut comparison = NameComparison::default();

    for name in database {
        if contains_ignore_case(schema, name) {
            push_distinct(&mut comparison.matched, name);
        } else {
            push_distinct(&mut comparison.mismatched, name);
        }
    }
    for name in schema {
        if !contains_ignore_case(database, name) {
            push_distinct(&mut comparison.mismatched, name);
        }
    }

    comparison
}

fn record(
    result: &mut DatabaseSchemaResult,
    comparison: NameComparison,
    kind: SchemaErrorKind,
) -> Vec<String> {
    for name in comparison.mismatched {
        result.add_error(kind, name);
    }
    comparison.matched
}

pub(crate) fn validate_tables(result: &mut DatabaseSchemaResult, db_tables: &[String]) {
    let schema: Vec<String> = result
        .table_definitions
        .iter()
        .map(|t| t.name.clone())
        .collect();

    let comparison = compare_names(db_tables, &schema);
    let matched = record(result, comparison, SchemaErrorKind::Table);
    result.valid_tables.extend(matched);
}

pub(crate) fn validate_columns(result: &mut DatabaseSchemaResult, db_columns: &[ColumnInfo]) {
    let database: Vec<String> = db_columns
        .iter()
        .map(|c| format!("{},{}", c.table_name, c.column_name))
        .collect();
    let schema: Vec<String> = result
        .table_definitions
        .iter()
        .flat_map(|t| t.columns.iter())
        .map(|c| format!("{},{}", c.table_name, c.name))
        .collect();

    let comparison = compare_names(&database, &schema);
    let matched = record(result, comparison, SchemaErrorKind::Column);
    result.valid_columns.extend(matched);
}

/// Compares the indexes already loaded into `db_index_definitions`
pub(crate) fn validate_indexes(result: &mut DatabaseSchemaResult) {
    let database: Vec<String> = result
        .db_index_definitions
        .iter()
        .map(|i| i.index_name.clone())
        .collect();
    let schema = schema_index_names(result);

    let comparison = compare_names(&database, &schema);
    let matched = record(result, comparison, SchemaErrorKind::Index);
    result.valid_indexes.extend(matched);
}

fn schema_index_names(result: &DatabaseSchemaResult) -> Vec<String> {
    result
        .table_definitions
        .iter()
        .flat_map(|t| t.indexes.iter())
        .map(|i| i.name.clone())
        .collect()
}

fn schema_foreign_key_names(result: &DatabaseSchemaResult) -> Vec<String> {
    result
        .table_definitions
        .iter()
        .flat_map(|t| t.foreign_keys.iter())
        .map(|fk| fk.name.clone())
        .collect()
}

fn schema_primary_key_names(result: &DatabaseSchemaResult) -> Vec<String> {
    let mut names = Vec::new();
    for col in result.table_definitions.iter().flat_map(|t| t.columns.iter()) {
        if let Some(pk) = col.primary_key_name.as_deref() {
            if !pk.trim().is_empty() {
                push_distinct(&mut names, pk);
            }
        }
    }
    names
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    let (name, prefix) = (name.as_bytes(), prefix.as_bytes());
    name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Constraint names partitioned by naming convention
#[derive(Debug, Default)]
struct ConstraintPartitions {
    foreign_keys: Vec<String>,
    primary_keys: Vec<String>,
    indexes: Vec<String>,
    unknown: Vec<String>,
}

fn partition_constraints(db_constraints: &[ConstraintInfo]) -> ConstraintPartitions {
    // exact-match distinct; differently cased names are separate constraints
    let mut distinct: Vec<String> = Vec::new();
    for c in db_constraints {
        if !distinct.contains(&c.constraint_name) {
            distinct.push(c.constraint_name.clone());
        }
    }

    let mut partitions = ConstraintPartitions::default();
    for name in distinct {
        if has_prefix(&name, "FK_") {
            partitions.foreign_keys.push(name);
        } else if has_prefix(&name, "PK_") {
            partitions.primary_keys.push(name);
        } else if has_prefix(&name, "IX_") {
            partitions.indexes.push(name);
        } else {
            partitions.unknown.push(name);
        }
    }
    partitions
}

/// Each partition is compared on its own, so one misnamed object may be
/// reported by more than one partition.
pub(crate) fn validate_constraints(
    result: &mut DatabaseSchemaResult,
    db_constraints: &[ConstraintInfo],
) {
    let partitions = partition_constraints(db_constraints);

    let foreign_keys = schema_foreign_key_names(result);
    let primary_keys = schema_primary_key_names(result);
    let indexes = schema_index_names(result);

    for name in partitions.unknown {
        if contains_ignore_case(&foreign_keys, &name)
            || contains_ignore_case(&primary_keys, &name)
            || contains_ignore_case(&indexes, &name)
        {
            result.valid_constraints.insert(name);
        } else {
            result.add_error(SchemaErrorKind::Unknown, name);
        }
    }

    for (database, schema) in [
        (&partitions.foreign_keys, &foreign_keys),
        (&partitions.primary_keys, &primary_keys),
        (&partitions.indexes, &indexes),
    ] {
        let comparison = compare_names(database, schema);
        let matched = record(result, comparison, SchemaErrorKind::Constraint);
        result.valid_constraints.extend(matched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::creation::result::DbIndexDefinition;
    use crate::database::schema::{
        column, foreign_key, index, ColumnType, EntityShape, TableDefinition,
    };

    const CONTENT_XML: EntityShape = EntityShape {
        ident: "contentxml",
        table_name: None,
        columns: &[
            column("nodeId", ColumnType::Integer).primary_key("PK_contentxml"),
            column("xml", ColumnType::LongText),
        ],
        indexes: &[index("IX_Custom", "xml")],
        foreign_keys: &[foreign_key("FK_contentxml_node", "nodeId", "node", "id")],
    };

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn result_for(shape: &EntityShape) -> DatabaseSchemaResult {
        let mut result = DatabaseSchemaResult::new();
        result.table_definitions.push(TableDefinition::from_shape(shape));
        result
    }

    fn constraint(name: &str) -> ConstraintInfo {
        ConstraintInfo {
            table_name: "contentxml".to_string(),
            column_name: "nodeId".to_string(),
            constraint_name: name.to_string(),
        }
    }

    #[test]
    fn test_compare_names_symmetric_difference() {
        let cmp = compare_names(
            &names(&["Shared", "Foo", "foo"]),
            &names(&["shared", "Bar", "BAR"]),
        );
        assert_eq!(cmp.matched, names(&["Shared"]));
        assert_eq!(cmp.mismatched, names(&["Foo", "Bar"]));
    }

    #[test]
    fn test_table_names_match_ignoring_case() {
        let mut result = result_for(&CONTENT_XML);
        validate_tables(&mut result, &names(&["ContentXml"]));
        assert!(result.is_valid());
        assert!(result.valid_tables.contains("ContentXml"));
    }

    #[test]
    fn test_extra_and_missing_tables_each_reported_once() {
        let mut result = result_for(&CONTENT_XML);
        result.table_definitions[0].name = "Bar".to_string();
        validate_tables(&mut result, &names(&["Foo"]));
        assert_eq!(result.errors_of(SchemaErrorKind::Table), vec!["Foo", "Bar"]);
        assert!(result.valid_tables.is_empty());
    }

    #[test]
    fn test_columns_keyed_by_table() {
        let mut result = result_for(&CONTENT_XML);
        let db = vec![
            ColumnInfo {
                table_name: "ContentXml".to_string(),
                column_name: "NODEID".to_string(),
            },
            ColumnInfo {
                table_name: "other".to_string(),
                column_name: "xml".to_string(),
            },
        ];
        validate_columns(&mut result, &db);
        assert!(result.valid_columns.contains("ContentXml,NODEID"));
        assert_eq!(
            result.errors_of(SchemaErrorKind::Column),
            vec!["other,xml", "contentxml,xml"]
        );
    }

    #[test]
    fn test_indexes_keyed_by_name() {
        let mut result = result_for(&CONTENT_XML);
        for column in ["xml", "nodeId"] {
            result.db_index_definitions.push(DbIndexDefinition {
                table_name: "contentxml".to_string(),
                index_name: "ix_custom".to_string(),
                column_name: column.to_string(),
                is_unique: false,
            });
        }
        validate_indexes(&mut result);
        assert!(result.is_valid());
        assert_eq!(result.valid_indexes.len(), 1);
    }

    #[test]
    fn test_matching_constraints_are_valid() {
        let mut result = result_for(&CONTENT_XML);
        let db = vec![
            constraint("PK_contentxml"),
            constraint("FK_contentxml_node"),
            constraint("FK_contentxml_node"),
            constraint("IX_Custom"),
        ];
        validate_constraints(&mut result, &db);
        assert!(result.is_valid());
        assert_eq!(result.valid_constraints.len(), 3);
    }

    #[test]
    fn test_missing_index_reported_by_index_partition() {
        let mut result = result_for(&CONTENT_XML);
        let db = vec![constraint("PK_contentxml"), constraint("FK_contentxml_node")];
        validate_constraints(&mut result, &db);
        assert_eq!(result.errors_of(SchemaErrorKind::Constraint), vec!["IX_Custom"]);
        assert!(result.errors_of(SchemaErrorKind::Unknown).is_empty());
    }

    #[test]
    fn test_unknown_constraints() {
        let mut result = result_for(&CONTENT_XML);
        let db = vec![
            constraint("PK_contentxml"),
            constraint("FK_contentxml_node"),
            constraint("IX_Custom"),
            constraint("DF_contentxml_xml"),
        ];
        validate_constraints(&mut result, &db);
        assert_eq!(
            result.errors_of(SchemaErrorKind::Unknown),
            vec!["DF_contentxml_xml"]
        );
    }

    #[test]
    fn test_unknown_constraints_distinct_by_exact_name() {
        let mut result = result_for(&CONTENT_XML);
        let db = vec![
            constraint("df_a"),
            constraint("DF_A"),
            constraint("df_a"),
            constraint("PK_contentxml"),
        ];
        validate_constraints(&mut result, &db);
        assert_eq!(
            result.errors_of(SchemaErrorKind::Unknown),
            vec!["df_a", "DF_A"]
        );
    }

    #[test]
    fn test_misnamed_constraint_reported_per_partition() {
        let mut result = result_for(&CONTENT_XML);
        result.table_definitions[0].columns[0].primary_key_name = Some("pkx".to_string());
        let db = vec![
            constraint("pkx"),
            constraint("PK_contentxml"),
            constraint("FK_contentxml_node"),
            constraint("IX_Custom"),
        ];
        validate_constraints(&mut result, &db);
        // rescued from the unknown bucket, yet the PK partition still disagrees
        assert!(result.valid_constraints.contains("pkx"));
        assert_eq!(
            result.errors_of(SchemaErrorKind::Constraint),
            vec!["PK_contentxml", "pkx"]
        );
    }
}
