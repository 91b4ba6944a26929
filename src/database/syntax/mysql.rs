//! MySQL syntax provider
//!
//! MySQL names every primary key `PRIMARY` and does not follow the
//! `PK_`/`FK_`/`IX_` naming that constraint validation relies on, so this
//! provider reports no constraint introspection support.

use super::{quote_with, DatabaseEngine, SqlSyntaxProvider, TableExistence};
use crate::database::core::DatabaseSession;
use crate::database::schema::ColumnType;
use anyhow::{anyhow, Result};

pub struct MySqlSyntaxProvider;

const TABLES_SQL: &str = r#"
    SELECT TABLE_NAME FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE'
    ORDER BY TABLE_NAME
"#;

const COLUMNS_SQL: &str = r#"
    SELECT TABLE_NAME, COLUMN_NAME FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE()
    ORDER BY TABLE_NAME, ORDINAL_POSITION
"#;

const INDEXES_SQL: &str = r#"
    SELECT TABLE_NAME, INDEX_NAME, COLUMN_NAME, CASE NON_UNIQUE WHEN 0 THEN 1 ELSE 0 END
    FROM information_schema.STATISTICS
    WHERE TABLE_SCHEMA = DATABASE() AND INDEX_NAME <> 'PRIMARY'
    ORDER BY TABLE_NAME, INDEX_NAME, SEQ_IN_INDEX
"#;

const CONSTRAINTS_SQL: &str = r#"
    SELECT TABLE_NAME, COLUMN_NAME, CONSTRAINT_NAME
    FROM information_schema.KEY_COLUMN_USAGE
    WHERE TABLE_SCHEMA = DATABASE()
"#;

const TABLE_EXISTS_SQL: &str = r#"
    SELECT DATABASE(), COUNT(*) FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
"#;

impl SqlSyntaxProvider for MySqlSyntaxProvider {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::MySql
    }

    fn supports_constraint_introspection(&self) -> bool {
        false
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '`', '`')
    }

    fn format_column_type(&self, data_type: ColumnType) -> String {
        match data_type {
            ColumnType::Integer => "INT".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Boolean => "TINYINT(1)".to_string(),
            ColumnType::Text(len) => format!("VARCHAR({})", len.unwrap_or(255)),
            ColumnType::LongText => "LONGTEXT".to_string(),
            ColumnType::DateTime => "DATETIME".to_string(),
            ColumnType::Guid => "CHAR(36)".to_string(),
            ColumnType::Decimal => "DECIMAL(38, 6)".to_string(),
        }
    }

    fn identity_suffix(&self) -> Option<&'static str> {
        Some("AUTO_INCREMENT")
    }

    fn tables_sql(&self) -> &'static str {
        TABLES_SQL
    }

    fn columns_sql(&self) -> &'static str {
        COLUMNS_SQL
    }

    fn indexes_sql(&self) -> &'static str {
        INDEXES_SQL
    }

    fn constraints_sql(&self) -> &'static str {
        CONSTRAINTS_SQL
    }

    fn table_exists_sql(&self) -> &'static str {
        TABLE_EXISTS_SQL
    }

    /// Without a selected database the existence question cannot be answered
    fn table_exists(&self, session: &dyn DatabaseSession, table: &str) -> Result<TableExistence> {
        let rows = session.query_rows(TABLE_EXISTS_SQL, &[table])?;
        let row = rows
            .first()
            .ok_or_else(|| anyhow!("Table existence query returned no rows"))?;

        if row.first().map(|v| v.is_null()).unwrap_or(true) {
            return Ok(TableExistence::Unknown);
        }

        match row.get(1).and_then(|v| v.as_i64()) {
            Some(count) if count > 0 => Ok(TableExistence::Exists),
            Some(_) => Ok(TableExistence::Absent),
            None => Ok(TableExistence::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::{SqlRow, SqlValue};
    use crate::database::schema::{column, index, EntityShape, TableDefinition};

    /// Session answering every query with the same rows
    struct CannedSession(Vec<SqlRow>);

    impl DatabaseSession for CannedSession {
        fn execute(&self, _sql: &str) -> Result<usize> {
            Ok(0)
        }

        fn query_rows(&self, _sql: &str, _params: &[&str]) -> Result<Vec<SqlRow>> {
            Ok(self.0.clone())
        }
    }

    const TAGS: EntityShape = EntityShape {
        ident: "TagDto",
        table_name: Some("cmsTags"),
        columns: &[
            column("id", ColumnType::Integer)
                .identity()
                .primary_key("PK_cmsTags"),
            column("group", ColumnType::Text(Some(100))).nullable(),
        ],
        indexes: &[index("IX_cmsTags_group", "group")],
        foreign_keys: &[],
    };

    #[test]
    fn test_create_table_ddl() {
        let stmts = MySqlSyntaxProvider.format_create_table(&TableDefinition::from_shape(&TAGS));
        assert!(stmts[0].contains("`id` INT NOT NULL AUTO_INCREMENT"));
        assert!(stmts[0].contains("`group` VARCHAR(100) NULL"));
        assert!(stmts[0].contains("CONSTRAINT `PK_cmsTags` PRIMARY KEY (`id`)"));
        assert_eq!(
            stmts[1],
            "CREATE INDEX `IX_cmsTags_group` ON `cmsTags` (`group`)"
        );
    }

    #[test]
    fn test_table_exists_tri_state() {
        let provider = MySqlSyntaxProvider;

        let no_database = CannedSession(vec![vec![SqlValue::Null, SqlValue::Integer(0)]]);
        assert_eq!(
            provider.table_exists(&no_database, "cmsTags").unwrap(),
            TableExistence::Unknown
        );

        let present = CannedSession(vec![vec![SqlValue::from("cms"), SqlValue::Integer(1)]]);
        assert_eq!(
            provider.table_exists(&present, "cmsTags").unwrap(),
            TableExistence::Exists
        );

        let absent = CannedSession(vec![vec![SqlValue::from("cms"), SqlValue::Integer(0)]]);
        assert_eq!(
            provider.table_exists(&absent, "cmsTags").unwrap(),
            TableExistence::Absent
        );
    }

    #[test]
    fn test_defined_indexes_decodes_unique_flag() {
        let session = CannedSession(vec![vec![
            SqlValue::from("cmsTags"),
            SqlValue::from("IX_cmsTags_group"),
            SqlValue::from("group"),
            SqlValue::Integer(1),
        ]]);
        let indexes = MySqlSyntaxProvider.defined_indexes(&session).unwrap();
        assert_eq!(indexes.len(), 1);
        assert!(indexes[0].is_unique);
    }
}
