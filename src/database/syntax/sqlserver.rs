//! SQL Server syntax provider

use super::{quote_with, DatabaseEngine, SqlSyntaxProvider};
use crate::database::schema::ColumnType;

pub struct SqlServerSyntaxProvider;

const TABLES_SQL: &str = r#"
    SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES
    WHERE TABLE_TYPE = 'BASE TABLE'
    ORDER BY TABLE_NAME
"#;

const COLUMNS_SQL: &str = r#"
    SELECT TABLE_NAME, COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS
    ORDER BY TABLE_NAME, ORDINAL_POSITION
"#;

const INDEXES_SQL: &str = r#"
    SELECT T.name, I.name, AC.name, CAST(I.is_unique AS INT)
    FROM sys.tables AS T
    INNER JOIN sys.indexes AS I ON T.object_id = I.object_id
    INNER JOIN sys.index_columns AS IC ON IC.object_id = I.object_id AND IC.index_id = I.index_id
    INNER JOIN sys.all_columns AS AC ON T.object_id = AC.object_id AND IC.column_id = AC.column_id
    WHERE I.is_primary_key = 0 AND I.is_unique_constraint = 0 AND T.is_ms_shipped = 0
        AND I.name IS NOT NULL
    ORDER BY T.name, I.name
"#;

// key constraints plus explicitly created indexes, one row per column
const CONSTRAINTS_SQL: &str = r#"
    SELECT TABLE_NAME, COLUMN_NAME, CONSTRAINT_NAME
    FROM INFORMATION_SCHEMA.CONSTRAINT_COLUMN_USAGE
    UNION
    SELECT T.name, AC.name, I.name
    FROM sys.tables AS T
    INNER JOIN sys.indexes AS I ON T.object_id = I.object_id
    INNER JOIN sys.index_columns AS IC ON IC.object_id = I.object_id AND IC.index_id = I.index_id
    INNER JOIN sys.all_columns AS AC ON T.object_id = AC.object_id AND IC.column_id = AC.column_id
    WHERE I.is_primary_key = 0 AND I.is_unique_constraint = 0 AND T.is_ms_shipped = 0
        AND I.name IS NOT NULL
"#;

const TABLE_EXISTS_SQL: &str =
    "SELECT COUNT(*) FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_NAME = @P1";

impl SqlSyntaxProvider for SqlServerSyntaxProvider {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::SqlServer
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '[', ']')
    }

    fn format_column_type(&self, data_type: ColumnType) -> String {
        match data_type {
            ColumnType::Integer => "INT".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Boolean => "BIT".to_string(),
            ColumnType::Text(len) => format!("NVARCHAR({})", len.unwrap_or(255)),
            ColumnType::LongText => "NVARCHAR(MAX)".to_string(),
            ColumnType::DateTime => "DATETIME".to_string(),
            ColumnType::Guid => "UNIQUEIDENTIFIER".to_string(),
            ColumnType::Decimal => "DECIMAL(38, 6)".to_string(),
        }
    }

    fn identity_suffix(&self) -> Option<&'static str> {
        Some("IDENTITY(1,1)")
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::{column, foreign_key, unique_index, EntityShape, TableDefinition};

    const USER: EntityShape = EntityShape {
        ident: "UserDto",
        table_name: Some("appUser"),
        columns: &[
            column("id", ColumnType::Integer)
                .identity()
                .primary_key("PK_appUser"),
            column("userDisabled", ColumnType::Boolean).default("0"),
            column("userLogin", ColumnType::Text(Some(125))),
            column("userType", ColumnType::Integer),
        ],
        indexes: &[unique_index("IX_appUser_userLogin", "userLogin")],
        foreign_keys: &[foreign_key(
            "FK_appUser_appUserType",
            "userType",
            "appUserType",
            "id",
        )],
    };

    #[test]
    fn test_create_table_ddl() {
        let stmts =
            SqlServerSyntaxProvider.format_create_table(&TableDefinition::from_shape(&USER));
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].starts_with("CREATE TABLE [appUser] ("));
        assert!(stmts[0].contains("[id] INT NOT NULL IDENTITY(1,1)"));
        assert!(stmts[0].contains("[userDisabled] BIT NOT NULL DEFAULT 0"));
        assert!(stmts[0].contains("[userLogin] NVARCHAR(125) NOT NULL"));
        assert!(stmts[0].contains("CONSTRAINT [PK_appUser] PRIMARY KEY ([id])"));
        assert!(stmts[0].contains(
            "CONSTRAINT [FK_appUser_appUserType] FOREIGN KEY ([userType]) REFERENCES [appUserType] ([id])"
        ));
        assert_eq!(
            stmts[1],
            "CREATE UNIQUE INDEX [IX_appUser_userLogin] ON [appUser] ([userLogin])"
        );
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            SqlServerSyntaxProvider.format_drop_table("appUser"),
            "DROP TABLE [appUser]"
        );
    }
}
