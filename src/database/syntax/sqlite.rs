//! SQLite syntax provider
//!
//! SQLite does not expose constraint names through its pragmas, so named
//! table and column constraints (keys, `UNIQUE`, `CHECK`, `REFERENCES`) are
//! recovered by parsing the DDL stored in `sqlite_master`.

use super::{quote_with, ConstraintInfo, DatabaseEngine, SqlSyntaxProvider};
use crate::database::core::{text_at, DatabaseSession};
use crate::database::schema::ColumnType;
use anyhow::{anyhow, Result};
use regex::Regex;
use std::sync::OnceLock;

pub struct SqliteSyntaxProvider;

const TABLES_SQL: &str = r#"
    SELECT name FROM sqlite_master
    WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
    ORDER BY name
"#;

const COLUMNS_SQL: &str = r#"
    SELECT m.name, p.name
    FROM sqlite_master AS m
    JOIN pragma_table_info(m.name) AS p
    WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%'
    ORDER BY m.name, p.cid
"#;

// origin 'c' restricts to indexes created with CREATE INDEX; expression
// index terms have no column name
const INDEXES_SQL: &str = r#"
    SELECT m.name, il.name, COALESCE(ii.name, ''), il."unique"
    FROM sqlite_master AS m
    JOIN pragma_index_list(m.name) AS il
    JOIN pragma_index_info(il.name) AS ii
    WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%' AND il.origin = 'c'
    ORDER BY m.name, il.name, ii.seqno
"#;

const TABLE_DDL_SQL: &str = r#"
    SELECT name, sql FROM sqlite_master
    WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND sql IS NOT NULL
    ORDER BY name
"#;

const TABLE_EXISTS_SQL: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE";

const IDENT: &str = r#"(?:"[^"]+"|`[^`]+`|\[[^\]]+\]|[A-Za-z0-9_]+)"#;

#[allow(clippy::unwrap_used)]
fn table_constraint_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"(?is)^CONSTRAINT\s+({})\s*(.*)$", IDENT)).unwrap())
}

#[allow(clippy::unwrap_used)]
fn column_constraint_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"(?i)\bCONSTRAINT\s+({})", IDENT)).unwrap())
}

#[allow(clippy::unwrap_used)]
fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IDENT).unwrap())
}

fn unquote(ident: &str) -> String {
    ident
        .trim()
        .trim_matches(|c| c == '"' || c == '`' || c == '[' || c == ']')
        .to_string()
}

/// Split a CREATE TABLE body on the commas that separate its items
fn split_items(body: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in body.char_indices() {
        match quote {
            Some(close) => {
                if ch == close {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '[' => quote = Some(']'),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    items.push(body[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    let last = body[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    items
}

fn is_table_constraint(item: &str) -> bool {
    let keyword: String = item
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();
    matches!(
        keyword.as_str(),
        "CONSTRAINT" | "PRIMARY" | "UNIQUE" | "FOREIGN" | "CHECK"
    )
}

/// Columns named inside the first parenthesised list of `clause`
fn column_list(clause: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (clause.find('('), clause.find(')')) else {
        return Vec::new();
    };
    if close < open {
        return Vec::new();
    }
    clause[open + 1..close]
        .split(',')
        .map(unquote)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Extract `(constraint, column)` pairs for every named constraint in a CREATE TABLE statement
///
/// Table constraints are attributed to the columns they list (for `CHECK`,
/// the table columns its expression mentions). Column constraints are
/// attributed to the column they are declared on.
pub(crate) fn parse_named_constraints(ddl: &str) -> Vec<(String, String)> {
    let body = match (ddl.find('('), ddl.rfind(')')) {
        (Some(open), Some(close)) if open < close => &ddl[open + 1..close],
        _ => return Vec::new(),
    };
    let items = split_items(body);

    let columns: Vec<String> = items
        .iter()
        .filter(|item| !is_table_constraint(item))
        .filter_map(|item| identifier_regex().find(item).map(|m| unquote(m.as_str())))
        .collect();

    let mut found = Vec::new();
    for item in &items {
        if is_table_constraint(item) {
            let Some(caps) = table_constraint_regex().captures(item) else {
                continue;
            };
            let name = unquote(&caps[1]);
            let clause = &caps[2];
            let upper = clause.to_ascii_uppercase();

            let targets = if upper.starts_with("CHECK") {
                let mut mentioned: Vec<String> = Vec::new();
                for word in identifier_regex().find_iter(clause) {
                    let word = unquote(word.as_str());
                    if let Some(c) = columns.iter().find(|c| c.eq_ignore_ascii_case(&word)) {
                        if !mentioned.contains(c) {
                            mentioned.push(c.clone());
                        }
                    }
                }
                mentioned
            } else {
                column_list(clause)
            };

            if targets.is_empty() {
                found.push((name, String::new()));
            } else {
                for column in targets {
                    found.push((name.clone(), column));
                }
            }
        } else if let Some(column) = identifier_regex().find(item) {
            let column = unquote(column.as_str());
            for caps in column_constraint_regex().captures_iter(item) {
                found.push((unquote(&caps[1]), column.clone()));
            }
        }
    }
    found
}

impl SqlSyntaxProvider for SqliteSyntaxProvider {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::Sqlite
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"', '"')
    }

    fn format_column_type(&self, data_type: ColumnType) -> String {
        match data_type {
            // INTEGER keeps identity primary keys as rowid aliases
            ColumnType::Integer | ColumnType::BigInt | ColumnType::Boolean => "INTEGER",
            ColumnType::Text(_) | ColumnType::LongText | ColumnType::Guid => "TEXT",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Decimal => "NUMERIC",
        }
        .to_string()
    }

    fn identity_suffix(&self) -> Option<&'static str> {
        None
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
        TABLE_DDL_SQL
    }

    fn table_exists_sql(&self) -> &'static str {
        TABLE_EXISTS_SQL
    }

    fn constraints_per_column(&self, session: &dyn DatabaseSession) -> Result<Vec<ConstraintInfo>> {
        let rows = session
            .query_rows(TABLE_DDL_SQL, &[])
            .map_err(|e| anyhow!("Failed to read table definitions: {}", e))?;

        let mut constraints = Vec::new();
        for row in &rows {
            let table = text_at(row, 0)?;
            let ddl = text_at(row, 1)?;
            for (name, column) in parse_named_constraints(&ddl) {
                constraints.push(ConstraintInfo {
                    table_name: table.clone(),
                    column_name: column,
                    constraint_name: name,
                });
            }
        }

        // explicitly created indexes are reported alongside key constraints
        for index in self.defined_indexes(session)? {
            constraints.push(ConstraintInfo {
                table_name: index.table_name,
                column_name: index.column_name,
                constraint_name: index.index_name,
            });
        }

        Ok(constraints)
    }
}
