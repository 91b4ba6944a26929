//! Common output helpers for lens modules
//!
//! Every report the lenses produce is a list of rows that can be shown as a
//! table, serialized as JSON, or written as pipe-separated values.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Unified output format for all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty table with borders (default)
    #[default]
    Table,
    /// Markdown table format
    Markdown,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON with indentation
    JsonPretty,
    /// One JSON object per line
    JsonLine,
    /// Pipe-separated values with header
    Psv,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    /// Get a list of all format names for help text
    pub fn all_names() -> &'static [&'static str] {
        &[
            "table",
            "markdown",
            "json",
            "json-pretty",
            "json-line",
            "psv",
        ]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::JsonPretty => write!(f, "json-pretty"),
            Self::JsonLine => write!(f, "json-line"),
            Self::Psv => write!(f, "psv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "pretty" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "json-pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            "json-line" | "jsonline" | "jsonl" | "ndjson" => Ok(Self::JsonLine),
            "psv" | "pipe" => Ok(Self::Psv),
            _ => Err(format!(
                "Unknown output format '{}'. Valid formats: {}",
                s,
                Self::all_names().join(", ")
            )),
        }
    }
}

/// Render rows in the requested format
pub fn format_rows<T: Tabled + Serialize>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(Table::new(rows).with(Style::rounded()).to_string()),
        OutputFormat::Markdown => Ok(Table::new(rows).with(Style::markdown()).to_string()),
        OutputFormat::Json => serde_json::to_string(rows)
            .map_err(|e| anyhow!("Failed to serialize to JSON: {}", e)),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(rows)
            .map_err(|e| anyhow!("Failed to serialize to JSON: {}", e)),
        OutputFormat::JsonLine => {
            let lines = rows
                .iter()
                .map(|r| {
                    serde_json::to_string(r)
                        .map_err(|e| anyhow!("Failed to serialize to JSON: {}", e))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(lines.join("\n"))
        }
        OutputFormat::Psv => {
            let mut lines = vec![T::headers().join("|")];
            lines.extend(rows.iter().map(|r| r.fields().join("|")));
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        table: String,
        columns: usize,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                table: "appNode".to_string(),
                columns: 11,
            },
            Row {
                table: "cmsTags".to_string(),
                columns: 4,
            },
        ]
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("pretty").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(
            OutputFormat::from_str("ndjson").unwrap(),
            OutputFormat::JsonLine
        );
        assert_eq!(OutputFormat::from_str("pipe").unwrap(), OutputFormat::Psv);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_output_format_display_roundtrip() {
        for name in OutputFormat::all_names() {
            let format = OutputFormat::from_str(name).unwrap();
            assert_eq!(format.to_string(), *name);
        }
        assert!(OutputFormat::JsonLine.is_json());
        assert!(!OutputFormat::Psv.is_json());
    }

    #[test]
    fn test_format_rows_psv() {
        let out = format_rows(&rows(), OutputFormat::Psv).unwrap();
        assert_eq!(out, "table|columns\nappNode|11\ncmsTags|4");
    }

    #[test]
    fn test_format_rows_json() {
        let out = format_rows(&rows(), OutputFormat::Json).unwrap();
        assert_eq!(
            out,
            r#"[{"table":"appNode","columns":11},{"table":"cmsTags","columns":4}]"#
        );

        let lines = format_rows(&rows(), OutputFormat::JsonLine).unwrap();
        assert_eq!(lines.lines().count(), 2);
    }

    #[test]
    fn test_format_rows_markdown() {
        let out = format_rows(&rows(), OutputFormat::Markdown).unwrap();
        assert!(out.starts_with("| table"));
        assert!(out.contains("| appNode"));
    }
}
