//! Textual schema description embedded in the prompt.
//!
//! The completion model sees the schema as one text block: a `CREATE TABLE`
//! statement per table, each followed by a comment with a few sample rows so
//! the model can see value shapes. When no connection exists the provider
//! substitutes [`NO_CONNECTION_SENTINEL`] instead.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::types::QueryResult;

/// Fixed placeholder used as the schema text when no connection exists.
pub const NO_CONNECTION_SENTINEL: &str = "No database connected.";

/// Number of sample rows requested per table at introspection time.
pub const SAMPLE_ROW_LIMIT: usize = 3;

/// One column as reported by the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
}

/// One table as reported by the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    /// Up to [`SAMPLE_ROW_LIMIT`] rows captured alongside the columns.
    /// Absent when the sample query failed; the description still renders.
    #[serde(default)]
    pub sample_rows: Option<QueryResult>,
}

/// Render introspected tables as the text block the prompt embeds.
pub fn render_schema_text(tables: &[TableInfo]) -> String {
    let mut out = String::new();

    for (index, table) in tables.iter().enumerate() {
        if index > 0 {
            out.push_str("\n\n");
        }
        write_create_table(&mut out, table);
        if let Some(sample) = &table.sample_rows {
            out.push_str("\n\n");
            write_sample_rows(&mut out, &table.name, sample);
        }
    }

    out
}

fn write_create_table(out: &mut String, table: &TableInfo) {
    writeln!(out, "CREATE TABLE {} (", table.name).unwrap();
    for (index, column) in table.columns.iter().enumerate() {
        let terminator = if index + 1 < table.columns.len() {
            ","
        } else {
            ""
        };
        let key = if column.is_primary_key {
            " PRIMARY KEY"
        } else {
            ""
        };
        writeln!(out, "\t{} {}{key}{terminator}", column.name, column.data_type).unwrap();
    }
    out.push(')');
}

fn write_sample_rows(out: &mut String, table_name: &str, sample: &QueryResult) {
    writeln!(out, "/*").unwrap();
    writeln!(out, "{SAMPLE_ROW_LIMIT} rows from {table_name} table:").unwrap();
    writeln!(out, "{}", sample.columns.join("\t")).unwrap();
    for row in &sample.rows {
        writeln!(out, "{}", row.join("\t")).unwrap();
    }
    out.push_str("*/");
}
