//! Terminal output for one-shot mode.

use askql_core::QueryResult;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render a query result as a bordered table.
pub fn format_result_table(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return "(no rows)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(result.columns.clone());
    for row in &result.rows {
        builder.push_record(row.clone());
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// Print the generated SQL, colored when stdout is a terminal.
pub fn print_sql(sql: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", sql.cyan());
    } else {
        println!("{sql}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_renders_columns_and_rows() {
        let result = QueryResult {
            columns: vec!["first_name".to_string(), "films".to_string()],
            rows: vec![vec!["GINA".to_string(), "42".to_string()]],
        };
        let table = format_result_table(&result);
        assert!(table.contains("first_name"));
        assert!(table.contains("GINA"));
        assert!(table.contains("42"));
    }

    #[test]
    fn statement_without_rows_renders_placeholder() {
        assert_eq!(format_result_table(&QueryResult::default()), "(no rows)");
    }
}
