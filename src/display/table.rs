//! Table rendering

use std::fmt::Display;

use tabled::builder::Builder;
use tabled::settings::Style;

/// Render headers and rows as a bordered table
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());
    for row in rows {
        builder.push_record(row.iter().cloned());
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// One record per line, using each record's display form
pub fn format_records<T: Display>(records: &[T]) -> String {
    if records.is_empty() {
        return "No records found.".to_string();
    }

    records
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
