use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::app::{NamedQueryResult, ProgressEvent, ProgressSink};
use crate::db::{InsertResult, QueryResult};
use crate::domain::{ArtifactCollections, ClassificationEntry};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

/// Machine-readable output: one pretty-printed JSON document per command,
/// progress events swallowed.
pub struct JsonOutput;

impl JsonOutput {
    pub fn print_classifications(entries: &[ClassificationEntry]) -> io::Result<()> {
        Self::print_json(&entries)
    }

    pub fn print_collect(collections: &ArtifactCollections) -> io::Result<()> {
        Self::print_json(collections)
    }

    pub fn print_insert(result: &InsertResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_query(result: &NamedQueryResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Human-facing output: progress lines on stderr, results as aligned tables
/// on stdout.
pub struct TextOutput;

impl TextOutput {
    pub fn print_classifications(entries: &[ClassificationEntry]) {
        let rows: Vec<Vec<Value>> = entries
            .iter()
            .map(|entry| {
                vec![
                    Value::from(entry.name.clone()),
                    Value::from(entry.object_count),
                ]
            })
            .collect();
        print_table(&["classification".to_string(), "objects".to_string()], &rows);
    }

    pub fn print_collect_summary(collections: &ArtifactCollections) {
        println!(
            "collected {} records for {} ({} metadata, {} media, {} color rows) at {}",
            collections.record_count(),
            collections.classification,
            collections.metadata.len(),
            collections.media.len(),
            collections.colors.len(),
            collections.collected_at,
        );
    }

    pub fn print_insert_summary(result: &InsertResult) {
        println!(
            "snapshot replaced: {} metadata rows, {} media rows, {} color rows",
            result.metadata_rows, result.media_rows, result.color_rows,
        );
    }

    pub fn print_query(result: &NamedQueryResult) {
        println!("{}", result.title);
        print_query_result(&result.result);
    }
}

impl ProgressSink for TextOutput {
    fn event(&self, event: ProgressEvent) {
        eprintln!("{}", event.message);
    }
}

pub fn print_query_result(result: &QueryResult) {
    print_table(&result.columns, &result.rows);
    println!("({} rows)", result.rows.len());
}

fn print_table(columns: &[String], rows: &[Vec<Value>]) {
    let mut widths: Vec<usize> = columns.iter().map(|name| name.len()).collect();
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    for row in &rendered {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() && cell.len() > widths[index] {
                widths[index] = cell.len();
            }
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect();
    println!("{}", header.join("  "));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    println!("{}", rule.join("  "));
    for row in &rendered {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
