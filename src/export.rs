//! CSV and JSON export formatting for processed tasks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::processor::{priority_label, ProcessedTask};

/// Fixed CSV column header.
const CSV_HEADER: &str = "Original Description,Summary,Tags,Priority,Priority Label,Processed At";

/// JSON export document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub tasks: Vec<ProcessedTask>,
    pub exported_at: DateTime<Utc>,
    pub total_tasks: usize,
}

/// Build the JSON export document for the given tasks.
pub fn json_document(tasks: Vec<ProcessedTask>) -> ExportDocument {
    let total_tasks = tasks.len();
    ExportDocument {
        tasks,
        exported_at: Utc::now(),
        total_tasks,
    }
}

/// Render processed tasks as a CSV document with fixed columns.
pub fn csv_document(tasks: &[ProcessedTask]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for task in tasks {
        let row = [
            csv_escape(&task.original_description),
            csv_escape(&task.summary),
            csv_escape(&task.tags.join(", ")),
            task.priority.to_string(),
            priority_label(task.priority).to_string(),
            csv_escape(&task.processed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

/// Download filename stamped with the given date.
pub fn export_filename(extension: &str, date: NaiveDate) -> String {
    format!("task-summary-{}.{}", date.format("%Y-%m-%d"), extension)
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
