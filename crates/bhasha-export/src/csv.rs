//! CSV rendering.
//!
//! The header is the union of field names across all records in
//! first-seen order. Fields a record lacks render as empty cells. Arrays
//! and objects are written as compact JSON inside the cell.

use bhasha_ledger::ExportRecord;
use serde_json::Value;

/// Render records as an RFC 4180 CSV document with `\n` line endings.
pub fn render_csv(records: &[ExportRecord]) -> String {
    let header = header(records);
    if header.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().map(|name| escape(name)));
    for record in records {
        push_row(
            &mut out,
            header
                .iter()
                .map(|name| escape(&cell(record.get(name)))),
        );
    }
    out
}

/// Field union in first-seen order.
pub fn header(records: &[ExportRecord]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

fn push_row<I>(out: &mut String, cells: I)
where
    I: Iterator<Item = String>,
{
    let row: Vec<String> = cells.collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
    }
}

fn escape(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
