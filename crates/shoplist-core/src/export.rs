//! Share text and export rendering for the item list.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Item;

/// First line of every shared list.
pub const SHARE_HEADER: &str = "Shopping List:";

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Same payload the share sheet receives
    #[default]
    Text,
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable item representation used in JSON exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub completed: bool,
    pub reminder: DateTime<Utc>,
}

#[must_use]
pub fn item_to_export_item(item: &Item) -> ExportItem {
    ExportItem {
        id: item.id.to_string(),
        name: item.name.clone(),
        category: item.category.clone(),
        completed: item.completed,
        reminder: item.reminder,
    }
}

/// Render the share payload: the header line, then one
/// `<name> (<category>)` line per item in list order.
///
/// An empty list still yields the header followed by a newline.
#[must_use]
pub fn render_share_text(items: &[Item]) -> String {
    let lines = items
        .iter()
        .map(Item::share_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{SHARE_HEADER}\n{lines}")
}

/// Render items as pretty-printed JSON.
pub fn render_json_export(items: &[Item]) -> serde_json::Result<String> {
    let items = items
        .iter()
        .map(item_to_export_item)
        .collect::<Vec<ExportItem>>();
    serde_json::to_string_pretty(&items)
}

/// Render items as a Markdown checklist.
#[must_use]
pub fn render_markdown_export(items: &[Item]) -> String {
    let mut output = String::from("# Shopping List\n");
    if !items.is_empty() {
        output.push('\n');
    }
    for item in items {
        let mark = if item.completed { 'x' } else { ' ' };
        let _ = writeln!(output, "- [{mark}] {}", item.share_line());
    }
    output
}

/// Render items based on selected export format.
pub fn render_items_export(items: &[Item], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Text => Ok(render_share_text(items)),
        ExportFormat::Json => render_json_export(items),
        ExportFormat::Markdown => Ok(render_markdown_export(items)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("shopping-list-{timestamp_ms}.{}", format.extension())
}
