//! Cell formatting: raw cell value + column -> display cell.
//!
//! Formatting never fails. A missing or type-mismatched raw value produces
//! [`CellValue::Empty`], which the front-ends render as an empty cell.

pub mod date;
mod thumbnail;

use chrono::{FixedOffset, Offset, Utc};
use serde_json::Value;

use crate::model::{Collaborator, CollaboratorDirectory, Column, ColumnKind, Row, SelectOption};

pub use thumbnail::{DEFAULT_THUMBNAIL_SIZE, DefaultThumbnailResolver, ThumbnailResolver};

/// Column keys never shown in the detail panel (the primary name column is
/// rendered as the row label instead).
pub const UNSHOWN_COLUMN_KEYS: &[&str] = &[crate::model::PRIMARY_NAME_KEY];

/// Column kinds never shown in the detail panel.
pub const UNSHOWN_COLUMN_KINDS: &[ColumnKind] = &[
    ColumnKind::LongText,
    ColumnKind::Geolocation,
    ColumnKind::Link,
];

/// Returns true if the column is rendered in the detail panel.
pub fn is_shown(column: &Column) -> bool {
    !UNSHOWN_COLUMN_KEYS.contains(&column.key.as_str())
        && !UNSHOWN_COLUMN_KINDS.contains(&column.kind)
}

/// Display width of a column in pixels. Depends only on the kind and, for
/// dates, on whether the format shows hours and minutes.
pub fn width_for(column: &Column) -> u16 {
    match column.kind {
        ColumnKind::Date => {
            let shows_time = column
                .date_format()
                .is_some_and(|f| f.contains("HH:mm"));
            if shows_time { 160 } else { 100 }
        }
        ColumnKind::Ctime | ColumnKind::Mtime | ColumnKind::Link | ColumnKind::Geolocation => 160,
        ColumnKind::Collaborator => 100,
        ColumnKind::Checkbox => 40,
        ColumnKind::Number => 120,
        _ => 100,
    }
}

/// Formatted, renderable cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or malformed value.
    Empty,
    Text(String),
    Date(String),
    DateTime(String),
    Number(String),
    Collaborators(Vec<Collaborator>),
    SingleSelect(SelectOption),
    MultipleSelect(Vec<SelectOption>),
    /// File attachments; only the count is shown.
    File { count: usize },
    /// Image attachments; thumbnail of the first one plus the count.
    Image { thumbnail_url: String, count: usize },
    Checkbox(bool),
    /// Creator or modifier found in the directory.
    Creator(Collaborator),
    /// Creator or modifier email missing from the directory.
    UnknownCollaborator(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// `+N` badge for attachments beyond the first one.
    pub fn badge(&self) -> Option<String> {
        match self {
            CellValue::File { count } | CellValue::Image { count, .. } if *count > 1 => {
                Some(format!("+{}", count - 1))
            }
            _ => None,
        }
    }

    /// Plain-text rendition, used by text front-ends.
    pub fn plain_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s)
            | CellValue::Date(s)
            | CellValue::DateTime(s)
            | CellValue::Number(s) => s.clone(),
            CellValue::Collaborators(list) => list
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            CellValue::SingleSelect(option) => option.name.clone(),
            CellValue::MultipleSelect(options) => options
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            CellValue::File { .. } => with_badge("[file]", self.badge()),
            CellValue::Image { .. } => with_badge("[img]", self.badge()),
            CellValue::Checkbox(true) => "[x]".to_string(),
            CellValue::Checkbox(false) => "[ ]".to_string(),
            CellValue::Creator(c) => c.name.clone(),
            CellValue::UnknownCollaborator(email) => format!("?{}", email),
        }
    }
}

fn with_badge(icon: &str, badge: Option<String>) -> String {
    match badge {
        Some(b) => format!("{} {}", icon, b),
        None => icon.to_string(),
    }
}

/// One formatted cell of the detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCell {
    pub column_key: String,
    pub value: CellValue,
    /// Width in pixels, from [`width_for`].
    pub width: u16,
}

/// Formatting options that do not come from the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Offset used to display zoned timestamps.
    pub utc_offset: FixedOffset,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
        }
    }
}

/// Formats cells of one table against a collaborator directory.
pub struct CellFormatter<'a> {
    collaborators: &'a CollaboratorDirectory,
    thumbnails: &'a dyn ThumbnailResolver,
    options: FormatOptions,
}

impl<'a> CellFormatter<'a> {
    pub fn new(
        collaborators: &'a CollaboratorDirectory,
        thumbnails: &'a dyn ThumbnailResolver,
        options: FormatOptions,
    ) -> Self {
        Self {
            collaborators,
            thumbnails,
            options,
        }
    }

    /// Formats one cell. Returns `None` for columns hidden from the detail panel.
    pub fn format(&self, column: &Column, row: &Row) -> Option<DisplayCell> {
        if !is_shown(column) {
            return None;
        }
        Some(DisplayCell {
            column_key: column.key.clone(),
            value: self.format_value(column, row.get(&column.key)),
            width: width_for(column),
        })
    }

    /// Formats every shown column of a row, in schema order.
    pub fn format_row(&self, columns: &[Column], row: &Row) -> Vec<DisplayCell> {
        columns
            .iter()
            .filter_map(|column| self.format(column, row))
            .collect()
    }

    fn format_value(&self, column: &Column, value: Option<&Value>) -> CellValue {
        static NULL: Value = Value::Null;
        let value = value.unwrap_or(&NULL);
        match &column.kind {
            ColumnKind::Text | ColumnKind::Other(_) => match non_empty_str(value) {
                Some(s) => CellValue::Text(s.to_string()),
                None => CellValue::Empty,
            },
            ColumnKind::Date => self.format_date(value, date::DATE_FORMAT, CellValue::Date),
            ColumnKind::Ctime | ColumnKind::Mtime => {
                self.format_date(value, date::DATE_TIME_FORMAT, CellValue::DateTime)
            }
            ColumnKind::Number => match value {
                Value::Number(n) => CellValue::Number(format_number(n)),
                _ => CellValue::Empty,
            },
            ColumnKind::Collaborator => {
                let valid: Vec<Collaborator> = non_empty_array(value)
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str)
                    .filter_map(|email| self.collaborators.find(email).cloned())
                    .collect();
                if valid.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Collaborators(valid)
                }
            }
            ColumnKind::SingleSelect => non_empty_str(value)
                .and_then(|id| find_option(column.options(), id))
                .map(|o| CellValue::SingleSelect(o.clone()))
                .unwrap_or(CellValue::Empty),
            ColumnKind::MultipleSelect => {
                let valid: Vec<SelectOption> = non_empty_array(value)
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str)
                    .filter_map(|id| find_option(column.options(), id).cloned())
                    .collect();
                if valid.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::MultipleSelect(valid)
                }
            }
            ColumnKind::File => match non_empty_array(value) {
                Some(items) => CellValue::File { count: items.len() },
                None => CellValue::Empty,
            },
            ColumnKind::Image => match non_empty_array(value) {
                Some(items) => CellValue::Image {
                    thumbnail_url: items
                        .first()
                        .and_then(attachment_url)
                        .map(|src| self.thumbnails.thumbnail_url(src))
                        .unwrap_or_default(),
                    count: items.len(),
                },
                None => CellValue::Empty,
            },
            ColumnKind::Checkbox => CellValue::Checkbox(is_truthy(value)),
            ColumnKind::Creator | ColumnKind::Modifier => match non_empty_str(value) {
                Some(email) => match self.collaborators.find(email) {
                    Some(c) => CellValue::Creator(c.clone()),
                    None => CellValue::UnknownCollaborator(email.to_string()),
                },
                None => CellValue::Empty,
            },
            // Hidden kinds never reach here through `format`.
            ColumnKind::LongText | ColumnKind::Link | ColumnKind::Geolocation => CellValue::Empty,
        }
    }

    fn format_date(&self, value: &Value, fmt: &str, wrap: fn(String) -> CellValue) -> CellValue {
        non_empty_str(value)
            .and_then(|s| date::format_with(s, self.options.utc_offset, fmt))
            .map(wrap)
            .unwrap_or(CellValue::Empty)
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn non_empty_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array().filter(|a| !a.is_empty())
}

fn find_option<'o>(options: &'o [SelectOption], id: &str) -> Option<&'o SelectOption> {
    options.iter().find(|o| o.id == id)
}

/// Attachments are either plain URLs or objects with a `url` field.
fn attachment_url(item: &Value) -> Option<&str> {
    match item {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("url").and_then(Value::as_str),
        _ => None,
    }
}

/// Integral floats print without a fractional part (`7`, not `7.0`).
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

/// Loose truthiness: null, false, 0, NaN and "" are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
