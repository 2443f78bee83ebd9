//! Table schema, rows, collaborators and duplicate groups.
//!
//! These types mirror the JSON shapes handed over by the host table API.
//! They are immutable from the point of view of the detail dialog; only the
//! [`crate::host::DuplicateStore`] mutates them when a row is deleted.

mod dataset;

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

pub use dataset::{ConfigSetting, Dataset, LoadError};

/// Reserved row key holding the primary (display) name of a row.
pub const PRIMARY_NAME_KEY: &str = "0000";

/// Reserved row key holding the row identifier.
pub const ROW_ID_KEY: &str = "_id";

/// Semantic kind of a column.
///
/// Unrecognized type tags are kept as [`ColumnKind::Other`] and formatted
/// like plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ColumnKind {
    Text,
    LongText,
    Date,
    Ctime,
    Mtime,
    Number,
    Collaborator,
    SingleSelect,
    MultipleSelect,
    File,
    Image,
    Checkbox,
    Creator,
    Modifier,
    Link,
    Geolocation,
    Other(String),
}

impl From<&str> for ColumnKind {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => ColumnKind::Text,
            "long-text" => ColumnKind::LongText,
            "date" => ColumnKind::Date,
            "ctime" => ColumnKind::Ctime,
            "mtime" => ColumnKind::Mtime,
            "number" => ColumnKind::Number,
            "collaborator" => ColumnKind::Collaborator,
            "single-select" => ColumnKind::SingleSelect,
            "multiple-select" => ColumnKind::MultipleSelect,
            "file" => ColumnKind::File,
            "image" => ColumnKind::Image,
            "checkbox" => ColumnKind::Checkbox,
            "creator" => ColumnKind::Creator,
            "modifier" => ColumnKind::Modifier,
            "link" => ColumnKind::Link,
            "geolocation" => ColumnKind::Geolocation,
            other => ColumnKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ColumnKind {
    fn from(tag: String) -> Self {
        ColumnKind::from(tag.as_str())
    }
}

/// One option of a single/multiple select column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "textColor")]
    pub text_color: Option<String>,
}

/// Type-specific column metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnData {
    /// Options of select columns.
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Display format of date columns (e.g. `YYYY-MM-DD HH:mm`).
    #[serde(default)]
    pub format: Option<String>,
}

/// Column of the host table schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(default)]
    pub data: Option<ColumnData>,
}

impl Column {
    pub fn new(key: impl Into<String>, name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind,
            data: None,
        }
    }

    pub fn with_data(mut self, data: ColumnData) -> Self {
        self.data = Some(data);
        self
    }

    /// Select options, empty when the column carries none.
    pub fn options(&self) -> &[SelectOption] {
        self.data.as_ref().map(|d| d.options.as_slice()).unwrap_or(&[])
    }

    /// Date display format, if any.
    pub fn date_format(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.format.as_deref())
    }
}

/// A table row: column key -> raw cell value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Map<String, Value>);

impl Row {
    /// Row identifier (`_id`), or `""` when missing.
    pub fn id(&self) -> &str {
        self.0.get(ROW_ID_KEY).and_then(Value::as_str).unwrap_or("")
    }

    /// Raw value of a cell.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Primary name of the row, or `""` when missing or not a string.
    pub fn name(&self) -> &str {
        self.0
            .get(PRIMARY_NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl From<Value> for Row {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Row(map),
            _ => Row::default(),
        }
    }
}

/// A table: schema plus rows, indexed by row id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Table {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(skip)]
    id_row_map: HashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let mut table = Self {
            id: String::new(),
            name: name.into(),
            columns,
            rows,
            id_row_map: HashMap::new(),
        };
        table.index_rows();
        table
    }

    /// Rebuilds the row-id index. Must be called after deserialization.
    pub fn index_rows(&mut self) {
        self.id_row_map = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.id().to_string(), idx))
            .collect();
    }

    /// Looks up a row by id.
    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.id_row_map.get(row_id).and_then(|&idx| self.rows.get(idx))
    }

    /// Removes a row by id. Returns the removed row.
    pub fn remove_row(&mut self, row_id: &str) -> Option<Row> {
        let idx = *self.id_row_map.get(row_id)?;
        let row = self.rows.remove(idx);
        self.index_rows();
        Some(row)
    }
}

/// Entry of the collaborator directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collaborator {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl Collaborator {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            avatar_url: String::new(),
        }
    }
}

/// Collaborator directory, looked up by email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CollaboratorDirectory(pub Vec<Collaborator>);

impl CollaboratorDirectory {
    pub fn find(&self, email: &str) -> Option<&Collaborator> {
        self.0.iter().find(|c| c.email == email)
    }
}

/// A duplicate group: rows the host considers duplicates of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DuplicateGroup {
    /// The duplicated value shared by the rows.
    #[serde(default)]
    pub value: String,
    /// Row ids in display order.
    pub rows: Vec<String>,
}

impl DuplicateGroup {
    pub fn new(value: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            value: value.into(),
            rows,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}
