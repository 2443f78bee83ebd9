//! Dataset file loading.
//!
//! A dataset bundles what the host table API would otherwise provide:
//! tables, plugin settings naming the active table, the collaborator
//! directory and the duplicate groups found by the host.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{CollaboratorDirectory, DuplicateGroup, Table};

/// Error type for dataset loading failures.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid dataset JSON.
    Parse(serde_json::Error),
    /// The settings name a table that does not exist (or no settings at all).
    MissingActiveTable(String),
    /// Structurally valid JSON with inconsistent content.
    Invalid(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "Failed to read dataset: {}", e),
            LoadError::Parse(e) => write!(f, "Failed to parse dataset: {}", e),
            LoadError::MissingActiveTable(name) if name.is_empty() => {
                write!(f, "No active table configured")
            }
            LoadError::MissingActiveTable(name) => {
                write!(f, "Active table '{}' not found in dataset", name)
            }
            LoadError::Invalid(msg) => write!(f, "Invalid dataset: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// Plugin settings entry. Only the first entry is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigSetting {
    /// Name of the active table.
    pub active: String,
}

/// Everything the detail view needs from the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    pub tables: Vec<Table>,
    #[serde(default)]
    pub config_settings: Vec<ConfigSetting>,
    #[serde(default)]
    pub collaborators: CollaboratorDirectory,
    #[serde(default)]
    pub duplication_groups: Vec<DuplicateGroup>,
}

impl Dataset {
    /// Reads and validates a dataset from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading dataset");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses and validates a dataset from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let mut dataset: Dataset = serde_json::from_str(json)?;
        for table in &mut dataset.tables {
            table.index_rows();
        }
        dataset.validate()?;
        info!(
            tables = dataset.tables.len(),
            groups = dataset.duplication_groups.len(),
            collaborators = dataset.collaborators.0.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn validate(&self) -> Result<(), LoadError> {
        // Resolves the active table or fails.
        self.active_table_index()?;
        for table in &self.tables {
            let mut seen = std::collections::HashSet::new();
            for column in &table.columns {
                if !seen.insert(column.key.as_str()) {
                    return Err(LoadError::Invalid(format!(
                        "duplicate column key '{}' in table '{}'",
                        column.key, table.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Name of the active table from the first settings entry.
    pub fn active_table_name(&self) -> &str {
        self.config_settings
            .first()
            .map(|s| s.active.as_str())
            .unwrap_or("")
    }

    /// Position of the active table in `tables`.
    pub fn active_table_index(&self) -> Result<usize, LoadError> {
        let name = self.active_table_name();
        self.tables
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| LoadError::MissingActiveTable(name.to_string()))
    }

    /// The active table. Validated on load, so only fails for datasets built by hand.
    pub fn active_table(&self) -> Result<&Table, LoadError> {
        let idx = self.active_table_index()?;
        Ok(&self.tables[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "tables": [{
            "_id": "0000",
            "name": "Contacts",
            "columns": [
                {"key": "0000", "name": "Name", "type": "text"},
                {"key": "a1", "name": "Born", "type": "date", "data": {"format": "YYYY-MM-DD"}}
            ],
            "rows": [
                {"_id": "r1", "0000": "Alice", "a1": "2024-01-02"},
                {"_id": "r2", "0000": "Alice", "a1": "2024-01-03"}
            ]
        }],
        "config_settings": [{"active": "Contacts"}],
        "collaborators": [{"email": "a@x.io", "name": "Ann", "avatar_url": "/a.png"}],
        "duplication_groups": [{"value": "Alice", "rows": ["r1", "r2"]}]
    }"#;

    #[test]
    fn loads_sample_dataset() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let table = dataset.active_table().unwrap();
        assert_eq!(table.name, "Contacts");
        assert_eq!(table.row("r2").map(|r| r.name()), Some("Alice"));
        assert_eq!(dataset.duplication_groups[0].count(), 2);
        assert!(dataset.collaborators.find("a@x.io").is_some());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.active_table_name(), "Contacts");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn rejects_unknown_active_table() {
        let json = SAMPLE.replace(r#""active": "Contacts""#, r#""active": "Other""#);
        let err = Dataset::from_json(&json).unwrap_err();
        assert!(matches!(err, LoadError::MissingActiveTable(ref n) if n == "Other"));
        assert_eq!(err.to_string(), "Active table 'Other' not found in dataset");
    }

    #[test]
    fn rejects_missing_settings() {
        let json = r#"{"tables": [{"name": "T", "columns": []}]}"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "No active table configured");
    }

    #[test]
    fn rejects_duplicate_column_keys() {
        let json = r#"{
            "tables": [{"name": "T", "columns": [
                {"key": "a", "name": "A", "type": "text"},
                {"key": "a", "name": "B", "type": "number"}
            ]}],
            "config_settings": [{"active": "T"}]
        }"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Dataset::from_json("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
