//! Overview table row: one duplicate group.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::model::DuplicateGroup;
use crate::tui::table::{SortKey, TableRow};

/// Duplicate group as shown in the overview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    /// Position of the group in the host's duplicate set.
    pub index: usize,
    /// Duplicated value.
    pub value: String,
    /// Number of rows sharing the value.
    pub count: usize,
    id: u64,
}

impl GroupRow {
    pub fn new(index: usize, group: &DuplicateGroup) -> Self {
        // Identity is the set of rows, so selection survives re-sorting and
        // index shifts after another group is resolved.
        let mut hasher = DefaultHasher::new();
        group.value.hash(&mut hasher);
        group.rows.first().hash(&mut hasher);
        Self {
            index,
            value: group.value.clone(),
            count: group.count(),
            id: hasher.finish(),
        }
    }

    /// Builds rows for every group of the set.
    pub fn from_groups(groups: &[DuplicateGroup]) -> Vec<Self> {
        groups
            .iter()
            .enumerate()
            .map(|(idx, group)| Self::new(idx, group))
            .collect()
    }
}

impl TableRow for GroupRow {
    fn id(&self) -> u64 {
        self.id
    }

    fn column_count() -> usize {
        3
    }

    fn headers() -> Vec<&'static str> {
        vec!["#", "DUPLICATED VALUE", "ROWS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            (self.index + 1).to_string(),
            self.value.clone(),
            self.count.to_string(),
        ]
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::Integer(self.index as i64),
            1 => SortKey::String(self.value.to_lowercase()),
            _ => SortKey::Integer(self.count as i64),
        }
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.value.to_lowercase().contains(&filter.to_lowercase())
    }
}
