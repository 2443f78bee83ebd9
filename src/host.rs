//! In-memory owner of the duplicate set.
//!
//! Stands in for the host application: it answers the dialog's
//! "set detail data" and "delete row" callbacks and remembers which rows
//! were deleted so the caller can report them.

use tracing::{info, warn};

use crate::model::{Dataset, DuplicateGroup, LoadError, Table};
use crate::view::DialogHost;

/// Groups with fewer rows than this are no longer duplicates.
const MIN_GROUP_SIZE: usize = 2;

/// Owns the dataset and the selected duplicate group.
#[derive(Debug)]
pub struct DuplicateStore {
    dataset: Dataset,
    table_idx: usize,
    selected: Option<usize>,
    deleted: Vec<String>,
}

impl DuplicateStore {
    /// Wraps a dataset. Fails if it has no active table.
    pub fn new(dataset: Dataset) -> Result<Self, LoadError> {
        let table_idx = dataset.active_table_index()?;
        Ok(Self {
            dataset,
            table_idx,
            selected: None,
            deleted: Vec::new(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn table(&self) -> &Table {
        &self.dataset.tables[self.table_idx]
    }

    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.dataset.duplication_groups
    }

    /// Currently selected group.
    pub fn selected_group(&self) -> Option<&DuplicateGroup> {
        self.selected.and_then(|idx| self.dataset.duplication_groups.get(idx))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Row ids deleted so far, in deletion order.
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }
}

impl DialogHost for DuplicateStore {
    fn set_detail_data(&mut self, group: &DuplicateGroup) {
        self.selected = self
            .dataset
            .duplication_groups
            .iter()
            .position(|g| g == group);
        if self.selected.is_none() {
            warn!(value = %group.value, "selected group is not part of the duplicate set");
        }
    }

    fn on_row_delete(&mut self, row_id: &str) {
        let Some(idx) = self.selected else {
            warn!(row_id = %row_id, "delete without a selected group ignored");
            return;
        };
        let in_selected = self
            .dataset
            .duplication_groups
            .get(idx)
            .is_some_and(|g| g.rows.iter().any(|id| id == row_id));
        if !in_selected {
            warn!(row_id = %row_id, "row is not part of the selected group");
            return;
        }

        // A row id may appear in several groups; prune it everywhere and keep
        // the selection on the same group while earlier ones drop out.
        let groups = std::mem::take(&mut self.dataset.duplication_groups);
        let mut kept = Vec::with_capacity(groups.len());
        let mut selected = None;
        for (i, mut group) in groups.into_iter().enumerate() {
            let before = group.rows.len();
            group.rows.retain(|id| id != row_id);
            if group.rows.len() < before && group.rows.len() < MIN_GROUP_SIZE {
                info!(value = %group.value, "group resolved, no duplicates left");
                continue;
            }
            if i == idx {
                selected = Some(kept.len());
            }
            kept.push(group);
        }
        self.dataset.duplication_groups = kept;
        self.selected = selected;

        self.dataset.tables[self.table_idx].remove_row(row_id);
        self.deleted.push(row_id.to_string());
        info!(row_id = %row_id, deleted = self.deleted.len(), "row deleted");
    }
}
