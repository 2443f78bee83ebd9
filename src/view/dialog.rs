//! Detail dialog: open/close state, scroll synchronization of row labels and
//! delegation of user actions to the host that owns the duplicate set.

use tracing::{debug, info};

use crate::model::DuplicateGroup;
use crate::scroll::{Propagation, ScrollObserver, ScrollSync};

use super::detail::DetailView;

/// Callbacks into the owner of the duplicate set.
pub trait DialogHost {
    /// A group was picked in the overview pane.
    fn set_detail_data(&mut self, group: &DuplicateGroup);

    /// The user asked to delete `row_id` from the duplicate set.
    fn on_row_delete(&mut self, row_id: &str);
}

/// Pinned row-name label of one record. Follows the panel's horizontal
/// offset so the name stays visible while cells scroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowNameLabel {
    pub row_id: String,
    pub name: String,
    /// Horizontal offset in pixels.
    pub offset: u32,
}

impl RowNameLabel {
    pub fn new(row_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            name: name.into(),
            offset: 0,
        }
    }
}

impl ScrollObserver for RowNameLabel {
    fn update_row_name_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}

/// The duplicate detail dialog.
#[derive(Debug, Default)]
pub struct DetailDialog {
    open: bool,
    scroll: ScrollSync<RowNameLabel>,
}

impl DetailDialog {
    pub const TITLE: &'static str = "Deduplication";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens or closes the dialog. Closing tears down the row registry.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        if !self.open {
            self.scroll.clear();
        }
        debug!(open = self.open, "detail dialog toggled");
    }

    pub fn open(&mut self) {
        if !self.open {
            self.toggle();
        }
    }

    pub fn close(&mut self) {
        if self.open {
            self.toggle();
        }
    }

    /// Relays a group click in the overview pane to the host.
    pub fn show_detail_data(&mut self, group: &DuplicateGroup, host: &mut impl DialogHost) {
        debug!(value = %group.value, rows = group.count(), "show detail data");
        host.set_detail_data(group);
    }

    /// Relays a delete request to the host and drops the row's label.
    pub fn on_row_delete(&mut self, row_index: usize, row_id: &str, host: &mut impl DialogHost) {
        info!(row_id = %row_id, "row delete requested");
        host.on_row_delete(row_id);
        self.scroll.unregister(row_index);
    }

    /// Registers one label per record and drops labels of rows that are gone.
    pub fn mount(&mut self, view: &DetailView) {
        for record in &view.records {
            self.scroll.register(
                record.index,
                RowNameLabel::new(&record.row_id, &record.row_name),
            );
        }
        self.scroll.truncate(view.records.len());
    }

    /// Horizontal scroll of the detail panel.
    pub fn handle_horizontal_scroll(&mut self, offset: u32) {
        self.scroll.on_horizontal_scroll(offset);
    }

    /// Vertical scroll of the record list.
    pub fn handle_vertical_scroll(&self) -> Propagation {
        self.scroll.on_vertical_scroll()
    }

    /// Current horizontal offset in pixels.
    pub fn scroll_offset(&self) -> u32 {
        self.scroll.offset()
    }

    /// Label of the record at `row_index`, if mounted.
    pub fn label(&self, row_index: usize) -> Option<&RowNameLabel> {
        self.scroll.get(row_index)
    }

    pub fn mounted_rows(&self) -> usize {
        self.scroll.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::CellValue;
    use crate::view::detail::RecordView;

    #[derive(Default)]
    struct RecordingHost {
        selected: Vec<String>,
        deleted: Vec<String>,
    }

    impl DialogHost for RecordingHost {
        fn set_detail_data(&mut self, group: &DuplicateGroup) {
            self.selected.push(group.value.clone());
        }

        fn on_row_delete(&mut self, row_id: &str) {
            self.deleted.push(row_id.to_string());
        }
    }

    fn view(ids: &[&str]) -> DetailView {
        DetailView {
            column_headers: vec![],
            records: ids
                .iter()
                .enumerate()
                .map(|(index, id)| RecordView {
                    index,
                    row_id: id.to_string(),
                    row_name: format!("name-{}", id),
                    cells: vec![crate::format::DisplayCell {
                        column_key: "k".into(),
                        value: CellValue::Empty,
                        width: 100,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn toggle_opens_and_teardown_clears_labels() {
        let mut dialog = DetailDialog::new();
        assert!(!dialog.is_open());
        dialog.toggle();
        assert!(dialog.is_open());

        dialog.mount(&view(&["r1", "r2"]));
        dialog.handle_horizontal_scroll(40);
        assert_eq!(dialog.mounted_rows(), 2);

        dialog.close();
        assert!(!dialog.is_open());
        assert_eq!(dialog.mounted_rows(), 0);
        assert_eq!(dialog.scroll_offset(), 0);
    }

    #[test]
    fn horizontal_scroll_moves_all_labels() {
        let mut dialog = DetailDialog::new();
        dialog.open();
        dialog.mount(&view(&["r1", "r2", "r3"]));
        dialog.handle_horizontal_scroll(60);
        for idx in 0..3 {
            assert_eq!(dialog.label(idx).map(|l| l.offset), Some(60));
        }
        assert_eq!(dialog.handle_vertical_scroll(), Propagation::Stop);
        assert_eq!(dialog.scroll_offset(), 60);
    }

    #[test]
    fn remount_keeps_offset_and_drops_removed_rows() {
        let mut dialog = DetailDialog::new();
        dialog.open();
        dialog.mount(&view(&["r1", "r2", "r3"]));
        dialog.handle_horizontal_scroll(20);

        dialog.mount(&view(&["r1", "r3"]));
        assert_eq!(dialog.mounted_rows(), 2);
        assert_eq!(dialog.label(1).map(|l| l.row_id.as_str()), Some("r3"));
        assert_eq!(dialog.label(1).map(|l| l.offset), Some(20));
        assert!(dialog.label(2).is_none());
    }

    #[test]
    fn actions_are_relayed_to_host() {
        let mut host = RecordingHost::default();
        let mut dialog = DetailDialog::new();
        dialog.open();
        dialog.mount(&view(&["r1", "r2"]));

        dialog.show_detail_data(&DuplicateGroup::new("Alice", vec![]), &mut host);
        dialog.on_row_delete(1, "r2", &mut host);
        dialog.handle_horizontal_scroll(10);

        assert_eq!(host.selected, vec!["Alice".to_string()]);
        assert_eq!(host.deleted, vec!["r2".to_string()]);
        assert!(dialog.label(1).is_none());
        assert_eq!(dialog.label(0).map(|l| l.offset), Some(10));
    }
}
