//! Application state management.

use ratatui::widgets::TableState as RatatuiTableState;

use crate::view::{DetailDialog, DetailView};

// Re-export table and models types so `use super::state::*` paths see them.
pub use super::models::*;
pub use super::table::*;

/// Horizontal scroll step of the detail panel, in pixels.
pub const H_SCROLL_STEP_PX: u32 = 20;

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a filter for the overview table.
    Filter,
}

/// Record awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub record_index: usize,
    pub row_id: String,
    pub row_name: String,
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Overview table of duplicate groups.
    pub groups: TableState<GroupRow>,
    /// Ratatui table state for the overview (enables auto-scrolling).
    pub groups_ratatui_state: RatatuiTableState,
    /// Detail dialog (open flag + row label registry).
    pub dialog: DetailDialog,
    /// Formatted content of the open dialog.
    pub detail: Option<DetailView>,
    /// Duplicated value of the group shown in the dialog.
    pub detail_title: String,
    /// Selected record in the dialog.
    pub record_selected: usize,
    /// First visible record in the dialog.
    pub record_scroll: usize,
    /// Visible width of the cell area in pixels (set during render).
    pub detail_viewport_px: u32,
    /// Input mode.
    pub input_mode: InputMode,
    /// Filter input buffer.
    pub filter_input: String,
    /// Help popup visibility.
    pub show_help: bool,
    /// Help popup scroll.
    pub help_scroll: usize,
    /// Quit confirmation popup visibility.
    pub show_quit_confirm: bool,
    /// Record waiting for `y`/`n`.
    pub pending_delete: Option<PendingDelete>,
    /// Temporary status message shown in the header.
    pub status_message: Option<String>,
    /// Name of the active table.
    pub table_name: String,
    /// Rows deleted so far.
    pub deleted_count: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl AppState {
    pub fn new(table_name: String) -> Self {
        Self {
            groups: TableState::new(),
            groups_ratatui_state: RatatuiTableState::default(),
            dialog: DetailDialog::new(),
            detail: None,
            detail_title: String::new(),
            record_selected: 0,
            record_scroll: 0,
            detail_viewport_px: 0,
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            pending_delete: None,
            status_message: None,
            table_name,
            deleted_count: 0,
        }
    }

    /// Number of records in the open dialog.
    pub fn record_count(&self) -> usize {
        self.detail.as_ref().map(|d| d.records.len()).unwrap_or(0)
    }

    pub fn select_record_up(&mut self) {
        self.record_selected = self.record_selected.saturating_sub(1);
    }

    pub fn select_record_down(&mut self) {
        let max = self.record_count().saturating_sub(1);
        if self.record_selected < max {
            self.record_selected += 1;
        }
    }

    /// Keeps the record selection inside the current record list.
    pub fn clamp_record_selection(&mut self) {
        let count = self.record_count();
        if self.record_selected >= count {
            self.record_selected = count.saturating_sub(1);
        }
        if self.record_scroll > self.record_selected {
            self.record_scroll = self.record_selected;
        }
    }

    /// Largest useful horizontal offset: the last column still reaches the
    /// right edge of the viewport.
    pub fn max_scroll_offset(&self) -> u32 {
        let total = self.detail.as_ref().map(|d| d.total_width()).unwrap_or(0);
        total.saturating_sub(self.detail_viewport_px)
    }

    /// Scrolls the detail panel horizontally by `delta` pixels.
    pub fn scroll_detail_by(&mut self, delta: i64) {
        let current = self.dialog.scroll_offset() as i64;
        let max = self.max_scroll_offset() as i64;
        let next = (current + delta).clamp(0, max) as u32;
        if next != self.dialog.scroll_offset() {
            self.dialog.handle_horizontal_scroll(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{CellValue, DisplayCell};
    use crate::view::{ColumnHeader, RecordView};

    fn detail(records: usize) -> DetailView {
        DetailView {
            column_headers: vec![
                ColumnHeader { key: "a".into(), name: "A".into(), width: 160 },
                ColumnHeader { key: "b".into(), name: "B".into(), width: 120 },
            ],
            records: (0..records)
                .map(|index| RecordView {
                    index,
                    row_id: format!("r{}", index),
                    row_name: String::new(),
                    cells: vec![DisplayCell {
                        column_key: "a".into(),
                        value: CellValue::Empty,
                        width: 160,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn horizontal_scroll_is_clamped() {
        let mut state = AppState::default();
        let view = detail(2);
        state.dialog.open();
        state.dialog.mount(&view);
        state.detail = Some(view);
        state.detail_viewport_px = 200;

        state.scroll_detail_by(H_SCROLL_STEP_PX as i64);
        assert_eq!(state.dialog.scroll_offset(), 20);
        assert_eq!(state.dialog.label(1).map(|l| l.offset), Some(20));

        state.scroll_detail_by(1000);
        assert_eq!(state.dialog.scroll_offset(), 80);

        state.scroll_detail_by(-1000);
        assert_eq!(state.dialog.scroll_offset(), 0);
    }

    #[test]
    fn record_selection_stays_in_range() {
        let mut state = AppState::default();
        state.detail = Some(detail(3));
        state.select_record_down();
        state.select_record_down();
        state.select_record_down();
        assert_eq!(state.record_selected, 2);

        state.detail = Some(detail(1));
        state.record_scroll = 2;
        state.clamp_record_selection();
        assert_eq!(state.record_selected, 0);
        assert_eq!(state.record_scroll, 0);
    }
}
