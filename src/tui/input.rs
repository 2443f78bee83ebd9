//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};

use crate::scroll::Propagation;

use super::state::{AppState, H_SCROLL_STEP_PX, InputMode, PendingDelete};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Open the detail dialog for the selected group.
    OpenDetail,
    /// Delete a record of the open group (confirmed).
    Delete { record_index: usize, row_id: String },
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    if state.pending_delete.is_some() {
        return handle_delete_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal if state.show_help => handle_help(state, key),
        InputMode::Normal if state.dialog.is_open() => handle_detail_mode(state, key),
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

/// Handles mouse wheel events.
pub fn handle_mouse(state: &mut AppState, kind: MouseEventKind) {
    if state.show_help || state.show_quit_confirm || state.pending_delete.is_some() {
        return;
    }
    if state.dialog.is_open() {
        match kind {
            MouseEventKind::ScrollLeft => state.scroll_detail_by(-(H_SCROLL_STEP_PX as i64)),
            MouseEventKind::ScrollRight => state.scroll_detail_by(H_SCROLL_STEP_PX as i64),
            MouseEventKind::ScrollUp => {
                if state.dialog.handle_vertical_scroll() == Propagation::Stop {
                    state.select_record_up();
                }
            }
            MouseEventKind::ScrollDown => {
                if state.dialog.handle_vertical_scroll() == Propagation::Stop {
                    state.select_record_down();
                }
            }
            _ => {}
        }
        return;
    }
    match kind {
        MouseEventKind::ScrollUp => state.groups.select_up(),
        MouseEventKind::ScrollDown => state.groups.select_down(),
        _ => {}
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('y') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        _ if is_ctrl_c(&key) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_delete_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            match state.pending_delete.take() {
                Some(pending) => KeyAction::Delete {
                    record_index: pending.record_index,
                    row_id: pending.row_id,
                },
                None => KeyAction::None,
            }
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.pending_delete = None;
            KeyAction::None
        }
        _ if is_ctrl_c(&key) => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter => {
            state.show_help = false;
            state.help_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            // Clamped during render
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::PageUp => state.help_scroll = state.help_scroll.saturating_sub(10),
        KeyCode::PageDown => state.help_scroll = state.help_scroll.saturating_add(10),
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

/// Keys while the detail dialog is open.
fn handle_detail_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dialog.close();
            state.detail = None;
            state.record_selected = 0;
            state.record_scroll = 0;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => state.show_quit_confirm = true,
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        KeyCode::Char('?') => state.show_help = true,

        // Vertical movement is consumed by the record list.
        KeyCode::Up | KeyCode::Char('k') => {
            if state.dialog.handle_vertical_scroll() == Propagation::Stop {
                state.select_record_up();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.dialog.handle_vertical_scroll() == Propagation::Stop {
                state.select_record_down();
            }
        }
        KeyCode::PageUp => {
            state.record_selected = state.record_selected.saturating_sub(PAGE_SIZE);
        }
        KeyCode::PageDown => {
            state.record_selected = state.record_selected.saturating_add(PAGE_SIZE);
            state.clamp_record_selection();
        }
        KeyCode::Home => state.record_selected = 0,
        KeyCode::End => {
            state.record_selected = state.record_count().saturating_sub(1);
        }

        // Horizontal scroll of the cell area; row names stay pinned.
        KeyCode::Left | KeyCode::Char('h') => {
            state.scroll_detail_by(-(H_SCROLL_STEP_PX as i64));
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.scroll_detail_by(H_SCROLL_STEP_PX as i64);
        }
        KeyCode::Char('0') => {
            let offset = state.dialog.scroll_offset() as i64;
            state.scroll_detail_by(-offset);
        }
        KeyCode::Char('$') => {
            let remaining = state.max_scroll_offset() as i64 - state.dialog.scroll_offset() as i64;
            state.scroll_detail_by(remaining);
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            let record = state
                .detail
                .as_ref()
                .and_then(|d| d.records.get(state.record_selected));
            if let Some(record) = record {
                state.pending_delete = Some(PendingDelete {
                    record_index: record.index,
                    row_id: record.row_id.clone(),
                    row_name: record.row_name.clone(),
                });
            }
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in normal mode (overview table).
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }
        _ if is_ctrl_c(&key) => KeyAction::Quit,
        KeyCode::Esc => {
            if state.groups.filter.is_some() {
                state.filter_input.clear();
                state.groups.set_filter(None);
            }
            state.status_message = None;
            KeyAction::None
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            state.help_scroll = 0;
            KeyAction::None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            state.groups.select_up();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.groups.select_down();
            KeyAction::None
        }
        KeyCode::PageUp => {
            state.groups.page_up(PAGE_SIZE);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.groups.page_down(PAGE_SIZE);
            KeyAction::None
        }
        KeyCode::Home => {
            state.groups.selected = 0;
            state.groups.tracked_id = None;
            KeyAction::None
        }
        KeyCode::End => {
            let len = state.groups.filtered_items().len();
            if len > 0 {
                state.groups.selected = len - 1;
                state.groups.tracked_id = None;
            }
            KeyAction::None
        }

        KeyCode::Char('s') | KeyCode::Char('S') => {
            state.groups.next_sort_column();
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.groups.toggle_sort_direction();
            KeyAction::None
        }

        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input.clear();
            KeyAction::None
        }

        KeyCode::Enter => {
            if state.groups.selected_item().is_some() {
                KeyAction::OpenDetail
            } else {
                KeyAction::None
            }
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in filter mode.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            state.groups.set_filter(None);
        }
        KeyCode::Enter => {
            // Filter is already applied in real-time, just switch mode
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            apply_current_filter(state);
        }
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            apply_current_filter(state);
        }
        _ => {}
    }
    KeyAction::None
}

/// Applies the current filter_input to the overview table.
fn apply_current_filter(state: &mut AppState) {
    let filter = if state.filter_input.is_empty() {
        None
    } else {
        Some(state.filter_input.clone())
    };
    state.groups.set_filter(filter);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{CellValue, DisplayCell};
    use crate::model::DuplicateGroup;
    use crate::tui::state::GroupRow;
    use crate::view::{ColumnHeader, DetailView, RecordView};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state_with_groups() -> AppState {
        let mut state = AppState::new("People".to_string());
        let groups = vec![
            DuplicateGroup::new("Alice", vec!["r1".into(), "r2".into()]),
            DuplicateGroup::new("Bob", vec!["r3".into(), "r4".into(), "r5".into()]),
        ];
        state.groups.update(GroupRow::from_groups(&groups));
        state
    }

    fn open_detail(state: &mut AppState) {
        let view = DetailView {
            column_headers: vec![
                ColumnHeader { key: "a".into(), name: "A".into(), width: 300 },
                ColumnHeader { key: "b".into(), name: "B".into(), width: 300 },
            ],
            records: ["r1", "r2"]
                .iter()
                .enumerate()
                .map(|(index, id)| RecordView {
                    index,
                    row_id: id.to_string(),
                    row_name: format!("name {}", id),
                    cells: vec![DisplayCell {
                        column_key: "a".into(),
                        value: CellValue::Text("x".into()),
                        width: 300,
                    }],
                })
                .collect(),
        };
        state.dialog.open();
        state.dialog.mount(&view);
        state.detail = Some(view);
        state.detail_viewport_px = 400;
    }

    #[test]
    fn quit_requires_confirmation_and_quits_on_qq() {
        let mut state = state_with_groups();

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert!(state.show_quit_confirm);

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::Quit);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let mut state = state_with_groups();
        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        let action = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn enter_opens_selected_group() {
        let mut state = state_with_groups();
        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.groups.selected_item().map(|g| g.value.as_str()), Some("Bob"));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::OpenDetail);

        let mut empty = AppState::default();
        assert_eq!(handle_key(&mut empty, key(KeyCode::Enter)), KeyAction::None);
    }

    #[test]
    fn filter_mode_filters_groups() {
        let mut state = state_with_groups();

        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Filter);

        let _ = handle_key(&mut state, key(KeyCode::Char('b')));
        assert_eq!(state.groups.filter.as_deref(), Some("b"));
        assert_eq!(state.groups.filtered_items().len(), 1);

        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.groups.filter, None);
        assert_eq!(state.groups.filtered_items().len(), 2);
    }

    #[test]
    fn sort_keys_reorder_groups() {
        let mut state = state_with_groups();
        let _ = handle_key(&mut state, key(KeyCode::Char('s')));
        let _ = handle_key(&mut state, key(KeyCode::Char('s')));
        assert_eq!(state.groups.sort_column, 2);
        let _ = handle_key(&mut state, key(KeyCode::Char('r')));
        assert_eq!(state.groups.items[0].value, "Bob");
    }

    #[test]
    fn arrows_scroll_detail_horizontally() {
        let mut state = state_with_groups();
        open_detail(&mut state);

        let _ = handle_key(&mut state, key(KeyCode::Right));
        let _ = handle_key(&mut state, key(KeyCode::Char('l')));
        assert_eq!(state.dialog.scroll_offset(), 40);
        assert_eq!(state.dialog.label(0).map(|l| l.offset), Some(40));
        assert_eq!(state.dialog.label(1).map(|l| l.offset), Some(40));

        let _ = handle_key(&mut state, key(KeyCode::Char('$')));
        assert_eq!(state.dialog.scroll_offset(), 200);

        let _ = handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.dialog.scroll_offset(), 180);

        let _ = handle_key(&mut state, key(KeyCode::Char('0')));
        assert_eq!(state.dialog.scroll_offset(), 0);
    }

    #[test]
    fn vertical_keys_move_records_not_groups() {
        let mut state = state_with_groups();
        open_detail(&mut state);

        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.record_selected, 1);
        assert_eq!(state.groups.selected, 0);

        handle_mouse(&mut state, MouseEventKind::ScrollUp);
        assert_eq!(state.record_selected, 0);
        assert_eq!(state.groups.selected, 0);

        handle_mouse(&mut state, MouseEventKind::ScrollRight);
        assert_eq!(state.dialog.scroll_offset(), 20);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = state_with_groups();
        open_detail(&mut state);
        let _ = handle_key(&mut state, key(KeyCode::Down));

        let action = handle_key(&mut state, key(KeyCode::Char('d')));
        assert_eq!(action, KeyAction::None);
        assert_eq!(
            state.pending_delete.as_ref().map(|p| p.row_id.as_str()),
            Some("r2")
        );

        let action = handle_key(&mut state, key(KeyCode::Char('n')));
        assert_eq!(action, KeyAction::None);
        assert!(state.pending_delete.is_none());

        let _ = handle_key(&mut state, key(KeyCode::Char('d')));
        let action = handle_key(&mut state, key(KeyCode::Char('y')));
        assert_eq!(
            action,
            KeyAction::Delete {
                record_index: 1,
                row_id: "r2".to_string()
            }
        );
        assert!(state.pending_delete.is_none());
    }

    #[test]
    fn esc_closes_dialog_and_clears_labels() {
        let mut state = state_with_groups();
        open_detail(&mut state);
        let _ = handle_key(&mut state, key(KeyCode::Right));

        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.dialog.is_open());
        assert!(state.detail.is_none());
        assert_eq!(state.dialog.mounted_rows(), 0);
        assert_eq!(state.dialog.scroll_offset(), 0);
    }

    #[test]
    fn help_captures_navigation() {
        let mut state = state_with_groups();
        let _ = handle_key(&mut state, key(KeyCode::Char('?')));
        assert!(state.show_help);

        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.help_scroll, 1);
        assert_eq!(state.groups.selected, 0);

        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.show_help);
    }
}
