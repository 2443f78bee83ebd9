//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::format::{CellFormatter, DefaultThumbnailResolver, FormatOptions};
use crate::host::DuplicateStore;
use crate::view::DetailView;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::{AppState, GroupRow};

/// Main TUI application.
pub struct App {
    store: DuplicateStore,
    state: AppState,
    thumbnails: DefaultThumbnailResolver,
    format_options: FormatOptions,
    should_quit: bool,
}

impl App {
    /// Creates a new App over the given duplicate set.
    pub fn new(
        store: DuplicateStore,
        thumbnails: DefaultThumbnailResolver,
        format_options: FormatOptions,
    ) -> Self {
        let state = AppState::new(store.table().name.clone());
        let mut app = Self {
            store,
            state,
            thumbnails,
            format_options,
            should_quit: false,
        };
        app.refresh_groups();
        app
    }

    /// Runs the TUI application. Returns the store with all deletions applied.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<DuplicateStore> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // Main loop
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {}
                Ok(Event::Key(key)) => self.dispatch_key(key),
                Ok(Event::Mouse(kind)) => handle_mouse(&mut self.state, kind),
                Ok(Event::Resize(width)) => {
                    debug!(width, "terminal resized");
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        info!(deleted = self.store.deleted().len(), "viewer closed");
        Ok(self.store)
    }

    pub fn store(&self) -> &DuplicateStore {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Handles one key press, including the actions that need the store.
    pub fn dispatch_key(&mut self, key: KeyEvent) {
        match handle_key(&mut self.state, key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::OpenDetail => self.open_selected_group(),
            KeyAction::Delete {
                record_index,
                row_id,
            } => self.delete_record(record_index, &row_id),
            KeyAction::None => {}
        }
    }

    /// Rebuilds the overview rows from the store, keeping the selection.
    fn refresh_groups(&mut self) {
        self.state
            .groups
            .update(GroupRow::from_groups(self.store.groups()));
    }

    /// Selects the group at `index` of the duplicate set and opens it.
    pub fn open_group(&mut self, index: usize) {
        let position = self
            .state
            .groups
            .filtered_items()
            .iter()
            .position(|row| row.index == index);
        if let Some(position) = position {
            self.state.groups.selected = position;
            self.state.groups.tracked_id = None;
            self.state.groups.resolve_selection();
            self.open_selected_group();
        }
    }

    /// Hands the selected overview group to the store and opens the dialog.
    fn open_selected_group(&mut self) {
        let Some(index) = self.state.groups.selected_item().map(|row| row.index) else {
            return;
        };
        let Some(group) = self.store.groups().get(index).cloned() else {
            return;
        };
        self.state.dialog.show_detail_data(&group, &mut self.store);
        self.state.dialog.open();
        self.state.record_selected = 0;
        self.state.record_scroll = 0;
        self.rebuild_detail();
    }

    /// Formats the store's selected group into the dialog. Closes the dialog
    /// once the group is gone.
    fn rebuild_detail(&mut self) {
        let built = self.store.selected_group().map(|group| {
            let formatter = CellFormatter::new(
                &self.store.dataset().collaborators,
                &self.thumbnails,
                self.format_options,
            );
            (
                group.value.clone(),
                DetailView::build(self.store.table(), group, &formatter),
            )
        });

        match built {
            Some((title, view)) => {
                self.state.dialog.mount(&view);
                self.state.detail = Some(view);
                self.state.detail_title = title;
                self.state.clamp_record_selection();
                // Content may have shrunk under the current offset.
                self.state.scroll_detail_by(0);
            }
            None => {
                self.state.dialog.close();
                self.state.detail = None;
                self.state.detail_title.clear();
                self.state.record_selected = 0;
                self.state.record_scroll = 0;
            }
        }
    }

    /// Deletes a record of the open group through the dialog.
    fn delete_record(&mut self, record_index: usize, row_id: &str) {
        self.state
            .dialog
            .on_row_delete(record_index, row_id, &mut self.store);
        self.state.deleted_count = self.store.deleted().len();
        self.refresh_groups();
        self.rebuild_detail();
        self.state.status_message = Some(if self.state.dialog.is_open() {
            format!("Deleted row {}", row_id)
        } else {
            format!("Deleted row {}, group resolved", row_id)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    const DATA: &str = r#"{
        "tables": [{
            "name": "People",
            "columns": [
                {"key": "0000", "name": "Name", "type": "text"},
                {"key": "mail", "name": "Email", "type": "text"},
                {"key": "born", "name": "Born", "type": "date"}
            ],
            "rows": [
                {"_id": "r1", "0000": "Alice", "mail": "a@x.io", "born": "1990-01-02"},
                {"_id": "r2", "0000": "Alice", "mail": "alice@x.io"},
                {"_id": "r3", "0000": "Alice"},
                {"_id": "r4", "0000": "Bob"},
                {"_id": "r5", "0000": "Bob"}
            ]
        }],
        "config_settings": [{"active": "People"}],
        "duplication_groups": [
            {"value": "Alice", "rows": ["r1", "r2", "r3"]},
            {"value": "Bob", "rows": ["r4", "r5"]}
        ]
    }"#;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let store = DuplicateStore::new(Dataset::from_json(DATA).unwrap()).unwrap();
        App::new(
            store,
            DefaultThumbnailResolver::default(),
            FormatOptions::default(),
        )
    }

    #[test]
    fn overview_lists_groups() {
        let app = app();
        assert_eq!(app.state().table_name, "People");
        assert_eq!(app.state().groups.items.len(), 2);
        assert!(!app.state().dialog.is_open());
    }

    #[test]
    fn enter_opens_dialog_with_selected_group() {
        let mut app = app();
        app.dispatch_key(key(KeyCode::Enter));

        assert!(app.state().dialog.is_open());
        assert_eq!(app.store().selected_index(), Some(0));
        let detail = app.state().detail.as_ref().unwrap();
        assert_eq!(detail.records.len(), 3);
        assert_eq!(detail.records[0].row_name, "Alice");
        assert_eq!(app.state().dialog.mounted_rows(), 3);
        assert_eq!(app.state().detail_title, "Alice");
    }

    #[test]
    fn delete_flows_through_dialog_to_store() {
        let mut app = app();
        app.dispatch_key(key(KeyCode::Enter));
        app.dispatch_key(key(KeyCode::Down));
        app.dispatch_key(key(KeyCode::Char('d')));
        app.dispatch_key(key(KeyCode::Char('y')));

        assert_eq!(app.store().deleted(), &["r2".to_string()]);
        assert_eq!(app.state().deleted_count, 1);
        let detail = app.state().detail.as_ref().unwrap();
        let ids: Vec<&str> = detail.records.iter().map(|r| r.row_id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
        assert_eq!(app.state().dialog.mounted_rows(), 2);
        assert_eq!(app.state().groups.items.len(), 2);
    }

    #[test]
    fn resolving_a_group_closes_dialog() {
        let mut app = app();
        app.dispatch_key(key(KeyCode::Down));
        app.dispatch_key(key(KeyCode::Enter));
        assert_eq!(app.state().detail_title, "Bob");

        app.dispatch_key(key(KeyCode::Char('d')));
        app.dispatch_key(key(KeyCode::Char('y')));

        assert!(!app.state().dialog.is_open());
        assert!(app.state().detail.is_none());
        assert_eq!(app.state().groups.items.len(), 1);
        assert_eq!(app.store().deleted(), &["r4".to_string()]);
        assert!(
            app.state()
                .status_message
                .as_deref()
                .is_some_and(|m| m.contains("resolved"))
        );
    }

    #[test]
    fn open_group_by_index() {
        let mut missing = app();
        missing.open_group(7);
        assert!(!missing.state().dialog.is_open());

        let mut app = app();
        app.open_group(1);
        assert!(app.state().dialog.is_open());
        assert_eq!(app.state().detail_title, "Bob");
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app();
        app.dispatch_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.dispatch_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
