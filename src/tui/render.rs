//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;

use super::state::AppState;
use super::widgets::detail_common::key_hints;
use super::widgets::{
    render_delete_confirm, render_detail, render_groups, render_header, render_help,
    render_quit_confirm,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, content, footer
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Overview
        Constraint::Length(1), // Key hints
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_groups(frame, chunks[1], state);
    frame.render_widget(
        Paragraph::new(key_hints(&[
            ("Enter", "open"),
            ("/", "filter"),
            ("s", "sort"),
            ("r", "reverse"),
            ("?", "help"),
            ("q", "quit"),
        ])),
        chunks[2],
    );

    // Detail dialog over the overview
    render_detail(frame, area, state);

    // Help popup
    if state.show_help {
        let in_detail = state.dialog.is_open();
        render_help(frame, area, in_detail, &mut state.help_scroll);
    }

    if let Some(pending) = &state.pending_delete {
        render_delete_confirm(frame, area, pending);
    }

    // Quit confirmation popup (rendered last to overlay everything)
    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DuplicateGroup;
    use crate::tui::state::{GroupRow, PendingDelete};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state() -> AppState {
        let mut state = AppState::new("People".into());
        state.groups.update(GroupRow::from_groups(&[
            DuplicateGroup::new("Alice Smith", vec!["r1".into(), "r2".into()]),
            DuplicateGroup::new("Bob Jones", vec!["r3".into(), "r4".into()]),
        ]));
        state
    }

    #[test]
    fn overview_shows_groups_and_header() {
        let mut state = state();
        let screen = screen(&mut state);
        assert!(screen.contains("table: People"));
        assert!(screen.contains("groups: 2"));
        assert!(screen.contains("DUPLICATED VALUE"));
        assert!(screen.contains("Alice Smith"));
        assert!(screen.contains("Bob Jones"));
    }

    #[test]
    fn popups_overlay_overview() {
        let mut state = state();
        state.show_help = true;
        assert!(screen(&mut state).contains("Duplicates Help"));

        state.show_help = false;
        state.pending_delete = Some(PendingDelete {
            record_index: 0,
            row_id: "r1".into(),
            row_name: "Alice Smith".into(),
        });
        assert!(screen(&mut state).contains("Delete row"));

        state.pending_delete = None;
        state.show_quit_confirm = true;
        assert!(screen(&mut state).contains("Are you sure you want to quit?"));
    }
}
