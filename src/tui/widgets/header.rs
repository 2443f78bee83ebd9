//! Header widget showing the table, group counts and input status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;
use crate::view::DetailDialog;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(16), // Title
        Constraint::Min(20),    // Table + counts
        Constraint::Length(42), // Filter/Status
    ])
    .split(area);

    let title = Paragraph::new(format!(" {} ", DetailDialog::TITLE)).style(Styles::header());
    frame.render_widget(title, chunks[0]);

    let mut info = vec![
        Span::styled("table: ", Styles::header()),
        Span::styled(state.table_name.clone(), Styles::header()),
        Span::styled(
            format!("  groups: {}", state.groups.items.len()),
            Styles::header(),
        ),
    ];
    if state.deleted_count > 0 {
        info.push(Span::styled(
            format!("  deleted: {}", state.deleted_count),
            Styles::header(),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(info)).style(Styles::header()),
        chunks[1],
    );

    // Filter input or status message
    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::status())
    } else {
        match state.input_mode {
            InputMode::Filter => (
                format!("Filter: {}█", state.filter_input),
                Styles::filter_input(),
            ),
            InputMode::Normal => {
                let text = state
                    .groups
                    .filter
                    .as_ref()
                    .map(|f| format!("/{}", f))
                    .unwrap_or_default();
                (text, Styles::header())
            }
        }
    };
    let right = Paragraph::new(right_content).style(right_style);
    frame.render_widget(right, chunks[2]);
}
