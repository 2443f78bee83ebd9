//! Overview table of duplicate groups with sorting and filtering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Row, Table};

use crate::tui::state::{AppState, GroupRow, TableRow};
use crate::tui::style::Styles;

/// Renders the overview of duplicate groups.
pub fn render_groups(frame: &mut Frame, area: Rect, state: &mut AppState) {
    // Resolve selection by tracked entity ID
    state.groups.resolve_selection();

    // Sync ratatui TableState for auto-scrolling
    state
        .groups_ratatui_state
        .select(Some(state.groups.selected));

    let table_state = &state.groups;

    // Headers with sort indicator
    let headers: Vec<Span> = GroupRow::headers()
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = if i == table_state.sort_column {
                if table_state.sort_ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            Span::styled(format!("{}{}", h, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let filtered = table_state.filtered_items();
    let rows: Vec<Row> = filtered
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == table_state.selected {
                Styles::selected()
            } else {
                Styles::default()
            };
            Row::new(item.cells()).style(style).height(1)
        })
        .collect();

    let title = if let Some(filter) = &table_state.filter {
        format!(
            " Duplicates (filter: {}) [{}/{}] ",
            filter,
            filtered.len(),
            table_state.items.len()
        )
    } else {
        format!(" Duplicates [{}] ", table_state.items.len())
    };

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Styles::selected());

    // Clear the area before rendering to avoid artifacts
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut state.groups_ratatui_state);
}
