//! Detail dialog: one line per record of the open duplicate group.
//!
//! The cell area scrolls horizontally; the row name column stays pinned on
//! the left and shows a marker while its label is scrolled.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::{DetailDialog, PX_PER_COL, fit, px_to_cols};

use super::cell::{cell_spans, fit_spans};
use super::detail_common::{centered_rect, key_hints, popup_block};

/// Widest pinned name column, in terminal columns.
const MAX_NAME_COLS: u16 = 24;

/// Renders the detail dialog if it is open.
pub fn render_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    if !state.dialog.is_open() {
        return;
    }
    let Some(detail) = state.detail.as_ref() else {
        return;
    };

    let popup_area = centered_rect(90, 85, area);
    frame.render_widget(Clear, popup_area);

    let title = if state.detail_title.is_empty() {
        DetailDialog::TITLE.to_string()
    } else {
        format!("{}: {}", DetailDialog::TITLE, state.detail_title)
    };
    let block = popup_block(&title);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Column headers
        Constraint::Min(1),    // Records
        Constraint::Length(1), // Thumbnails of the selected record
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let name_cols = MAX_NAME_COLS.min(inner.width / 3);
    let [name_header, cell_header] =
        Layout::horizontal([Constraint::Length(name_cols), Constraint::Min(1)]).areas(rows[0]);
    let [name_area, cell_area] =
        Layout::horizontal([Constraint::Length(name_cols), Constraint::Min(1)]).areas(rows[1]);

    let viewport_px = cell_area.width as u32 * PX_PER_COL as u32;
    let offset_px = state.dialog.scroll_offset();
    let col_offset = (offset_px / PX_PER_COL as u32).min(u16::MAX as u32) as u16;

    // Keep the selected record visible.
    let visible = rows[1].height as usize;
    let mut scroll = state.record_scroll;
    if state.record_selected < scroll {
        scroll = state.record_selected;
    } else if visible > 0 && state.record_selected >= scroll + visible {
        scroll = state.record_selected + 1 - visible;
    }

    // Column headers
    let header_spans: Vec<Span> = detail
        .column_headers
        .iter()
        .flat_map(|h| fit_spans(vec![Span::raw(h.name.clone())], px_to_cols(h.width) as usize))
        .map(|s| s.patch_style(Styles::table_header()))
        .collect();
    frame.render_widget(
        Paragraph::new(format!("{:w$}", "", w = name_cols as usize)).style(Styles::table_header()),
        name_header,
    );
    frame.render_widget(
        Paragraph::new(Line::from(header_spans))
            .style(Styles::table_header())
            .scroll((0, col_offset)),
        cell_header,
    );

    // Records
    let mut name_lines = Vec::with_capacity(visible);
    let mut cell_lines = Vec::with_capacity(visible);
    for record in detail.records.iter().skip(scroll).take(visible) {
        let selected = record.index == state.record_selected;
        let label = state.dialog.label(record.index);
        let name = label.map(|l| l.name.as_str()).unwrap_or(&record.row_name);
        let marker = if label.is_some_and(|l| l.offset > 0) { "‹" } else { " " };
        let name_text = fit(name, (name_cols as usize).saturating_sub(1));

        let line_style = if selected { Styles::selected() } else { Styles::popup() };
        name_lines.push(
            Line::from(vec![
                Span::styled(name_text, Styles::row_name()),
                Span::styled(marker, Styles::dim()),
            ])
            .style(line_style),
        );

        let spans: Vec<Span> = record
            .cells
            .iter()
            .flat_map(|cell| {
                let cols = px_to_cols(cell.width) as usize;
                // One blank separates columns.
                let mut spans = fit_spans(cell_spans(&cell.value), cols.saturating_sub(1));
                spans.push(Span::raw(" "));
                spans
            })
            .collect();
        cell_lines.push(Line::from(spans).style(line_style));
    }
    frame.render_widget(Paragraph::new(name_lines), name_area);
    frame.render_widget(
        Paragraph::new(cell_lines).scroll((0, col_offset)),
        cell_area,
    );

    // Thumbnails
    let thumbnails: Vec<Span> = detail
        .records
        .get(state.record_selected)
        .map(|record| detail.thumbnails(record))
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .flat_map(|(i, (column, url))| {
            let sep = if i == 0 { "" } else { "  " };
            [
                Span::styled(format!("{}{}: ", sep, column), Styles::dim()),
                Span::styled(url.to_string(), Styles::link()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(thumbnails)), rows[2]);

    // Footer
    let mut footer = key_hints(&[
        ("←/→", "scroll"),
        ("↑/↓", "select"),
        ("d", "delete"),
        ("?", "help"),
        ("Esc", "close"),
    ]);
    footer.spans.push(Span::styled(
        format!(
            "  [{}/{}] {}px",
            (state.record_selected + 1).min(detail.records.len()),
            detail.records.len(),
            offset_px
        ),
        Styles::dim(),
    ));
    frame.render_widget(Paragraph::new(footer), rows[3]);

    state.record_scroll = scroll;
    state.detail_viewport_px = viewport_px;
}
