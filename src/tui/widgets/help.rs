//! Help popup widget with context-sensitive key descriptions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::detail_common::{centered_fixed, popup_block};

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, in_detail: bool, scroll: &mut usize) {
    // 60% width, 80% height, clamped to 40-80 x 10-30
    let popup_width = (area.width * 60 / 100).clamp(40, 80);
    let popup_height = (area.height * 80 / 100).clamp(10, 30);
    let popup_area = centered_fixed(popup_width, popup_height, area);

    // Clear the area behind popup
    frame.render_widget(Clear, popup_area);

    let (title, content) = if in_detail {
        ("Deduplication Help", detail_help())
    } else {
        ("Duplicates Help", overview_help())
    };
    let content_lines = content.len();

    let block = popup_block(title);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    // Clamp scroll to valid range
    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    // Footer with scroll indicator
    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        Span::styled(", ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
}

fn key_line(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", key), Style::default().fg(Color::Yellow)),
        Span::raw(text),
    ])
}

fn overview_help() -> Vec<Line<'static>> {
    vec![
        heading("Duplicate groups:"),
        Line::from(""),
        Line::from("Each line is a value shared by several rows of the active table."),
        Line::from(""),
        Line::from(Span::styled("Columns:", Style::default().fg(Color::Yellow))),
        Line::from("#                - Position in the duplicate set"),
        Line::from("DUPLICATED VALUE - The shared value"),
        Line::from("ROWS             - Number of rows sharing it"),
        Line::from(""),
        heading("Keys:"),
        key_line("↑/↓ j/k", "Move selection"),
        key_line("PgUp/PgDn", "Move selection by a page"),
        key_line("Home/End", "First / last group"),
        key_line("Enter", "Open the group in the detail dialog"),
        key_line("/", "Filter groups by value"),
        key_line("s", "Next sort column"),
        key_line("r", "Reverse sort direction"),
        key_line("Esc", "Clear filter"),
        key_line("?", "Toggle this help"),
        key_line("q", "Quit"),
    ]
}

fn detail_help() -> Vec<Line<'static>> {
    vec![
        heading("Detail dialog:"),
        Line::from(""),
        Line::from("Every row of the group, one per line. Row names stay pinned on the"),
        Line::from("left while the cells scroll sideways. '‹' marks a scrolled row."),
        Line::from(""),
        heading("Keys:"),
        key_line("←/→ h/l", "Scroll cells horizontally"),
        key_line("0 / $", "Scroll to the first / last column"),
        key_line("↑/↓ j/k", "Select record"),
        key_line("PgUp/PgDn", "Select record by a page"),
        key_line("d / Del", "Delete the selected row (asks y/n)"),
        key_line("Esc/Enter", "Close the dialog"),
        key_line("?", "Toggle this help"),
        key_line("q", "Quit"),
        Line::from(""),
        heading("Cells:"),
        Line::from("[file] +N  - File attachments, N beyond the first"),
        Line::from("[img] +N   - Image attachments"),
        Line::from("[x] / [ ]  - Checkbox"),
        Line::from("?email     - Creator not in the collaborator directory"),
    ]
}
