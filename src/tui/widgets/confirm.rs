//! Confirmation popups (quit, delete row).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::state::PendingDelete;
use crate::tui::style::Styles;

use super::detail_common::{centered_fixed, popup_block};

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    render_confirm(
        frame,
        area,
        "Exit dupdetail",
        vec![Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(Color::White),
        ))],
        ("Enter", "q", "quit"),
    );
}

/// Renders the delete confirmation for a record of the open group.
pub fn render_delete_confirm(frame: &mut Frame, area: Rect, pending: &PendingDelete) {
    let name = if pending.row_name.is_empty() {
        pending.row_id.as_str()
    } else {
        pending.row_name.as_str()
    };
    render_confirm(
        frame,
        area,
        "Delete row",
        vec![
            Line::from(vec![
                Span::styled("Delete ", Style::default().fg(Color::White)),
                Span::styled(name.to_string(), Styles::critical()),
                Span::styled("?", Style::default().fg(Color::White)),
            ]),
            Line::from(Span::styled(
                format!("row id {}", pending.row_id),
                Styles::dim(),
            )),
        ],
        ("Enter", "y", "delete"),
    );
}

fn render_confirm(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    mut content: Vec<Line<'static>>,
    (accept_a, accept_b, accept_action): (&str, &str, &str),
) {
    // 50% width, fixed height, clamped.
    let popup_width = (area.width * 50 / 100).clamp(40, 60);
    let popup_height = (content.len() as u16 + 6).min(area.height);
    let popup_area = centered_fixed(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);
    let block = popup_block(title);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled(accept_a.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled(accept_b.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!(" → {}", accept_action),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    content.push(Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::styled(" → cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Styles::popup());
    frame.render_widget(paragraph, inner);
}
