//! Styled rendering of formatted cell values.

use ratatui::style::Style;
use ratatui::text::Span;

use crate::format::CellValue;
use crate::model::SelectOption;
use crate::tui::style::{Styles, parse_hex_color};

/// Spans for one cell. Width fitting is left to the caller.
pub fn cell_spans(value: &CellValue) -> Vec<Span<'static>> {
    match value {
        CellValue::Empty => vec![],
        CellValue::Text(s) | CellValue::Date(s) | CellValue::DateTime(s) => {
            vec![Span::raw(s.clone())]
        }
        CellValue::Number(s) => vec![Span::raw(s.clone())],
        CellValue::Collaborators(list) => list
            .iter()
            .enumerate()
            .flat_map(|(i, c)| {
                let sep = if i > 0 { ", " } else { "" };
                [Span::raw(sep), Span::styled(c.name.clone(), Styles::person())]
            })
            .collect(),
        CellValue::SingleSelect(option) => vec![chip(option)],
        CellValue::MultipleSelect(options) => options
            .iter()
            .enumerate()
            .flat_map(|(i, o)| {
                let sep = if i > 0 { " " } else { "" };
                [Span::raw(sep), chip(o)]
            })
            .collect(),
        CellValue::File { .. } | CellValue::Image { .. } => {
            let icon = if matches!(value, CellValue::File { .. }) {
                "[file]"
            } else {
                "[img]"
            };
            let mut spans = vec![Span::styled(icon, Styles::link())];
            if let Some(badge) = value.badge() {
                spans.push(Span::styled(format!(" {}", badge), Styles::dim()));
            }
            spans
        }
        CellValue::Checkbox(checked) => {
            vec![Span::raw(if *checked { "[x]" } else { "[ ]" })]
        }
        CellValue::Creator(c) => vec![Span::styled(c.name.clone(), Styles::person())],
        CellValue::UnknownCollaborator(email) => {
            vec![Span::styled(format!("?{}", email), Styles::dim())]
        }
    }
}

/// Select option as a colored chip.
fn chip(option: &SelectOption) -> Span<'static> {
    let mut style = Style::default();
    if let Some(bg) = option.color.as_deref().and_then(parse_hex_color) {
        style = style.bg(bg);
    }
    if let Some(fg) = option.text_color.as_deref().and_then(parse_hex_color) {
        style = style.fg(fg);
    }
    Span::styled(format!(" {} ", option.name), style)
}

/// Cuts spans to at most `width` chars and pads the rest with blanks.
pub fn fit_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len() + 1);
    let mut used = 0;
    for span in spans {
        if used >= width {
            break;
        }
        let len = span.content.chars().count();
        if used + len <= width {
            used += len;
            out.push(span);
        } else {
            let take = width - used;
            let cut: String = span.content.chars().take(take).collect();
            used += take;
            out.push(Span::styled(cut, span.style));
        }
    }
    if used < width {
        out.push(Span::raw(" ".repeat(width - used)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collaborator;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn renders_each_kind() {
        let people = CellValue::Collaborators(vec![
            Collaborator::new("a@x.io", "Ann"),
            Collaborator::new("b@x.io", "Ben"),
        ]);
        assert_eq!(text(&cell_spans(&people)), "Ann, Ben");
        assert_eq!(text(&cell_spans(&CellValue::File { count: 3 })), "[file] +2");
        assert_eq!(
            text(&cell_spans(&CellValue::Image {
                thumbnail_url: "u".into(),
                count: 1
            })),
            "[img]"
        );
        assert_eq!(text(&cell_spans(&CellValue::Checkbox(true))), "[x]");
        assert!(cell_spans(&CellValue::Empty).is_empty());
    }

    #[test]
    fn chips_use_option_colors() {
        let option = SelectOption {
            id: "1".into(),
            name: "Open".into(),
            color: Some("#FF0000".into()),
            text_color: None,
        };
        let spans = cell_spans(&CellValue::SingleSelect(option));
        assert_eq!(spans[0].content, " Open ");
        assert_eq!(spans[0].style.bg, Some(ratatui::style::Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn fit_spans_cuts_and_pads() {
        let spans = vec![Span::raw("abc"), Span::raw("defg")];
        assert_eq!(text(&fit_spans(spans, 5)), "abcde");
        assert_eq!(text(&fit_spans(vec![Span::raw("ab")], 4)), "ab  ");
        assert_eq!(text(&fit_spans(vec![], 2)), "  ");
    }
}
