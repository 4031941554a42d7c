// Pagination bar.

use ratatui::{prelude::*, widgets::*};

use crate::i18n::{self, Language};
use crate::state::{SearchState, pagination};

/// Page buttons around the current page, with first/last markers.
pub fn page_line(page: u32, total_pages: u32, lang: Language) -> Line<'static> {
    let window = pagination::page_window(page, total_pages);
    let muted = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();

    let edge = |enabled: bool| if enabled { Style::default() } else { muted };
    spans.push(Span::styled("« ‹ ", edge(page > 1)));

    if window.first().is_some_and(|&first| first > 1) {
        spans.push(Span::styled("… ", muted));
    }
    for n in &window {
        if *n == page {
            spans.push(Span::styled(
                format!("[{}]", n),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(format!(" {} ", n)));
        }
        spans.push(Span::raw(" "));
    }
    if window.last().is_some_and(|&last| last < total_pages) {
        spans.push(Span::styled("… ", muted));
    }

    spans.push(Span::styled("› »", edge(page < total_pages)));
    spans.push(Span::styled(
        format!(
            "   {}",
            i18n::translate_with(
                lang,
                "page.indicator",
                &[("page", &page.to_string()), ("total", &total_pages.to_string())],
            )
        ),
        muted,
    ));

    Line::from(spans)
}

/// Draw the pagination bar, or the end-of-results note on the last page.
pub fn draw_pagination(frame: &mut Frame, search: &SearchState, lang: Language, area: Rect) {
    let total = search.total_pages();
    let mut lines = Vec::new();

    if total > 1 {
        lines.push(page_line(search.page(), total, lang));
    }
    let has_items = search.results.data().is_some_and(|r| !r.items.is_empty());
    if search.is_at_end() && has_items {
        lines.push(Line::from(Span::styled(
            i18n::translate(lang, "search.end"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_page_line_marks_current_page() {
        let line = text(&page_line(10, 42, Language::En));
        assert!(line.contains("[10]"));
        assert!(line.contains(" 8 "));
        assert!(line.contains(" 12 "));
        assert!(!line.contains(" 13 "));
        assert!(line.ends_with("Page 10 / 42"));
    }

    #[test]
    fn test_page_line_few_pages_has_no_ellipsis() {
        let line = text(&page_line(1, 3, Language::Zh));
        assert!(line.contains("[1]"));
        assert!(!line.contains('…'));
        assert!(line.ends_with("第 1 / 3 页"));
    }
}
