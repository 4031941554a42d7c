// UI module for rendering the TUI.
// Header with search box, controls bar, results list, pagination, and status bar.

mod list;
mod pagination;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::i18n::{self, Language};
use crate::state::{LoadingState, pagination as paging};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(1), // Controls
            Constraint::Min(1),    // Results
            Constraint::Length(2), // Pagination
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let lang = app.language();

    draw_header(frame, app, lang, chunks[0]);
    draw_controls(frame, app, lang, chunks[1]);
    list::render_results(frame, &mut app.search, lang, chunks[2]);
    pagination::draw_pagination(frame, &app.search, lang, chunks[3]);
    draw_status_bar(frame, app, lang, chunks[4]);
}

/// Draw the title and search input.
fn draw_header(frame: &mut Frame, app: &App, lang: Language, area: Rect) {
    let editing = app.search.editing;
    let border_color = if editing { Color::Yellow } else { Color::Cyan };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", i18n::translate(lang, "app.title")),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title(
            Line::from(Span::styled(
                format!(" {} ", i18n::translate(lang, "app.subtitle")),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );

    let mut spans = vec![Span::styled("🔍 ", Style::default().fg(Color::DarkGray))];
    if app.search.input.is_empty() && !editing {
        spans.push(Span::styled(
            i18n::translate(lang, "search.placeholder"),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(app.search.input.as_str()));
    }
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the result count on the left and the sort order on the right.
fn draw_controls(frame: &mut Frame, app: &App, lang: Language, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .split(area);

    let mut spans = Vec::new();
    match &app.search.results {
        LoadingState::Loading => spans.push(Span::styled(
            format!(" {}", i18n::translate(lang, "search.loading")),
            Style::default().fg(Color::Yellow),
        )),
        LoadingState::Loaded(result) => {
            spans.push(Span::raw(format!(
                " {}",
                i18n::translate_with(
                    lang,
                    "search.found",
                    &[("count", &list::format_count(result.total_count))],
                )
            )));
            if paging::exceeds_ceiling(result.total_count) {
                spans.push(Span::styled(
                    format!("  ({})", i18n::translate(lang, "search.limit")),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        LoadingState::Error(_) => spans.push(Span::styled(
            format!(" {}", i18n::translate(lang, "error.failed")),
            Style::default().fg(Color::Red),
        )),
        LoadingState::Idle => spans.push(Span::styled(
            format!(" {}", i18n::translate(lang, "search.ready")),
            Style::default().fg(Color::DarkGray),
        )),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let sort_key = format!("sort.{}", app.search.sort_order().as_str());
    let sort = Paragraph::new(Line::from(vec![
        Span::styled("⇅ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            i18n::translate(lang, &sort_key),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(sort, chunks[1]);
}

/// Draw the status bar with keybinding hints, cache indicator, and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, lang: Language, area: Rect) {
    let hint = |key: &'static str, label: &str| {
        [
            Span::raw(key),
            Span::styled(i18n::translate(lang, label), Style::default().fg(Color::DarkGray)),
        ]
    };

    let mut spans: Vec<Span> = if let Some(notice) = &app.notice {
        vec![Span::styled(
            format!(" {}", notice),
            Style::default().fg(Color::Green),
        )]
    } else if app.search.editing {
        vec![Span::styled(
            format!(" {}", i18n::translate(lang, "hint.editing")),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        [
            hint(" ↑↓ ", "hint.navigate"),
            hint("  ←→ ", "hint.page"),
            hint("  / ", "hint.search"),
            hint("  s ", "hint.sort"),
            hint("  r ", "hint.retry"),
            hint("  t ", "hint.language"),
            hint("  q ", "hint.quit"),
        ]
        .into_iter()
        .flatten()
        .collect()
    };

    if app.search.results.data().is_some_and(|r| r.cached) {
        spans.push(Span::styled(
            format!("  [{}]", i18n::translate(lang, "search.cached")),
            Style::default().fg(Color::Blue),
        ));
    }

    let rate = app.rate_limit();
    if rate.is_known() {
        let rate_color = if rate.remaining < 3 {
            Color::Red
        } else if rate.remaining < 10 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        spans.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
