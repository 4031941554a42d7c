// Repository list rendering.
// Styled result rows plus the loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::error::FetchError;
use crate::github::Repository;
use crate::i18n::{self, Language};
use crate::state::{LoadingState, SearchState};

/// Compact count for stars and forks (e.g., "1.2k").
pub fn format_number(n: u64) -> String {
    if n >= 1000 {
        format!("{:.1}k", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}

/// Full count with thousands separators (e.g., "12,345").
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>, now: DateTime<Utc>, lang: Language) -> String {
    let duration = now.signed_duration_since(*dt);

    let (value, unit) = if duration.num_days() > 0 {
        (duration.num_days(), ("d ago", "天前"))
    } else if duration.num_hours() > 0 {
        (duration.num_hours(), ("h ago", "小时前"))
    } else if duration.num_minutes() > 0 {
        (duration.num_minutes(), ("m ago", "分钟前"))
    } else {
        return match lang {
            Language::En => "just now".to_string(),
            Language::Zh => "刚刚".to_string(),
        };
    };

    match lang {
        Language::En => format!("{}{}", value, unit.0),
        Language::Zh => format!("{} {}", value, unit.1),
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(text, area);
}

/// Render a failed search with a retry hint.
pub fn render_error(frame: &mut Frame, area: Rect, error: &FetchError, lang: Language) {
    let lines = vec![
        Line::from(Span::styled(
            format!("❌ {}", i18n::translate(lang, "error.title")),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            i18n::fetch_error_message(lang, error),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            i18n::translate(lang, "error.tryAgain"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(format!(" {} ", i18n::translate(lang, "error.failed"))),
        );
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(text, area);
}

fn repository_item(repo: &Repository, now: DateTime<Utc>, lang: Language) -> ListItem<'_> {
    let updated = i18n::translate_with(
        lang,
        "repo.updated",
        &[("when", &format_relative_time(&repo.updated_at, now, lang))],
    );

    let header = Line::from(vec![
        Span::styled(
            repo.full_name.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ★ {}", format_number(repo.stargazers_count)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  ⑂ {}", format_number(repo.forks_count)),
            Style::default().fg(Color::Green),
        ),
        Span::styled(format!("  {}", updated), Style::default().fg(Color::DarkGray)),
    ]);

    let description = match repo.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Span::raw(text.to_string()),
        _ => Span::styled(
            i18n::translate(lang, "repo.noDescription"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    let mut lines = vec![header, Line::from(vec![Span::raw("  "), description])];

    if !repo.topics.is_empty() {
        let topics: Vec<String> = repo.topics.iter().map(|t| format!("#{}", t)).collect();
        lines.push(Line::from(Span::styled(
            format!("  {}", topics.join(" ")),
            Style::default().fg(Color::Blue),
        )));
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}

/// Render the search results area.
pub fn render_results(frame: &mut Frame, search: &mut SearchState, lang: Language, area: Rect) {
    match &search.results {
        LoadingState::Idle => render_empty(
            frame,
            area,
            vec![Line::from(i18n::translate(lang, "search.ready"))],
        ),
        LoadingState::Loading => {
            render_loading(frame, area, &i18n::translate(lang, "search.loading"))
        }
        LoadingState::Error(e) => render_error(frame, area, e, lang),
        LoadingState::Loaded(result) => {
            if result.items.is_empty() {
                render_empty(
                    frame,
                    area,
                    vec![
                        Line::from(Span::styled(
                            i18n::translate(lang, "search.noResults"),
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        Line::from(i18n::translate(lang, "search.noResultsHint")),
                        Line::from(i18n::translate(lang, "search.clear")),
                    ],
                );
                return;
            }

            let now = Utc::now();
            let selected_url = search
                .selected_item()
                .map(|repo| format!(" {} ", repo.html_url))
                .unwrap_or_default();
            let items: Vec<ListItem> = result
                .items
                .iter()
                .map(|repo| repository_item(repo, now, lang))
                .collect();

            let list_widget = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title_bottom(Line::from(selected_url).right_aligned()),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, &mut search.list_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.0k");
        assert_eq!(format_number(1240), "1.2k");
        assert_eq!(format_number(183_400), "183.4k");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(
            format_relative_time(&(now - Duration::days(3)), now, Language::En),
            "3d ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::hours(5)), now, Language::En),
            "5h ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::minutes(7)), now, Language::Zh),
            "7 分钟前"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::seconds(10)), now, Language::En),
            "just now"
        );
    }
}
