// App state and main event loop.
// Dispatches searches to background tasks and applies keyboard input to the search state.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::fetcher::{FetchOutcome, Fetcher};
use crate::github::RateLimit;
use crate::i18n::{self, Language};
use crate::state::SearchState;
use crate::ui;

/// Main application state.
pub struct App {
    pub settings: Settings,
    pub search: SearchState,
    /// One-line message shown in the status bar until the next key press.
    pub notice: Option<String>,
    /// Whether the app should exit.
    pub should_quit: bool,
    fetcher: Arc<Fetcher>,
    settings_path: Option<PathBuf>,
    results_tx: mpsc::UnboundedSender<(u64, FetchOutcome)>,
    results_rx: mpsc::UnboundedReceiver<(u64, FetchOutcome)>,
}

impl App {
    pub fn new(
        settings: Settings,
        settings_path: Option<PathBuf>,
        fetcher: Arc<Fetcher>,
        initial_query: String,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let search = SearchState::new(initial_query, settings.page_size, settings.debounce());
        Self {
            settings,
            search,
            notice: None,
            should_quit: false,
            fetcher,
            settings_path,
            results_tx,
            results_rx,
        }
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.fetcher.rate_limit()
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.request_search();
        while !self.should_quit {
            self.drain_results();
            if self.search.poll_debounce(Instant::now()) {
                self.request_search();
            }
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Fetch the current page in the background.
    pub fn request_search(&mut self) {
        let (request_id, params) = self.search.begin_request();
        tracing::info!(
            request_id,
            keyword = %params.keyword,
            order = params.sort_order.as_str(),
            page = params.page,
            "search requested"
        );

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let outcome = fetcher.fetch(&params).await;
            // The receiver only goes away when the app shuts down
            let _ = tx.send((request_id, outcome));
        });
    }

    /// Apply every finished search without blocking.
    pub fn drain_results(&mut self) {
        while let Ok((request_id, outcome)) = self.results_rx.try_recv() {
            match &outcome {
                Ok(result) => tracing::debug!(
                    request_id,
                    total = result.total_count,
                    cached = result.cached,
                    "search finished"
                ),
                Err(e) if e.is_rate_limited() => {
                    tracing::warn!(request_id, rate_limit = ?self.fetcher.rate_limit(), "search rate limited")
                }
                Err(e) => tracing::warn!(request_id, error = %e, "search failed"),
            }
            self.search.apply(request_id, outcome);
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.notice = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.search.editing {
            self.handle_editing_key(key);
            return;
        }

        let changed = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('/') => {
                self.search.editing = true;
                false
            }
            KeyCode::Char('s') => self.search.toggle_sort_order(),
            KeyCode::Char('r') => true,
            KeyCode::Char('c') => self.search.clear_search(),
            KeyCode::Char('t') => {
                self.set_language(self.language().toggle());
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.select_next();
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.select_prev();
                false
            }
            KeyCode::Right | KeyCode::Char('n') => self.search.next_page(),
            KeyCode::Left | KeyCode::Char('p') => self.search.prev_page(),
            KeyCode::Home | KeyCode::Char('g') => self.search.first_page(),
            KeyCode::End | KeyCode::Char('G') => self.search.last_page(),
            _ => false,
        };

        if changed {
            self.request_search();
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Enter => {
                self.search.editing = false;
                if self.search.commit_input() {
                    self.request_search();
                }
            }
            KeyCode::Esc => self.search.editing = false,
            KeyCode::Backspace => self.search.backspace(now),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear_input(now)
            }
            KeyCode::Char(c) => self.search.push_char(c, now),
            _ => {}
        }
    }

    /// Switch language in place and remember the choice.
    pub fn set_language(&mut self, language: Language) {
        if language == self.settings.language {
            return;
        }
        self.settings.language = language;
        self.persist_settings();

        let name = i18n::translate(language, &format!("language.{}", language.code()));
        self.notice = Some(i18n::translate_with(
            language,
            "language.changed",
            &[("name", &name)],
        ));
    }

    fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save settings");
        }
    }
}
