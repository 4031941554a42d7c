// Search screen state.
// Tracks input debounce, sort and page, request ordering, and the loaded results.

use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::error::FetchError;
use crate::fetcher::FetchOutcome;
use crate::github::{Repository, SearchParams, SearchResult, SortField, SortOrder};

use super::pagination;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(FetchError),
}

impl<T> LoadingState<T> {
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State behind the search screen.
#[derive(Debug)]
pub struct SearchState {
    /// Text currently in the search box.
    pub input: String,
    /// Whether keystrokes go to the search box.
    pub editing: bool,
    pub results: LoadingState<SearchResult>,
    pub list_state: ListState,
    keyword: String,
    sort_order: SortOrder,
    page: u32,
    page_size: u32,
    debounce: Duration,
    dirty_since: Option<Instant>,
    latest_request: u64,
}

impl SearchState {
    pub fn new(keyword: impl Into<String>, page_size: u32, debounce: Duration) -> Self {
        let keyword = keyword.into();
        Self {
            input: keyword.clone(),
            editing: false,
            results: LoadingState::Idle,
            list_state: ListState::default(),
            keyword,
            sort_order: SortOrder::Desc,
            page: 1,
            page_size: page_size.max(1),
            debounce,
            dirty_since: None,
            latest_request: 0,
        }
    }

    #[cfg(test)]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Parameters for the current committed state.
    pub fn params(&self) -> SearchParams {
        SearchParams::new(
            self.keyword.clone(),
            SortField::Stars,
            self.sort_order,
            self.page,
            self.page_size,
        )
    }

    /// Start a new request. Responses to earlier ids will be ignored.
    pub fn begin_request(&mut self) -> (u64, SearchParams) {
        self.latest_request += 1;
        self.results = LoadingState::Loading;
        self.list_state.select(None);
        (self.latest_request, self.params())
    }

    /// Apply a finished request. Returns false for stale responses.
    pub fn apply(&mut self, request_id: u64, outcome: FetchOutcome) -> bool {
        if request_id != self.latest_request {
            tracing::debug!(request_id, latest = self.latest_request, "dropping stale response");
            return false;
        }

        match outcome {
            Ok(result) => {
                let first = if result.items.is_empty() { None } else { Some(0) };
                self.results = LoadingState::Loaded(result);
                self.list_state.select(first);
            }
            Err(err) => {
                self.results = LoadingState::Error(err);
                self.list_state.select(None);
            }
        }
        true
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.input.push(c);
        self.dirty_since = Some(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.input.pop().is_some() {
            self.dirty_since = Some(now);
        }
    }

    pub fn clear_input(&mut self, now: Instant) {
        if !self.input.is_empty() {
            self.input.clear();
            self.dirty_since = Some(now);
        }
    }

    /// Commit the input once it has been idle for the debounce delay.
    /// Returns true when the keyword changed and a new search is due.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.saturating_duration_since(since) >= self.debounce => {
                self.dirty_since = None;
                self.set_keyword(self.input.clone())
            }
            _ => false,
        }
    }

    /// Commit the input immediately.
    pub fn commit_input(&mut self) -> bool {
        self.dirty_since = None;
        self.set_keyword(self.input.clone())
    }

    /// Empty both the input and the keyword.
    pub fn clear_search(&mut self) -> bool {
        self.input.clear();
        self.dirty_since = None;
        self.set_keyword(String::new())
    }

    fn set_keyword(&mut self, keyword: String) -> bool {
        if keyword == self.keyword {
            return false;
        }
        self.keyword = keyword;
        self.page = 1;
        true
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        if order == self.sort_order {
            return false;
        }
        self.sort_order = order;
        self.page = 1;
        true
    }

    pub fn toggle_sort_order(&mut self) -> bool {
        self.set_sort_order(self.sort_order.toggle())
    }

    /// Reachable pages for the loaded results.
    pub fn total_pages(&self) -> u32 {
        self.results
            .data()
            .map(|result| pagination::total_pages(result.total_count, self.page_size))
            .unwrap_or(0)
    }

    /// Move to `page`, clamped to the reachable range. Ignored while loading.
    pub fn set_page(&mut self, page: u32) -> bool {
        let total = self.total_pages();
        if total == 0 {
            return false;
        }
        let page = page.clamp(1, total);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.set_page(self.total_pages())
    }

    /// Whether the loaded page is the last reachable one.
    pub fn is_at_end(&self) -> bool {
        self.results.data().is_some_and(|result| {
            pagination::is_last_page(self.page, self.page_size, result.total_count)
        })
    }

    fn item_count(&self) -> usize {
        self.results.data().map(|r| r.items.len()).unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 >= count => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.item_count() == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.list_state.select(Some(i));
    }

    pub fn selected_item(&self) -> Option<&Repository> {
        let index = self.list_state.selected()?;
        self.results.data()?.items.get(index)
    }
}
