// GitHub search API types.
// Request parameters and response structs for repository search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of repositories per page.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Field the search results are sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Stars,
    Updated,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Updated => "updated",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            SortOrder::Desc => SortOrder::Asc,
            SortOrder::Asc => SortOrder::Desc,
        }
    }
}

/// Everything that determines one search request (and its cache key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchParams {
    pub keyword: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl SearchParams {
    /// Build parameters, clamping page and page size to at least 1.
    pub fn new(
        keyword: impl Into<String>,
        sort_field: SortField,
        sort_order: SortOrder,
        page: u32,
        page_size: u32,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            sort_field,
            sort_order,
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(
            "",
            SortField::default(),
            SortOrder::default(),
            1,
            DEFAULT_PAGE_SIZE,
        )
    }
}

/// Repository owner as embedded in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// GitHub repository from the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub watchers_count: u64,
    pub owner: Owner,
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// One page of repository search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<Repository>,
    #[serde(default)]
    pub incomplete_results: bool,
    /// Set only when the page was served from the local cache.
    #[serde(default)]
    pub cached: bool,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// True once any rate limit header has been seen.
    pub fn is_known(&self) -> bool {
        self.limit > 0
    }
}
