// Error types for ainav.
// Separates the two user-facing fetch failures from internal settings/cache/terminal errors.

use thiserror::Error;

/// Failure of a repository search, as surfaced to the UI.
///
/// Only two kinds exist. Everything that is not an upstream rate limit is
/// reported as a network failure so the user gets a single retry affordance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("GitHub API rate limited (HTTP {status}), try again later or use a proxy")]
    RateLimited { status: u16 },

    #[error("Failed to fetch data, check your network: {0}")]
    Network(String),
}

impl FetchError {
    pub fn network(detail: impl std::fmt::Display) -> Self {
        FetchError::Network(detail.to_string())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network(format!("request timed out: {}", err))
        } else {
            FetchError::network(err)
        }
    }
}

/// Internal errors: settings, cache store and terminal I/O.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(test)]
    #[error("Cache quota exceeded: {used} of {quota} bytes in use")]
    QuotaExceeded { used: usize, quota: usize },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NavError>;
