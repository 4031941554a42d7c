// GitHub search API HTTP client.
// Handles request headers, timeout, rate limit tracking, and status classification.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FetchError, NavError, Result};

use super::query::build_filter;
use super::types::{RateLimit, SearchParams, SearchResult};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const SEARCH_ENDPOINT: &str = "/search/repositories";

/// Per-request timeout for search calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Unauthenticated client for the repository search endpoint.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a client against `base_url` with the default 10 second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("ainav-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| NavError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Last rate limit reported by GitHub.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one repository search. Never retries.
    pub async fn search(
        &self,
        params: &SearchParams,
    ) -> std::result::Result<SearchResult, FetchError> {
        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);
        let query = [
            ("q", build_filter(&params.keyword)),
            ("sort", params.sort_field.as_str().to_string()),
            ("order", params.sort_order.as_str().to_string()),
            ("page", params.page.to_string()),
            ("per_page", params.page_size.to_string()),
        ];

        tracing::debug!(q = %query[0].1, page = params.page, "searching repositories");

        let response = self.client.get(&url).query(&query).send().await?;

        self.update_rate_limit(&response);
        let response = check_response(response)?;

        let mut result: SearchResult = response.json().await?;
        result.cached = false;
        Ok(result)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let mut rate_limit = self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }
}

/// Classify the response status.
fn check_response(response: Response) -> std::result::Result<Response, FetchError> {
    let status = response.status();
    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(%status, "GitHub search rate limited");
            Err(FetchError::RateLimited {
                status: status.as_u16(),
            })
        }
        s if s.is_success() => Ok(response),
        s => {
            tracing::warn!(status = %s, "GitHub search failed");
            Err(FetchError::Network(format!("HTTP {}", s)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::{SortField, SortOrder};
    use crate::test_utils::sample_body;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_sends_filter_and_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param(
                "q",
                "langchain in:name,description,topics stars:>=1000 fork:true is:public archived:false",
            ))
            .and(query_param("sort", "updated"))
            .and(query_param("order", "asc"))
            .and(query_param("page", "3"))
            .and(query_param("per_page", "10"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_body(10))
                    .insert_header("x-ratelimit-limit", "10")
                    .insert_header("x-ratelimit-remaining", "7")
                    .insert_header("x-ratelimit-reset", "1700000000"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new(&server.uri()).unwrap();
        let params = SearchParams::new("langchain", SortField::Updated, SortOrder::Asc, 3, 10);
        let result = client.search(&params).await.unwrap();

        assert_eq!(result.total_count, 5000);
        assert_eq!(result.items.len(), 10);
        assert!(!result.cached);

        let rate = client.rate_limit();
        assert!(rate.is_known());
        assert_eq!(rate.remaining, 7);
        assert_eq!(rate.reset, 1_700_000_000);
    }

    #[tokio::test]
    async fn test_rate_limit_statuses() {
        for status in [403u16, 429] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let client = GitHubClient::new(&server.uri()).unwrap();
            let err = client.search(&SearchParams::default()).await.unwrap_err();
            assert_eq!(err, FetchError::RateLimited { status });
        }
    }

    #[tokio::test]
    async fn test_server_error_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = GitHubClient::new(&server.uri()).unwrap();
        let err = client.search(&SearchParams::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GitHubClient::new(&server.uri()).unwrap();
        let err = client.search(&SearchParams::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_body(1))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client =
            GitHubClient::with_timeout(&server.uri(), Duration::from_millis(50)).unwrap();
        let err = client.search(&SearchParams::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(ref msg) if msg.contains("timed out")));
    }
}
