// Cache-backed repository search.
// Derives cache keys, serves fresh pages from the cache, and coalesces identical in-flight requests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::cache::SearchCache;
use crate::error::FetchError;
use crate::github::{GitHubClient, RateLimit, SearchParams, SearchResult};

pub type FetchOutcome = Result<SearchResult, FetchError>;

type InFlight = Mutex<HashMap<String, broadcast::Sender<FetchOutcome>>>;

/// Cache key for a set of search parameters.
///
/// The keyword is used verbatim and comes first; the remaining fields never
/// contain `_`, so equal keys imply equal parameters.
pub fn cache_key(params: &SearchParams) -> String {
    format!(
        "github_{}_{}_{}_{}_{}",
        params.keyword,
        params.sort_field.as_str(),
        params.sort_order.as_str(),
        params.page,
        params.page_size
    )
}

/// Repository search with a local cache in front of the GitHub client.
pub struct Fetcher {
    client: GitHubClient,
    cache: SearchCache,
    in_flight: InFlight,
}

impl Fetcher {
    pub fn new(client: GitHubClient, cache: SearchCache) -> Self {
        Self {
            client,
            cache,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.client.rate_limit()
    }

    /// Fetch one page of results.
    ///
    /// Fresh cache hits come back with `cached = true`. On a miss exactly one
    /// request is made per key, even when several callers ask at once. If the
    /// caller leading that request is dropped, the others retry on their own.
    pub async fn fetch(&self, params: &SearchParams) -> FetchOutcome {
        let key = cache_key(params);

        loop {
            if let Some(hit) = self.cache.get(&key) {
                tracing::debug!(key, "cache hit");
                return Ok(hit);
            }

            let flight = {
                let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
                match in_flight.get(&key) {
                    Some(sender) => Err(sender.subscribe()),
                    None => {
                        let (sender, _) = broadcast::channel(1);
                        in_flight.insert(key.clone(), sender);
                        Ok(FlightGuard {
                            in_flight: &self.in_flight,
                            key: key.clone(),
                            finished: false,
                        })
                    }
                }
            };

            let guard = match flight {
                Ok(guard) => guard,
                Err(mut receiver) => {
                    tracing::debug!(key, "joining in-flight request");
                    match receiver.recv().await {
                        Ok(outcome) => return outcome,
                        // Leader was dropped before finishing; start over
                        Err(_) => {
                            tracing::debug!(key, "in-flight request abandoned, retrying");
                            continue;
                        }
                    }
                }
            };

            tracing::debug!(key, "cache miss, querying GitHub");
            let outcome = self.client.search(params).await;

            if let Ok(result) = &outcome {
                self.cache.put(&key, result);
            }
            guard.finish(&outcome);

            return outcome;
        }
    }
}

/// Registration of a leading request in the in-flight map.
///
/// Removes the entry when the request finishes or its future is dropped.
struct FlightGuard<'a> {
    in_flight: &'a InFlight,
    key: String,
    finished: bool,
}

impl FlightGuard<'_> {
    fn take_sender(&self) -> Option<broadcast::Sender<FetchOutcome>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key)
    }

    fn finish(mut self, outcome: &FetchOutcome) {
        self.finished = true;
        if let Some(sender) = self.take_sender() {
            // No receivers simply means nobody else asked
            let _ = sender.send(outcome.clone());
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.take_sender();
        }
    }
}
