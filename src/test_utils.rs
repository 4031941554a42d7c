// Shared fixtures for unit tests.
// Builds GitHub search payloads in the shape the API returns.

use serde_json::{Value, json};

use crate::github::SearchResult;

/// Search response body with `count` repositories and a total of 5000.
pub fn sample_body(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("repo-{}", i),
                "full_name": format!("owner/repo-{}", i),
                "description": "An agent framework",
                "stargazers_count": 5000 - i,
                "forks_count": 100,
                "watchers_count": 5000 - i,
                "owner": {
                    "login": "owner",
                    "avatar_url": "https://avatars.githubusercontent.com/u/9",
                    "html_url": "https://github.com/owner"
                },
                "html_url": format!("https://github.com/owner/repo-{}", i),
                "topics": ["llm", "agent"],
                "updated_at": "2025-06-01T12:00:00Z"
            })
        })
        .collect();
    json!({ "total_count": 5000, "items": items, "incomplete_results": false })
}

/// Parsed form of [`sample_body`].
pub fn sample_result(count: usize) -> SearchResult {
    serde_json::from_value(sample_body(count)).expect("fixture parses")
}
