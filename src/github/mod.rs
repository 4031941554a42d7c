// GitHub search API module.
// Provides the search client, filter construction, and response types.

pub mod client;
pub mod query;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::*;
