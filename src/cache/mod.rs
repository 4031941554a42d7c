// Cache module for search results.
// Provides storage backends, platform paths, and the time-boxed search cache.

pub mod paths;
pub mod search;
pub mod store;

pub use search::SearchCache;
pub use store::{FileStore, KvStore, MemoryStore};
