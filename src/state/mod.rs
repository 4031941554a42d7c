// State management module.
// Holds the search screen state and pagination helpers.

pub mod pagination;
pub mod search;

pub use search::{LoadingState, SearchState};
