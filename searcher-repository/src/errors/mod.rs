//! Error types for the searcher repository.

mod search_error;

pub use search_error::SearchError;
