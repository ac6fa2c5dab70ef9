//! # Searcher Repository
//!
//! This crate provides the boundary between the query layer and the search
//! engine. It includes the error type, the client interface, and a concrete
//! implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
