//! # Searcher
//!
//! Declarative query building on top of an OpenSearch client.
//!
//! A query kind implements [`QueryVariant`]: it registers the indices and
//! types to search and sets the body, optionally referencing named
//! fragments. The [`Searcher`] facade owns the client and the index and
//! fragment registries; a [`Query`] borrows it, assembles the final
//! [`QueryRequest`], executes it and hands the raw response to a pluggable
//! [`ResultParser`].
//!
//! ```ignore
//! struct ProductsQuery;
//!
//! impl QueryVariant for ProductsQuery {
//!     fn configure(&self, query: &mut QueryBuilder<'_>) -> Result<(), SearcherError> {
//!         query.search_in("products", None)?;
//!         query.set_body(json!({ "query": { "match": { "name": query.data("term") } } }));
//!         Ok(())
//!     }
//! }
//!
//! let results = searcher
//!     .query(ProductsQuery)
//!     .with_data("term", json!("lamp"))
//!     .parse_results_with(HitsResultParser::new())
//!     .run()
//!     .await?;
//! ```

pub mod config;
pub mod fragments;
pub mod indices;
pub mod parsers;
pub mod query;
pub mod telemetry;

mod searcher;
#[cfg(test)]
mod test_support;

pub use config::SearcherConfig;
pub use fragments::{fragment_ref, Fragment, FragmentParser, FragmentRegistry};
pub use indices::{Index, IndicesManager, NamedIndex};
pub use parsers::{
    AggregationsResultParser, ArrayResultParser, DocumentsResultParser, HitsResultParser,
    ResultParser,
};
pub use query::{Query, QueryBuilder, QueryVariant};
pub use searcher::Searcher;

pub use searcher_repository::{OpenSearchClient, SearchEngineClient, SearchError};
pub use searcher_shared::{ClusterHealth, ClusterStatus, QueryRequest, ALL_INDICES};

use thiserror::Error;

/// Errors that can occur while building or running a query.
#[derive(Error, Debug)]
pub enum SearcherError {
    /// A query targeted an index that was never registered with the searcher.
    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    /// A body referenced a fragment that was never registered.
    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),

    /// A fragment references itself, directly or through other fragments.
    #[error("Circular fragment reference: {0}")]
    CircularFragment(String),

    /// The search engine client failed.
    #[error("Execution error: {0}")]
    Execution(#[from] SearchError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A hit could not be deserialized into the requested document type.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SearcherError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an unknown index error.
    pub fn unknown_index(name: impl Into<String>) -> Self {
        Self::UnknownIndex(name.into())
    }

    /// Create an unknown fragment error.
    pub fn unknown_fragment(name: impl Into<String>) -> Self {
        Self::UnknownFragment(name.into())
    }
}
