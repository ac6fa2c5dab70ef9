//! Result parsers.
//!
//! A result parser receives the raw search response once the query has run
//! and exposes it in the shape the caller wants. Queries default to
//! [`ArrayResultParser`]; any other strategy is selected with
//! [`crate::Query::parse_results_with`].

mod aggregations;
mod array;
mod documents;
mod hits;

pub use aggregations::AggregationsResultParser;
pub use array::ArrayResultParser;
pub use documents::DocumentsResultParser;
pub use hits::HitsResultParser;

use serde_json::Value;

/// Strategy turning a raw search response into a caller friendly view.
pub trait ResultParser: Send {
    /// Store the raw response. Called once, right after execution.
    fn set_raw_results(&mut self, raw: Value);

    /// The raw response, if the query has run.
    fn raw_results(&self) -> Option<&Value>;
}
