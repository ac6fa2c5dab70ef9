//! # Searcher Shared
//!
//! Plain data types exchanged between the query layer and the search engine
//! client: the assembled request and the cluster health report.

mod health;
mod request;

pub use health::{ClusterHealth, ClusterStatus};
pub use request::{QueryRequest, ALL_INDICES};
