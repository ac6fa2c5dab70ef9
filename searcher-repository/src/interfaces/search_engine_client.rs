//! Search engine client trait definition.
//!
//! This module defines the abstract interface the query layer executes
//! against, allowing for different backend implementations (OpenSearch,
//! Elasticsearch, mocks in tests).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use searcher_shared::{ClusterHealth, QueryRequest};

/// Abstract interface for search engine operations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a single client can be shared
/// by every query built from the same searcher.
///
/// # Error Handling
///
/// Failures are reported as `SearchError` and are never retried here; retry
/// policy belongs to the transport.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Execute an assembled search request.
    ///
    /// # Arguments
    ///
    /// * `request` - The request with index, optional type and resolved body
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw response body as returned by the engine
    /// * `Err(SearchError)` - If the transport fails or the engine rejects the query
    ///
    /// # Example
    ///
    /// ```ignore
    /// let raw = client.search(&request).await?;
    /// println!("took {}ms", raw["took"]);
    /// ```
    async fn search(&self, request: &QueryRequest) -> Result<Value, SearchError>;

    /// Read the cluster health report.
    async fn cluster_health(&self) -> Result<ClusterHealth, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster passes [`ClusterHealth::is_healthy`]
    /// * `Ok(false)` - If the cluster is reachable but degraded
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(self.cluster_health().await?.is_healthy())
    }
}
