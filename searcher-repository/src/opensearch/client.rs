//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::{
        headers::HeaderMap,
        request::JsonBody,
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Method,
    },
    OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use searcher_shared::{ClusterHealth, QueryRequest};

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200", None).await?;
/// let raw = client.search(&request).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `timeout` - Optional timeout applied to every request by the transport
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub async fn new(url: &str, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, timeout = ?timeout, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Path of the search endpoint for a typed request.
    ///
    /// The generated `SearchParts` only cover index targets, so typed
    /// searches go through the raw request API.
    fn typed_search_path(index: &str, doc_type: &str) -> String {
        format!("/{}/{}/_search", index, doc_type)
    }

    /// Turn a non-2xx response into an error carrying the status and body.
    async fn check_status(
        response: Response,
        make_error: fn(String) -> SearchError,
        what: &str,
    ) -> Result<Response, SearchError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "{} request failed", what);
        Err(make_error(format!(
            "{} failed with status {}: {}",
            what, status, error_body
        )))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    /// Execute a search request.
    ///
    /// Untyped requests are sent to `/{index}/_search`, typed ones to
    /// `/{index}/{type}/_search`. The response body is returned untouched.
    #[instrument(skip(self, request), fields(index = %request.index, doc_type = ?request.doc_type))]
    async fn search(&self, request: &QueryRequest) -> Result<Value, SearchError> {
        let response = match request.doc_type.as_deref() {
            None => {
                let indices = request.index_names();
                self.client
                    .search(SearchParts::Index(&indices))
                    .body(request.body.clone())
                    .send()
                    .await
            }
            Some(doc_type) => {
                let path = Self::typed_search_path(&request.index, doc_type);
                self.client
                    .send(
                        Method::Post,
                        &path,
                        HeaderMap::new(),
                        Option::<&()>::None,
                        Some(JsonBody::new(request.body.clone())),
                        None,
                    )
                    .await
            }
        }
        .map_err(|e| SearchError::query(e.to_string()))?;

        let response = Self::check_status(response, SearchError::QueryError, "Search").await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        debug!(took = ?body.get("took"), "Search completed");
        Ok(body)
    }

    #[instrument(skip(self))]
    async fn cluster_health(&self) -> Result<ClusterHealth, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::health(e.to_string()))?;

        let response =
            Self::check_status(response, SearchError::HealthError, "Cluster health").await?;

        let health: ClusterHealth = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        debug!(status = ?health.status, nodes = health.number_of_nodes, "Cluster health read");
        Ok(health)
    }
}
