//! Mock search engine client shared by the unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use searcher_repository::{SearchEngineClient, SearchError};
use searcher_shared::{ClusterHealth, ClusterStatus, QueryRequest};

/// Records every request and answers with a canned response or error.
pub(crate) struct MockClient {
    requests: Arc<Mutex<Vec<QueryRequest>>>,
    response: Value,
    error: Option<SearchError>,
    health: ClusterHealth,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::returning(json!({"hits": {"total": 0, "hits": []}}))
    }

    pub(crate) fn returning(response: Value) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response,
            error: None,
            health: ClusterHealth {
                status: ClusterStatus::Green,
                number_of_nodes: 1,
            },
        }
    }

    pub(crate) fn failing(error: SearchError) -> Self {
        Self {
            error: Some(error),
            ..Self::new()
        }
    }

    pub(crate) fn with_health(mut self, status: ClusterStatus, number_of_nodes: u32) -> Self {
        self.health = ClusterHealth {
            status,
            number_of_nodes,
        };
        self
    }

    /// Handle on the requests received so far.
    pub(crate) fn recorded(&self) -> Arc<Mutex<Vec<QueryRequest>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl SearchEngineClient for MockClient {
    async fn search(&self, request: &QueryRequest) -> Result<Value, SearchError> {
        self.requests.lock().await.push(request.clone());
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.response.clone()),
        }
    }

    async fn cluster_health(&self) -> Result<ClusterHealth, SearchError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.health.clone()),
        }
    }
}
