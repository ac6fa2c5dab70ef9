//! The searcher facade.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::SearcherConfig;
use crate::fragments::{Fragment, FragmentRegistry};
use crate::indices::{Index, IndicesManager};
use crate::query::{Query, QueryVariant};
use crate::SearcherError;
use searcher_repository::{OpenSearchClient, SearchEngineClient};

/// Entry point of the library.
///
/// Owns the search engine client together with the registries queries
/// resolve index names and fragments against. Registries are filled through
/// `&mut self` before queries are built; queries only borrow the searcher.
pub struct Searcher {
    client: Arc<dyn SearchEngineClient>,
    indices_manager: IndicesManager,
    fragments: FragmentRegistry,
}

impl Searcher {
    /// Create a searcher around an existing client, with empty registries.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            indices_manager: IndicesManager::new(),
            fragments: FragmentRegistry::new(),
        }
    }

    /// Connect to OpenSearch as described by `config`.
    ///
    /// When `config.verify_health` is set the cluster must pass the health
    /// check, otherwise a configuration error is returned.
    pub async fn connect(config: &SearcherConfig) -> Result<Self, SearcherError> {
        let client = OpenSearchClient::new(&config.url, config.request_timeout)
            .await
            .map_err(|e| {
                SearcherError::config(format!("Failed to create OpenSearch client: {}", e))
            })?;

        let searcher = Self::new(Arc::new(client));

        if config.verify_health {
            searcher.verify().await?;
        }

        Ok(searcher)
    }

    /// Refuse a cluster that fails the health check.
    pub(crate) async fn verify(&self) -> Result<(), SearcherError> {
        if !self.is_healthy().await? {
            return Err(SearcherError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");
        Ok(())
    }

    pub fn client(&self) -> &Arc<dyn SearchEngineClient> {
        &self.client
    }

    /// Swap the client, keeping the registries.
    pub fn set_client(&mut self, client: Arc<dyn SearchEngineClient>) {
        self.client = client;
    }

    pub fn indices_manager(&self) -> &IndicesManager {
        &self.indices_manager
    }

    pub fn indices_manager_mut(&mut self) -> &mut IndicesManager {
        &mut self.indices_manager
    }

    pub fn fragments(&self) -> &FragmentRegistry {
        &self.fragments
    }

    pub fn fragments_mut(&mut self) -> &mut FragmentRegistry {
        &mut self.fragments
    }

    pub fn register_index(&mut self, index: impl Index + 'static) -> &mut Self {
        self.indices_manager.register(index);
        self
    }

    pub fn register_fragment(
        &mut self,
        name: impl Into<String>,
        fragment: impl Fragment,
    ) -> &mut Self {
        self.fragments.register(name, fragment);
        self
    }

    /// Resolve an index name through the registry.
    pub fn resolve_index(&self, name: &str) -> Result<&dyn Index, SearcherError> {
        self.indices_manager.get_registered(name)
    }

    /// Start a query of the given kind.
    pub fn query<V: QueryVariant>(&self, variant: V) -> Query<'_, V> {
        Query::new(self, variant)
    }

    /// Whether the cluster can serve queries.
    ///
    /// A single node cluster is healthy unless it is red; larger clusters
    /// must be green.
    #[instrument(skip(self))]
    pub async fn is_healthy(&self) -> Result<bool, SearcherError> {
        let health = self.client.cluster_health().await?;
        let healthy = health.is_healthy();

        if !healthy {
            warn!(
                status = ?health.status,
                nodes = health.number_of_nodes,
                "Cluster is unhealthy"
            );
        }

        Ok(healthy)
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("indices_manager", &self.indices_manager)
            .field("fragments", &self.fragments.names())
            .finish_non_exhaustive()
    }
}
