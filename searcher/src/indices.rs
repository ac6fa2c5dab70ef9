//! Index definitions and the registry queries resolve index names through.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::debug;

use crate::SearcherError;

/// An index known to the searcher.
///
/// Only `name` is required. `settings` and `mappings` describe the index
/// layout for callers that manage the cluster themselves; the searcher never
/// pushes them.
pub trait Index: Send + Sync {
    /// Name of the index (or alias) on the cluster.
    fn name(&self) -> &str;

    fn settings(&self) -> Value {
        json!({})
    }

    fn mappings(&self) -> Value {
        json!({})
    }

    /// Settings and mappings combined in the shape the create-index API takes.
    fn body(&self) -> Value {
        json!({
            "settings": self.settings(),
            "mappings": self.mappings()
        })
    }
}

/// An index identified by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedIndex {
    name: String,
}

impl NamedIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Index for NamedIndex {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of the indices queries are allowed to target.
#[derive(Default)]
pub struct IndicesManager {
    indices: HashMap<String, Box<dyn Index>>,
}

impl IndicesManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index under its own name, replacing an earlier registration.
    pub fn register(&mut self, index: impl Index + 'static) -> &mut Self {
        let name = index.name().to_string();
        debug!(index = %name, "Registered index");
        self.indices.insert(name, Box::new(index));
        self
    }

    /// Remove an index from the registry.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Index>> {
        self.indices.remove(name)
    }

    /// Look up a registered index.
    ///
    /// # Returns
    ///
    /// * `Ok(&dyn Index)` - The registered index
    /// * `Err(SearcherError::UnknownIndex)` - If no index was registered under `name`
    pub fn get_registered(&self, name: &str) -> Result<&dyn Index, SearcherError> {
        self.indices
            .get(name)
            .map(|index| index.as_ref())
            .ok_or_else(|| SearcherError::unknown_index(name))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Names of every registered index, sorted.
    pub fn registered(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.indices.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for IndicesManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicesManager")
            .field("indices", &self.registered())
            .finish()
    }
}
