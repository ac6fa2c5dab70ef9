//! Per-assembly accumulation of targets and body.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::fragments::{FragmentParser, FragmentRegistry};
use crate::indices::IndicesManager;
use crate::SearcherError;
use searcher_shared::{QueryRequest, ALL_INDICES};

/// Collects the indices, types and body a [`crate::QueryVariant`] configures.
///
/// A fresh builder is created for every assembly, so configuring the same
/// query twice never accumulates duplicate state.
pub struct QueryBuilder<'a> {
    indices_manager: &'a IndicesManager,
    data: &'a Map<String, Value>,
    indices: Vec<String>,
    types: Vec<String>,
    body: Value,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(indices_manager: &'a IndicesManager, data: &'a Map<String, Value>) -> Self {
        Self {
            indices_manager,
            data,
            indices: Vec::new(),
            types: Vec::new(),
            body: json!({}),
        }
    }

    /// Search in an index and, optionally, a type within it.
    pub fn search_in(&mut self, index: &str, doc_type: Option<&str>) -> Result<(), SearcherError> {
        self.search_in_index(index)?;

        if let Some(doc_type) = doc_type {
            self.search_in_type(doc_type);
        }

        Ok(())
    }

    /// Add an index to the targets.
    ///
    /// The name is resolved through the searcher's index registry and fails
    /// with [`SearcherError::UnknownIndex`] if it was never registered.
    /// Adding the same index twice has no effect.
    pub fn search_in_index(&mut self, index: &str) -> Result<(), SearcherError> {
        let name = self.indices_manager.get_registered(index)?.name();
        push_unique(&mut self.indices, name);
        Ok(())
    }

    /// Add a type to the targets. Adding the same type twice has no effect.
    pub fn search_in_type(&mut self, doc_type: &str) {
        push_unique(&mut self.types, doc_type);
    }

    /// Replace the whole body.
    pub fn set_body(&mut self, body: Value) {
        self.body = body;
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Data value attached to the query, `None` if the key is unknown.
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn all_data(&self) -> &Map<String, Value> {
        self.data
    }

    /// Indices added so far, in order of first registration.
    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    /// Types added so far, in order of first registration.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Compose the final request, expanding fragments in the body.
    pub(crate) fn build(self, fragments: &FragmentRegistry) -> Result<QueryRequest, SearcherError> {
        // An index is always sent; `_all` searches across every index.
        let index = if self.indices.is_empty() {
            ALL_INDICES.to_string()
        } else {
            self.indices.join(",")
        };

        // Without types the whole index is searched.
        let doc_type = if self.types.is_empty() {
            None
        } else {
            Some(self.types.join(","))
        };

        let body = FragmentParser::new(fragments).parse(&self.body)?;

        debug!(index = %index, doc_type = ?doc_type, "Assembled query");

        Ok(QueryRequest {
            index,
            doc_type,
            body,
        })
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::fragment_ref;
    use crate::indices::NamedIndex;

    fn manager() -> IndicesManager {
        let mut manager = IndicesManager::new();
        manager
            .register(NamedIndex::new("products"))
            .register(NamedIndex::new("archive"));
        manager
    }

    #[test]
    fn test_repeated_targets_are_deduplicated() {
        let manager = manager();
        let data = Map::new();
        let mut builder = QueryBuilder::new(&manager, &data);

        builder.search_in("products", Some("book")).unwrap();
        builder.search_in("archive", Some("book")).unwrap();
        builder.search_in("products", None).unwrap();
        builder.search_in_type("movie");
        builder.search_in_type("book");

        let request = builder.build(&FragmentRegistry::new()).unwrap();

        assert_eq!(request.index, "products,archive");
        assert_eq!(request.doc_type.as_deref(), Some("book,movie"));
    }

    #[test]
    fn test_defaults() {
        let manager = manager();
        let data = Map::new();
        let builder = QueryBuilder::new(&manager, &data);

        let request = builder.build(&FragmentRegistry::new()).unwrap();

        assert_eq!(request.index, ALL_INDICES);
        assert!(request.doc_type.is_none());
        assert_eq!(request.body, json!({}));
    }

    #[test]
    fn test_unknown_index_is_rejected() {
        let manager = manager();
        let data = Map::new();
        let mut builder = QueryBuilder::new(&manager, &data);

        let result = builder.search_in("orders", Some("order"));

        assert!(matches!(result, Err(SearcherError::UnknownIndex(name)) if name == "orders"));
        assert!(builder.indices().is_empty());
        assert!(builder.types().is_empty());
    }

    #[test]
    fn test_set_body_overwrites() {
        let manager = manager();
        let data = Map::new();
        let mut builder = QueryBuilder::new(&manager, &data);

        builder.set_body(json!({"query": {"match_all": {}}, "size": 10}));
        builder.set_body(json!({"query": {"match_none": {}}}));

        assert_eq!(builder.body(), &json!({"query": {"match_none": {}}}));
    }

    #[test]
    fn test_build_resolves_fragments() {
        let manager = manager();
        let data = Map::new();
        let mut fragments = FragmentRegistry::new();
        fragments.register("all", json!({"match_all": {}}));
        let mut builder = QueryBuilder::new(&manager, &data);
        builder.set_body(json!({"query": fragment_ref("all")}));

        let request = builder.build(&fragments).unwrap();

        assert_eq!(request.body, json!({"query": {"match_all": {}}}));
    }
}
