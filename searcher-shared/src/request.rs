//! The request handed to the search engine client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index target meaning "search every index in the cluster".
pub const ALL_INDICES: &str = "_all";

/// A fully assembled search request.
///
/// `index` always holds a value: either a comma-joined list of index names or
/// [`ALL_INDICES`]. `doc_type` is only serialized when at least one type was
/// targeted, so an untyped request never carries a `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Comma-joined index names, or `_all`.
    pub index: String,
    /// Comma-joined type names, absent when searching the whole index.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Query body with every fragment already resolved.
    pub body: Value,
}

impl QueryRequest {
    /// Individual index names targeted by this request.
    pub fn index_names(&self) -> Vec<&str> {
        split_names(&self.index)
    }

    /// Individual type names targeted by this request. Empty when untyped.
    pub fn type_names(&self) -> Vec<&str> {
        self.doc_type.as_deref().map(split_names).unwrap_or_default()
    }

    /// Whether this request spans every index.
    pub fn targets_all_indices(&self) -> bool {
        self.index == ALL_INDICES
    }
}

fn split_names(joined: &str) -> Vec<&str> {
    joined.split(',').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untyped_request_has_no_type_key() {
        let request = QueryRequest {
            index: "products".to_string(),
            doc_type: None,
            body: json!({"query": {"match_all": {}}}),
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({"index": "products", "body": {"query": {"match_all": {}}}})
        );
        assert!(value.get("type").is_none());
    }

    #[test]
    fn test_typed_request_serializes_type() {
        let request = QueryRequest {
            index: "products,archive".to_string(),
            doc_type: Some("book,movie".to_string()),
            body: json!({}),
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["type"], "book,movie");
        assert_eq!(request.index_names(), vec!["products", "archive"]);
        assert_eq!(request.type_names(), vec!["book", "movie"]);
    }

    #[test]
    fn test_all_indices_sentinel() {
        let request = QueryRequest {
            index: ALL_INDICES.to_string(),
            doc_type: None,
            body: json!({}),
        };

        assert!(request.targets_all_indices());
        assert!(request.type_names().is_empty());
    }
}
