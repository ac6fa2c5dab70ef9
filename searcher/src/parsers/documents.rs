use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{HitsResultParser, ResultParser};
use crate::SearcherError;

/// Deserializes the `_source` of every hit into `T`.
#[derive(Debug, Clone)]
pub struct DocumentsResultParser<T> {
    hits: HitsResultParser,
    _document: PhantomData<fn() -> T>,
}

impl<T> Default for DocumentsResultParser<T> {
    fn default() -> Self {
        Self {
            hits: HitsResultParser::default(),
            _document: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> DocumentsResultParser<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matched documents in result order.
    ///
    /// Fails on the first hit that has no `_source` or whose source does not
    /// fit `T`, so the result always has one document per hit.
    pub fn documents(&self) -> Result<Vec<T>, SearcherError> {
        self.hits
            .hits()
            .iter()
            .enumerate()
            .map(|(position, hit)| {
                let source = hit.get("_source").ok_or_else(|| {
                    SearcherError::Deserialization(format!(
                        "hit {} ({}) has no _source",
                        position,
                        hit.get("_id").and_then(Value::as_str).unwrap_or("no id")
                    ))
                })?;
                serde_json::from_value(source.clone())
                    .map_err(|e| SearcherError::Deserialization(e.to_string()))
            })
            .collect()
    }

    pub fn total(&self) -> Option<u64> {
        self.hits.total()
    }
}

impl<T> ResultParser for DocumentsResultParser<T> {
    fn set_raw_results(&mut self, raw: Value) {
        self.hits.set_raw_results(raw);
    }

    fn raw_results(&self) -> Option<&Value> {
        self.hits.raw_results()
    }
}
