use serde_json::Value;

use super::ResultParser;

/// Exposes the matched documents of a response.
#[derive(Debug, Clone, Default)]
pub struct HitsResultParser {
    raw: Option<Value>,
}

impl HitsResultParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `hits.hits` array. Empty when absent.
    pub fn hits(&self) -> &[Value] {
        self.raw
            .as_ref()
            .and_then(|raw| raw.pointer("/hits/hits"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `_source` of every hit that carries one.
    pub fn sources(&self) -> Vec<&Value> {
        self.hits()
            .iter()
            .filter_map(|hit| hit.get("_source"))
            .collect()
    }

    /// Document ids of the hits, in result order.
    pub fn ids(&self) -> Vec<&str> {
        self.hits()
            .iter()
            .filter_map(|hit| hit.get("_id").and_then(Value::as_str))
            .collect()
    }

    /// Total number of matching documents.
    ///
    /// Handles both `"total": 12` and `"total": {"value": 12, "relation": "eq"}`.
    pub fn total(&self) -> Option<u64> {
        let total = self.raw.as_ref()?.pointer("/hits/total")?;
        total
            .as_u64()
            .or_else(|| total.get("value").and_then(Value::as_u64))
    }

    pub fn max_score(&self) -> Option<f64> {
        self.raw
            .as_ref()?
            .pointer("/hits/max_score")
            .and_then(Value::as_f64)
    }
}

impl ResultParser for HitsResultParser {
    fn set_raw_results(&mut self, raw: Value) {
        self.raw = Some(raw);
    }

    fn raw_results(&self) -> Option<&Value> {
        self.raw.as_ref()
    }
}
