use serde_json::{Map, Value};

use super::ResultParser;

/// Exposes the aggregations of a response.
#[derive(Debug, Clone, Default)]
pub struct AggregationsResultParser {
    raw: Option<Value>,
}

impl AggregationsResultParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregations(&self) -> Option<&Map<String, Value>> {
        self.raw.as_ref()?.get("aggregations")?.as_object()
    }

    pub fn aggregation(&self, name: &str) -> Option<&Value> {
        self.aggregations()?.get(name)
    }

    /// Buckets of a bucket aggregation. Empty for unknown or metric aggregations.
    pub fn buckets(&self, name: &str) -> &[Value] {
        self.aggregation(name)
            .and_then(|agg| agg.get("buckets"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl ResultParser for AggregationsResultParser {
    fn set_raw_results(&mut self, raw: Value) {
        self.raw = Some(raw);
    }

    fn raw_results(&self) -> Option<&Value> {
        self.raw.as_ref()
    }
}
