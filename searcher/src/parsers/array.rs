use serde_json::Value;

use super::ResultParser;

static NULL: Value = Value::Null;

/// Exposes the raw response as a plain JSON structure, untransformed.
#[derive(Debug, Clone, Default)]
pub struct ArrayResultParser {
    raw: Option<Value>,
}

impl ArrayResultParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole response. `Value::Null` before the query has run.
    pub fn results(&self) -> &Value {
        self.raw.as_ref().unwrap_or(&NULL)
    }

    /// Take ownership of the response.
    pub fn into_results(self) -> Value {
        self.raw.unwrap_or(Value::Null)
    }
}

impl ResultParser for ArrayResultParser {
    fn set_raw_results(&mut self, raw: Value) {
        self.raw = Some(raw);
    }

    fn raw_results(&self) -> Option<&Value> {
        self.raw.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_results_are_untouched() {
        let raw = json!({"took": 3, "hits": {"total": 0, "hits": []}});
        let mut parser = ArrayResultParser::new();
        assert!(parser.results().is_null());

        parser.set_raw_results(raw.clone());

        assert_eq!(parser.results(), &raw);
        assert_eq!(parser.raw_results(), Some(&raw));
        assert_eq!(parser.into_results(), raw);
    }
}
