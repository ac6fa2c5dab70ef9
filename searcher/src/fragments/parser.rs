//! Fragment expansion.

use serde_json::{Map, Value};

use super::registry::{referenced_name, FragmentRegistry};
use crate::SearcherError;

/// Replaces fragment references in a body with the registered fragment bodies.
///
/// References are resolved at any depth inside objects and arrays, and the
/// substituted bodies are expanded in turn, so fragments may be built from
/// other fragments. A fragment that ends up referencing itself is reported as
/// [`SearcherError::CircularFragment`].
pub struct FragmentParser<'a> {
    registry: &'a FragmentRegistry,
}

impl<'a> FragmentParser<'a> {
    pub fn new(registry: &'a FragmentRegistry) -> Self {
        Self { registry }
    }

    /// Expand every fragment reference in `body`.
    pub fn parse(&self, body: &Value) -> Result<Value, SearcherError> {
        let mut expanding = Vec::new();
        self.resolve(body, &mut expanding)
    }

    fn resolve<'v>(
        &'v self,
        value: &'v Value,
        expanding: &mut Vec<&'v str>,
    ) -> Result<Value, SearcherError> {
        if let Some(name) = referenced_name(value) {
            if expanding.contains(&name) {
                return Err(SearcherError::CircularFragment(name.to_string()));
            }

            let fragment = self
                .registry
                .get(name)
                .ok_or_else(|| SearcherError::unknown_fragment(name))?;

            expanding.push(name);
            let resolved = self.resolve(fragment, expanding);
            expanding.pop();
            return resolved;
        }

        match value {
            Value::Object(map) => {
                let mut resolved = Map::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), self.resolve(child, expanding)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item, expanding))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }
}
