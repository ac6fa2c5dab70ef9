//! Fragment trait and the registry fragments are looked up in.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::debug;

/// Key of the marker object that references a fragment by name.
pub const FRAGMENT_KEY: &str = "$fragment";

/// A reusable piece of query DSL.
pub trait Fragment {
    /// The DSL this fragment expands to. May itself contain fragment references.
    fn body(&self) -> Value;
}

impl Fragment for Value {
    fn body(&self) -> Value {
        self.clone()
    }
}

/// Build the marker that references the fragment registered under `name`.
pub fn fragment_ref(name: &str) -> Value {
    json!({ FRAGMENT_KEY: name })
}

/// Name of the fragment a value references, if the value is a marker.
///
/// Only an object whose single key is [`FRAGMENT_KEY`] with a string value
/// counts as a reference.
pub(crate) fn referenced_name(value: &Value) -> Option<&str> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.get(FRAGMENT_KEY)?.as_str()
}

/// Named fragment bodies available to every query of a searcher.
#[derive(Debug, Clone, Default)]
pub struct FragmentRegistry {
    fragments: HashMap<String, Value>,
}

impl FragmentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fragment, replacing any fragment with the same name.
    pub fn register(&mut self, name: impl Into<String>, fragment: impl Fragment) -> &mut Self {
        let name = name.into();
        debug!(fragment = %name, "Registered fragment");
        self.fragments.insert(name, fragment.body());
        self
    }

    /// Body of the fragment registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fragments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Registered fragment names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fragments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
