//! Typed fragments for the most common query DSL leaves.

use serde_json::{json, Map, Value};

use super::registry::Fragment;

/// `{"term": {field: value}}`
#[derive(Debug, Clone)]
pub struct Term {
    field: String,
    value: Value,
}

impl Term {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Fragment for Term {
    fn body(&self) -> Value {
        json!({ "term": { self.field.as_str(): self.value } })
    }
}

/// `{"terms": {field: [values]}}`
#[derive(Debug, Clone)]
pub struct Terms {
    field: String,
    values: Vec<Value>,
}

impl Terms {
    pub fn new<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Fragment for Terms {
    fn body(&self) -> Value {
        json!({ "terms": { self.field.as_str(): self.values } })
    }
}

/// `{"match": {field: query}}`
#[derive(Debug, Clone)]
pub struct Match {
    field: String,
    query: Value,
}

impl Match {
    pub fn new(field: impl Into<String>, query: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
        }
    }
}

impl Fragment for Match {
    fn body(&self) -> Value {
        json!({ "match": { self.field.as_str(): self.query } })
    }
}

/// `{"range": {field: {gt, gte, lt, lte}}}` with only the bounds that were set.
#[derive(Debug, Clone, Default)]
pub struct Range {
    field: String,
    bounds: Map<String, Value>,
}

impl Range {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: Map::new(),
        }
    }

    pub fn gt(self, value: impl Into<Value>) -> Self {
        self.bound("gt", value)
    }

    pub fn gte(self, value: impl Into<Value>) -> Self {
        self.bound("gte", value)
    }

    pub fn lt(self, value: impl Into<Value>) -> Self {
        self.bound("lt", value)
    }

    pub fn lte(self, value: impl Into<Value>) -> Self {
        self.bound("lte", value)
    }

    fn bound(mut self, op: &str, value: impl Into<Value>) -> Self {
        self.bounds.insert(op.to_string(), value.into());
        self
    }
}

impl Fragment for Range {
    fn body(&self) -> Value {
        json!({ "range": { self.field.as_str(): self.bounds } })
    }
}

/// `{"ids": {"values": [...]}}`
#[derive(Debug, Clone)]
pub struct Ids {
    values: Vec<String>,
}

impl Ids {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Fragment for Ids {
    fn body(&self) -> Value {
        json!({ "ids": { "values": self.values } })
    }
}

/// `{"exists": {"field": field}}`
#[derive(Debug, Clone)]
pub struct Exists {
    field: String,
}

impl Exists {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Fragment for Exists {
    fn body(&self) -> Value {
        json!({ "exists": { "field": self.field } })
    }
}

/// Boolean combination of clauses.
///
/// Clauses are plain values, so they can be other fragments' bodies or
/// fragment references that get expanded at assembly time. Empty clause
/// lists are left out of the generated DSL.
#[derive(Debug, Clone, Default)]
pub struct Bool {
    must: Vec<Value>,
    should: Vec<Value>,
    filter: Vec<Value>,
    must_not: Vec<Value>,
    minimum_should_match: Option<u32>,
}

impl Bool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, clause: impl Into<Value>) -> Self {
        self.must.push(clause.into());
        self
    }

    pub fn should(mut self, clause: impl Into<Value>) -> Self {
        self.should.push(clause.into());
        self
    }

    pub fn filter(mut self, clause: impl Into<Value>) -> Self {
        self.filter.push(clause.into());
        self
    }

    pub fn must_not(mut self, clause: impl Into<Value>) -> Self {
        self.must_not.push(clause.into());
        self
    }

    pub fn minimum_should_match(mut self, count: u32) -> Self {
        self.minimum_should_match = Some(count);
        self
    }
}

impl Fragment for Bool {
    fn body(&self) -> Value {
        let mut clauses = Map::new();
        for (occur, values) in [
            ("must", &self.must),
            ("should", &self.should),
            ("filter", &self.filter),
            ("must_not", &self.must_not),
        ] {
            if !values.is_empty() {
                clauses.insert(occur.to_string(), Value::Array(values.clone()));
            }
        }
        if let Some(count) = self.minimum_should_match {
            clauses.insert("minimum_should_match".to_string(), json!(count));
        }

        json!({ "bool": clauses })
    }
}
