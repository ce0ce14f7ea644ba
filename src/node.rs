//! JSON-LD node representation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema_type::SchemaType;

/// Whether a value counts as "not given" for a JSON-LD property.
///
/// `null`, strings that are empty after trimming, empty arrays and empty
/// objects are blank. Numbers and booleans never are.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// A single JSON-LD node, e.g. `{"@type": "Product", "name": "Widget"}`.
///
/// Properties keep their insertion order when serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node {
    properties: Map<String, Value>,
}

impl Node {
    /// Create a node carrying only `@type`.
    pub fn new(schema_type: &SchemaType) -> Self {
        let mut properties = Map::new();
        properties.insert("@type".to_string(), Value::String(schema_type.to_string()));
        Self { properties }
    }

    /// Wrap an already-assembled JSON object.
    pub fn from_map(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    /// The `@type` of the node, if it has a usable one.
    ///
    /// For multi-typed nodes (`"@type": ["Article", "BlogPosting"]`) the first
    /// type wins.
    pub fn type_name(&self) -> Option<&str> {
        match self.properties.get("@type")? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(arr) => arr.first().and_then(Value::as_str),
            _ => None,
        }
    }

    /// Get a property value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Get a property value as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set a property, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    /// Remove a property, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.shift_remove(key)
    }

    /// Property names in output order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Convert into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.properties)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.into_value()
    }
}

/// Incremental node construction that never emits blank values.
pub(crate) struct NodeWriter {
    node: Node,
}

impl NodeWriter {
    pub(crate) fn new(schema_type: &SchemaType) -> Self {
        Self {
            node: Node::new(schema_type),
        }
    }

    /// Add `prop` unless the value is missing or blank.
    pub(crate) fn add(&mut self, prop: &str, value: Option<Value>) -> &mut Self {
        if let Some(value) = value
            && !is_blank(&value)
        {
            self.node.insert(prop, value);
        }
        self
    }

    pub(crate) fn finish(self) -> Node {
        self.node
    }
}
