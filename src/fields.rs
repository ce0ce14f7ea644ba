//! Read-only view over caller-supplied input data

use std::sync::OnceLock;

use serde_json::{Map, Value};

fn empty_map() -> &'static Map<String, Value> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// Loosely-shaped input mapping for one structured-data request.
///
/// A key counts as *given* when it is present and not `null`. Empty strings
/// are still given: the fallback chains only skip missing keys, blank values
/// are dropped later when the node is written.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// View a JSON object.
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// View any JSON value; non-objects behave as an empty mapping.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Self { map: empty_map() },
        }
    }

    /// A given value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// The first given value among `keys`, in order.
    pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|k| self.get(k))
    }

    /// A given string value for `key`.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The given value for `key` as a list: arrays as-is, scalars and objects
    /// as a single element, missing keys as an empty list.
    pub fn list(&self, key: &str) -> Vec<&'a Value> {
        match self.get(key) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().collect(),
            Some(other) => vec![other],
        }
    }
}
