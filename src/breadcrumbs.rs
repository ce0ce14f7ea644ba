//! Breadcrumb trail: HTML navigation and JSON-LD list items

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::html::{escape, escape_attr};

/// One breadcrumb. The last crumb, or one without a URL, is the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Crumb {
    pub fn new(name: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            url: url.map(str::to_string),
        }
    }
}

/// Breadcrumb trail for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumbs {
    items: Vec<Crumb>,
}

impl Breadcrumbs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, url: Option<&str>) -> &mut Self {
        self.items.push(Crumb::new(name, url));
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    pub fn items(&self) -> &[Crumb] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the registered trail.
    pub fn render_trail(&self) -> String {
        Self::render(&self.items)
    }

    /// The registered trail as `{name, item}` objects for [`normalize_items`](Self::normalize_items).
    pub fn to_values(&self) -> Vec<Value> {
        self.items
            .iter()
            .map(|c| {
                let mut obj = Map::new();
                obj.insert("name".to_string(), Value::String(c.name.clone()));
                if let Some(url) = &c.url {
                    obj.insert("item".to_string(), Value::String(url.clone()));
                }
                Value::Object(obj)
            })
            .collect()
    }

    /// Normalize loose crumb objects to `{name, item, position}`.
    ///
    /// `item` falls back to `url`; `position` defaults to the 1-based index.
    /// Missing members are omitted. Non-object entries are skipped but still
    /// count towards the positions of later entries.
    pub fn normalize_items(items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let it = entry.as_object()?;
                let given = |key: &str| it.get(key).filter(|v| !v.is_null()).cloned();

                let mut out = Map::new();
                if let Some(name) = given("name") {
                    out.insert("name".to_string(), name);
                }
                if let Some(item) = given("item").or_else(|| given("url")) {
                    out.insert("item".to_string(), item);
                }
                let position = given("position").unwrap_or_else(|| Value::from(i as u64 + 1));
                out.insert("position".to_string(), position);
                Some(Value::Object(out))
            })
            .collect()
    }

    /// Render `<nav aria-label="breadcrumb">` with a Bootstrap-style list.
    pub fn render(items: &[Crumb]) -> String {
        let last = items.len().saturating_sub(1);
        let li: String = items
            .iter()
            .enumerate()
            .map(|(i, crumb)| {
                let name = escape(&crumb.name);
                match crumb.url.as_deref().filter(|u| !u.is_empty()) {
                    Some(url) if i != last => format!(
                        r#"<li class="breadcrumb-item"><a href="{}">{name}</a></li>"#,
                        escape_attr(url)
                    ),
                    _ => format!(r#"<li class="breadcrumb-item active" aria-current="page">{name}</li>"#),
                }
            })
            .collect();
        format!(r#"<nav aria-label="breadcrumb"><ol class="breadcrumb">{li}</ol></nav>"#)
    }
}
