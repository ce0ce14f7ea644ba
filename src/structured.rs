//! JSON-LD script generation
//!
//! [`StructuredData`] picks one of three input modes, builds the node list
//! and serializes it as an `@graph` envelope inside a
//! `<script type="application/ld+json">` tag.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Value, json};

use crate::builder::NodeBuilder;
use crate::config::{GenerateOptions, SiteConfig};
use crate::error::{Error, Result};
use crate::fields::Fields;
use crate::node::Node;
use crate::schema_type::SchemaType;
use crate::strategy::NodeStrategy;
use crate::validate::Diagnostics;

const SCHEMA_CONTEXT: &str = "https://schema.org";

fn script_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</([sS][cC][rR][iI][pP][tT])").unwrap())
}

/// Output of [`StructuredData::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generated {
    /// The complete `<script type="application/ld+json">…</script>` tag
    pub script: String,

    /// Soft validation warnings, in the order they were raised
    pub warnings: Vec<String>,
}

impl fmt::Display for Generated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.script)
    }
}

/// JSON-LD generator.
///
/// Holds the site configuration and an optional alternate [`NodeStrategy`].
/// Generation takes `&self`, so one instance can serve many threads.
///
/// # Input modes
///
/// 1. `schemas` holds a non-empty array: every object element is taken as
///    a finished node and gets `inLanguage`. Typed objects are also
///    validated, but never re-normalized. Anything else is dropped with a
///    warning.
/// 2. A strategy is registered and `use_alternate` is set: the strategy
///    builds the node for `type`, falling back to the core builder when it
///    declines or fails.
/// 3. Otherwise the core [`NodeBuilder`] builds a node for `type`
///    (default Organization).
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use webpage_head::{GenerateOptions, SiteConfig, StructuredData};
///
/// let sd = StructuredData::new(SiteConfig::new().locale("en_US"));
/// let out = sd
///     .generate(
///         &json!({"type": "WebSite", "url": "https://example.com/", "name": "Example"}),
///         &GenerateOptions::default(),
///     )
///     .unwrap();
///
/// assert!(out.script.starts_with(r#"<script type="application/ld+json">"#));
/// assert!(out.script.contains(r#""@type": "WebSite""#));
/// assert!(out.warnings.is_empty());
/// ```
pub struct StructuredData {
    site: SiteConfig,
    strategy: Option<Box<dyn NodeStrategy>>,
}

impl fmt::Debug for StructuredData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredData")
            .field("site", &self.site)
            .field("strategy", &self.strategy.is_some())
            .finish()
    }
}

impl Default for StructuredData {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

impl StructuredData {
    /// Create a generator without an alternate strategy.
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            strategy: None,
        }
    }

    /// Register the alternate strategy, replacing any previous one.
    pub fn with_strategy(mut self, strategy: impl NodeStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// The site configuration.
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Whether an alternate strategy is registered.
    pub fn has_strategy(&self) -> bool {
        self.strategy.is_some()
    }

    /// Build the script tag for `data`.
    ///
    /// Fails only in [`OnInvalid::Error`](crate::OnInvalid::Error) mode or
    /// when serialization fails; every other problem ends up in
    /// [`Generated::warnings`].
    pub fn generate(&self, data: &Value, options: &GenerateOptions) -> Result<Generated> {
        let mut diag = Diagnostics::new();
        let nodes = self.build_graph(data, options, &mut diag)?;
        let script = render_script(&nodes)?;

        Ok(Generated {
            script,
            warnings: diag.into_messages(),
        })
    }

    /// Build the `@graph` node list without serializing it.
    pub fn build_graph(
        &self,
        data: &Value,
        options: &GenerateOptions,
        diag: &mut Diagnostics,
    ) -> Result<Vec<Node>> {
        let fields = Fields::from_value(data);
        let builder = NodeBuilder::new(&self.site)
            .on_invalid(options.on_invalid)
            .attach_language(options.attach_language);

        if let Some(Value::Array(schemas)) = fields.get("schemas")
            && !schemas.is_empty()
        {
            tracing::debug!(count = schemas.len(), "structured data: raw graph mode");
            return raw_graph(schemas, &builder, diag);
        }

        let ty = fields
            .str("type")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(SchemaType::parse)
            .unwrap_or_default();

        if options.use_alternate
            && let Some(strategy) = &self.strategy
        {
            tracing::debug!(schema_type = %ty, "structured data: alternate mode");
            match strategy.build_node(&ty, &fields, &self.site) {
                Ok(Some(mut node)) => {
                    builder.check(&mut node, diag)?;
                    return Ok(vec![node]);
                }
                Ok(None) => {
                    tracing::debug!(schema_type = %ty, "strategy declined, using core builder");
                }
                Err(err) => {
                    let message = format!("Alternate builder fallback: {err}");
                    tracing::warn!(%message, "structured data");
                    diag.push(message);
                }
            }
        }

        tracing::debug!(schema_type = %ty, "structured data: core mode");
        Ok(vec![builder.build(&ty, &fields, diag)?])
    }
}

fn raw_graph(schemas: &[Value], builder: &NodeBuilder<'_>, diag: &mut Diagnostics) -> Result<Vec<Node>> {
    let mut nodes = Vec::with_capacity(schemas.len());
    for (i, entry) in schemas.iter().enumerate() {
        let Value::Object(map) = entry else {
            let message = format!("schemas[{i}] is not an object, dropped");
            tracing::warn!(%message, "structured data");
            diag.push(message);
            continue;
        };

        let mut node = Node::from_map(map.clone());
        builder.check(&mut node, diag)?;
        nodes.push(node);
    }
    Ok(nodes)
}

/// Serialize `nodes` as a pretty-printed `@graph` envelope in a script tag.
fn render_script(nodes: &[Node]) -> Result<String> {
    let envelope = json!({
        "@context": SCHEMA_CONTEXT,
        "@graph": nodes,
    });

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    envelope.serialize(&mut ser)?;
    let payload = String::from_utf8(buf).map_err(|e| Error::Invalid(e.to_string()))?;
    let payload = script_close().replace_all(&payload, r"<\/$1");

    Ok(format!(r#"<script type="application/ld+json">{payload}</script>"#))
}
