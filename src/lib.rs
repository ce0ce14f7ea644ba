//! # webpage-head
//!
//! Build everything a web page puts in its `<head>`: meta tags, OpenGraph and
//! Twitter Card properties, icons, asset hints, hreflang alternates,
//! breadcrumbs and validated Schema.org JSON-LD.
//!
//! ## Features
//!
//! - JSON-LD for 25 schema.org types from loosely-shaped JSON input
//! - Required-property, URL, date and duration validation with a strict
//!   (`Error`) or lenient (`Skip`) policy
//! - Raw `@graph` mode for hand-assembled nodes
//! - Pluggable alternate node builder ([`NodeStrategy`])
//! - Meta, asset, breadcrumb and hreflang renderers with HTML escaping
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use webpage_head::{GenerateOptions, SiteConfig, StructuredData};
//!
//! let sd = StructuredData::new(SiteConfig::new().locale("en_US"));
//! let out = sd
//!     .generate(
//!         &json!({
//!             "type": "Product",
//!             "name": "Widget",
//!             "offers": [{"price": "10", "priceCurrency": "USD"}]
//!         }),
//!         &GenerateOptions::default(),
//!     )
//!     .unwrap();
//!
//! assert!(out.script.contains(r#""priceCurrency": "USD""#));
//! assert!(out.warnings.is_empty());
//! ```
//!
//! ## Strict Validation
//!
//! ```rust
//! use serde_json::json;
//! use webpage_head::{Error, GenerateOptions, OnInvalid, SiteConfig, StructuredData};
//!
//! let sd = StructuredData::new(SiteConfig::new());
//! let options = GenerateOptions::new().on_invalid(OnInvalid::Error);
//!
//! let err = sd.generate(&json!({"type": "Event", "name": "Fair"}), &options).unwrap_err();
//! assert!(matches!(err, Error::Invalid(_)));
//! ```
//!
//! ## A Whole Head
//!
//! ```rust
//! use serde_json::json;
//! use webpage_head::{GenerateOptions, OpenGraph, SeoHead, SiteConfig};
//!
//! let mut head = SeoHead::new(SiteConfig::new().locale("en_GB").site_name("Example"));
//! head.meta_mut()
//!     .title("Blog", None)
//!     .canonical("https://example.com/blog")
//!     .og(OpenGraph::new().og_type("blog"));
//! head.assets_mut().lazy_stylesheet("/blog.css");
//! head.hreflang_mut().add_alternate("https://example.com/pl/blog", "pl");
//!
//! let html = head.render_head(None);
//! assert!(html.contains(r#"<meta property="og:type" content="blog">"#));
//!
//! let json_ld = head
//!     .structured(&json!({"type": "WebSite", "url": "https://example.com/"}), &GenerateOptions::default())
//!     .unwrap();
//! assert!(json_ld.contains(r#""inLanguage": "en-GB""#));
//! assert!(head.pull_errors().is_empty());
//! ```

pub mod format;

mod assets;
mod breadcrumbs;
mod builder;
mod config;
mod error;
mod fields;
mod head;
mod hreflang;
mod html;
mod input;
mod meta;
mod node;
mod normalize;
mod schema_type;
mod strategy;
mod structured;
mod validate;

pub use assets::{Assets, HeadLink, ScriptTag};
pub use breadcrumbs::{Breadcrumbs, Crumb};
pub use builder::NodeBuilder;
pub use config::{DEFAULT_LANGUAGE, GenerateOptions, SiteConfig};
pub use error::{Error, Result, StrategyError};
pub use fields::Fields;
pub use head::SeoHead;
pub use hreflang::{Alternate, Hreflang, X_DEFAULT};
pub use html::{escape, escape_attr};
pub use meta::{IconLink, Icons, MetaTags, OpenGraph, TwitterCard, canonical_url};
pub use node::{Node, is_blank};
pub use schema_type::SchemaType;
pub use strategy::{NodeStrategy, TypedSchemaBuilder};
pub use structured::{Generated, StructuredData};
pub use validate::{DATE_PROPERTIES, Diagnostics, OnInvalid, URL_PROPERTIES};
