//! Per-page `<head>` aggregate

use serde_json::{Value, json};

use crate::assets::Assets;
use crate::breadcrumbs::Breadcrumbs;
use crate::config::{GenerateOptions, SiteConfig};
use crate::error::Result;
use crate::hreflang::Hreflang;
use crate::meta::MetaTags;
use crate::structured::StructuredData;
use crate::validate::Diagnostics;

/// Everything one page contributes to its `<head>` and the end of `<body>`.
///
/// Warnings from [`structured`](Self::structured) accumulate in a buffer
/// owned by this instance until [`pull_errors`](Self::pull_errors) drains it.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use webpage_head::{GenerateOptions, SeoHead, SiteConfig};
///
/// let mut head = SeoHead::new(SiteConfig::new().site_name("Example"));
/// head.meta_mut().title("Contact", None);
/// head.assets_mut().stylesheet("/app.css", None);
///
/// let script = head
///     .structured(&json!({"type": "Organization", "url": "bad url"}), &GenerateOptions::default())
///     .unwrap();
///
/// assert!(script.contains(r#""name": "Example""#));
/// assert_eq!(head.pull_errors(), vec!["url must be a valid URL".to_string()]);
/// assert!(head.pull_errors().is_empty());
/// assert!(head.render_head(None).starts_with("<title>Contact | Example</title>"));
/// ```
#[derive(Debug, Default)]
pub struct SeoHead {
    structured: StructuredData,
    meta: MetaTags,
    assets: Assets,
    breadcrumbs: Breadcrumbs,
    hreflang: Hreflang,
    errors: Diagnostics,
}

impl SeoHead {
    pub fn new(site: SiteConfig) -> Self {
        Self::with_structured_data(StructuredData::new(site))
    }

    /// Use a preconfigured generator, e.g. one with a registered strategy.
    pub fn with_structured_data(structured: StructuredData) -> Self {
        Self {
            structured,
            meta: MetaTags::default(),
            assets: Assets::default(),
            breadcrumbs: Breadcrumbs::default(),
            hreflang: Hreflang::default(),
            errors: Diagnostics::default(),
        }
    }

    pub fn site(&self) -> &SiteConfig {
        self.structured.site()
    }

    pub fn structured_data(&self) -> &StructuredData {
        &self.structured
    }

    pub fn meta(&self) -> &MetaTags {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaTags {
        &mut self.meta
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    pub fn breadcrumbs(&self) -> &Breadcrumbs {
        &self.breadcrumbs
    }

    pub fn breadcrumbs_mut(&mut self) -> &mut Breadcrumbs {
        &mut self.breadcrumbs
    }

    pub fn hreflang(&self) -> &Hreflang {
        &self.hreflang
    }

    pub fn hreflang_mut(&mut self) -> &mut Hreflang {
        &mut self.hreflang
    }

    /// Generate a JSON-LD script tag, keeping its warnings in the buffer.
    pub fn structured(&mut self, data: &Value, options: &GenerateOptions) -> Result<String> {
        let generated = self.structured.generate(data, options)?;
        self.errors.extend(generated.warnings);
        Ok(generated.script)
    }

    /// BreadcrumbList JSON-LD for loose crumb objects, or for the registered
    /// trail when `items` is empty.
    pub fn breadcrumb_json_ld(&mut self, items: &[Value], options: &GenerateOptions) -> Result<String> {
        let items = if items.is_empty() {
            Breadcrumbs::normalize_items(&self.breadcrumbs.to_values())
        } else {
            Breadcrumbs::normalize_items(items)
        };
        let data = json!({"type": "BreadcrumbList", "items": items});
        self.structured(&data, options)
    }

    /// Return every buffered warning and clear the buffer.
    pub fn pull_errors(&mut self) -> Vec<String> {
        self.errors.pull()
    }

    /// Meta tags, head assets and hreflang alternates, newline-separated.
    /// Empty fragments are left out.
    pub fn render_head(&self, current_url: Option<&str>) -> String {
        [
            self.meta.render(self.site(), current_url),
            self.assets.render_head_links(),
            self.hreflang.render(),
        ]
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }

    /// Scripts for the end of `<body>`.
    pub fn render_body_end(&self) -> String {
        self.assets.render_body_scripts()
    }
}
