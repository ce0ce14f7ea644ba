//! Stylesheet, resource hint and script registry

use serde::{Deserialize, Serialize};

use crate::html::{Tag, link};

/// One `<link>` registered in the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadLink {
    /// `rel` plus optional `as`, `crossorigin` and `media`
    Link {
        rel: String,
        href: String,
        #[serde(default)]
        as_type: Option<String>,
        #[serde(default)]
        crossorigin: Option<String>,
        #[serde(default)]
        media: Option<String>,
    },
    /// Non-blocking stylesheet with a `<noscript>` fallback
    LazyStylesheet { href: String },
}

impl HeadLink {
    fn render(&self) -> String {
        match self {
            Self::Link {
                rel,
                href,
                as_type,
                crossorigin,
                media,
            } => Tag::new("link")
                .attr("rel", rel)
                .attr("href", href)
                .attr_opt("as", as_type.as_deref())
                .attr_opt("crossorigin", crossorigin.as_deref())
                .attr_opt("media", media.as_deref())
                .finish(),
            Self::LazyStylesheet { href } => {
                let deferred = Tag::new("link")
                    .attr("rel", "stylesheet")
                    .attr("href", href)
                    .attr("type", "text/css")
                    .attr("media", "none")
                    .attr("onload", "if(media!='all')media='all'")
                    .finish();
                let hint = Tag::new("link")
                    .attr("rel", "preload")
                    .attr("href", href)
                    .attr("as", "style")
                    .finish();
                let fallback = format!("<noscript>{}</noscript>", link("stylesheet", href));
                [deferred, hint, fallback].join("\n")
            }
        }
    }
}

/// A body script with its loading flags and extra attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub src: String,
    pub defer: bool,
    pub is_async: bool,
    /// Extra attributes, rendered in insertion order
    #[serde(default)]
    pub attrs: Vec<(String, String)>,
}

impl ScriptTag {
    fn render(&self) -> String {
        let tag = self
            .attrs
            .iter()
            .fold(
                Tag::new("script")
                    .attr("src", &self.src)
                    .flag("defer", self.defer)
                    .flag("async", self.is_async),
                |tag, (k, v)| tag.attr(k, v),
            )
            .finish();
        format!("{tag}</script>")
    }
}

/// Asset registry for one page.
///
/// Head links render in registration order, followed by a single `<style>`
/// block; body scripts render in registration order, followed by a single
/// inline `<script>` block.
///
/// # Example
///
/// ```
/// use webpage_head::Assets;
///
/// let mut assets = Assets::new();
/// assets
///     .preload("/fonts/inter.woff2", "font", Some("anonymous"))
///     .stylesheet("/app.css", None)
///     .script("/app.js", true, false, &[]);
///
/// assert_eq!(
///     assets.render_head_links(),
///     "<link rel=\"preload\" href=\"/fonts/inter.woff2\" as=\"font\" crossorigin=\"anonymous\">\n\
///      <link rel=\"stylesheet\" href=\"/app.css\">"
/// );
/// assert_eq!(assets.render_body_scripts(), "<script src=\"/app.js\" defer></script>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    head_links: Vec<HeadLink>,
    scripts: Vec<ScriptTag>,
    inline_css: Vec<String>,
    inline_js: Vec<String>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_link(&mut self, rel: &str, href: &str) -> &mut Self {
        self.head_links.push(HeadLink::Link {
            rel: rel.to_string(),
            href: href.to_string(),
            as_type: None,
            crossorigin: None,
            media: None,
        });
        self
    }

    /// Register a stylesheet, optionally for a media query.
    pub fn stylesheet(&mut self, href: &str, media: Option<&str>) -> &mut Self {
        self.head_links.push(HeadLink::Link {
            rel: "stylesheet".to_string(),
            href: href.to_string(),
            as_type: None,
            crossorigin: None,
            media: media.map(str::to_string),
        });
        self
    }

    /// Register a stylesheet that loads without blocking rendering.
    pub fn lazy_stylesheet(&mut self, href: &str) -> &mut Self {
        self.head_links.push(HeadLink::LazyStylesheet {
            href: href.to_string(),
        });
        self
    }

    /// Register a `preload` hint.
    pub fn preload(&mut self, href: &str, as_type: &str, crossorigin: Option<&str>) -> &mut Self {
        self.head_links.push(HeadLink::Link {
            rel: "preload".to_string(),
            href: href.to_string(),
            as_type: Some(as_type.to_string()),
            crossorigin: crossorigin.map(str::to_string),
            media: None,
        });
        self
    }

    pub fn prefetch(&mut self, href: &str) -> &mut Self {
        self.push_link("prefetch", href)
    }

    pub fn dns_prefetch(&mut self, host: &str) -> &mut Self {
        self.push_link("dns-prefetch", host)
    }

    /// Register a body script.
    pub fn script(&mut self, src: &str, defer: bool, is_async: bool, attrs: &[(&str, &str)]) -> &mut Self {
        self.scripts.push(ScriptTag {
            src: src.to_string(),
            defer,
            is_async,
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        self
    }

    /// Append CSS to the inline `<style>` block. Input is trimmed.
    pub fn inline_css(&mut self, css: &str) -> &mut Self {
        self.inline_css.push(css.trim().to_string());
        self
    }

    /// Append JavaScript to the inline `<script>` block. Input is trimmed.
    pub fn inline_js(&mut self, js: &str) -> &mut Self {
        self.inline_js.push(js.trim().to_string());
        self
    }

    pub fn head_links(&self) -> &[HeadLink] {
        &self.head_links
    }

    pub fn scripts(&self) -> &[ScriptTag] {
        &self.scripts
    }

    pub fn render_head_links(&self) -> String {
        let mut out: Vec<String> = self.head_links.iter().map(HeadLink::render).collect();
        if !self.inline_css.is_empty() {
            out.push(format!("<style>\n{}\n</style>", self.inline_css.join("\n")));
        }
        out.join("\n")
    }

    pub fn render_body_scripts(&self) -> String {
        let mut out: Vec<String> = self.scripts.iter().map(ScriptTag::render).collect();
        if !self.inline_js.is_empty() {
            out.push(format!("<script>\n{}\n</script>", self.inline_js.join("\n")));
        }
        out.join("\n")
    }
}
