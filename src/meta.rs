//! Page meta tags: title, description, canonical links, OpenGraph, Twitter
//! Card and icons

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::html::{Tag, escape, link, meta_name, meta_property};

const DEFAULT_OG_TYPE: &str = "website";
const DEFAULT_TWITTER_CARD: &str = "summary_large_image";
const DEFAULT_MASK_COLOR: &str = "#000000";

/// OpenGraph properties.
///
/// Unset properties are filled from the page values when rendering: `title`,
/// `site_name`, `description`, `url` (canonical, then the current URL) and
/// `locale` (the site locale).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenGraph {
    /// Object type, rendered as `website` when unset
    pub og_type: Option<String>,
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub locale: Option<String>,

    /// Additional `og:*` properties, rendered after the standard ones
    pub properties: Vec<(String, String)>,
}

impl OpenGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn og_type(mut self, og_type: impl Into<String>) -> Self {
        self.og_type = Some(og_type.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Add an extra property; `name` is given without the `og:` prefix.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }
}

/// Twitter Card properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterCard {
    /// Card type, rendered as `summary_large_image` when unset
    pub card: Option<String>,
    pub site: Option<String>,
    pub creator: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl TwitterCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(mut self, card: impl Into<String>) -> Self {
        self.card = Some(card.into());
        self
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// An icon link with optional `sizes` and `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconLink {
    pub href: String,
    pub sizes: Option<String>,
    pub mime_type: Option<String>,
}

impl IconLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

impl From<&str> for IconLink {
    fn from(href: &str) -> Self {
        Self::new(href)
    }
}

/// Favicon, touch icons, manifest, tiles and the Safari mask icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub favicon: Option<String>,
    pub apple_touch: Vec<IconLink>,
    pub icon: Vec<IconLink>,
    pub manifest: Option<String>,
    pub mask_icon: Option<String>,
    /// Rendered as `#000000` when unset
    pub mask_color: Option<String>,
    pub ms_tile_color: Option<String>,
    pub ms_tile_image: Option<String>,
}

impl Icons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favicon(mut self, href: impl Into<String>) -> Self {
        self.favicon = Some(href.into());
        self
    }

    pub fn apple_touch(mut self, icon: impl Into<IconLink>) -> Self {
        self.apple_touch.push(icon.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<IconLink>) -> Self {
        self.icon.push(icon.into());
        self
    }

    pub fn manifest(mut self, href: impl Into<String>) -> Self {
        self.manifest = Some(href.into());
        self
    }

    pub fn mask_icon(mut self, href: impl Into<String>, color: Option<&str>) -> Self {
        self.mask_icon = Some(href.into());
        self.mask_color = color.map(str::to_string);
        self
    }

    pub fn ms_tile(mut self, color: Option<&str>, image: Option<&str>) -> Self {
        self.ms_tile_color = color.map(str::to_string);
        self.ms_tile_image = image.map(str::to_string);
        self
    }

    fn render(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut push = |html: String| {
            if !out.contains(&html) {
                out.push(html);
            }
        };

        if let Some(href) = non_empty(&self.favicon) {
            push(link("icon", href));
        }
        for icon in self.apple_touch.iter().filter(|i| !i.href.is_empty()) {
            push(
                Tag::new("link")
                    .attr("rel", "apple-touch-icon")
                    .attr("href", &icon.href)
                    .attr_opt("sizes", icon.sizes.as_deref())
                    .finish(),
            );
        }
        for icon in self.icon.iter().filter(|i| !i.href.is_empty()) {
            push(
                Tag::new("link")
                    .attr("rel", "icon")
                    .attr("href", &icon.href)
                    .attr_opt("type", icon.mime_type.as_deref())
                    .attr_opt("sizes", icon.sizes.as_deref())
                    .finish(),
            );
        }
        if let Some(href) = non_empty(&self.manifest) {
            push(link("manifest", href));
        }
        if let Some(color) = non_empty(&self.ms_tile_color) {
            push(meta_name("msapplication-TileColor", color));
        }
        if let Some(image) = non_empty(&self.ms_tile_image) {
            push(meta_name("msapplication-TileImage", image));
        }
        if let Some(href) = non_empty(&self.mask_icon) {
            let color = non_empty(&self.mask_color).unwrap_or(DEFAULT_MASK_COLOR);
            push(
                Tag::new("link")
                    .attr("rel", "mask-icon")
                    .attr("href", href)
                    .attr("color", color)
                    .finish(),
            );
        }

        out
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Per-page meta tag registry.
///
/// # Example
///
/// ```
/// use webpage_head::{MetaTags, OpenGraph, SiteConfig};
///
/// let site = SiteConfig::new().locale("en_US").site_name("Example");
/// let mut meta = MetaTags::new();
/// meta.title("About", None)
///     .description("Who we are")
///     .og(OpenGraph::new().image("https://example.com/og.png"));
///
/// let html = meta.render(&site, Some("https://example.com/about"));
/// assert!(html.starts_with("<title>About | Example</title>"));
/// assert!(html.contains(r#"<meta property="og:url" content="https://example.com/about">"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaTags {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub og: OpenGraph,
    pub twitter: TwitterCard,
    pub icons: Icons,
}

impl MetaTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title and, optionally, the site name shown after it.
    pub fn title(&mut self, title: impl Into<String>, site_name: Option<&str>) -> &mut Self {
        self.title = Some(title.into());
        if let Some(site_name) = site_name {
            self.site_name = Some(site_name.to_string());
        }
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn keywords(&mut self, keywords: impl Into<String>) -> &mut Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn robots(&mut self, robots: impl Into<String>) -> &mut Self {
        self.robots = Some(robots.into());
        self
    }

    pub fn canonical(&mut self, canonical: impl Into<String>) -> &mut Self {
        self.canonical = Some(canonical.into());
        self
    }

    pub fn prev(&mut self, prev: impl Into<String>) -> &mut Self {
        self.prev = Some(prev.into());
        self
    }

    pub fn next(&mut self, next: impl Into<String>) -> &mut Self {
        self.next = Some(next.into());
        self
    }

    /// Replace the OpenGraph properties.
    pub fn og(&mut self, og: OpenGraph) -> &mut Self {
        self.og = og;
        self
    }

    /// Replace the Twitter Card properties.
    pub fn twitter(&mut self, twitter: TwitterCard) -> &mut Self {
        self.twitter = twitter;
        self
    }

    /// Replace the icon set.
    pub fn icons(&mut self, icons: Icons) -> &mut Self {
        self.icons = icons;
        self
    }

    /// Render every tag, one per line.
    ///
    /// `site` supplies the fallback site name and the `og:locale`;
    /// `current_url` is the last fallback for `og:url`.
    pub fn render(&self, site: &SiteConfig, current_url: Option<&str>) -> String {
        let mut out = Vec::new();

        let site_name = self.site_name.as_deref().or(site.site_name.as_deref());
        let title = self.title.as_deref().or(site_name);

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            match site_name.filter(|s| !s.is_empty() && *s != title) {
                Some(site_name) => {
                    let full = format!("{title} | {site_name}");
                    out.push(format!("<title>{}</title>", escape(full.trim())));
                }
                None => out.push(format!("<title>{}</title>", escape(title))),
            }
        }

        for (name, value) in [
            ("description", &self.description),
            ("keywords", &self.keywords),
            ("robots", &self.robots),
        ] {
            if let Some(value) = non_empty(value) {
                out.push(meta_name(name, value));
            }
        }

        for (rel, value) in [
            ("canonical", &self.canonical),
            ("prev", &self.prev),
            ("next", &self.next),
        ] {
            if let Some(href) = non_empty(value) {
                out.push(link(rel, href));
            }
        }

        let locale = site.language_tag();
        let og = &self.og;
        let og_props = [
            ("type", og.og_type.as_deref().or(Some(DEFAULT_OG_TYPE))),
            ("title", og.title.as_deref().or(self.title.as_deref())),
            ("site_name", og.site_name.as_deref().or(site_name)),
            (
                "url",
                og.url
                    .as_deref()
                    .or(self.canonical.as_deref())
                    .or(current_url),
            ),
            ("image", og.image.as_deref()),
            ("description", og.description.as_deref().or(self.description.as_deref())),
            ("locale", og.locale.as_deref().or(Some(locale.as_str()))),
        ];
        for (prop, value) in og_props {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                out.push(meta_property(&format!("og:{prop}"), value));
            }
        }
        for (prop, value) in &og.properties {
            if !value.is_empty() {
                out.push(meta_property(&format!("og:{prop}"), value));
            }
        }

        let tw = &self.twitter;
        let tw_props = [
            ("card", tw.card.as_deref().or(Some(DEFAULT_TWITTER_CARD))),
            ("site", tw.site.as_deref()),
            ("creator", tw.creator.as_deref()),
            ("title", tw.title.as_deref().or(self.title.as_deref()).or(site_name)),
            ("description", tw.description.as_deref().or(self.description.as_deref())),
            ("image", tw.image.as_deref().or(og.image.as_deref())),
        ];
        for (prop, value) in tw_props {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                out.push(meta_name(&format!("twitter:{prop}"), value));
            }
        }

        out.extend(self.icons.render());

        out.join("\n")
    }
}

/// Canonical form of `current`.
///
/// Drops the fragment, strips a leading `www.` from the host and keeps only
/// the query parameters named in `preserve_query_params`, in their original
/// order.
///
/// ```
/// use webpage_head::canonical_url;
///
/// let url = canonical_url("https://www.example.com/shop?page=2&utm_source=x#top", &["page"]).unwrap();
/// assert_eq!(url, "https://example.com/shop?page=2");
/// ```
pub fn canonical_url(current: &str, preserve_query_params: &[&str]) -> Result<String> {
    let mut url = Url::parse(current.trim())?;

    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(format!("{current}: missing host")))?
        .to_string();
    if let Some(bare) = host.strip_prefix("www.") {
        url.set_host(Some(bare))?;
    }
    url.set_fragment(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| preserve_query_params.iter().any(|p| k == p))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&kept);
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::new().locale("en_US").site_name("Example")
    }

    #[test]
    fn test_title_with_site_name() {
        let mut meta = MetaTags::new();
        meta.title("Home", None);
        assert_eq!(
            meta.render(&site(), None).lines().next(),
            Some("<title>Home | Example</title>")
        );

        meta.title("Example", None);
        assert_eq!(
            meta.render(&site(), None).lines().next(),
            Some("<title>Example</title>")
        );

        meta.title("Shop", Some("Store & Co"));
        assert_eq!(
            meta.render(&site(), None).lines().next(),
            Some("<title>Shop | Store &amp; Co</title>")
        );
    }

    #[test]
    fn test_title_falls_back_to_site_name() {
        let html = MetaTags::new().render(&site(), None);
        assert_eq!(html.lines().next(), Some("<title>Example</title>"));
    }

    #[test]
    fn test_render_order_and_fallbacks() {
        let mut meta = MetaTags::new();
        meta.title("Post", None)
            .description("About <things>")
            .robots("index,follow")
            .canonical("https://e.com/post")
            .next("https://e.com/post?page=2")
            .og(OpenGraph::new().image("https://e.com/og.png"))
            .twitter(TwitterCard::new().site("@example"));

        let html = meta.render(&site(), Some("https://e.com/post?utm=1"));
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(
            lines,
            vec![
                "<title>Post | Example</title>",
                r#"<meta name="description" content="About &lt;things&gt;">"#,
                r#"<meta name="robots" content="index,follow">"#,
                r#"<link rel="canonical" href="https://e.com/post">"#,
                r#"<link rel="next" href="https://e.com/post?page=2">"#,
                r#"<meta property="og:type" content="website">"#,
                r#"<meta property="og:title" content="Post">"#,
                r#"<meta property="og:site_name" content="Example">"#,
                r#"<meta property="og:url" content="https://e.com/post">"#,
                r#"<meta property="og:image" content="https://e.com/og.png">"#,
                r#"<meta property="og:description" content="About &lt;things&gt;">"#,
                r#"<meta property="og:locale" content="en-US">"#,
                r#"<meta name="twitter:card" content="summary_large_image">"#,
                r#"<meta name="twitter:site" content="@example">"#,
                r#"<meta name="twitter:title" content="Post">"#,
                r#"<meta name="twitter:description" content="About &lt;things&gt;">"#,
                r#"<meta name="twitter:image" content="https://e.com/og.png">"#,
            ]
        );
    }

    #[test]
    fn test_og_url_uses_current_url() {
        let html = MetaTags::new().render(&site(), Some("https://e.com/x"));
        assert!(html.contains(r#"<meta property="og:url" content="https://e.com/x">"#));
    }

    #[test]
    fn test_icons_dedup_and_defaults() {
        let icons = Icons::new()
            .favicon("/favicon.ico")
            .icon("/favicon.ico")
            .icon(IconLink::new("/32.png").sizes("32x32").mime_type("image/png"))
            .apple_touch("/apple.png")
            .apple_touch(IconLink::new("/apple-180.png").sizes("180x180"))
            .manifest("/site.webmanifest")
            .ms_tile(Some("#ffffff"), None)
            .mask_icon("/mask.svg", None);

        assert_eq!(
            icons.render(),
            vec![
                r#"<link rel="icon" href="/favicon.ico">"#.to_string(),
                r#"<link rel="apple-touch-icon" href="/apple.png">"#.to_string(),
                r#"<link rel="apple-touch-icon" href="/apple-180.png" sizes="180x180">"#.to_string(),
                r#"<link rel="icon" href="/32.png" type="image/png" sizes="32x32">"#.to_string(),
                r#"<link rel="manifest" href="/site.webmanifest">"#.to_string(),
                r##"<meta name="msapplication-TileColor" content="#ffffff">"##.to_string(),
                r##"<link rel="mask-icon" href="/mask.svg" color="#000000">"##.to_string(),
            ]
        );
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(
            canonical_url("https://www.e.com/a/b?x=1&page=3&y=2#frag", &["page", "x"]).unwrap(),
            "https://e.com/a/b?x=1&page=3"
        );
        assert_eq!(canonical_url("http://e.com/a?q=1", &[]).unwrap(), "http://e.com/a");
        assert!(canonical_url("not a url", &[]).is_err());
        assert!(matches!(
            canonical_url("mailto:someone@e.com", &[]),
            Err(Error::InvalidUrl(_))
        ));
    }
}
