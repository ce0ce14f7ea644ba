//! HTML escaping and tag writing for head fragments

use std::borrow::Cow;

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Borrows the input when nothing needs escaping.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape an attribute value. Same character set as [`escape`].
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Writes a single start tag: `<link rel="x" href="y">`.
///
/// Attribute values are escaped; `None` and empty values are skipped.
#[derive(Debug, Clone)]
pub(crate) struct Tag {
    html: String,
}

impl Tag {
    pub(crate) fn new(name: &str) -> Self {
        let mut html = String::with_capacity(64);
        html.push('<');
        html.push_str(name);
        Self { html }
    }

    /// Add `name="value"`, always written even when empty.
    pub(crate) fn attr(mut self, name: &str, value: &str) -> Self {
        self.html.push(' ');
        self.html.push_str(&escape_attr(name));
        self.html.push_str("=\"");
        self.html.push_str(&escape_attr(value));
        self.html.push('"');
        self
    }

    /// Add `name="value"` when the value is present and non-empty.
    pub(crate) fn attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Add a boolean attribute such as `defer`.
    pub(crate) fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.html.push(' ');
            self.html.push_str(name);
        }
        self
    }

    /// Close the start tag.
    pub(crate) fn finish(mut self) -> String {
        self.html.push('>');
        self.html
    }
}

/// `<meta name="..." content="...">`
pub(crate) fn meta_name(name: &str, content: &str) -> String {
    Tag::new("meta").attr("name", name).attr("content", content).finish()
}

/// `<meta property="..." content="...">`
pub(crate) fn meta_property(property: &str, content: &str) -> String {
    Tag::new("meta")
        .attr("property", property)
        .attr("content", content)
        .finish()
}

/// `<link rel="..." href="...">`
pub(crate) fn link(rel: &str, href: &str) -> String {
    Tag::new("link").attr("rel", rel).attr("href", href).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert!(matches!(escape("hello world"), Cow::Borrowed(_)));
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_attr("it's"), "it&#39;s");
    }

    #[test]
    fn test_tag_writer() {
        let html = Tag::new("link")
            .attr("rel", "preload")
            .attr("href", "/a.css?x=1&y=2")
            .attr_opt("as", Some("style"))
            .attr_opt("crossorigin", None)
            .attr_opt("media", Some(""))
            .flag("disabled", false)
            .finish();
        assert_eq!(html, r#"<link rel="preload" href="/a.css?x=1&amp;y=2" as="style">"#);

        let script = Tag::new("script").attr("src", "/app.js").flag("defer", true).finish();
        assert_eq!(script, r#"<script src="/app.js" defer>"#);
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(
            meta_name("description", "\"Quoted\""),
            r#"<meta name="description" content="&quot;Quoted&quot;">"#
        );
        assert_eq!(
            meta_property("og:type", "website"),
            r#"<meta property="og:type" content="website">"#
        );
        assert_eq!(link("canonical", "https://e.com/"), r#"<link rel="canonical" href="https://e.com/">"#);
    }
}
