//! Language alternates (`<link rel="alternate" hreflang>`)

use serde::{Deserialize, Serialize};

use crate::html::Tag;

/// `hreflang` value of the catch-all alternate.
pub const X_DEFAULT: &str = "x-default";

/// A single language alternate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternate {
    pub href: String,
    pub lang: String,
}

/// Language alternates of the current page.
///
/// # Example
///
/// ```
/// use webpage_head::Hreflang;
///
/// let mut hreflang = Hreflang::new();
/// hreflang.auto(&["en_US", "pl_PL"], Some("en_US"), |locale| {
///     Some(format!("https://example.com/{}/", locale.to_lowercase()))
/// });
///
/// assert_eq!(
///     hreflang.render(),
///     "<link rel=\"alternate\" hreflang=\"en-US\" href=\"https://example.com/en_us/\">\n\
///      <link rel=\"alternate\" hreflang=\"pl-PL\" href=\"https://example.com/pl_pl/\">\n\
///      <link rel=\"alternate\" hreflang=\"x-default\" href=\"https://example.com/en_us/\">"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hreflang {
    alternates: Vec<Alternate>,
}

impl Hreflang {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_alternate(&mut self, href: impl Into<String>, lang: impl Into<String>) -> &mut Self {
        self.alternates.push(Alternate {
            href: href.into(),
            lang: lang.into(),
        });
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.alternates.clear();
        self
    }

    pub fn alternates(&self) -> &[Alternate] {
        &self.alternates
    }

    /// Replace the alternates with one entry per locale.
    ///
    /// `resolver` maps a locale code to the page URL in that locale; locales
    /// it returns `None` (or an empty URL) for are skipped. Codes are written
    /// as BCP 47 tags (`en_US` becomes `en-US`). When `fallback_locale`
    /// resolves, an `x-default` entry pointing at it is appended.
    pub fn auto<S, F>(&mut self, locales: &[S], fallback_locale: Option<&str>, resolver: F) -> &mut Self
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        self.clear();

        for locale in locales {
            let code = locale.as_ref();
            if let Some(href) = resolver(code).filter(|h| !h.is_empty()) {
                self.add_alternate(href, code.replace('_', "-"));
            }
        }

        if let Some(fallback) = fallback_locale.filter(|f| !f.is_empty())
            && let Some(href) = resolver(fallback).filter(|h| !h.is_empty())
        {
            self.add_alternate(href, X_DEFAULT);
        }

        tracing::debug!(count = self.alternates.len(), "hreflang alternates resolved");
        self
    }

    /// One `<link>` per alternate, newline-separated; empty when there are none.
    pub fn render(&self) -> String {
        self.alternates
            .iter()
            .map(|a| {
                Tag::new("link")
                    .attr("rel", "alternate")
                    .attr("hreflang", &a.lang)
                    .attr("href", &a.href)
                    .finish()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(Hreflang::new().render(), "");
    }

    #[test]
    fn test_manual_alternates() {
        let mut h = Hreflang::new();
        h.add_alternate("https://e.com/?a=1&b=2", "en");
        assert_eq!(
            h.render(),
            r#"<link rel="alternate" hreflang="en" href="https://e.com/?a=1&amp;b=2">"#
        );
        h.clear();
        assert!(h.alternates().is_empty());
    }

    #[test]
    fn test_auto_skips_unresolved() {
        let mut h = Hreflang::new();
        h.add_alternate("https://old.test/", "xx");
        h.auto(&["de_DE", "fr_FR"], Some("it_IT"), |locale| {
            (locale != "fr_FR" && locale != "it_IT").then(|| format!("https://e.com/{locale}"))
        });

        assert_eq!(
            h.alternates(),
            &[Alternate {
                href: "https://e.com/de_DE".to_string(),
                lang: "de-DE".to_string(),
            }]
        );
    }

    #[test]
    fn test_auto_x_default() {
        let mut h = Hreflang::new();
        h.auto(&["pl"], Some("pl"), |l| Some(format!("/{l}/")));
        let langs: Vec<_> = h.alternates().iter().map(|a| a.lang.as_str()).collect();
        assert_eq!(langs, vec!["pl", "x-default"]);
    }
}
