//! Site configuration and structured-data options

use serde::{Deserialize, Serialize};

use crate::validate::OnInvalid;

/// Language tag used when no locale is configured.
pub const DEFAULT_LANGUAGE: &str = "pl-PL";

/// Site-wide values the builders and renderers fall back on.
///
/// Replaces the application config and locale lookups of a web framework:
/// build one per request (or share one per site) and hand it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Active locale in `xx_YY` or `xx-YY` form
    pub locale: Option<String>,

    /// Locale used for the hreflang `x-default` alternate
    pub fallback_locale: Option<String>,

    /// Application/site name, the default `name` of Organization-like nodes
    pub site_name: Option<String>,
}

impl SiteConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the fallback locale.
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    /// Set the site name.
    pub fn site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = Some(name.into());
        self
    }

    /// The active locale as a BCP 47 tag (`pl_PL` becomes `pl-PL`),
    /// or [`DEFAULT_LANGUAGE`].
    pub fn language_tag(&self) -> String {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map_or_else(|| DEFAULT_LANGUAGE.to_string(), |l| l.replace('_', "-"))
    }
}

/// Options for [`StructuredData::generate`](crate::StructuredData::generate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Try the registered [`NodeStrategy`](crate::NodeStrategy) first.
    ///
    /// Has no effect when no strategy is registered. Default: true.
    pub use_alternate: bool,

    /// Validation failure policy. Default: [`OnInvalid::Skip`].
    pub on_invalid: OnInvalid,

    /// Add `inLanguage` to nodes that do not set it. Default: true.
    pub attach_language: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            use_alternate: true,
            on_invalid: OnInvalid::Skip,
            attach_language: true,
        }
    }
}

impl GenerateOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to try the registered strategy first.
    pub fn use_alternate(mut self, use_alternate: bool) -> Self {
        self.use_alternate = use_alternate;
        self
    }

    /// Set the validation failure policy.
    pub fn on_invalid(mut self, on_invalid: OnInvalid) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    /// Set whether to attach `inLanguage`.
    pub fn attach_language(mut self, attach: bool) -> Self {
        self.attach_language = attach;
        self
    }
}
