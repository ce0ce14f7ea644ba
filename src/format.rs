//! Format predicates for URLs and ISO-8601 dates and durations
//!
//! All predicates are pure and never panic. The `value_*` variants accept any
//! JSON value and return `false` for everything that is not a string.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}([T ][0-9]{2}:[0-9]{2}(:[0-9]{2})?(Z|[+\-][0-9]{2}:[0-9]{2})?)?$").unwrap()
    })
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^P([0-9]+Y)?([0-9]+M)?([0-9]+D)?(T([0-9]+H)?([0-9]+M)?([0-9]+S)?)?$").unwrap()
    })
}

/// Check whether `v` is a well-formed absolute URL.
///
/// Whitespace and control characters are rejected outright, even though the
/// `url` crate would silently percent-encode or trim them. Schemes that use
/// an authority (`http`, `https`, `ftp`, ...) must name a host.
///
/// ```
/// use webpage_head::format::is_url;
///
/// assert!(is_url("https://example.com/a?b=c"));
/// assert!(!is_url("not a url"));
/// assert!(!is_url("/relative/path"));
/// ```
pub fn is_url(v: &str) -> bool {
    if v.is_empty() || v.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Ok(parsed) = Url::parse(v) else {
        return false;
    };

    if parsed.cannot_be_a_base() {
        // mailto:, urn:, tel: and friends carry no authority
        return !parsed.path().is_empty();
    }

    parsed.host_str().is_some_and(|h| !h.is_empty())
}

/// Check whether `v` is an ISO-8601 date or date-time.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space, `HH:MM`, an
/// optional `:SS`, and an optional `Z` or `±HH:MM` offset.
pub fn is_iso8601_date(v: &str) -> bool {
    !v.is_empty() && date_regex().is_match(v)
}

/// Check whether `v` is an ISO-8601 duration such as `PT1H30M` or `P2D`.
///
/// At least one component must be present, and a `T` designator must be
/// followed by at least one time component.
pub fn is_iso8601_duration(v: &str) -> bool {
    if v == "P" || v.ends_with('T') {
        return false;
    }
    duration_regex().is_match(v)
}

/// [`is_url`] over a JSON value.
pub fn value_is_url(v: &Value) -> bool {
    v.as_str().is_some_and(is_url)
}

/// [`is_iso8601_date`] over a JSON value.
pub fn value_is_iso8601_date(v: &Value) -> bool {
    v.as_str().is_some_and(is_iso8601_date)
}

/// [`is_iso8601_duration`] over a JSON value.
pub fn value_is_iso8601_duration(v: &Value) -> bool {
    v.as_str().is_some_and(is_iso8601_duration)
}
