//! Required-property and format validation for JSON-LD nodes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{value_is_iso8601_date, value_is_iso8601_duration, value_is_url};
use crate::node::Node;
use crate::schema_type::SchemaType;

/// Properties that must hold an absolute URL.
pub const URL_PROPERTIES: &[&str] = &["url", "contentUrl", "embedUrl", "logo"];

/// Properties that must hold an ISO-8601 date or date-time.
pub const DATE_PROPERTIES: &[&str] = &[
    "datePublished",
    "dateModified",
    "startDate",
    "endDate",
    "uploadDate",
    "priceValidUntil",
];

/// What to do when a node fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnInvalid {
    /// Abort the whole build with [`Error::Invalid`].
    Error,
    /// Strip the offending property or entry and record a warning.
    #[default]
    Skip,
}

impl FromStr for OnInvalid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "error" => Ok(Self::Error),
            "skip" => Ok(Self::Skip),
            other => Err(Error::InvalidOption(format!(
                "on_invalid must be \"error\" or \"skip\", got \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for OnInvalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Skip => "skip",
        })
    }
}

/// Ordered list of non-fatal validation messages.
///
/// Each [`StructuredData::generate`](crate::StructuredData::generate) call
/// fills its own list; [`SeoHead`](crate::SeoHead) keeps one per instance and
/// drains it with [`pull`](Diagnostics::pull).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = String>) {
        self.messages.extend(messages);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Return every accumulated message and clear the list.
    pub fn pull(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Applies the [`OnInvalid`] policy to a failed check.
pub(crate) struct Reporter<'d> {
    on_invalid: OnInvalid,
    diag: &'d mut Diagnostics,
}

impl<'d> Reporter<'d> {
    pub(crate) fn new(on_invalid: OnInvalid, diag: &'d mut Diagnostics) -> Self {
        Self { on_invalid, diag }
    }

    /// Fail in `Error` mode, record a warning in `Skip` mode.
    pub(crate) fn reject(&mut self, message: String) -> Result<()> {
        match self.on_invalid {
            OnInvalid::Error => Err(Error::Invalid(message)),
            OnInvalid::Skip => {
                tracing::warn!(%message, "structured data validation");
                self.diag.push(message);
                Ok(())
            }
        }
    }
}

/// Whether `prop` is present for the required-property check.
///
/// Scalars must be non-null and non-empty; arrays and objects must be
/// non-empty.
fn is_present(node: &Node, prop: &str) -> bool {
    match node.get(prop) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
    }
}

/// Check the required properties of `ty` on `node`.
///
/// Nothing is stripped: in `Skip` mode every missing property yields one
/// `"<Type> missing required property: <prop>"` warning.
pub(crate) fn check_required(node: &Node, ty: &SchemaType, reporter: &mut Reporter) -> Result<()> {
    for prop in ty.required_properties() {
        if !is_present(node, prop) {
            reporter.reject(format!("{ty} missing required property: {prop}"))?;
        }
    }
    Ok(())
}

/// Check URL, date and duration formats, stripping invalid properties.
pub(crate) fn check_formats(node: &mut Node, ty: &SchemaType, reporter: &mut Reporter) -> Result<()> {
    for prop in URL_PROPERTIES {
        if let Some(value) = node.get(prop)
            && !value_is_url(value)
        {
            reporter.reject(format!("{prop} must be a valid URL"))?;
            node.remove(prop);
        }
    }

    for prop in DATE_PROPERTIES {
        if let Some(value) = node.get(prop)
            && !value_is_iso8601_date(value)
        {
            reporter.reject(format!("{prop} must be ISO8601 date/datetime"))?;
            node.remove(prop);
        }
    }

    if *ty == SchemaType::VideoObject
        && let Some(value) = node.get("duration")
        && !value_is_iso8601_duration(value)
    {
        reporter.reject("duration must be ISO8601 duration".to_string())?;
        node.remove("duration");
    }

    Ok(())
}

/// Run the full validation pass: required properties first, then formats.
pub(crate) fn validate(node: &mut Node, ty: &SchemaType, reporter: &mut Reporter) -> Result<()> {
    check_required(node, ty, reporter)?;
    check_formats(node, ty, reporter)
}
