//! Error types for webpage-head

use thiserror::Error;

/// Errors that can occur when building head fragments or structured data.
#[derive(Debug, Error)]
pub enum Error {
    /// Structured data failed validation while running with [`OnInvalid::Error`].
    ///
    /// [`OnInvalid::Error`]: crate::OnInvalid::Error
    #[error("invalid structured data: {0}")]
    Invalid(String),

    /// An option value could not be parsed
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Failed to serialize the JSON-LD payload
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse or validate the URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// URL parse error (from url crate)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for webpage-head operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`NodeStrategy`](crate::NodeStrategy).
///
/// Never returned to callers of [`StructuredData::generate`](crate::StructuredData::generate):
/// the facade records it as a warning and falls back to the core builder.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// A field could not be mapped onto the typed schema
    #[error("unsupported value for {field}: {reason}")]
    UnsupportedValue {
        field: &'static str,
        reason: String,
    },

    /// The typed node could not be converted to JSON
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other failure inside a custom strategy
    #[error("{0}")]
    Other(String),
}
