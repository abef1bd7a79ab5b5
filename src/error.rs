//! Error types for lta-datamall
//!
//! Every client call surfaces exactly one [`Error`] value on failure. The
//! variants map onto the failure modes of the DataMall request pipeline:
//! - configuration preconditions (missing API key, bad settings)
//! - HTTP classification (rate limiting, other non-2xx statuses)
//! - transport and decoding failures, with the underlying error attached
//! - the two-hop bulk dataset protocol (missing download link, archive access)

use thiserror::Error;

/// Result type alias for lta-datamall operations
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of bytes of an error response body kept in [`Error::Http`]
pub(crate) const MAX_ERROR_BODY_BYTES: usize = 512;

/// Main error type for lta-datamall
#[derive(Debug, Error)]
pub enum Error {
    /// No API key configured, or the configured key is empty
    ///
    /// Raised before any network I/O takes place.
    #[error("no API key configured: call configure() before making requests")]
    NoApiKey,

    /// Request URL could not be constructed
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// DataMall signalled throttling
    ///
    /// DataMall reports rate limiting with HTTP 500 rather than 429.
    #[error("rate limited by DataMall")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("HTTP error {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http {
        /// HTTP status code returned by the server
        status: u16,
        /// Response body (truncated), when the server sent one
        message: Option<String>,
    },

    /// Transport-level failure (timeout, connection reset, DNS, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    DecodingFailed(#[from] serde_json::Error),

    /// Bulk dataset metadata did not contain a usable download link
    #[error("bulk dataset response did not contain a usable download link")]
    MissingDownloadLink,

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// I/O error while saving a dataset
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset payload is not a readable ZIP archive, or a member is missing
    #[error("archive error: {0}")]
    Archive(String),
}

impl Error {
    /// Machine-readable error code, stable across releases
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NoApiKey => "no_api_key",
            Error::InvalidUrl(_) => "invalid_url",
            Error::RateLimited => "rate_limited",
            Error::Http { .. } => "http_error",
            Error::Network(_) => "network_error",
            Error::DecodingFailed(_) => "decoding_failed",
            Error::MissingDownloadLink => "missing_download_link",
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::Archive(_) => "archive_error",
        }
    }

    /// HTTP status code reported by the server, if the error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RateLimited => Some(crate::client::RATE_LIMIT_STATUS),
            Error::Http { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Archive(e.to_string())
    }
}

/// Turn an error response body into the optional message stored in [`Error::Http`]
pub(crate) fn error_body_message(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.len() <= MAX_ERROR_BODY_BYTES {
        return Some(text.to_string());
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Some(format!("{}...", &text[..end]))
}
