//! Typed errors for the fact-aggregation pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur inside a single source provider.
///
/// These never cross the aggregator boundary: the aggregator absorbs
/// them and records an empty contribution for that provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed (transport-level)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Upstream returned a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body did not have the expected shape
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Errors surfaced by the aggregator itself.
///
/// Provider failures are absorbed before this point; the only way a
/// pipeline run fails outright is an invalid query.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Sponsor name absent or empty; nothing was fetched
    #[error("sponsor name is required")]
    MissingSponsor,
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for aggregation.
pub type AggregateResult<T> = std::result::Result<T, AggregateError>;
