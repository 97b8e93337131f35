//! Error types for statement extraction.
//!
//! This module defines [`StatementsError`] which covers the failures that can stop a run:
//! fetching disclosures, parsing them, caching them, validating configuration and
//! writing output. Conditions that only affect a single concept or fact (a missing
//! concept, a unit mismatch, an unparseable date) are not errors; they are logged and
//! skipped where they occur.

use thiserror::Error;

/// Errors that can occur while producing financial statements.
#[derive(Error, Debug)]
pub enum StatementsError {
    /// Network-related errors (connection failures, timeouts, non-success status).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by the disclosure source.
    #[error("Rate limited by {source_name}: retry after {retry_after:?}")]
    RateLimited {
        /// The source that rate limited the request.
        source_name: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// No filer matches the requested identifier.
    #[error("Filer not found: {0}")]
    FilerNotFound(String),

    /// The disclosure document does not carry the requested taxonomy.
    #[error("No {taxonomy} facts available for CIK {cik}")]
    DataNotAvailable {
        /// The filer that was requested.
        cik: String,
        /// The taxonomy that was expected.
        taxonomy: String,
    },

    /// Error parsing data returned by the disclosure source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A concept catalog is internally inconsistent.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Writing a table failed.
    #[error("Output error: {0}")]
    Output(String),

    /// The requested feature is not supported.
    #[error("Feature not supported: {0}")]
    NotSupported(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl StatementsError {
    /// Returns true if this error means the disclosure source could not be used,
    /// which aborts the run for that filer.
    #[must_use]
    pub const fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::RateLimited { .. }
                | Self::Parse(_)
                | Self::DataNotAvailable { .. }
        )
    }
}

/// Result type alias using [`StatementsError`].
pub type Result<T> = std::result::Result<T, StatementsError>;
