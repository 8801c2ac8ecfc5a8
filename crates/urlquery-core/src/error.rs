//! Core error types for urlquery.
//!
//! This module provides the [`UrlQueryError`] enum that covers configuration
//! errors raised while registering query fields, URL grammar rejections,
//! value conversion failures, and the I/O and serialization errors of the
//! supporting utilities.

use thiserror::Error;

/// The primary error type for urlquery.
///
/// Registration and conversion errors are never retried or recovered
/// internally; they propagate to the immediate caller.
#[derive(Error, Debug)]
pub enum UrlQueryError {
    // ── Configuration ────────────────────────────────────────────────

    /// A query field was registered incorrectly (e.g. without a converter),
    /// or a configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Parsing ──────────────────────────────────────────────────────

    /// The input could not be decomposed by the URL grammar.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    // ── Conversion ───────────────────────────────────────────────────

    /// A value present in a query mapping could not be converted by the
    /// field's converter.
    #[error("Conversion error: {0}")]
    ConversionError(String),

    /// An object does not expose a field, or the value does not fit it.
    #[error("Field error: {0}")]
    FieldError(String),

    // ── Files ────────────────────────────────────────────────────────

    /// The requested text encoding is not supported.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl UrlQueryError {
    /// Returns `true` for errors caused by how fields were registered rather
    /// than by the data being mapped.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }
}

impl From<serde_json::Error> for UrlQueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, UrlQueryError>`.
pub type UrlQueryResult<T> = Result<T, UrlQueryError>;
