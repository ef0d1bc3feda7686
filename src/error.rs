//! Error types for lambda-bootstrap.
//!
//! Two families:
//!
//! - [`RuntimeError`] - configuration, protocol and transport failures. These
//!   end the invocation loop (except report failures, which are only logged).
//! - [`HandlerError`] - per-invocation failures. These are reported through the
//!   Runtime API error endpoint and the loop carries on.

use thiserror::Error;

/// Boxed error returned by user handler functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// The handler specifier has no `.` delimiter.
    #[error("invalid handler specifier {0:?}: expected `<module>.<name>`")]
    InvalidHandler(String),

    /// No handler is registered under the configured name.
    #[error("unknown handler: {0}")]
    UnknownHandler(String),

    /// The next-invocation response lacks a required header.
    #[error("missing or invalid header: {0}")]
    MissingHeader(&'static str),

    /// HTTP request could not complete.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Runtime API answered with a non-success status.
    #[error("runtime API returned {status} for {url}")]
    Status {
        /// Request URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error, e.g. while building the async runtime.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The event payload did not match the handler's input type.
    #[error("failed to decode event: {0}")]
    Decode(#[source] serde_json::Error),

    /// The handler output could not be serialized.
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),

    /// The handler function itself failed.
    #[error("{0}")]
    Function(BoxError),
}

/// Result type alias using RuntimeError.
pub type Result<T> = std::result::Result<T, RuntimeError>;
