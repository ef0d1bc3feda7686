//! Invocation records exchanged with the Runtime API.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Header names set by the platform on the next-invocation response.
pub mod headers {
    /// Request id; drives the response and error URLs.
    pub const REQUEST_ID: &str = "lambda-runtime-aws-request-id";
    /// Invocation deadline in milliseconds since the Unix epoch.
    pub const DEADLINE_MS: &str = "lambda-runtime-deadline-ms";
    /// ARN of the invoked function.
    pub const INVOKED_FUNCTION_ARN: &str = "lambda-runtime-invoked-function-arn";
    /// X-Ray tracing header.
    pub const TRACE_ID: &str = "lambda-runtime-trace-id";
    /// Client context supplied by mobile SDK callers.
    pub const CLIENT_CONTEXT: &str = "lambda-runtime-client-context";
    /// Cognito identity of the caller.
    pub const COGNITO_IDENTITY: &str = "lambda-runtime-cognito-identity";
}

/// A pending invocation fetched from the Runtime API.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Raw event payload.
    pub event: Bytes,
    /// Full response header set of the fetch.
    pub headers: HeaderMap,
}

impl Invocation {
    /// Create an invocation from its parts.
    pub fn new(event: impl Into<Bytes>, headers: HeaderMap) -> Self {
        Self {
            event: event.into(),
            headers,
        }
    }

    /// Get a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Body of the error-reporting call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationError {
    /// Human-readable error description.
    pub error_message: String,
}

impl InvocationError {
    /// Create an error record from anything displayable.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            error_message: message.to_string(),
        }
    }
}
