//! Runtime API URL construction.
//!
//! All URLs hang off a base address derived from `AWS_LAMBDA_RUNTIME_API`,
//! which the platform sets to a bare `host:port`.

/// Runtime API version segment.
pub const API_VERSION: &str = "2018-06-01";

/// Build the base URL from the configured Runtime API address.
///
/// A bare `host:port` gets an `http://` prefix. An address that already
/// carries a scheme is kept as-is. Trailing slashes are dropped.
pub fn base_url(runtime_api: &str) -> String {
    let trimmed = runtime_api.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// `GET` endpoint for the next invocation.
pub fn next_url(base: &str) -> String {
    format!("{}/{}/runtime/invocation/next", base, API_VERSION)
}

/// `POST` endpoint for a successful result.
pub fn response_url(base: &str, request_id: &str) -> String {
    format!(
        "{}/{}/runtime/invocation/{}/response",
        base, API_VERSION, request_id
    )
}

/// `POST` endpoint for an invocation error.
pub fn error_url(base: &str, request_id: &str) -> String {
    format!(
        "{}/{}/runtime/invocation/{}/error",
        base, API_VERSION, request_id
    )
}
