//! Invocation context for handlers.
//!
//! A [`Context`] is built for every invocation from two sources:
//!
//! - the function metadata captured at startup ([`FunctionEnv`])
//! - the headers of the next-invocation response
//!
//! It is immutable and dropped once the invocation has been reported.
//!
//! # Example
//!
//! ```ignore
//! async fn handler(event: Order, ctx: Context) -> Result<Receipt, BoxError> {
//!     tracing::info!(request_id = %ctx.request_id, "processing order");
//!     if ctx.remaining_time() < Some(Duration::from_millis(100)) {
//!         return Err("not enough time left".into());
//!     }
//!     ...
//! }
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::control::FunctionEnv;
use crate::error::{Result, RuntimeError};
use crate::protocol::{headers, Invocation};

/// Per-invocation metadata passed to handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Request id assigned by the platform.
    pub request_id: String,
    /// Point in time after which the platform stops the invocation.
    pub deadline: Option<SystemTime>,
    /// ARN used to invoke the function.
    pub invoked_function_arn: String,
    /// X-Ray trace header for this invocation.
    pub xray_trace_id: Option<String>,
    /// Client context (mobile SDK callers only).
    pub client_context: Option<String>,
    /// Cognito identity (mobile SDK callers only).
    pub identity: Option<String>,
    /// Function metadata captured at startup.
    pub env: FunctionEnv,
}

impl Context {
    /// Create a context carrying only a request id (for testing).
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
            invoked_function_arn: String::new(),
            xray_trace_id: None,
            client_context: None,
            identity: None,
            env: FunctionEnv::default(),
        }
    }

    /// Build the context for a fetched invocation.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingHeader`] if the request id header is
    /// absent or not valid UTF-8. Without it nothing can be reported.
    pub fn from_invocation(invocation: &Invocation, env: &FunctionEnv) -> Result<Self> {
        let request_id = invocation
            .header(headers::REQUEST_ID)
            .filter(|id| !id.is_empty())
            .ok_or(RuntimeError::MissingHeader(headers::REQUEST_ID))?
            .to_string();

        let deadline = invocation.header(headers::DEADLINE_MS).and_then(|raw| {
            let parsed = parse_deadline(raw);
            if parsed.is_none() {
                tracing::warn!(value = raw, "Ignoring unparseable invocation deadline");
            }
            parsed
        });

        let owned = |name: &str| invocation.header(name).map(str::to_string);

        Ok(Self {
            request_id,
            deadline,
            invoked_function_arn: owned(headers::INVOKED_FUNCTION_ARN).unwrap_or_default(),
            xray_trace_id: owned(headers::TRACE_ID),
            client_context: owned(headers::CLIENT_CONTEXT),
            identity: owned(headers::COGNITO_IDENTITY),
            env: env.clone(),
        })
    }

    /// Time left before the deadline.
    ///
    /// Returns `None` when the platform sent no deadline and
    /// `Some(Duration::ZERO)` once the deadline has passed.
    pub fn remaining_time(&self) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO)
        })
    }
}

/// Parse an epoch-milliseconds deadline.
fn parse_deadline(raw: &str) -> Option<SystemTime> {
    let millis: u64 = raw.trim().parse().ok()?;
    UNIX_EPOCH.checked_add(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn invocation(pairs: &[(&'static str, &str)]) -> Invocation {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        Invocation::new(Bytes::from_static(b"{}"), map)
    }

    #[test]
    fn test_context_creation() {
        let ctx = Context::new("req-1");
        assert_eq!(ctx.request_id, "req-1");
        assert!(ctx.deadline.is_none());
        assert!(ctx.remaining_time().is_none());
    }

    #[test]
    fn test_from_invocation_all_headers() {
        let inv = invocation(&[
            (headers::REQUEST_ID, "8476a536-e9f4-11e8-9739-2dfe598c3fcd"),
            (headers::DEADLINE_MS, "1542409706888"),
            (
                headers::INVOKED_FUNCTION_ARN,
                "arn:aws:lambda:us-east-2:123456789012:function:custom-runtime",
            ),
            (headers::TRACE_ID, "Root=1-5bef4de7-ad49b0e87f6ef6c87fc2e700;Parent=9a9197af755a6419;Sampled=1"),
            (headers::CLIENT_CONTEXT, r#"{"client":{}}"#),
            (headers::COGNITO_IDENTITY, r#"{"identityId":"x"}"#),
        ]);
        let env = FunctionEnv {
            function_name: "custom-runtime".to_string(),
            ..FunctionEnv::default()
        };

        let ctx = Context::from_invocation(&inv, &env).unwrap();

        assert_eq!(ctx.request_id, "8476a536-e9f4-11e8-9739-2dfe598c3fcd");
        assert_eq!(
            ctx.deadline,
            Some(UNIX_EPOCH + Duration::from_millis(1_542_409_706_888))
        );
        assert_eq!(
            ctx.invoked_function_arn,
            "arn:aws:lambda:us-east-2:123456789012:function:custom-runtime"
        );
        assert!(ctx.xray_trace_id.as_deref().unwrap().starts_with("Root=1-5bef4de7"));
        assert_eq!(ctx.client_context.as_deref(), Some(r#"{"client":{}}"#));
        assert_eq!(ctx.identity.as_deref(), Some(r#"{"identityId":"x"}"#));
        assert_eq!(ctx.env.function_name, "custom-runtime");
    }

    #[test]
    fn test_missing_request_id() {
        let inv = invocation(&[(headers::DEADLINE_MS, "1542409706888")]);
        let err = Context::from_invocation(&inv, &FunctionEnv::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingHeader(headers::REQUEST_ID)));
    }

    #[test]
    fn test_empty_request_id_rejected() {
        let inv = invocation(&[(headers::REQUEST_ID, "")]);
        assert!(Context::from_invocation(&inv, &FunctionEnv::default()).is_err());
    }

    #[test]
    fn test_optional_headers_absent() {
        let inv = invocation(&[(headers::REQUEST_ID, "req-1")]);
        let ctx = Context::from_invocation(&inv, &FunctionEnv::default()).unwrap();

        assert!(ctx.deadline.is_none());
        assert!(ctx.invoked_function_arn.is_empty());
        assert!(ctx.xray_trace_id.is_none());
        assert!(ctx.client_context.is_none());
        assert!(ctx.identity.is_none());
    }

    #[test]
    fn test_unparseable_deadline_is_ignored() {
        let inv = invocation(&[(headers::REQUEST_ID, "req-1"), (headers::DEADLINE_MS, "soon")]);
        let ctx = Context::from_invocation(&inv, &FunctionEnv::default()).unwrap();
        assert!(ctx.deadline.is_none());
    }

    #[test]
    fn test_remaining_time_saturates_at_zero() {
        let mut ctx = Context::new("req-1");
        ctx.deadline = Some(UNIX_EPOCH + Duration::from_secs(1));
        assert_eq!(ctx.remaining_time(), Some(Duration::ZERO));
    }

    #[test]
    fn test_remaining_time_in_future() {
        let mut ctx = Context::new("req-1");
        ctx.deadline = Some(SystemTime::now() + Duration::from_secs(60));

        let remaining = ctx.remaining_time().unwrap();
        assert!(remaining > Duration::from_secs(50));
        assert!(remaining <= Duration::from_secs(60));
    }
}
