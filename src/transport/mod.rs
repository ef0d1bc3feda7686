//! Transport module - the three Runtime API calls.
//!
//! [`RuntimeApi`] is the seam between the invocation loop and the platform.
//! [`HttpRuntimeApi`] talks to the real control endpoint; tests and local
//! emulators can plug in their own implementation.

mod http;

pub use http::HttpRuntimeApi;

use bytes::Bytes;

use crate::error::Result;
use crate::handler::BoxFuture;
use crate::protocol::{Invocation, InvocationError};

/// Client side of the Runtime API.
pub trait RuntimeApi: Send + Sync {
    /// Wait for the next invocation.
    ///
    /// Blocks until the platform has work. Any error is fatal to the loop.
    fn next_invocation(&self) -> BoxFuture<'_, Result<Invocation>>;

    /// Report a successful result.
    fn post_response<'a>(&'a self, request_id: &'a str, body: Bytes) -> BoxFuture<'a, Result<()>>;

    /// Report an invocation error.
    fn post_error<'a>(
        &'a self,
        request_id: &'a str,
        error: &'a InvocationError,
    ) -> BoxFuture<'a, Result<()>>;
}
