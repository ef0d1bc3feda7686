//! Protocol module - Runtime API paths, headers, and wire records.
//!
//! The Runtime API is plain HTTP on the sandbox loopback:
//!
//! ```text
//! GET  /2018-06-01/runtime/invocation/next            -> event bytes + headers
//! POST /2018-06-01/runtime/invocation/{id}/response   <- result bytes
//! POST /2018-06-01/runtime/invocation/{id}/error      <- {"errorMessage": "..."}
//! ```

mod endpoints;
mod invocation;

pub use endpoints::{base_url, error_url, next_url, response_url, API_VERSION};
pub use invocation::{headers, Invocation, InvocationError};
