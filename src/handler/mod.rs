//! Handler module - invocation handling and dispatch.
//!
//! Provides:
//! - [`HandlerRegistry`] - maps handler names to handlers
//! - [`Context`] - per-invocation metadata passed to handlers
//!
//! # Example
//!
//! ```ignore
//! use lambda_bootstrap::handler::{Context, HandlerRegistry};
//!
//! let mut registry = HandlerRegistry::new();
//!
//! // Typed handler
//! registry.register("hello", |event: Greet, ctx: Context| async move {
//!     Ok(Greeting { greeting: format!("Hello, {}", event.name) })
//! });
//!
//! // Raw JSON-object handler
//! registry.register_raw("echo", |event, _ctx| async move { Ok(event) });
//! ```

mod context;
mod registry;

pub use context::Context;
pub use registry::{BoxFuture, Handler, HandlerRegistry, HandlerResult, RawHandler, TypedHandler};
