//! Handler registry for dispatching invocations by name.
//!
//! The registry maps handler names to type-erased [`Handler`]s. Two adapters
//! turn user functions into handlers:
//!
//! - [`TypedHandler`] - decodes the event into a `Deserialize` type and
//!   encodes a `Serialize` result
//! - [`RawHandler`] - works on a [`JsonMap`] directly
//!
//! # Example
//!
//! ```ignore
//! use lambda_bootstrap::handler::HandlerRegistry;
//!
//! let mut registry = HandlerRegistry::new();
//!
//! registry.register("hello", |event: Greet, _ctx| async move {
//!     Ok(Greeting { greeting: format!("Hello, {}", event.name) })
//! });
//!
//! registry.register_raw("echo", |event, _ctx| async move { Ok(event) });
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Context;
use crate::codec::{JsonCodec, JsonMap};
use crate::error::{BoxError, HandlerError};

/// Result type for a handler invocation.
pub type HandlerResult = std::result::Result<Vec<u8>, HandlerError>;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for invocation handlers.
pub trait Handler: Send + Sync + 'static {
    /// Handle an invocation with raw event bytes, producing raw result bytes.
    fn call(&self, event: &[u8], ctx: Context) -> BoxFuture<'static, HandlerResult>;
}

/// Wrapper that decodes the event into `E` and encodes the returned `R`.
pub struct TypedHandler<F, E, R, Fut>
where
    F: Fn(E, Context) -> Fut + Send + Sync + 'static,
    E: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
{
    handler: F,
    _phantom: PhantomData<fn(E) -> (R, Fut)>,
}

impl<F, E, R, Fut> TypedHandler<F, E, R, Fut>
where
    F: Fn(E, Context) -> Fut + Send + Sync + 'static,
    E: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
{
    /// Create a new typed handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, E, R, Fut> Handler for TypedHandler<F, E, R, Fut>
where
    F: Fn(E, Context) -> Fut + Send + Sync + 'static,
    E: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
{
    fn call(&self, event: &[u8], ctx: Context) -> BoxFuture<'static, HandlerResult> {
        let parsed: E = match JsonCodec::decode(event) {
            Ok(v) => v,
            Err(e) => return Box::pin(async move { Err(HandlerError::Decode(e)) }),
        };

        let fut = (self.handler)(parsed, ctx);
        Box::pin(async move {
            let output = fut.await.map_err(HandlerError::Function)?;
            JsonCodec::encode(&output).map_err(HandlerError::Encode)
        })
    }
}

/// Wrapper over functions working on untyped JSON objects.
pub struct RawHandler<F, Fut>
where
    F: Fn(JsonMap, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<JsonMap, BoxError>> + Send + 'static,
{
    handler: F,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut> RawHandler<F, Fut>
where
    F: Fn(JsonMap, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<JsonMap, BoxError>> + Send + 'static,
{
    /// Create a new raw handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, Fut> Handler for RawHandler<F, Fut>
where
    F: Fn(JsonMap, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<JsonMap, BoxError>> + Send + 'static,
{
    fn call(&self, event: &[u8], ctx: Context) -> BoxFuture<'static, HandlerResult> {
        let parsed = match JsonCodec::decode_map(event) {
            Ok(v) => v,
            Err(e) => return Box::pin(async move { Err(HandlerError::Decode(e)) }),
        };

        let fut = (self.handler)(parsed, ctx);
        Box::pin(async move {
            let output = fut.await.map_err(HandlerError::Function)?;
            JsonCodec::encode(&output).map_err(HandlerError::Encode)
        })
    }
}

/// Registry mapping handler names to handlers.
///
/// Filled before the invocation loop starts and read-only afterwards.
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a typed handler.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F, E, R, Fut>(&mut self, name: &str, handler: F)
    where
        F: Fn(E, Context) -> Fut + Send + Sync + 'static,
        E: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
    {
        self.insert(name, TypedHandler::new(handler));
    }

    /// Register a raw JSON-object handler.
    pub fn register_raw<F, Fut>(&mut self, name: &str, handler: F)
    where
        F: Fn(JsonMap, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<JsonMap, BoxError>> + Send + 'static,
    {
        self.insert(name, RawHandler::new(handler));
    }

    /// Register any [`Handler`] implementation.
    pub fn insert<H: Handler>(&mut self, name: &str, handler: H) {
        if self
            .handlers
            .insert(name.to_string(), Box::new(handler))
            .is_some()
        {
            tracing::debug!(handler = name, "Replaced previously registered handler");
        }
    }

    /// Get a handler by name.
    pub fn get_handler(&self, name: &str) -> Option<&dyn Handler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Check whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
