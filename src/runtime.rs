//! Runtime and invocation loop.
//!
//! The [`Runtime`] owns the handler registry and drives the Runtime API
//! lifecycle, one invocation at a time:
//! 1. Fetch the next invocation (long poll)
//! 2. Resolve the configured handler
//! 3. Export the trace id and build the [`Context`]
//! 4. Run the handler
//! 5. Post the result or the error, then go back to 1
//!
//! Only a failed fetch or a configuration problem ends the loop. Handler
//! failures are reported to the platform and the loop carries on.
//!
//! # Example
//!
//! ```ignore
//! use lambda_bootstrap::Runtime;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Runtime::from_env()?
//!         .register("hello", |event: Greet, _ctx| async move {
//!             Ok(Greeting { greeting: format!("Hello, {}", event.name) })
//!         })
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

use crate::codec::JsonMap;
use crate::control::{FunctionEnv, RuntimeConfig, TraceVariable};
use crate::error::{BoxError, Result, RuntimeError};
use crate::handler::{Context, Handler, HandlerRegistry};
use crate::protocol::{headers, Invocation, InvocationError};
use crate::transport::{HttpRuntimeApi, RuntimeApi};

/// A custom runtime bound to one Runtime API.
///
/// Handlers are registered by value before [`run`](Runtime::run), which
/// consumes the runtime. Nothing can be registered once the loop has started.
pub struct Runtime<A = HttpRuntimeApi> {
    /// Runtime API client.
    api: A,
    /// Registered handlers.
    registry: HandlerRegistry,
    /// Name of the handler to dispatch to.
    handler_name: String,
    /// Function metadata captured at startup.
    env: FunctionEnv,
    /// Trace id export.
    trace: TraceVariable,
    /// Invocations fetched so far (diagnostic only).
    invocations: u64,
}

impl Runtime<HttpRuntimeApi> {
    /// Create a runtime from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if `AWS_LAMBDA_RUNTIME_API` or `_HANDLER` is missing or malformed.
    pub fn from_env() -> Result<Self> {
        Self::new(RuntimeConfig::from_env()?)
    }

    /// Create a runtime talking HTTP to the configured Runtime API.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let api = HttpRuntimeApi::new(&config.runtime_api)?;
        Ok(Self::with_api(config, api))
    }
}

impl<A: RuntimeApi> Runtime<A> {
    /// Create a runtime over any Runtime API implementation.
    pub fn with_api(config: RuntimeConfig, api: A) -> Self {
        Self {
            api,
            registry: HandlerRegistry::new(),
            handler_name: config.handler,
            env: config.env,
            trace: TraceVariable::default(),
            invocations: 0,
        }
    }

    /// Register a typed handler.
    ///
    /// The event is decoded into `E` and the returned `R` is encoded as JSON.
    pub fn register<F, E, R, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(E, Context) -> Fut + Send + Sync + 'static,
        E: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        Fut: Future<Output = std::result::Result<R, BoxError>> + Send + 'static,
    {
        self.registry.register(name, handler);
        self
    }

    /// Register a handler working on raw JSON objects.
    pub fn register_raw<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(JsonMap, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<JsonMap, BoxError>> + Send + 'static,
    {
        self.registry.register_raw(name, handler);
        self
    }

    /// Register a custom [`Handler`] implementation.
    pub fn register_handler<H: Handler>(mut self, name: &str, handler: H) -> Self {
        self.registry.insert(name, handler);
        self
    }

    /// Override the environment variable that receives the trace id.
    ///
    /// Default: `_X_AMZN_TRACE_ID`
    pub fn trace_variable(mut self, trace: TraceVariable) -> Self {
        self.trace = trace;
        self
    }

    /// Name of the handler this runtime dispatches to.
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// Number of invocations fetched so far.
    pub fn invocation_count(&self) -> u64 {
        self.invocations
    }

    /// Run the invocation loop.
    ///
    /// Only returns on a fatal error: a failed fetch, an unknown handler
    /// name, or an invocation without a request id.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(
            handler = %self.handler_name,
            function = %self.env.function_name,
            "Starting invocation loop"
        );

        loop {
            if let Err(e) = self.next_invocation().await {
                tracing::error!(
                    error = %e,
                    invocations = self.invocations,
                    "Invocation loop stopped"
                );
                return Err(e);
            }
        }
    }

    /// Run the invocation loop on a new current-thread tokio runtime.
    ///
    /// For binaries without their own `#[tokio::main]`. Panics if called from
    /// within an async context, like any nested `block_on`.
    pub fn run_blocking(self) -> Result<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.run())
    }

    /// Fetch, dispatch and report a single invocation.
    async fn next_invocation(&mut self) -> Result<()> {
        let invocation = self.api.next_invocation().await?;

        self.invocations += 1;
        tracing::debug!(invocation = self.invocations, "Received invocation");

        let handler = self
            .registry
            .get_handler(&self.handler_name)
            .ok_or_else(|| RuntimeError::UnknownHandler(self.handler_name.clone()))?;

        if let Some(trace_id) = invocation.header(headers::TRACE_ID) {
            self.trace.set_if_absent(trace_id);
        }

        let ctx = Context::from_invocation(&invocation, &self.env)?;
        let span = tracing::info_span!(
            "invocation",
            request_id = %ctx.request_id,
            xray_trace_id = ?ctx.xray_trace_id
        );

        Self::dispatch(&self.api, handler, invocation, ctx)
            .instrument(span)
            .await;
        Ok(())
    }

    /// Run the handler and report its outcome.
    ///
    /// Report failures are logged and otherwise ignored.
    async fn dispatch(api: &A, handler: &dyn Handler, invocation: Invocation, ctx: Context) {
        let request_id = ctx.request_id.clone();

        match handler.call(&invocation.event, ctx).await {
            Ok(body) => {
                if let Err(e) = api.post_response(&request_id, Bytes::from(body)).await {
                    tracing::warn!(error = %e, "Failed to post invocation response");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Handler failed");
                let report = InvocationError::new(&e);
                if let Err(e) = api.post_error(&request_id, &report).await {
                    tracing::warn!(error = %e, "Failed to post invocation error");
                }
            }
        }
    }
}
