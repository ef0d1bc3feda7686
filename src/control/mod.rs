//! Control module - process-level configuration and environment side channels.
//!
//! The platform talks to a custom runtime through two channels besides the
//! Runtime API itself:
//!
//! - **Startup environment**: control endpoint address, handler specifier and
//!   function metadata ([`RuntimeConfig`], [`FunctionEnv`])
//! - **Trace variable**: the trace id of the current invocation, exported for
//!   tracing SDKs ([`TraceVariable`])

mod config;
mod trace;

pub use config::{
    parse_handler_name, FunctionEnv, RuntimeConfig, FUNCTION_MEMORY_SIZE_ENV, FUNCTION_NAME_ENV,
    FUNCTION_VERSION_ENV, HANDLER_ENV, LOG_GROUP_NAME_ENV, LOG_STREAM_NAME_ENV, RUNTIME_API_ENV,
};
pub use trace::{TraceVariable, TRACE_ID_ENV};
