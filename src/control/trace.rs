//! Trace id propagation into the process environment.
//!
//! Tracing SDKs running inside the function read the active trace header from
//! `_X_AMZN_TRACE_ID`. The runtime carries the trace id explicitly in
//! [`Context`](crate::Context) and in its tracing span; this module is the one
//! place that also writes it into the process environment.
//!
//! The write only happens while the variable is unset. The invocation loop
//! is the only writer and runs on a single task.

/// Environment variable read by tracing SDKs.
pub const TRACE_ID_ENV: &str = "_X_AMZN_TRACE_ID";

/// Process-wide trace id variable.
#[derive(Debug, Clone)]
pub struct TraceVariable {
    name: String,
}

impl TraceVariable {
    /// Create a handle for the given variable name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, if set.
    pub fn get(&self) -> Option<String> {
        std::env::var(&self.name).ok()
    }

    /// Set the variable unless it already has a value.
    ///
    /// Returns `true` if the value was written.
    pub fn set_if_absent(&self, trace_id: &str) -> bool {
        if std::env::var_os(&self.name).is_some() {
            return false;
        }
        std::env::set_var(&self.name, trace_id);
        true
    }
}

impl Default for TraceVariable {
    fn default() -> Self {
        Self::new(TRACE_ID_ENV)
    }
}
