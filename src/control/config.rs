//! Process configuration read once at startup.
//!
//! The platform configures a custom runtime entirely through environment
//! variables. [`RuntimeConfig`] captures them before the invocation loop
//! starts and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use lambda_bootstrap::control::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_lookup(|key| match key {
//!     "AWS_LAMBDA_RUNTIME_API" => Some("127.0.0.1:9001".to_string()),
//!     "_HANDLER" => Some("main.hello".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.handler, "hello");
//! ```

use crate::error::{Result, RuntimeError};

/// Control endpoint address (`host:port`).
pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";
/// Handler specifier (`<module>.<name>`).
pub const HANDLER_ENV: &str = "_HANDLER";
/// Function name.
pub const FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";
/// Function version.
pub const FUNCTION_VERSION_ENV: &str = "AWS_LAMBDA_FUNCTION_VERSION";
/// Configured memory in MB.
pub const FUNCTION_MEMORY_SIZE_ENV: &str = "AWS_LAMBDA_FUNCTION_MEMORY_SIZE";
/// Log group name.
pub const LOG_GROUP_NAME_ENV: &str = "AWS_LAMBDA_LOG_GROUP_NAME";
/// Log stream name.
pub const LOG_STREAM_NAME_ENV: &str = "AWS_LAMBDA_LOG_STREAM_NAME";

/// Delimiter between module and handler name in `_HANDLER`.
const HANDLER_DELIMITER: char = '.';

/// Function metadata published by the platform.
///
/// Missing variables default to empty strings; the memory size is `None`
/// when absent or not a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionEnv {
    /// Function name.
    pub function_name: String,
    /// Function version.
    pub function_version: String,
    /// Configured memory in MB.
    pub memory_size_mb: Option<u32>,
    /// Log group name.
    pub log_group_name: String,
    /// Log stream name.
    pub log_stream_name: String,
}

impl FunctionEnv {
    /// Snapshot function metadata from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Snapshot function metadata through a lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            function_name: lookup(FUNCTION_NAME_ENV).unwrap_or_default(),
            function_version: lookup(FUNCTION_VERSION_ENV).unwrap_or_default(),
            memory_size_mb: lookup(FUNCTION_MEMORY_SIZE_ENV).and_then(|v| v.trim().parse().ok()),
            log_group_name: lookup(LOG_GROUP_NAME_ENV).unwrap_or_default(),
            log_stream_name: lookup(LOG_STREAM_NAME_ENV).unwrap_or_default(),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Runtime API address as given by the platform.
    pub runtime_api: String,
    /// Handler name extracted from the specifier.
    pub handler: String,
    /// Function metadata snapshot.
    pub env: FunctionEnv,
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::MissingEnv`] if `AWS_LAMBDA_RUNTIME_API` or
    ///   `_HANDLER` is unset
    /// - [`RuntimeError::InvalidHandler`] if `_HANDLER` has no `.`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime_api = lookup(RUNTIME_API_ENV).ok_or(RuntimeError::MissingEnv(RUNTIME_API_ENV))?;
        let specifier = lookup(HANDLER_ENV).ok_or(RuntimeError::MissingEnv(HANDLER_ENV))?;
        let handler = parse_handler_name(&specifier)?;

        Ok(Self {
            runtime_api,
            handler,
            env: FunctionEnv::from_lookup(lookup),
        })
    }
}

/// Extract the handler name: everything after the first `.`.
pub fn parse_handler_name(specifier: &str) -> Result<String> {
    specifier
        .split_once(HANDLER_DELIMITER)
        .map(|(_, name)| name.to_string())
        .ok_or_else(|| RuntimeError::InvalidHandler(specifier.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            (RUNTIME_API_ENV, "127.0.0.1:9001"),
            (HANDLER_ENV, "main.hello"),
            (FUNCTION_NAME_ENV, "greeter"),
            (FUNCTION_VERSION_ENV, "$LATEST"),
            (FUNCTION_MEMORY_SIZE_ENV, "128"),
            (LOG_GROUP_NAME_ENV, "/aws/lambda/greeter"),
            (LOG_STREAM_NAME_ENV, "2024/01/01/[$LATEST]abc"),
        ]))
        .unwrap();

        assert_eq!(config.runtime_api, "127.0.0.1:9001");
        assert_eq!(config.handler, "hello");
        assert_eq!(config.env.function_name, "greeter");
        assert_eq!(config.env.function_version, "$LATEST");
        assert_eq!(config.env.memory_size_mb, Some(128));
        assert_eq!(config.env.log_group_name, "/aws/lambda/greeter");
        assert_eq!(config.env.log_stream_name, "2024/01/01/[$LATEST]abc");
    }

    #[test]
    fn test_missing_runtime_api() {
        let err = RuntimeConfig::from_lookup(lookup_from(&[(HANDLER_ENV, "main.hello")]))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingEnv(RUNTIME_API_ENV)));
    }

    #[test]
    fn test_missing_handler() {
        let err = RuntimeConfig::from_lookup(lookup_from(&[(RUNTIME_API_ENV, "127.0.0.1:9001")]))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingEnv(HANDLER_ENV)));
    }

    #[test]
    fn test_handler_without_delimiter() {
        let err = RuntimeConfig::from_lookup(lookup_from(&[
            (RUNTIME_API_ENV, "127.0.0.1:9001"),
            (HANDLER_ENV, "hello"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidHandler(ref s) if s == "hello"));
    }

    #[test]
    fn test_handler_name_after_first_delimiter() {
        assert_eq!(parse_handler_name("main.hello").unwrap(), "hello");
        assert_eq!(parse_handler_name("pkg.mod.handler").unwrap(), "mod.handler");
        assert_eq!(parse_handler_name("main.").unwrap(), "");
    }

    #[test]
    fn test_function_env_defaults() {
        let env = FunctionEnv::from_lookup(|_| None);
        assert_eq!(env, FunctionEnv::default());

        let env = FunctionEnv::from_lookup(lookup_from(&[(FUNCTION_MEMORY_SIZE_ENV, "lots")]));
        assert_eq!(env.memory_size_mb, None);
    }
}
