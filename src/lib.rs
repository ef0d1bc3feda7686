//! # lambda-bootstrap
//!
//! Custom runtime for the Lambda Runtime API.
//!
//! The crate runs as the `bootstrap` process of a function. It polls the
//! platform's local control endpoint for invocations, hands each event to a
//! registered handler and posts the result (or the error) back.
//!
//! ## Architecture
//!
//! - **Control** (environment): Runtime API address, handler name, function
//!   metadata, trace id export
//! - **Transport** (HTTP): next invocation, response, error
//! - **Runtime**: strictly sequential fetch → dispatch → report loop
//!
//! ## Example
//!
//! ```ignore
//! use lambda_bootstrap::Runtime;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct Greet { name: String }
//!
//! #[derive(Serialize)]
//! struct Greeting { greeting: String }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     lambda_bootstrap::logging::init();
//!
//!     Runtime::from_env()?
//!         .register("hello", |event: Greet, _ctx| async move {
//!             Ok(Greeting { greeting: format!("Hello, {}", event.name) })
//!         })
//!         .run()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod control;
pub mod error;
pub mod handler;
pub mod logging;
pub mod protocol;
pub mod transport;

mod runtime;

pub use error::{BoxError, HandlerError, RuntimeError};
pub use handler::Context;
pub use runtime::Runtime;
