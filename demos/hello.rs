//! Hello - typed handler example.
//!
//! Deploy the compiled binary as `bootstrap` in a custom-runtime function with
//! the handler setting `main.hello`.
//!
//! ```text
//! event:  {"name":"Ada"}
//! result: {"greeting":"Hello, Ada"}
//! ```

use lambda_bootstrap::{BoxError, Context, Runtime};
use serde::{Deserialize, Serialize};

/// Input event.
#[derive(Deserialize, Debug)]
struct Greet {
    name: String,
}

/// Handler result.
#[derive(Serialize, Debug)]
struct Greeting {
    greeting: String,
}

async fn hello(event: Greet, ctx: Context) -> Result<Greeting, BoxError> {
    tracing::info!(
        request_id = %ctx.request_id,
        remaining_ms = ?ctx.remaining_time().map(|d| d.as_millis()),
        "Greeting {}",
        event.name
    );

    Ok(Greeting {
        greeting: format!("Hello, {}", event.name),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    lambda_bootstrap::logging::init();

    Runtime::from_env()?
        .register("hello", hello)
        .run()
        .await?;

    Ok(())
}
