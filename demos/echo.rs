//! Echo - raw JSON-object handler example.
//!
//! Returns the event unchanged, plus the request id. Deploy with the handler
//! setting `main.echo`. Runs without `#[tokio::main]`: the runtime builds its
//! own current-thread executor.

use lambda_bootstrap::Runtime;
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    lambda_bootstrap::logging::init();

    Runtime::from_env()?
        .register_raw("echo", |mut event, ctx| async move {
            event.insert("requestId".to_string(), Value::from(ctx.request_id));
            Ok(event)
        })
        .run_blocking()?;

    Ok(())
}
