//! HTTP implementation of the Runtime API client.
//!
//! # Example
//!
//! ```ignore
//! use lambda_bootstrap::transport::{HttpRuntimeApi, RuntimeApi};
//!
//! let api = HttpRuntimeApi::new("127.0.0.1:9001")?;
//! let invocation = api.next_invocation().await?;
//! ```

use bytes::Bytes;
use reqwest::{Client, Response};

use super::RuntimeApi;
use crate::error::{Result, RuntimeError};
use crate::handler::BoxFuture;
use crate::protocol::{base_url, error_url, next_url, response_url, Invocation, InvocationError};

/// User agent sent on every Runtime API call.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Runtime API client over HTTP.
///
/// Addresses given with an `https://` scheme go through rustls.
///
/// The client sets no request timeout: the next-invocation call is a long
/// poll and the platform owns every deadline.
#[derive(Debug, Clone)]
pub struct HttpRuntimeApi {
    client: Client,
    base: String,
}

impl HttpRuntimeApi {
    /// Create a client for the given Runtime API address (`host:port`, or a
    /// full `http://`/`https://` base URL).
    pub fn new(runtime_api: &str) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, runtime_api))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, runtime_api: &str) -> Self {
        Self {
            client,
            base: base_url(runtime_api),
        }
    }

    /// Get the base URL.
    pub fn base(&self) -> &str {
        &self.base
    }

    async fn fetch_next(&self) -> Result<Invocation> {
        let url = next_url(&self.base);
        let response = check_status(self.client.get(&url).send().await?)?;

        let headers = response.headers().clone();
        let event = response.bytes().await?;

        tracing::debug!(bytes = event.len(), "Fetched next invocation");
        Ok(Invocation::new(event, headers))
    }

    async fn send_response(&self, request_id: &str, body: Bytes) -> Result<()> {
        let url = response_url(&self.base, request_id);
        check_status(self.client.post(&url).body(body).send().await?)?;
        Ok(())
    }

    async fn send_error(&self, request_id: &str, error: &InvocationError) -> Result<()> {
        let url = error_url(&self.base, request_id);
        check_status(self.client.post(&url).json(error).send().await?)?;
        Ok(())
    }
}

impl RuntimeApi for HttpRuntimeApi {
    fn next_invocation(&self) -> BoxFuture<'_, Result<Invocation>> {
        Box::pin(self.fetch_next())
    }

    fn post_response<'a>(&'a self, request_id: &'a str, body: Bytes) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.send_response(request_id, body))
    }

    fn post_error<'a>(
        &'a self,
        request_id: &'a str,
        error: &'a InvocationError,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.send_error(request_id, error))
    }
}

/// Map non-2xx responses to [`RuntimeError::Status`].
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RuntimeError::Status {
            url: response.url().to_string(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;

    #[test]
    fn test_base_from_bare_address() {
        let api = HttpRuntimeApi::new("127.0.0.1:9001").unwrap();
        assert_eq!(api.base(), "http://127.0.0.1:9001");
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("lambda-bootstrap/"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpRuntimeApi::new(&addr.to_string()).unwrap();
        let err = api.next_invocation().await.unwrap_err();
        assert!(matches!(err, RuntimeError::Transport(_)));
    }

    #[tokio::test]
    async fn test_https_address_starts_tls_handshake() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut first = [0u8; 1];
            socket.read_exact(&mut first).await.unwrap();
            first[0]
        });

        let api = HttpRuntimeApi::new(&format!("https://{}", addr)).unwrap();
        assert_eq!(api.base(), format!("https://{}", addr));

        // The server hangs up after one byte, so the fetch itself fails.
        let err = api.next_invocation().await.unwrap_err();
        assert!(matches!(err, RuntimeError::Transport(_)));

        let first = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("client never connected")
            .unwrap();
        // TLS handshake record type
        assert_eq!(first, 0x16);
    }
}
