//! `Transport` implementation backed by ureq.
//!
//! # Design
//! ureq is a blocking client, so each call is moved onto the blocking pool
//! of the current tokio runtime and awaited from there. Polled outside a
//! tokio runtime, calls fail with `TransportError::Network` instead of
//! panicking. The agent is built with
//! `http_status_as_error(false)` so 4xx/5xx responses come back as data and
//! status interpretation happens in `check_status`, keeping the response body
//! available for the error.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::error::TransportError;
use crate::transport::{Transport, TransportResponse};
use crate::types::{RequestOptions, UserPayload, UserRecord};

/// HTTP transport over a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /// A transport with no agent-wide timeout.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A transport whose requests time out after `timeout` unless a call
    /// supplies its own `RequestOptions::timeout`.
    pub fn with_default_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        debug!(method = "GET", url, timeout = ?options.timeout, "sending request");
        let agent = self.agent.clone();
        let url = url.to_string();
        let timeout = options.timeout;
        run_blocking(move || {
            let request = agent.get(&url);
            let result = match timeout {
                Some(t) => request.config().timeout_global(Some(t)).build().call(),
                None => request.call(),
            };
            result.map_err(map_ureq_error).and_then(into_response)
        })
        .await
    }

    async fn post(
        &self,
        url: &str,
        body: &UserPayload,
    ) -> Result<TransportResponse, TransportError> {
        debug!(method = "POST", url, "sending request");
        let body = serde_json::to_string(body).map_err(|e| TransportError::Encode(e.to_string()))?;
        let agent = self.agent.clone();
        let url = url.to_string();
        run_blocking(move || {
            agent
                .post(&url)
                .content_type("application/json")
                .send(body.as_bytes())
                .map_err(map_ureq_error)
                .and_then(into_response)
        })
        .await
    }
}

async fn run_blocking<F>(call: F) -> Result<TransportResponse, TransportError>
where
    F: FnOnce() -> Result<TransportResponse, TransportError> + Send + 'static,
{
    blocking_handle()?
        .spawn_blocking(call)
        .await
        .map_err(|e| TransportError::Network(format!("transport task failed: {e}")))?
}

fn blocking_handle() -> Result<Handle, TransportError> {
    Handle::try_current().map_err(|e| TransportError::Network(format!("no tokio runtime: {e}")))
}

fn into_response(mut response: Response<Body>) -> Result<TransportResponse, TransportError> {
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(map_ureq_error)?;
    check_status(status, &body)?;
    let data = parse_record(&body)?;
    Ok(TransportResponse { status, data })
}

/// Map non-2xx status codes to `TransportError::Status`.
fn check_status(status: u16, body: &str) -> Result<(), TransportError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(TransportError::Status {
        status,
        body: body.to_string(),
    })
}

fn parse_record(body: &str) -> Result<UserRecord, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
        ureq::Error::Io(ref e) if e.kind() == io::ErrorKind::TimedOut => {
            TransportError::Timeout(err.to_string())
        }
        other => TransportError::Network(other.to_string()),
    }
}
