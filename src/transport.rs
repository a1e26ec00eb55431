//! HTTP transport seam.
//!
//! The dispatcher reaches the Bot API through the [`Transport`] trait:
//! one method, post a multipart form and hand back the raw response
//! bytes. [`UreqTransport`] is the production implementation; tests
//! substitute their own.

use std::io::Read;
use std::time::Duration;

use thiserror::Error;
use ureq::{Agent, AgentBuilder};

use crate::multipart::{MultipartForm, random_boundary};

/// Errors raised before a usable response body exists.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("status code {status} {body}")]
    Status { status: u16, body: String },

    /// The configured timeout elapsed before the call completed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Network, DNS, or TLS failure reaching the endpoint.
    #[error("network error: {0}")]
    Network(String),
}

/// Capability to deliver one multipart POST and return the body.
pub trait Transport {
    /// Post `form` to `url`, bounded by `timeout`.
    ///
    /// Returns the raw response body on any 2xx status.
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network/TLS failure, timeout, or a
    /// non-2xx status (which carries the status and body).
    fn post_multipart(
        &self,
        url: &str,
        form: &MultipartForm,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError>;
}

/// Blocking transport backed by a pooled [`ureq::Agent`].
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post_multipart(
        &self,
        url: &str,
        form: &MultipartForm,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError> {
        let boundary = random_boundary();
        let body = form.encode(&boundary);
        let content_type = format!("multipart/form-data; boundary={boundary}");

        let result = self
            .agent
            .post(url)
            .timeout(timeout)
            .set("Content-Type", &content_type)
            .send_bytes(&body);

        match result {
            Ok(response) => read_body(response),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(TransportError::Status { status, body })
            }
            Err(ureq::Error::Transport(err)) => Err(map_transport_error(err, timeout)),
        }
    }
}

fn read_body(response: ureq::Response) -> Result<Vec<u8>, TransportError> {
    let mut buf = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut buf)
        .map_err(|err| TransportError::Network(err.to_string()))?;
    Ok(buf)
}

/// ureq reports timeouts as generic transport errors; pick them out so
/// callers can tell a slow endpoint from an unreachable one.
fn map_transport_error(err: ureq::Transport, timeout: Duration) -> TransportError {
    let message = err.to_string();
    if message.contains("timed out") || message.contains("timeout") {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Network(message)
    }
}
