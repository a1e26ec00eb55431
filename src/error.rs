//! Error taxonomy for delivery failures.

use thiserror::Error;

use crate::transport::TransportError;

/// Failure of a single emit call.
///
/// Errors are surfaced synchronously to the caller and never retried
/// or logged by the crate itself.
#[derive(Debug, Error)]
pub enum TgError {
    /// The request never produced a usable response: network or TLS
    /// failure, timeout, or a non-2xx HTTP status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was absent or not a valid API envelope.
    #[error("telegram: response is not a valid API envelope: {0}")]
    Protocol(#[source] serde_json::Error),

    /// The service accepted the request and explicitly rejected it.
    #[error("telegram: {description} ({})", code_label(.code))]
    Api {
        description: String,
        /// Numeric `error_code` from the envelope, when present.
        code: Option<i64>,
    },
}

fn code_label(code: &Option<i64>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "???".to_owned(),
    }
}
