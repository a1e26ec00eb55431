//! The JSON envelope wrapping every Bot API response.

use serde::Deserialize;

use crate::error::TgError;

/// Parsed response envelope.
///
/// Unknown fields (notably `result`) are ignored. A missing `ok` flag
/// deserializes as `false` and is treated as failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

/// Substituted when a failure envelope omits its description.
pub const UNKNOWN_DESCRIPTION: &str = "unknown description";

/// Parse a raw response body into success or a structured error.
///
/// # Errors
///
/// [`TgError::Protocol`] when the body is absent or not valid JSON;
/// [`TgError::Api`] when the service reports `ok` false or omits it.
pub fn classify(raw: &[u8]) -> Result<(), TgError> {
    let envelope: ApiEnvelope = serde_json::from_slice(raw).map_err(TgError::Protocol)?;
    if envelope.ok {
        return Ok(());
    }
    Err(TgError::Api {
        description: envelope
            .description
            .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_owned()),
        code: envelope.error_code,
    })
}
