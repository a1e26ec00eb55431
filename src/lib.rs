//! Leveled log emitter delivering formatted events to a Telegram chat.
//!
//! [`TgLogger`] renders each event (severity glyph, optional prefix,
//! message text, structured fields) into Telegram "Markdown" parse mode
//! and posts it to the Bot API with a blocking multipart request.
//! Oversized messages are split into an inline excerpt plus a full-text
//! file attachment.
//!
//! Delivery is fire-and-forget per call: failures surface synchronously
//! as a [`TgError`] and are never retried, queued, or buffered.
//!
//! # Markdown escaping
//!
//! Message text and field values are injected into the markdown output
//! verbatim. Metacharacters such as backticks and underscores are *not*
//! escaped; this matches the historical behavior the crate reproduces.
//!
//! # Concurrency
//!
//! The client is synchronous and single-owner: setters take `&mut self`
//! and there is no internal locking. To drive it from the standard
//! `log` macros across threads, use [`TgLogBridge`] (feature
//! `log-compat`, on by default), which wraps the client in a mutex.

mod client;
mod error;
mod formatter;
mod level;
mod multipart;
mod response;
mod transport;

#[cfg(feature = "log-compat")]
mod log_compat;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TgLogger};
pub use error::TgError;
pub use formatter::format_message;
pub use level::{Level, UNKNOWN_GLYPH};
#[cfg(feature = "log-compat")]
pub use log_compat::TgLogBridge;
pub use multipart::{MultipartForm, Part, random_boundary};
pub use response::{ApiEnvelope, UNKNOWN_DESCRIPTION, classify};
pub use transport::{Transport, TransportError, UreqTransport};
