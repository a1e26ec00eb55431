//! The event dispatcher: severity filtering, size-based splitting, and
//! the `sendMessage`/`sendDocument` calls.

use std::fmt;
use std::time::Duration;

use chrono::Local;

use crate::error::TgError;
use crate::formatter::format_message;
use crate::level::Level;
use crate::multipart::MultipartForm;
use crate::response::classify;
use crate::transport::{Transport, UreqTransport};

/// Default Bot API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rendered messages longer than this many code points are split.
const SPLIT_THRESHOLD: usize = 1100;
/// Code points of the rendered text kept in the inline excerpt.
const EXCERPT_LEN: usize = 1024;
/// Caption attached to the full-content document.
const DOCUMENT_CAPTION: &str = "full log";

/// Blocking Telegram log client.
///
/// Each emit call renders the event, applies the severity filter, and
/// performs at most two blocking HTTP round-trips. Rendered messages
/// longer than 1100 code points are delivered as an inline excerpt
/// followed by the full text as a file attachment.
///
/// The type holds plain mutable state (prefix, minimum level, last
/// rendered message) with no internal locking: it is single-owner by
/// construction. Share it across threads only behind external
/// synchronization; the `log-compat` bridge does exactly that.
pub struct TgLogger<T: Transport = UreqTransport> {
    token: String,
    chat_id: i64,
    base_url: String,
    timeout: Duration,
    prefix: String,
    level: Level,
    last_message: String,
    transport: T,
}

impl TgLogger<UreqTransport> {
    /// Create a client for `token` posting into `chat_id`.
    pub fn new(token: impl Into<String>, chat_id: i64) -> Self {
        Self::with_transport(token, chat_id, UreqTransport::new())
    }

    /// Create a client with a message prefix already set.
    pub fn with_prefix(
        token: impl Into<String>,
        chat_id: i64,
        prefix: impl Into<String>,
    ) -> Self {
        let mut logger = Self::new(token, chat_id);
        logger.set_prefix(prefix);
        logger
    }
}

impl<T: Transport> TgLogger<T> {
    /// Create a client delivering through a caller-supplied transport.
    pub fn with_transport(token: impl Into<String>, chat_id: i64, transport: T) -> Self {
        Self {
            token: token.into(),
            chat_id,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            prefix: String::new(),
            level: Level::Trace,
            last_message: String::new(),
            transport,
        }
    }

    /// Set the prefix prepended to every message as an italic label.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Set the minimum emitted level. Defaults to [`Level::Trace`],
    /// the most permissive threshold.
    pub fn set_level(&mut self, level: Level) -> &mut Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Override the per-request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Override the API base URL, e.g. for a self-hosted Bot API
    /// server or a test endpoint.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// The most recently rendered message. Suppressed calls leave the
    /// slot untouched.
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn panic(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Panic, msg, fields)
    }

    pub fn fatal(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Fatal, msg, fields)
    }

    pub fn error(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Error, msg, fields)
    }

    pub fn warn(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Warn, msg, fields)
    }

    pub fn info(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Info, msg, fields)
    }

    /// Alias for [`info`](Self::info).
    pub fn log(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Info, msg, fields)
    }

    pub fn debug(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Debug, msg, fields)
    }

    pub fn trace(&mut self, msg: &str, fields: &[(&str, &str)]) -> Result<String, TgError> {
        self.emit(Level::Trace, msg, fields)
    }

    /// Render and deliver one event at `level`.
    ///
    /// Returns the rendered text. A suppressed event returns an empty
    /// string without contacting the transport.
    ///
    /// # Errors
    ///
    /// Propagates the first delivery failure. Oversized messages make
    /// two transport calls (excerpt, then full attachment); the second
    /// is attempted even when the first fails, and the first error
    /// wins.
    pub fn emit(
        &mut self,
        level: Level,
        msg: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, TgError> {
        if !level.should_emit(self.level) {
            return Ok(String::new());
        }

        self.last_message = format_message(level, &self.prefix, msg, fields);
        let rendered = self.last_message.clone();

        if rendered.chars().count() > SPLIT_THRESHOLD {
            let excerpt: String = rendered
                .chars()
                .take(EXCERPT_LEN)
                .chain(std::iter::once('…'))
                .collect();
            let first = self.send_message(&excerpt);
            let second = self.send_document(rendered.clone().into_bytes());
            first.and(second)?;
        } else {
            self.send_message(&rendered)?;
        }

        Ok(rendered)
    }

    fn send_message(&self, text: &str) -> Result<(), TgError> {
        let form = MultipartForm::new()
            .text("chat_id", self.chat_id.to_string())
            .text("text", text)
            .text("parse_mode", "Markdown")
            .text("disable_web_page_preview", "true");
        self.call("sendMessage", &form)
    }

    fn send_document(&self, content: Vec<u8>) -> Result<(), TgError> {
        let name = format!("{}_full.log", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let form = MultipartForm::new()
            .text("chat_id", self.chat_id.to_string())
            .text("caption", DOCUMENT_CAPTION)
            .text("file_name", name.clone())
            .file("document", name, content);
        self.call("sendDocument", &form)
    }

    fn call(&self, method: &str, form: &MultipartForm) -> Result<(), TgError> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        let raw = self.transport.post_multipart(&url, form, self.timeout)?;
        classify(&raw)
    }
}

impl<T: Transport> fmt::Debug for TgLogger<T> {
    // Token is a credential; keep it out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TgLogger")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .field("prefix", &self.prefix)
            .field("level", &self.level)
            .field("timeout", &self.timeout)
            .finish()
    }
}
