//! Bridge from the standard `log` facade into a [`TgLogger`].
//!
//! `log::Log` takes `&self` and must be `Sync`, so the bridge wraps
//! the client in a mutex. The facade has no error channel; delivery
//! failures are discarded here, unlike the direct client API.

use log::{Log, Metadata, Record};
use parking_lot::Mutex;

use crate::client::TgLogger;
use crate::level::Level;
use crate::transport::{Transport, UreqTransport};

/// `log::Log` implementation forwarding records to Telegram.
///
/// `log::Level` has no counterparts for `Panic` and `Fatal`; the five
/// facade levels map to their same-named [`Level`]s. The record target
/// is forwarded as a `target` field.
pub struct TgLogBridge<T: Transport = UreqTransport> {
    inner: Mutex<TgLogger<T>>,
}

impl<T: Transport> TgLogBridge<T> {
    pub fn new(logger: TgLogger<T>) -> Self {
        Self {
            inner: Mutex::new(logger),
        }
    }

    /// Consume the bridge and recover the wrapped client.
    pub fn into_inner(self) -> TgLogger<T> {
        self.inner.into_inner()
    }
}

impl<T: Transport + Send + 'static> TgLogBridge<T> {
    /// Install the bridge as the process-wide `log` logger.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

impl<T: Transport + Send> Log for TgLogBridge<T> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        map_level(metadata.level()).should_emit(self.inner.lock().level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let fields = [("target", record.target())];
        // The facade cannot report failures.
        let _ = self
            .inner
            .lock()
            .emit(map_level(record.level()), &message, &fields);
    }

    fn flush(&self) {}
}
