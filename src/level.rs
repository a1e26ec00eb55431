//! Severity levels and their display glyphs.

use std::fmt;
use std::str::FromStr;

/// Ordered severity levels, most severe first.
///
/// The derived `Ord` follows declaration order, so `Panic < Trace`:
/// a smaller level is more severe and less verbose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Panic,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Glyph substituted for raw level values outside the known range.
pub const UNKNOWN_GLYPH: &str = "⁉";

impl Level {
    /// Display glyph prepended to every rendered message.
    pub const fn glyph(self) -> &'static str {
        match self {
            Level::Panic => "🆘",
            Level::Fatal => "❌",
            Level::Error => "❗",
            Level::Warn => "⚠",
            Level::Info => "🗒",
            Level::Debug => "📝",
            Level::Trace => "📜",
        }
    }

    /// Map a raw numeric rank back to a level, if it names one.
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Panic),
            1 => Some(Self::Fatal),
            2 => Some(Self::Error),
            3 => Some(Self::Warn),
            4 => Some(Self::Info),
            5 => Some(Self::Debug),
            6 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Glyph for a raw rank, falling back to [`UNKNOWN_GLYPH`] for
    /// ranks no current level maps to.
    pub fn glyph_for_rank(rank: u8) -> &'static str {
        Self::from_rank(rank).map(Self::glyph).unwrap_or(UNKNOWN_GLYPH)
    }

    /// Whether an event at this level passes a configured minimum.
    ///
    /// An event is emitted iff its rank does not exceed the threshold:
    /// `Error` passes a minimum of `Info`, `Debug` does not pass a
    /// minimum of `Warn`.
    pub fn should_emit(self, minimum: Level) -> bool {
        self <= minimum
    }
}

/// The most permissive level, matching a fresh client's threshold.
impl Default for Level {
    fn default() -> Self {
        Self::Trace
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        f.write_str(s)
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PANIC" => Ok(Self::Panic),
            "FATAL" => Ok(Self::Fatal),
            "ERROR" => Ok(Self::Error),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            "TRACE" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}
