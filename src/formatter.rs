//! Rendering of log events into Telegram markdown text.
//!
//! Output targets Telegram's "Markdown" parse mode. Message text and
//! field values pass through verbatim: markdown metacharacters are not
//! escaped, matching the historical behavior this crate reproduces.
//! Callers needing literal backticks or underscores must escape them
//! themselves.

use crate::level::Level;

/// Render one event into the final message text.
///
/// Layout: `glyph SP text`, prepended with `_prefix:_ ` when a prefix
/// is set, followed by a fenced code block of `name: value` lines when
/// fields are present. Fields render in slice order.
pub fn format_message(level: Level, prefix: &str, text: &str, fields: &[(&str, &str)]) -> String {
    let mut message = format!("{} {}", level.glyph(), text);

    if !prefix.is_empty() {
        message = format!("_{prefix}:_ {message}");
    }

    if !fields.is_empty() {
        message.push_str("\n```\n");
        for (name, value) in fields {
            message.push_str(name);
            message.push_str(": ");
            message.push_str(value);
            message.push('\n');
        }
        message.push_str("```");
    }

    message
}
