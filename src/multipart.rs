//! multipart/form-data encoding.
//!
//! The Bot API requires exact multipart framing with a matching
//! `Content-Length`; this module owns the byte layout so transports
//! and tests can rely on it. Parts serialize in insertion order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// Value of a single form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    /// Plain scalar value.
    Text(String),
    /// Binary blob transmitted as an attached file.
    File { filename: String, content: Vec<u8> },
}

/// Ordered collection of named multipart fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, Part)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), Part::Text(value.into())));
        self
    }

    /// Append a binary field carried as a named file.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push((
            name.into(),
            Part::File {
                filename: filename.into(),
                content: content.into(),
            },
        ));
        self
    }

    /// Fields in insertion order.
    pub fn parts(&self) -> &[(String, Part)] {
        &self.parts
    }

    /// Serialize to the multipart/form-data byte layout for `boundary`.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, part) in &self.parts {
            out.extend_from_slice(
                format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"")
                    .as_bytes(),
            );
            match part {
                Part::Text(value) => {
                    out.extend_from_slice(b"\r\n\r\n");
                    out.extend_from_slice(value.as_bytes());
                }
                Part::File { filename, content } => {
                    out.extend_from_slice(
                        format!(
                            "; filename=\"{filename}\"\r\nContent-Type: application/octet-stream"
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(b"\r\n\r\n");
                    out.extend_from_slice(content);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }
}

/// Generate a fresh per-request boundary.
///
/// Hashes a random value together with the wall clock at nanosecond
/// resolution, so collisions across requests are negligible.
pub fn random_boundary() -> String {
    let mut hasher = DefaultHasher::new();
    rand::random::<u128>().hash(&mut hasher);
    if let Ok(elapsed) = SystemTime::now().duration_since(UNIX_EPOCH) {
        elapsed.as_secs().hash(&mut hasher);
        elapsed.subsec_nanos().hash(&mut hasher);
    }
    format!("-------------{:016x}", hasher.finish())
}
