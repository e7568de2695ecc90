use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// The normalized view of one input line.
///
/// A handler rebuilds its record on every accepted line: the well-known keys
/// are consumed into `level` / `time` / `message`, and every remaining
/// key/value pair lands in `fields` already rendered to its display string,
/// so the renderer never re-inspects value types.
///
/// `fields` never contains the reserved keys; [`Record::reset`] is the only
/// way long-lived state moves between lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Free-form level tag. [`crate::UNKNOWN_LEVEL`] when the line had none.
    pub level: String,
    /// Parsed timestamp. Unix epoch (the zero value) when the line had none.
    pub time: DateTime<Utc>,
    /// Human-readable message, empty when the line had none.
    pub message: String,
    /// Remaining keys, values pre-rendered to display strings.
    pub fields: HashMap<String, String>,
}

impl Record {
    /// Wipe the record for the next line and hand back the field map so the
    /// caller can rotate it into its diff state. Called unconditionally after
    /// every render, and after a failed parse (where it yields an empty map,
    /// resetting the diff baseline).
    pub fn reset(&mut self) -> HashMap<String, String> {
        self.level.clear();
        self.message.clear();
        self.time = DateTime::default();
        std::mem::take(&mut self.fields)
    }
}

/// Why a line was rejected. Every variant is local to a single line; the
/// caller recovers by moving on to the next line or the next handler.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field {field} is not a known timestamp: {value}")]
    AmbiguousTimestamp { field: &'static str, value: String },

    #[error("line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("non-UTF8 content")]
    NonUtf8,

    #[error("no key=value pairs found")]
    NoPairs,
}
