//! Handler for one-JSON-object-per-line structured logs.

use crate::fields::display_value;
use crate::model::{ParseError, Record};
use crate::options::HandlerOptions;
use crate::render::render_line;
use crate::style::{Styler, TermStyler};
use crate::time::parse_timestamp;
use crate::traits::LineHandler;
use crate::{MAX_LINE_SIZE, UNKNOWN_LEVEL};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Stateful JSON handler: one `try_handle` / `prettify` pair per line.
///
/// Owns its diff state (the previous line's field map) and a scratch output
/// buffer, so independent pipelines just construct independent handlers.
pub struct JsonHandler {
    opts: HandlerOptions,
    styler: Box<dyn Styler>,
    record: Record,
    last: HashMap<String, String>,
    buf: Vec<u8>,
}

impl JsonHandler {
    pub fn new(opts: HandlerOptions) -> Self {
        Self::with_styler(opts, Box::new(TermStyler))
    }

    /// Construct with an explicit styler (tests pass a no-op one).
    pub fn with_styler(opts: HandlerOptions, styler: Box<dyn Styler>) -> Self {
        Self {
            opts,
            styler,
            record: Record::default(),
            last: HashMap::new(),
            buf: Vec::new(),
        }
    }

    /// Cheap structural probe: without a recognizable timestamp key marker
    /// there is no point attempting a full parse. A passing probe is not a
    /// guarantee of valid JSON.
    fn probe(line: &[u8]) -> bool {
        contains(line, br#""time":"#) || contains(line, br#""ts":"#)
    }

    fn normalize(&mut self, line: &[u8]) -> Result<(), ParseError> {
        if line.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(line.len(), MAX_LINE_SIZE));
        }
        let mut raw: Map<String, Value> = serde_json::from_slice(line)?;

        if let Some((field, value)) = extract_string(&mut raw, "time")
            .map(|v| ("time", v))
            .or_else(|| extract_string(&mut raw, "ts").map(|v| ("ts", v)))
        {
            match parse_timestamp(&value) {
                Some(t) => self.record.time = t,
                None => return Err(ParseError::AmbiguousTimestamp { field, value }),
            }
        } else if let Some(n) = extract_number(&mut raw, "ts") {
            self.record.time = if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0).unwrap_or_default()
            } else {
                let f = n.as_f64().unwrap_or_default();
                let secs = f.trunc() as i64;
                let nanos = ((f - secs as f64).abs() * 1e9) as u32;
                DateTime::from_timestamp(secs, nanos).unwrap_or_default()
            };
        }

        if let Some(msg) = extract_string(&mut raw, "msg")
            .or_else(|| extract_string(&mut raw, "message"))
        {
            self.record.message = msg;
        }

        self.record.level = extract_string(&mut raw, "level")
            .or_else(|| extract_string(&mut raw, "lvl"))
            .unwrap_or_else(|| UNKNOWN_LEVEL.to_string());

        for (key, value) in raw {
            self.record.fields.insert(key, display_value(&value));
        }

        Ok(())
    }
}

impl LineHandler for JsonHandler {
    fn try_handle(&mut self, line: &[u8]) -> bool {
        if !Self::probe(line) {
            return false;
        }
        match self.normalize(line) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "json line rejected");
                // discard partial state; the diff baseline resets to empty
                self.record.reset();
                self.last.clear();
                false
            }
        }
    }

    fn prettify(&mut self) -> &[u8] {
        self.buf = render_line(&self.record, &self.last, &self.opts, self.styler.as_ref());
        self.last = self.record.reset();
        &self.buf
    }
}

/// Remove and return the value under `key` only when it is a string.
fn extract_string(raw: &mut Map<String, Value>, key: &str) -> Option<String> {
    if matches!(raw.get(key), Some(Value::String(_))) {
        if let Some(Value::String(s)) = raw.remove(key) {
            return Some(s);
        }
    }
    None
}

/// Remove and return the value under `key` only when it is a number.
fn extract_number(raw: &mut Map<String, Value>, key: &str) -> Option<serde_json::Number> {
    if matches!(raw.get(key), Some(Value::Number(_))) {
        if let Some(Value::Number(n)) = raw.remove(key) {
            return Some(n);
        }
    }
    None
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
