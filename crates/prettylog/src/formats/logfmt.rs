//! Handler for logfmt (`key=value`) lines.
//!
//! Structurally the same lifecycle as the JSON handler: probe, all-or-nothing
//! normalize, shared render. Values are re-rendered with the same display
//! policy as JSON values so both formats produce identical field tokens.

use crate::fields::display_scalar;
use crate::model::{ParseError, Record};
use crate::options::HandlerOptions;
use crate::render::render_line;
use crate::style::{Styler, TermStyler};
use crate::time::parse_timestamp;
use crate::traits::LineHandler;
use crate::{MAX_LINE_SIZE, UNKNOWN_LEVEL};
use chrono::DateTime;
use std::collections::HashMap;
use tracing::debug;

/// Stateful logfmt handler with its own diff state and scratch buffer.
pub struct LogfmtHandler {
    opts: HandlerOptions,
    styler: Box<dyn Styler>,
    record: Record,
    last: HashMap<String, String>,
    buf: Vec<u8>,
}

impl LogfmtHandler {
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

    fn normalize(&mut self, line: &[u8]) -> Result<(), ParseError> {
        if line.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(line.len(), MAX_LINE_SIZE));
        }
        let text = std::str::from_utf8(line).map_err(|_| ParseError::NonUtf8)?;

        let mut found = 0usize;
        for (key, value) in pairs(text) {
            found += 1;
            match key.as_str() {
                "time" | "ts" => match parse_logfmt_timestamp(&value) {
                    Some(t) => self.record.time = t,
                    None => {
                        return Err(ParseError::AmbiguousTimestamp {
                            field: if key == "time" { "time" } else { "ts" },
                            value,
                        })
                    }
                },
                "msg" | "message" => self.record.message = value,
                "level" | "lvl" => self.record.level = value,
                _ => {
                    self.record.fields.insert(key, display_scalar(&value));
                }
            }
        }

        if found == 0 {
            return Err(ParseError::NoPairs);
        }
        if self.record.level.is_empty() {
            self.record.level = UNKNOWN_LEVEL.to_string();
        }
        Ok(())
    }
}

impl LineHandler for LogfmtHandler {
    fn try_handle(&mut self, line: &[u8]) -> bool {
        if !line.contains(&b'=') {
            return false;
        }
        match self.normalize(line) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "logfmt line rejected");
                // drop any fields scanned before the error; nothing from a
                // rejected line may become the diff baseline
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

/// String layouts first, then bare Unix seconds (integer or fractional).
fn parse_logfmt_timestamp(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Some(t) = parse_timestamp(value) {
        return Some(t);
    }
    if let Ok(secs) = value.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(f) = value.parse::<f64>() {
        let secs = f.trunc() as i64;
        let nanos = ((f - secs as f64).abs() * 1e9) as u32;
        return DateTime::from_timestamp(secs, nanos);
    }
    None
}

/// Scan `key=value` pairs. Values may be double-quoted with backslash
/// escapes; bare tokens without `=` are skipped.
fn pairs(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut it = text.chars().peekable();

    loop {
        while it.peek().is_some_and(|c| c.is_whitespace()) {
            it.next();
        }
        if it.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(&c) = it.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            key.push(c);
            it.next();
        }

        if it.peek() != Some(&'=') {
            continue; // bare token, no value
        }
        it.next();

        let value = if it.peek() == Some(&'"') {
            it.next();
            let mut v = String::new();
            let mut escaped = false;
            for c in it.by_ref() {
                if escaped {
                    v.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    break;
                } else {
                    v.push(c);
                }
            }
            v
        } else {
            let mut v = String::new();
            while let Some(&c) = it.peek() {
                if c.is_whitespace() {
                    break;
                }
                v.push(c);
                it.next();
            }
            v
        };

        if !key.is_empty() {
            out.push((key, value));
        }
    }

    out
}
