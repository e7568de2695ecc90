//! prettylog — turns streams of structured log lines into colorized,
//! column-aligned terminal output.
//!
//! One line of input produces at most one line of output. Each format gets a
//! [`LineHandler`]: a cheap structural probe followed by an all-or-nothing
//! normalization into a [`Record`], then a render pass that colorizes,
//! truncates, sorts and aligns the record's fields. Lines no handler accepts
//! are passed through verbatim by the [`scan`] loop.
//!
//! # Architecture
//!
//! - `model.rs`: the normalized [`Record`] and the [`ParseError`] taxonomy
//! - `traits.rs`: the [`LineHandler`] contract
//! - `formats/`: per-format handlers (JSON, logfmt)
//! - `fields.rs`: type-directed rendering of field values to display strings
//! - `render.rs`: colorizing, truncation, sorting and tab alignment
//! - `style.rs`: the [`Styler`] capability (truecolor or no-op)
//! - `scanner.rs`: the outer line-at-a-time read loop

pub mod fields;
pub mod formats;
pub mod model;
pub mod options;
pub mod scanner;
pub mod style;
pub mod time;
pub mod traits;

mod render;

pub use formats::json::JsonHandler;
pub use formats::logfmt::LogfmtHandler;
pub use model::{ParseError, Record};
pub use options::HandlerOptions;
pub use scanner::scan;
pub use style::{PlainStyler, Rgb, Styler, TermStyler};
pub use traits::LineHandler;

/// Lines larger than this are never parsed; the scanner passes them through
/// untouched.
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB

/// Sentinel shown when a line carries no recognizable level key.
pub const UNKNOWN_LEVEL: &str = "????";
