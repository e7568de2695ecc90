//! Renders a normalized [`Record`] to one styled, aligned, newline-free line.

use crate::model::Record;
use crate::options::HandlerOptions;
use crate::style::{Rgb, Styler};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Write;
use tabwriter::TabWriter;

const TIME_COLOR: Rgb = Rgb::new(99, 99, 99);
const MUTED_COLOR: Rgb = Rgb::new(190, 190, 190);
const DEBUG_COLOR: Rgb = Rgb::new(221, 28, 119);
const INFO_COLOR: Rgb = Rgb::new(20, 172, 190);
const WARN_COLOR: Rgb = Rgb::new(255, 245, 32);
const ERROR_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Produce the output line: timestamp, level block, message, then the
/// tab-separated field tokens, all passed through the column-aligning writer.
/// The diff state rotation stays with the caller.
pub(crate) fn render_line(
    record: &Record,
    last: &HashMap<String, String>,
    opts: &HandlerOptions,
    styler: &dyn Styler,
) -> Vec<u8> {
    let msg = if record.message.is_empty() {
        styler.fg("<no msg>", MUTED_COLOR)
    } else if opts.light_bg {
        styler.fg(&record.message, Rgb::new(0, 0, 0))
    } else {
        styler.fg(&record.message, Rgb::new(255, 255, 255))
    };

    let time = styler.fg(&format_time(&record.time, &opts.time_format), TIME_COLOR);
    let level = styled_level(&record.level, styler);
    let kvs = join_kvs(record, last, opts, styler);

    // Tab-delimiter contract: fields separated by '\t', one record per line,
    // flushed immediately so the caller gets finished bytes.
    let mut tw = TabWriter::new(Vec::new()).minwidth(0).padding(0);
    let _ = write!(tw, "{} |{}| {}\t {}", time, level, msg, kvs.join("\t "));
    let _ = tw.flush();
    tw.into_inner().unwrap_or_default()
}

/// Format the timestamp with the configured layout, falling back to RFC 3339
/// when the layout itself does not parse.
fn format_time(time: &DateTime<Utc>, layout: &str) -> String {
    use chrono::format::{Item, StrftimeItems};

    let items: Vec<Item> = StrftimeItems::new(layout).collect();
    if items.contains(&Item::Error) {
        return time.to_rfc3339();
    }
    time.format_with_items(items.into_iter()).to_string()
}

/// Abbreviate the level to at most four characters, upper-cased, and map it
/// to its hue. Fatal and panic invert to a background fill so they stand out;
/// unrecognized levels get the debug hue.
fn styled_level(level: &str, styler: &dyn Styler) -> String {
    let abbrev: String = level.to_uppercase().chars().take(4).collect();
    match level {
        "info" => styler.fg(&abbrev, INFO_COLOR),
        "warn" | "warning" => styler.fg(&abbrev, WARN_COLOR),
        "error" => styler.fg(&abbrev, ERROR_COLOR),
        "fatal" | "panic" => styler.bg(&abbrev, ERROR_COLOR),
        _ => styler.fg(&abbrev, DEBUG_COLOR),
    }
}

/// Select, truncate, colorize and sort the `key=value` tokens.
fn join_kvs(
    record: &Record,
    last: &HashMap<String, String>,
    opts: &HandlerOptions,
    styler: &dyn Styler,
) -> Vec<String> {
    let mut kvs = Vec::with_capacity(record.fields.len());
    for (key, value) in &record.fields {
        if !opts.should_show_key(key) {
            continue;
        }
        if opts.skip_unchanged
            && last.get(key) == Some(value)
            && !opts.should_show_unchanged(key)
        {
            continue;
        }

        let kstr = styler.fg(key, opts.key_color);
        let vstr = styler.fg(&truncate(value, opts), opts.value_color);
        kvs.push(format!("{kstr}={vstr}"));
    }

    kvs.sort();
    if opts.sort_longest {
        // Stable, so lexicographic order is the tie-break among equal lengths.
        kvs.sort_by_key(|kv| kv.len());
    }
    kvs
}

/// Clip an over-length value to exactly the configured limit and append the
/// ellipsis. Counted in characters so a multi-byte value cannot be split
/// mid-code-point.
fn truncate(value: &str, opts: &HandlerOptions) -> String {
    if !opts.truncates || value.chars().count() <= opts.truncate_length {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(opts.truncate_length).collect();
    clipped.push_str("...");
    clipped
}
