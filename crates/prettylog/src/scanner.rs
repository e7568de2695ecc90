//! Outer read loop: one raw line in, at most one pretty line out.

use crate::formats::{json::JsonHandler, logfmt::LogfmtHandler};
use crate::options::HandlerOptions;
use crate::traits::LineHandler;
use std::io::{BufRead, Write};
use tracing::trace;

/// Read `reader` line by line, try the JSON handler then the logfmt handler,
/// and pass anything neither accepts through verbatim. The newline is
/// appended here; handlers produce newline-free bytes. Output is flushed per
/// line so the prettified stream tails correctly.
pub fn scan<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    opts: &HandlerOptions,
) -> std::io::Result<()> {
    let mut json = JsonHandler::new(opts.clone());
    let mut logfmt = LogfmtHandler::new(opts.clone());
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }

        if json.try_handle(&line) {
            writer.write_all(json.prettify())?;
        } else if logfmt.try_handle(&line) {
            writer.write_all(logfmt.prettify())?;
        } else {
            trace!(len = line.len(), "line passed through unhandled");
            writer.write_all(&line)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &[u8]) -> Vec<u8> {
        // keep escape codes out of the assertions regardless of environment
        colored::control::set_override(false);
        let mut out = Vec::new();
        scan(Cursor::new(input), &mut out, &HandlerOptions::default()).unwrap();
        out
    }

    #[test]
    fn test_unhandled_lines_pass_through_verbatim() {
        let out = run(b"plain text line\n");
        assert_eq!(out, b"plain text line\n");
    }

    #[test]
    fn test_non_utf8_passes_through_verbatim() {
        let out = run(b"\xff\xfe binary\n");
        assert_eq!(out, b"\xff\xfe binary\n");
    }

    #[test]
    fn test_json_line_gets_prettified() {
        let out = run(b"{\"time\":\"2024-01-01T00:00:00Z\",\"level\":\"info\",\"msg\":\"started\",\"count\":3}\n");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("INFO"));
        assert!(text.contains("started"));
        assert!(text.contains("count=3"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_logfmt_line_gets_prettified() {
        let out = run(b"level=error msg=boom code=500\n");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ERRO"));
        assert!(text.contains("boom"));
        assert!(text.contains("code=500"));
    }

    #[test]
    fn test_mixed_input_keeps_one_line_per_line() {
        let input = b"plain\n{\"ts\":1,\"msg\":\"a\"}\nlevel=info msg=b\n";
        let out = run(input);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.lines().next(), Some("plain"));
    }

    #[test]
    fn test_last_line_without_newline_still_rendered() {
        let out = run(b"no trailing newline");
        assert_eq!(out, b"no trailing newline\n");
    }

    #[test]
    fn test_crlf_stripped_before_dispatch() {
        let out = run(b"plain\r\n");
        assert_eq!(out, b"plain\n");
    }
}
