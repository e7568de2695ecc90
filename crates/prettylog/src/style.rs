//! Terminal styling as a substitutable capability.
//!
//! The renderer never emits escape codes itself; it asks a [`Styler`] for
//! styled text. Production code uses [`TermStyler`] (truecolor via `colored`,
//! which honors `NO_COLOR` and tty detection); tests use [`PlainStyler`] so
//! they can assert on plain text content.

use colored::Colorize;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pure text-in, styled-text-out. Implementations must be side-effect-free.
pub trait Styler {
    /// Style `text` with `color` as the foreground.
    fn fg(&self, text: &str, color: Rgb) -> String;

    /// Style `text` with `color` as the background (inverted emphasis).
    fn bg(&self, text: &str, color: Rgb) -> String;
}

/// Truecolor ANSI styling.
pub struct TermStyler;

impl Styler for TermStyler {
    fn fg(&self, text: &str, color: Rgb) -> String {
        text.truecolor(color.r, color.g, color.b).to_string()
    }

    fn bg(&self, text: &str, color: Rgb) -> String {
        text.on_truecolor(color.r, color.g, color.b).to_string()
    }
}

/// Identity styler: returns the text unchanged.
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn fg(&self, text: &str, _color: Rgb) -> String {
        text.to_string()
    }

    fn bg(&self, text: &str, _color: Rgb) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styler_is_identity() {
        let styler = PlainStyler;
        assert_eq!(styler.fg("hello", Rgb::new(255, 0, 0)), "hello");
        assert_eq!(styler.bg("hello", Rgb::new(255, 0, 0)), "hello");
    }

    #[test]
    fn test_term_styler_preserves_text() {
        // Whether or not escape codes are emitted depends on the environment;
        // the text itself must survive either way.
        let styler = TermStyler;
        assert!(styler.fg("payload", Rgb::new(20, 172, 190)).contains("payload"));
        assert!(styler.bg("payload", Rgb::new(255, 0, 0)).contains("payload"));
    }
}
