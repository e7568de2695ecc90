//! Rendering options, constructed once by the CLI and read-only afterwards.

use crate::style::Rgb;
use std::collections::HashSet;

/// Everything the renderer is allowed to vary on. The skip/keep lists are
/// mutually exclusive at the CLI; the core only ever consumes them through
/// [`HandlerOptions::should_show_key`] and
/// [`HandlerOptions::should_show_unchanged`].
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Keys to drop from the output. Ignored when `keep` is non-empty.
    pub skip: HashSet<String>,
    /// Keys to show exclusively, even when their value is unchanged.
    pub keep: HashSet<String>,
    /// Output time layout, strftime syntax.
    pub time_format: String,
    /// Clip over-length values.
    pub truncates: bool,
    /// Maximum rendered value length (characters) before clipping.
    pub truncate_length: usize,
    /// After the lexicographic sort, stably re-sort tokens by length.
    pub sort_longest: bool,
    /// Suppress fields whose value is unchanged from the previous line.
    pub skip_unchanged: bool,
    /// Use black as the base message color (light terminal backgrounds).
    pub light_bg: bool,
    /// Field key color.
    pub key_color: Rgb,
    /// Field value color.
    pub value_color: Rgb,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            skip: HashSet::new(),
            keep: HashSet::new(),
            time_format: "%b %e %H:%M:%S".to_string(),
            truncates: true,
            truncate_length: 15,
            sort_longest: true,
            skip_unchanged: true,
            light_bg: false,
            key_color: Rgb::new(30, 130, 110),
            value_color: Rgb::new(125, 125, 125),
        }
    }
}

impl HandlerOptions {
    /// Key-visibility predicate: keep-list wins over skip-list.
    pub fn should_show_key(&self, key: &str) -> bool {
        if !self.keep.is_empty() {
            return self.keep.contains(key);
        }
        if !self.skip.is_empty() {
            return !self.skip.contains(key);
        }
        true
    }

    /// Unchanged-visibility override: only kept keys force their way past
    /// the skip-unchanged suppression.
    pub fn should_show_unchanged(&self, key: &str) -> bool {
        if !self.keep.is_empty() {
            return self.keep.contains(key);
        }
        false
    }
}
