//! Per-format line handlers. Each format pairs a cheap structural probe with
//! an all-or-nothing normalizer; both share the renderer and options.

pub mod json;
pub mod logfmt;
