/// A line handler owns the full normalize → render lifecycle for one input
/// format, including the one-generation diff state used to suppress unchanged
/// fields. Exactly one `try_handle` / `prettify` call pair per accepted line.
///
/// Handlers are stateful and must not be shared across concurrent callers:
/// the diff baseline and scratch buffer are mutated in place on every call.
pub trait LineHandler {
    /// Try to normalize one raw line (newline already stripped). `false`
    /// means the line was not recognized and another handler (or verbatim
    /// passthrough) should take it. A `false` return never leaves partial
    /// state behind.
    fn try_handle(&mut self, line: &[u8]) -> bool;

    /// Render the line accepted by the last `try_handle` as a single styled,
    /// newline-free byte sequence, then rotate the diff state forward and
    /// reset the working record. The caller appends its own line terminator.
    fn prettify(&mut self) -> &[u8];
}
