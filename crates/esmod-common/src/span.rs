//! Source location tracking.
//!
//! Spans are half-open byte ranges into a source file. Declarations handed to
//! the rewriter carry the span of the original node so diagnostics can point
//! back at the source; synthesized nodes use `Span::default()`.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into a source file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True for spans of synthesized nodes, which have no source location.
    pub const fn is_synthesized(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}
