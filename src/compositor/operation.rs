//! Operation log entries.

use std::sync::Arc;

use crate::geometry::ClipRegion;

/// A line-rewriting function applied to each line of a write before it is
/// composited.
///
/// It receives the (already clipped) line and the line's 0-based index within
/// the write's text, and returns the replacement line. Used for decoration
/// that depends on layout, such as borders or wrapping.
pub type LineTransformer = Arc<dyn Fn(&str, usize) -> String + Send + Sync>;

/// A positioned text write.
#[derive(Clone)]
pub struct WriteOp {
    /// Column of the top-left anchor (may be negative or past the edge).
    pub x: i32,
    /// Row of the top-left anchor (may be negative or past the edge).
    pub y: i32,
    /// Styled text; each `\n`-separated line lands on the next row.
    pub text: String,
    /// Line rewriters, applied in order.
    pub transformers: Vec<LineTransformer>,
}

impl std::fmt::Debug for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteOp")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("text", &self.text)
            .field("transformers", &self.transformers.len())
            .finish()
    }
}

/// One directive in the compositor's operation log.
///
/// Operations replay in submission order: a write is clipped by whichever
/// region was most recently pushed and not yet popped when it was logged,
/// and later writes paint over earlier ones.
#[derive(Clone, Debug)]
pub enum Operation {
    /// Paint text at a position.
    Write(WriteOp),
    /// Push a clip region; it replaces (does not intersect) the current one.
    Clip(ClipRegion),
    /// Pop the most recently pushed clip region.
    Unclip,
}
