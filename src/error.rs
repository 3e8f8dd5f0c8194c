//! Error type for the fallible edges of the crate.
//!
//! Compositing itself never fails: out-of-bounds writes are dropped and an
//! unbalanced clip log is tolerated. Errors only come from constructing
//! invalid geometry and from writing frames to a terminal.

use crate::geometry::Point;

/// Errors returned by inkgrid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing or flushing terminal output failed.
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),

    /// A pixel range ends before it starts (in row-major order).
    #[error("pixel range ends at {end:?}, before its start {start:?}")]
    InvertedRange {
        /// Requested start point.
        start: Point,
        /// Requested end point.
        end: Point,
    },
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
