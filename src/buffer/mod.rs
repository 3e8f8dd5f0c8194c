//! Buffer module: the styled-character grid writes are composited into.
//!
//! This module contains:
//! - [`Cell`]: one column of output, a styled grapheme or a wide-glyph continuation
//! - [`Buffer`]: a fixed-size grid of cells that serializes rows back to styled text

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use cell::{Cell, CellFlags};
pub use buffer::Buffer;
