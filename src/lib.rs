//! # Inkgrid
//!
//! An ANSI-aware screen compositor for terminal UIs.
//!
//! Inkgrid turns a sequence of positioned, pre-styled text writes into the
//! final text of a terminal screen. It sits between a layout engine (which
//! decides where things go) and the terminal (which shows them).
//!
//! ## Core Concepts
//!
//! - **Operation log**: writes and clip directives are recorded in paint order
//!   and replayed in one pass when a frame is requested
//! - **Clip stack**: a pushed region bounds every write until it is popped
//! - **Styled cells**: each column holds one grapheme plus the SGR styles that
//!   were active for it, so overlapping writes never leak colours
//! - **Wide glyphs**: double-width characters occupy two columns and are never
//!   split in half
//! - **Pixel transforms**: post-compositing rewrites of rectangular regions,
//!   kept in a shared registry that components mount into and out of
//!
//! ## Example
//!
//! ```rust
//! use inkgrid::{ClipRegion, Compositor};
//!
//! let mut compositor = Compositor::new(20, 2);
//! compositor.write(0, 0, "\x1b[1mTitle\x1b[22m", Vec::new());
//! compositor.clip(ClipRegion::rect(0, 1, 4, 1));
//! compositor.write(0, 1, "clipped text", Vec::new());
//! compositor.unclip();
//!
//! let frame = compositor.get();
//! assert_eq!(frame.output, "\x1b[1mTitle\x1b[22m\nclip");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod ansi;
pub mod buffer;
pub mod compositor;
pub mod error;
pub mod geometry;
pub mod terminal;
pub mod transform;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, CellFlags};
pub use compositor::{Compositor, CompositorConfig, Frame, LineTransformer, Operation};
pub use error::{Error, Result};
pub use geometry::{ClipRegion, PixelRange, Point};
pub use terminal::OutputBuffer;
pub use transform::{PixelTransform, TransformId, TransformRegistry, TransformSlot};
