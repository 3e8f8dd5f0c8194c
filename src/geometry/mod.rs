//! Geometry primitives shared by the compositor and the pixel-transform pass.
//!
//! There is no layout here: positions arrive already computed. These types
//! only describe where a write may land ([`ClipRegion`]) and which cells a
//! pixel transform rewrites ([`PixelRange`]).

mod clip;
mod point;

pub use clip::ClipRegion;
pub use point::{PixelRange, Point};
