//! Pixel transforms: post-compositing rewrites of rectangular text regions.
//!
//! - [`TransformRegistry`]: shared, registration-ordered set of transforms
//! - [`TransformSlot`]: owns one registration across renders
//! - [`apply_pixel_transforms`]: the pass run once per composited frame

mod pass;
mod registry;
mod slot;

pub use pass::apply_pixel_transforms;
pub use registry::{PixelTransform, PixelTransformFn, TransformId, TransformRegistry};
pub use slot::TransformSlot;
