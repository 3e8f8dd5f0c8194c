//! Compositor module: the operation log and its replay.
//!
//! Writes and clip directives are appended to an ordered log. A single
//! [`Compositor::get`] replays the log against a blank [`Buffer`], honouring
//! the clip stack, serializes the rows and runs the pixel-transform pass.
//!
//! ```text
//!  write/clip/unclip ──▶ Vec<Operation> ──get()──▶ replay ──▶ Buffer
//!                                                               │
//!                            Frame ◀── pixel transforms ◀── rows (String)
//! ```
//!
//! [`Buffer`]: crate::buffer::Buffer

mod clip;
#[allow(clippy::module_inception)]
mod compositor;
mod operation;

pub use clip::{ClipStack, PendingLine, PendingWrite};
pub use compositor::{Compositor, CompositorConfig, Frame};
pub use operation::{LineTransformer, Operation, WriteOp};
