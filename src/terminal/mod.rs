//! Terminal output: getting a composited [`Frame`](crate::Frame) onto a screen.

mod output;

pub use output::OutputBuffer;
