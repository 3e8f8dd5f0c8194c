//! Compositor: records the operation log and replays it into a frame.

use std::sync::Arc;

use super::clip::{ClipStack, PendingWrite};
use super::operation::{LineTransformer, Operation, WriteOp};
use crate::ansi::styled_cells;
use crate::buffer::Buffer;
use crate::geometry::ClipRegion;
use crate::transform::{apply_pixel_transforms, TransformRegistry};

/// Configuration for a [`Compositor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositorConfig {
    /// Output width in columns.
    pub width: u16,
    /// Output height in rows.
    pub height: u16,
    /// Whether to strip trailing whitespace from each composited row.
    ///
    /// Turn off to get rows that are always `width` columns wide.
    pub trim_rows: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            trim_rows: true,
        }
    }
}

impl CompositorConfig {
    /// Set the output size (builder pattern).
    #[must_use]
    pub const fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set row trimming (builder pattern).
    #[must_use]
    pub const fn with_trim_rows(mut self, trim_rows: bool) -> Self {
        self.trim_rows = trim_rows;
        self
    }
}

/// The result of compositing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Composited rows joined by `\n`.
    pub output: String,
    /// Number of rows in the buffer, regardless of trailing blank rows.
    pub height: usize,
}

impl Frame {
    /// Iterate over the composited rows.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        // An empty frame has no rows, not one empty row
        let rows = if self.height == 0 { "" } else { self.output.as_str() };
        rows.split('\n').take(self.height)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.output)
    }
}

/// Screen compositor.
///
/// Callers log writes and clip directives in paint order; nothing is rendered
/// until [`Compositor::get`] replays the whole log against a blank buffer,
/// serializes it and runs the pixel-transform pass.
///
/// # Example
///
/// ```
/// use inkgrid::{ClipRegion, Compositor};
///
/// let mut compositor = Compositor::new(10, 2);
/// compositor.clip(ClipRegion::UNBOUNDED.with_columns(None, Some(4)));
/// compositor.write(0, 0, "Hello World", Vec::new());
/// compositor.unclip();
///
/// let frame = compositor.get();
/// assert_eq!(frame.output, "Hell\n");
/// assert_eq!(frame.height, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Compositor {
    config: CompositorConfig,
    operations: Vec<Operation>,
    transforms: TransformRegistry,
}

impl Compositor {
    /// Create a compositor with its own empty transform registry.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_registry(
            CompositorConfig::default().with_size(width, height),
            TransformRegistry::new(),
        )
    }

    /// Create a compositor that applies the transforms in `registry`.
    pub fn with_registry(config: CompositorConfig, registry: TransformRegistry) -> Self {
        Self {
            config,
            operations: Vec::new(),
            transforms: registry,
        }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Get the output width.
    pub const fn width(&self) -> u16 {
        self.config.width
    }

    /// Get the output height.
    pub const fn height(&self) -> u16 {
        self.config.height
    }

    /// The transform registry this compositor reads from.
    pub const fn transforms(&self) -> &TransformRegistry {
        &self.transforms
    }

    /// The operation log, in submission order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Log a write of `text` anchored at (x, y).
    ///
    /// Empty text is ignored. The write is clipped by whatever region is
    /// pushed (and not popped) at this point in the log.
    pub fn write(
        &mut self,
        x: i32,
        y: i32,
        text: impl Into<String>,
        transformers: Vec<LineTransformer>,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.operations.push(Operation::Write(WriteOp {
            x,
            y,
            text,
            transformers,
        }));
    }

    /// Log a write with a single line transformer.
    pub fn write_with<F>(&mut self, x: i32, y: i32, text: impl Into<String>, transformer: F)
    where
        F: Fn(&str, usize) -> String + Send + Sync + 'static,
    {
        self.write(x, y, text, vec![Arc::new(transformer)]);
    }

    /// Push a clip region for the writes that follow.
    pub fn clip(&mut self, region: ClipRegion) {
        self.operations.push(Operation::Clip(region));
    }

    /// Pop the most recently pushed clip region.
    ///
    /// Balance is the caller's responsibility; it is not checked here.
    pub fn unclip(&mut self) {
        self.operations.push(Operation::Unclip);
    }

    /// Drop every logged operation, keeping the size and registry.
    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Change the output size for subsequent frames.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.config = self.config.with_size(width, height);
    }

    /// Composite the logged operations into a frame.
    ///
    /// The log is left intact, so calling this twice yields the same frame
    /// (unless the transform registry changed in between).
    ///
    /// # Panics
    ///
    /// A panic inside a line transformer or pixel transform propagates to the
    /// caller.
    pub fn get(&self) -> Frame {
        let buffer = self.replay();
        let mut rows = buffer.render_rows(self.config.trim_rows);

        let transforms = self.transforms.snapshot();
        if !transforms.is_empty() {
            apply_pixel_transforms(&mut rows, &transforms);
        }

        Frame {
            output: rows.join("\n"),
            height: usize::from(buffer.height()),
        }
    }

    /// Replay the log against a blank buffer.
    fn replay(&self) -> Buffer {
        let mut buffer = Buffer::new(self.config.width, self.config.height);
        let mut clips = ClipStack::new();

        for operation in &self.operations {
            match operation {
                Operation::Clip(region) => clips.push(*region),
                Operation::Unclip => {
                    if clips.pop().is_none() {
                        log::warn!("unclip with no clip region pushed; ignoring");
                    }
                }
                Operation::Write(write) => paint(&mut buffer, clips.top(), write),
            }
        }

        if !clips.is_empty() {
            log::debug!("replay finished with {} clip region(s) still pushed", clips.depth());
        }
        buffer
    }
}

/// Clip one write, run its line transformers and paste it into the buffer.
fn paint(buffer: &mut Buffer, clip: Option<&ClipRegion>, write: &WriteOp) {
    let mut pending = PendingWrite::new(write.x, write.y, &write.text);
    if let Some(region) = clip {
        match pending.clip(region) {
            Some(clipped) => pending = clipped,
            None => {
                log::trace!("write at ({}, {}) is outside {region:?}; skipped", write.x, write.y);
                return;
            }
        }
    }

    let mut y = pending.y;
    for line in pending.lines {
        let mut text = line.text.into_owned();
        for transformer in &write.transformers {
            text = transformer(&text, line.index);
        }
        buffer.paste(pending.x, y, &styled_cells(&text));
        y = y.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PixelRange, Point};

    fn rows(compositor: &Compositor) -> Vec<String> {
        compositor.get().lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_empty_log() {
        let compositor = Compositor::new(10, 3);
        let frame = compositor.get();
        assert_eq!(frame.output, "\n\n");
        assert_eq!(frame.height, 3);
        assert_eq!(frame.lines().count(), 3);
    }

    #[test]
    fn test_zero_height() {
        let frame = Compositor::new(10, 0).get();
        assert_eq!(frame.output, "");
        assert_eq!(frame.height, 0);
        assert_eq!(frame.lines().count(), 0);
    }

    #[test]
    fn test_empty_write_is_ignored() {
        let mut compositor = Compositor::new(10, 1);
        compositor.write(0, 0, "", Vec::new());
        assert!(compositor.operations().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut compositor = Compositor::new(10, 1);
        compositor.write(0, 0, "A", Vec::new());
        compositor.write(0, 0, "B", Vec::new());
        assert_eq!(compositor.get().output, "B");
    }

    #[test]
    fn test_overlapping_writes() {
        let mut compositor = Compositor::new(10, 1);
        compositor.write(0, 0, "abcdef", Vec::new());
        compositor.write(2, 0, "XY", Vec::new());
        assert_eq!(compositor.get().output, "abXYef");
    }

    #[test]
    fn test_multiline_write() {
        let mut compositor = Compositor::new(10, 4);
        compositor.write(2, 1, "ab\ncd", Vec::new());
        assert_eq!(rows(&compositor), ["", "  ab", "  cd", ""]);
    }

    #[test]
    fn test_write_taller_than_buffer() {
        let mut compositor = Compositor::new(4, 2);
        compositor.write(0, -1, "a\nb\nc\nd", Vec::new());
        assert_eq!(rows(&compositor), ["b", "c"]);
    }

    #[test]
    fn test_clip_hides_outside_write() {
        let mut compositor = Compositor::new(10, 2);
        compositor.clip(ClipRegion::rect(0, 0, 3, 1));
        compositor.write(5, 0, "hidden", Vec::new());
        compositor.write(0, 1, "hidden", Vec::new());
        compositor.unclip();
        assert_eq!(compositor.get().output, "\n");
    }

    #[test]
    fn test_clip_replaces_rather_than_intersects() {
        let mut compositor = Compositor::new(10, 1);
        compositor.clip(ClipRegion::rect(0, 0, 2, 1));
        compositor.clip(ClipRegion::rect(0, 0, 6, 1));
        compositor.write(0, 0, "abcdefgh", Vec::new());
        compositor.unclip();
        compositor.write(0, 0, "z", Vec::new());
        compositor.unclip();
        assert_eq!(compositor.get().output, "zbcdef");
    }

    #[test]
    fn test_unbalanced_unclip_is_tolerated() {
        let mut compositor = Compositor::new(10, 1);
        compositor.unclip();
        compositor.clip(ClipRegion::rect(0, 0, 2, 1));
        compositor.write(0, 0, "abc", Vec::new());
        assert_eq!(compositor.get().output, "ab");
    }

    #[test]
    fn test_line_transformers_in_order_with_index() {
        let mut compositor = Compositor::new(12, 2);
        compositor.write(
            0,
            0,
            "ab\ncd",
            vec![
                Arc::new(|line: &str, index: usize| format!("{index}{line}")),
                Arc::new(|line: &str, _: usize| format!("[{line}]")),
            ],
        );
        assert_eq!(rows(&compositor), ["[0ab]", "[1cd]"]);
    }

    #[test]
    fn test_line_transformer_sees_original_index_after_clip() {
        let mut compositor = Compositor::new(12, 3);
        compositor.clip(ClipRegion::UNBOUNDED.with_rows(Some(1), None));
        compositor.write_with(0, 0, "a\nb\nc", |line, index| format!("{line}{index}"));
        compositor.unclip();
        assert_eq!(rows(&compositor), ["", "b1", "c2"]);
    }

    #[test]
    fn test_wide_glyph_overwritten_at_continuation() {
        let mut compositor = Compositor::new(10, 1);
        compositor.write(0, 0, "日本", Vec::new());
        compositor.write(1, 0, "x", Vec::new());
        assert_eq!(compositor.get().output, " x本");
    }

    #[test]
    fn test_pixel_transform_scenario() {
        let registry = TransformRegistry::new();
        let mut compositor =
            Compositor::with_registry(CompositorConfig::default().with_size(10, 1), registry.clone());
        compositor.write(0, 0, "Hello", Vec::new());
        registry.register(
            PixelRange::new(Point::new(1, 0), Point::new(3, 0)).unwrap(),
            |s| format!("[{}]", s.to_uppercase()),
        );

        assert_eq!(compositor.get().output, "H[ELo");
    }

    #[test]
    fn test_registry_changes_apply_to_next_get() {
        let mut compositor = Compositor::new(10, 1);
        compositor.write(0, 0, "abc", Vec::new());
        assert_eq!(compositor.get().output, "abc");

        let id = compositor
            .transforms()
            .register(PixelRange::point(Point::new(0, 0)), |s| s.to_uppercase());
        assert_eq!(compositor.get().output, "Abc");

        compositor.transforms().unregister(id);
        assert_eq!(compositor.get().output, "abc");
    }

    #[test]
    fn test_untrimmed_rows() {
        let config = CompositorConfig::default().with_size(4, 2).with_trim_rows(false);
        let mut compositor = Compositor::with_registry(config, TransformRegistry::new());
        compositor.write(0, 0, "ab", Vec::new());
        assert_eq!(compositor.get().output, "ab  \n    ");
    }

    #[test]
    fn test_clear_and_resize() {
        let mut compositor = Compositor::new(4, 1);
        compositor.write(0, 0, "abcdef", Vec::new());
        assert_eq!(compositor.get().output, "abcd");

        compositor.resize(6, 2);
        assert_eq!(compositor.get().output, "abcdef\n");

        compositor.clear();
        assert_eq!(compositor.get().output, "\n");
    }
}
