//! `OutputBuffer`: Single-syscall output buffer for composited frames.

use std::io::Write;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Print, ResetColor},
    terminal::{Clear, ClearType},
};

use crate::compositor::Frame;
use crate::error::Result;

/// Pre-allocated buffer for building a frame's terminal output.
///
/// A frame is queued here row by row, then flushed in a single `write()`
/// syscall to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Queue a full repaint of `frame` anchored at the top-left corner.
    ///
    /// Each row is printed from column 0 and the remainder of the line is
    /// erased, so trimmed rows leave no stale text behind. Everything below
    /// the frame is erased too. The cursor is hidden while painting.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        queue!(self.data, Hide)?;
        let mut rows = 0u16;
        for line in frame.lines() {
            queue!(
                self.data,
                MoveTo(0, rows),
                Print(line),
                ResetColor,
                Clear(ClearType::UntilNewLine)
            )?;
            rows = rows.saturating_add(1);
        }
        queue!(self.data, MoveTo(0, rows), Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    /// Queue a cursor move to (x, y), 0-indexed.
    pub fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.data, MoveTo(x, y))?;
        Ok(())
    }

    /// Queue showing the cursor.
    pub fn show_cursor(&mut self) -> Result<()> {
        queue!(self.data, Show)?;
        Ok(())
    }

    /// Flush to a writer in a single syscall and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails; the queued bytes are
    /// kept so the caller may retry.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}
