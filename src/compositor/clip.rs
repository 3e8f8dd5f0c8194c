//! Clip stack and the clipping of pending writes.
//!
//! Only the top of the stack is consulted. Regions are not intersected with
//! the ones below them: callers push absolute bounds that already account for
//! their ancestors.

use std::borrow::Cow;

use crate::ansi::{slice_columns, string_width};
use crate::geometry::ClipRegion;

/// Stack of clip regions, mutated while the operation log is replayed.
#[derive(Clone, Debug, Default)]
pub struct ClipStack {
    regions: Vec<ClipRegion>,
}

impl ClipStack {
    /// Create an empty stack (writes are unbounded).
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Push a region; it becomes the active one.
    pub fn push(&mut self, region: ClipRegion) {
        self.regions.push(region);
    }

    /// Pop the active region. Returns `None` if the stack was empty.
    pub fn pop(&mut self) -> Option<ClipRegion> {
        self.regions.pop()
    }

    /// The active region, if any.
    pub fn top(&self) -> Option<&ClipRegion> {
        self.regions.last()
    }

    /// Number of regions pushed.
    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    /// True if no region is active.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// One line of a write on its way into the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLine<'a> {
    /// Index of the line within the original write text.
    pub index: usize,
    /// The line, possibly sliced by clipping.
    pub text: Cow<'a, str>,
}

/// A write split into lines, positioned at its (possibly clamped) anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingWrite<'a> {
    /// Column of the first visible column.
    pub x: i32,
    /// Row of the first visible line.
    pub y: i32,
    /// Surviving lines, top to bottom.
    pub lines: Vec<PendingLine<'a>>,
}

impl<'a> PendingWrite<'a> {
    /// Split `text` into lines anchored at (x, y).
    pub fn new(x: i32, y: i32, text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(index, line)| PendingLine {
                index,
                text: Cow::Borrowed(line),
            })
            .collect();
        Self { x, y, lines }
    }

    /// Clip the write to `region`.
    ///
    /// Returns `None` when the write lies entirely outside the region, before
    /// any slicing is done. Otherwise lines are sliced to the visible columns
    /// (escape- and wide-glyph-safe), lines outside the visible rows are
    /// dropped, and the anchor is clamped to the region's top-left bounds.
    pub fn clip(mut self, region: &ClipRegion) -> Option<Self> {
        let x = i64::from(self.x);
        let y = i64::from(self.y);

        if region.clips_horizontally() {
            let width = to_i64(self.lines.iter().map(|l| string_width(&l.text)).max().unwrap_or(0));
            let left_of = region.x1.is_some_and(|x1| {
                let x1 = i64::from(x1);
                x < x1 && x + width <= x1
            });
            let right_of = region.x2.is_some_and(|x2| x >= i64::from(x2));
            if left_of || right_of {
                return None;
            }
        }

        if region.clips_vertically() {
            let height = to_i64(self.lines.len());
            let above = region.y1.is_some_and(|y1| y + height <= i64::from(y1));
            let below = region.y2.is_some_and(|y2| y >= i64::from(y2));
            if above || below {
                return None;
            }
        }

        if region.clips_horizontally() {
            for line in &mut self.lines {
                let width = to_i64(string_width(&line.text));
                let from = region.x1.map_or(0, |x1| (i64::from(x1) - x).max(0));
                let to = region.x2.map_or(width, |x2| (i64::from(x2) - x).min(width));
                if from > 0 || to < width {
                    let sliced = slice_columns(&line.text, to_usize(from), to_usize(to));
                    line.text = Cow::Owned(sliced);
                }
            }
            if let Some(x1) = region.x1 {
                self.x = self.x.max(x1);
            }
        }

        if region.clips_vertically() {
            let height = to_i64(self.lines.len());
            let from = region.y1.map_or(0, |y1| (i64::from(y1) - y).max(0));
            let to = region.y2.map_or(height, |y2| (i64::from(y2) - y).min(height));
            self.lines.truncate(to_usize(to));
            self.lines.drain(..to_usize(from).min(self.lines.len()));
            if let Some(y1) = region.y1 {
                self.y = self.y.max(y1);
            }
        }

        Some(self)
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(write: &PendingWrite<'_>) -> Vec<String> {
        write.lines.iter().map(|l| l.text.to_string()).collect()
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack = ClipStack::new();
        assert!(stack.top().is_none());
        stack.push(ClipRegion::rect(0, 0, 5, 5));
        stack.push(ClipRegion::rect(1, 1, 2, 2));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top(), Some(&ClipRegion::rect(1, 1, 2, 2)));
        stack.pop();
        assert_eq!(stack.top(), Some(&ClipRegion::rect(0, 0, 5, 5)));
        stack.pop();
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_clip_right_edge() {
        let clip = ClipRegion::UNBOUNDED.with_columns(None, Some(4));
        let write = PendingWrite::new(0, 0, "Hello World").clip(&clip).unwrap();
        assert_eq!(texts(&write), ["Hell"]);
        assert_eq!(write.x, 0);
    }

    #[test]
    fn test_clip_left_edge_clamps_anchor() {
        let clip = ClipRegion::UNBOUNDED.with_columns(Some(3), None);
        let write = PendingWrite::new(1, 0, "abcdef").clip(&clip).unwrap();
        assert_eq!(texts(&write), ["cdef"]);
        assert_eq!(write.x, 3);
    }

    #[test]
    fn test_clip_discards_outside_writes() {
        let clip = ClipRegion::rect(5, 5, 5, 5);
        assert!(PendingWrite::new(0, 5, "abcde").clip(&clip).is_none());
        assert!(PendingWrite::new(10, 5, "a").clip(&clip).is_none());
        assert!(PendingWrite::new(5, 3, "a\nb").clip(&clip).is_none());
        assert!(PendingWrite::new(5, 10, "a").clip(&clip).is_none());
        assert!(PendingWrite::new(0, 5, "abcdef").clip(&clip).is_some());
    }

    #[test]
    fn test_clip_rows() {
        let clip = ClipRegion::UNBOUNDED.with_rows(Some(1), Some(3));
        let write = PendingWrite::new(0, 0, "a\nb\nc\nd").clip(&clip).unwrap();
        assert_eq!(texts(&write), ["b", "c"]);
        assert_eq!(write.y, 1);
        assert_eq!(write.lines[0].index, 1);
    }

    #[test]
    fn test_clip_styled_line_stays_escape_safe() {
        let clip = ClipRegion::UNBOUNDED.with_columns(Some(2), Some(4));
        let write = PendingWrite::new(0, 0, "\x1b[32mgreen\x1b[39m").clip(&clip).unwrap();
        assert_eq!(texts(&write), ["\x1b[32mee\x1b[39m"]);
    }

    #[test]
    fn test_unclipped_lines_are_borrowed() {
        let clip = ClipRegion::rect(0, 0, 10, 10);
        let write = PendingWrite::new(0, 0, "fits").clip(&clip).unwrap();
        assert!(matches!(write.lines[0].text, Cow::Borrowed("fits")));
    }
}
