//! Point and PixelRange: cell coordinates for pixel transforms.

use crate::error::{Error, Result};

/// A cell position (column, row) in composited output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column, 0-indexed.
    pub x: usize,
    /// Row, 0-indexed.
    pub y: usize,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True if `self` comes before `other` in row-major order.
    #[inline]
    const fn precedes(self, other: Self) -> bool {
        self.y < other.y || (self.y == other.y && self.x < other.x)
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Point {
    #[inline]
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// An inclusive range of cells in reading order, from `start` to `end`.
///
/// On a single row it covers columns `start.x..=end.x`. Across rows it covers
/// the tail of the first row from `start.x`, every row in between, and the
/// head of the last row up to `end.x`, like a text selection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PixelRange {
    start: Point,
    end: Point,
}

impl PixelRange {
    /// Create a range from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvertedRange`] if `end` precedes `start`.
    pub fn new(start: Point, end: Point) -> Result<Self> {
        if end.precedes(start) {
            return Err(Error::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single cell.
    #[inline]
    pub const fn point(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// First cell of the range.
    #[inline]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// Last cell of the range (inclusive).
    #[inline]
    pub const fn end(&self) -> Point {
        self.end
    }

    /// True if the range covers exactly one row.
    #[inline]
    pub const fn is_single_row(&self) -> bool {
        self.start.y == self.end.y
    }

    /// Inclusive column span this range covers on `row`, given the row's
    /// visual width. Returns `None` if the row is outside the range or the
    /// span is empty after clamping to the row.
    pub fn span_on_row(&self, row: usize, row_width: usize) -> Option<(usize, usize)> {
        if row < self.start.y || row > self.end.y || row_width == 0 {
            return None;
        }

        let last = row_width - 1;
        let (from, to) = if self.is_single_row() {
            (self.start.x, self.end.x)
        } else if row == self.start.y {
            (self.start.x, last)
        } else if row == self.end.y {
            (0, self.end.x)
        } else {
            (0, last)
        };

        let to = to.min(last);
        (from <= to).then_some((from, to))
    }
}

impl From<Point> for PixelRange {
    #[inline]
    fn from(point: Point) -> Self {
        Self::point(point)
    }
}
