//! ClipRegion: a rectangle that may be open on any side.

/// A rectangular region outside of which writes are invisible.
///
/// `x1`/`y1` are inclusive, `x2`/`y2` exclusive. A missing bound leaves
/// that side unbounded. Coordinates are absolute buffer positions and may be
/// negative.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClipRegion {
    /// Leftmost visible column.
    pub x1: Option<i32>,
    /// First column past the right edge.
    pub x2: Option<i32>,
    /// Topmost visible row.
    pub y1: Option<i32>,
    /// First row past the bottom edge.
    pub y2: Option<i32>,
}

impl ClipRegion {
    /// A region with no bounds at all.
    pub const UNBOUNDED: Self = Self {
        x1: None,
        x2: None,
        y1: None,
        y2: None,
    };

    /// A fully bounded region of `width` x `height` cells at (x, y).
    #[inline]
    pub const fn rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: Some(x),
            x2: Some(x.saturating_add(width)),
            y1: Some(y),
            y2: Some(y.saturating_add(height)),
        }
    }

    /// Set the horizontal bounds (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_columns(mut self, x1: Option<i32>, x2: Option<i32>) -> Self {
        self.x1 = x1;
        self.x2 = x2;
        self
    }

    /// Set the vertical bounds (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_rows(mut self, y1: Option<i32>, y2: Option<i32>) -> Self {
        self.y1 = y1;
        self.y2 = y2;
        self
    }

    /// True if any horizontal bound is set.
    #[inline]
    pub const fn clips_horizontally(&self) -> bool {
        self.x1.is_some() || self.x2.is_some()
    }

    /// True if any vertical bound is set.
    #[inline]
    pub const fn clips_vertically(&self) -> bool {
        self.y1.is_some() || self.y2.is_some()
    }
}

impl std::fmt::Debug for ClipRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn bound(b: Option<i32>) -> String {
            b.map_or_else(|| "_".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "Clip(x {}..{}, y {}..{})",
            bound(self.x1),
            bound(self.x2),
            bound(self.y1),
            bound(self.y2)
        )
    }
}
