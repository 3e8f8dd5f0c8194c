//! Cell: one terminal column of composited output.
//!
//! A cell is either a styled character (a grapheme cluster, its display width
//! and the styles active on it) or the continuation marker occupying the
//! second column of a double-width glyph. Continuation cells render as
//! nothing; the glyph before them already covers their column.
//!
//! ```text
//!  column:   0     1     2     3
//!          ┌─────┬─────┬─────┬─────┐
//!          │ "a" │ "日"│ ◌   │ "b" │   ◌ = WIDE_CONTINUATION
//!          │ w=1 │ w=2 │ w=0 │ w=1 │
//!          └─────┴─────┴─────┴─────┘
//! ```
//!
//! Styles are shared behind an `Arc`, so a run of characters written with the
//! same styles holds a single allocation.

use bitflags::bitflags;
use std::borrow::Cow;
use std::sync::Arc;

use crate::ansi::StyleCode;

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// This cell is a continuation of a wide character
        const WIDE_CONTINUATION = 0b0000_0001;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single composited cell.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Grapheme to display (empty for continuation cells).
    grapheme: Cow<'static, str>,
    /// Display width of the grapheme (0=continuation, 1=normal, 2=wide CJK).
    display_width: u8,
    /// Active styles, `None` when unstyled.
    styles: Option<Arc<[StyleCode]>>,
    /// Cell flags.
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (unstyled space).
    pub const EMPTY: Self = Self {
        grapheme: Cow::Borrowed(" "),
        display_width: 1,
        styles: None,
        flags: CellFlags::empty(),
    };

    /// Create an unstyled cell from a single character.
    pub fn from_char(c: char) -> Self {
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0).min(2);
        Self {
            grapheme: Cow::Owned(c.to_string()),
            display_width: width_u8(width),
            styles: None,
            flags: CellFlags::empty(),
        }
    }

    /// Create a styled cell from a grapheme cluster of known display width.
    pub fn styled(grapheme: &str, display_width: usize, styles: Option<Arc<[StyleCode]>>) -> Self {
        let grapheme = if grapheme == " " {
            Cow::Borrowed(" ")
        } else {
            Cow::Owned(grapheme.to_owned())
        };
        Self {
            grapheme,
            display_width: width_u8(display_width),
            styles,
            flags: CellFlags::empty(),
        }
    }

    /// A space carrying the given styles.
    ///
    /// Used in place of a wide glyph that lost one of its halves, so a
    /// background colour survives.
    pub fn blank(styles: Option<Arc<[StyleCode]>>) -> Self {
        Self {
            grapheme: Cow::Borrowed(" "),
            display_width: 1,
            styles,
            flags: CellFlags::empty(),
        }
    }

    /// Create a wide-character continuation cell.
    ///
    /// This is placed after a wide CJK character that takes 2 columns.
    #[inline]
    pub const fn wide_continuation() -> Self {
        Self {
            grapheme: Cow::Borrowed(""),
            display_width: 0,
            styles: None,
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// The grapheme to display (empty for continuation cells).
    #[inline]
    pub fn grapheme(&self) -> &str {
        &self.grapheme
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Check if this cell starts a double-width glyph.
    #[inline]
    pub const fn is_wide(&self) -> bool {
        self.display_width == 2
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Active styles, in opening order.
    #[inline]
    pub fn styles(&self) -> &[StyleCode] {
        self.styles.as_deref().unwrap_or(&[])
    }

    /// Shared handle to the active styles.
    #[inline]
    pub const fn shared_styles(&self) -> Option<&Arc<[StyleCode]>> {
        self.styles.as_ref()
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Set the styles (builder pattern).
    #[inline]
    #[must_use]
    pub fn with_styles(mut self, styles: Option<Arc<[StyleCode]>>) -> Self {
        self.styles = styles;
        self
    }

    /// Reset the cell to empty (unstyled space).
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn width_u8(width: usize) -> u8 {
    if width > 2 {
        2
    } else {
        width as u8
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("grapheme", &self.grapheme())
            .field("width", &self.display_width)
            .field("styles", &self.styles().len())
            .field("flags", &self.flags)
            .finish()
    }
}
