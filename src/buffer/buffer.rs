//! Buffer: a fixed-size grid of styled cells.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::Cell;
use crate::ansi::{transition, StyleCode};

/// A grid of styled cells.
///
/// The buffer stores cells in a contiguous `Vec` for cache efficiency.
/// Access is in row-major order: `index = y * width + x`.
///
/// # Wide glyphs
///
/// A double-width glyph occupies its own cell plus a continuation cell to its
/// right. The pair is kept consistent: overwriting either half turns the
/// surviving half into a space, so columns after it never shift.
#[derive(Clone)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (unstyled space). A zero-sized
    /// buffer is valid and simply drops every write.
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x < usize::from(self.width) && y < usize::from(self.height) {
            Some(y * usize::from(self.width) + x)
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Get one row of cells.
    ///
    /// Returns `None` if the row is out of bounds.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= usize::from(self.height) {
            return None;
        }
        let width = usize::from(self.width);
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..usize::from(self.height)).filter_map(move |y| self.row(y))
    }

    /// Set a cell at (x, y), keeping wide glyph pairs consistent.
    ///
    /// A wide cell also claims (x+1, y) as its continuation. A wide cell that
    /// does not fit before the right edge is written as a space instead.
    ///
    /// Returns `false` if coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };

        let cell = if cell.is_wide() && self.index_of(x + 1, y).is_none() {
            Cell::blank(cell.shared_styles().cloned())
        } else {
            cell
        };

        self.release(x, y);
        if cell.is_wide() {
            self.release(x + 1, y);
            self.cells[idx + 1] = Cell::wide_continuation();
        }
        self.cells[idx] = cell;
        true
    }

    /// Detach the cell at (x, y) from any wide glyph it is half of, turning
    /// the other half into a space.
    fn release(&mut self, x: usize, y: usize) {
        let Some(idx) = self.index_of(x, y) else {
            return;
        };

        if self.cells[idx].is_wide_continuation() {
            if x > 0 && self.cells[idx - 1].is_wide() {
                let styles = self.cells[idx - 1].shared_styles().cloned();
                self.cells[idx - 1] = Cell::blank(styles);
            }
        } else if self.cells[idx].is_wide() {
            if let Some(next) = self.index_of(x + 1, y) {
                if self.cells[next].is_wide_continuation() {
                    let styles = self.cells[idx].shared_styles().cloned();
                    self.cells[next] = Cell::blank(styles);
                }
            }
        }
    }

    /// Paste a run of styled cells starting at (x, y).
    ///
    /// Coordinates may be negative or past the edges: cells left of column 0
    /// or right of the last column are dropped, as is a row outside the
    /// buffer. A wide glyph cut by the left edge leaves a space in column 0.
    ///
    /// Returns the number of cells written.
    pub fn paste(&mut self, x: i32, y: i32, cells: &[Cell]) -> usize {
        let Ok(row) = usize::try_from(y) else {
            return 0;
        };
        if row >= usize::from(self.height) {
            return 0;
        }

        let width = i64::from(self.width);
        let mut col = i64::from(x);
        let mut written = 0;

        for cell in cells {
            let start = col;
            col += i64::from(cell.display_width());

            if start >= width {
                break;
            }
            match usize::try_from(start) {
                Ok(start) => {
                    self.set(start, row, cell.clone());
                    written += 1;
                }
                Err(_) if col > 0 => {
                    // Right half of a wide glyph sticking out of column 0
                    self.set(0, row, Cell::blank(cell.shared_styles().cloned()));
                    written += 1;
                }
                Err(_) => {}
            }
        }

        written
    }

    /// Serialize one row to text with the escapes of each cell's styles.
    ///
    /// Styles are opened and closed only where they change between adjacent
    /// cells, and everything still open is closed at the end of the row.
    /// With `trim`, trailing whitespace is removed; styled trailing blanks
    /// survive because their closing escapes follow them.
    pub fn render_row(&self, y: usize, trim: bool) -> String {
        let Some(row) = self.row(y) else {
            return String::new();
        };

        let mut out = String::with_capacity(row.len());
        let mut current: &[StyleCode] = &[];

        for cell in row {
            if cell.is_wide_continuation() {
                continue;
            }
            if cell.styles() != current {
                transition(current, cell.styles(), &mut out);
                current = cell.styles();
            }
            out.push_str(cell.grapheme());
        }
        transition(current, &[], &mut out);

        if trim {
            let len = out.trim_end().len();
            out.truncate(len);
        }
        out
    }

    /// Serialize every row, top to bottom.
    pub fn render_rows(&self, trim: bool) -> Vec<String> {
        (0..usize::from(self.height))
            .map(|y| self.render_row(y, trim))
            .collect()
    }

    /// Clear the entire buffer (fill with empty cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::styled_cells;

    fn text(buffer: &Buffer, y: usize) -> String {
        buffer.render_row(y, true)
    }

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.len(), 80 * 24);
    }

    #[test]
    fn test_buffer_zero_sized() {
        let mut buffer = Buffer::new(0, 3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.paste(0, 0, &styled_cells("abc")), 0);
        assert_eq!(buffer.render_rows(true), ["", "", ""]);
    }

    #[test]
    fn test_buffer_bounds() {
        let buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
    }

    #[test]
    fn test_buffer_paste_clips_edges() {
        let mut buffer = Buffer::new(5, 2);
        buffer.paste(-2, 0, &styled_cells("abcdefg"));
        assert_eq!(text(&buffer, 0), "cdefg");

        buffer.paste(3, 1, &styled_cells("xyz"));
        assert_eq!(text(&buffer, 1), "   xy");

        assert_eq!(buffer.paste(0, -1, &styled_cells("no")), 0);
        assert_eq!(buffer.paste(0, 2, &styled_cells("no")), 0);
    }

    #[test]
    fn test_buffer_wide_glyph_occupies_two_columns() {
        let mut buffer = Buffer::new(6, 1);
        buffer.paste(1, 0, &styled_cells("日x"));

        assert_eq!(buffer.get(1, 0).unwrap().grapheme(), "日");
        assert!(buffer.get(2, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.get(3, 0).unwrap().grapheme(), "x");
        assert_eq!(text(&buffer, 0), " 日x");
    }

    #[test]
    fn test_buffer_overwrite_continuation_blanks_lead() {
        let mut buffer = Buffer::new(6, 1);
        buffer.paste(0, 0, &styled_cells("日本"));
        buffer.paste(1, 0, &styled_cells("x"));

        assert_eq!(buffer.get(0, 0).unwrap().grapheme(), " ");
        assert_eq!(buffer.get(1, 0).unwrap().grapheme(), "x");
        assert_eq!(buffer.get(2, 0).unwrap().grapheme(), "本");
        assert_eq!(text(&buffer, 0), " x本");
    }

    #[test]
    fn test_buffer_overwrite_lead_blanks_continuation() {
        let mut buffer = Buffer::new(6, 1);
        buffer.paste(0, 0, &styled_cells("日"));
        buffer.paste(0, 0, &styled_cells("a"));

        assert_eq!(buffer.get(1, 0).unwrap().grapheme(), " ");
        assert!(!buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(text(&buffer, 0), "a");
    }

    #[test]
    fn test_buffer_wide_glyph_at_edges() {
        let mut buffer = Buffer::new(3, 1);
        buffer.paste(2, 0, &styled_cells("日"));
        assert_eq!(buffer.get(2, 0).unwrap().grapheme(), " ");

        buffer.paste(-1, 0, &styled_cells("日ab"));
        assert_eq!(text(&buffer, 0), " ab");
    }

    #[test]
    fn test_buffer_render_row_styles() {
        let mut buffer = Buffer::new(8, 1);
        buffer.paste(0, 0, &styled_cells("\x1b[31mab\x1b[39mc"));
        assert_eq!(text(&buffer, 0), "\x1b[31mab\x1b[39mc");
    }

    #[test]
    fn test_buffer_render_row_keeps_styled_trailing_blanks() {
        let mut buffer = Buffer::new(8, 1);
        buffer.paste(0, 0, &styled_cells("a\x1b[44m  \x1b[49m"));
        assert_eq!(text(&buffer, 0), "a\x1b[44m  \x1b[49m");
        assert_eq!(buffer.render_row(0, false), "a\x1b[44m  \x1b[49m     ");
    }

    #[test]
    fn test_buffer_clear() {
        let mut buffer = Buffer::new(4, 1);
        buffer.paste(0, 0, &styled_cells("abcd"));
        buffer.clear();
        assert_eq!(buffer.get(2, 0), Some(&Cell::EMPTY));
    }
}
