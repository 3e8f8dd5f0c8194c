//! Column slicing of styled text.
//!
//! Slices are taken by visual column, never by byte or char index. Escape
//! sequences are never split: styles active at the start of a slice are
//! re-opened at its beginning and closed at its end, so every slice is
//! self-contained. A wide glyph that only partially overlaps the requested
//! span is replaced by spaces for the columns that do overlap, so a slice is
//! always exactly as wide as the part of the span the text covers.

use super::style::{transition, StyleCode, StyleState};
use super::token::{Token, Tokens};
use super::width::grapheme_width;

/// Slice `text` to the visual columns `[start, end)`.
pub fn slice_columns(text: &str, start: usize, end: usize) -> String {
    let mut out = String::new();
    if end <= start {
        return out;
    }

    let mut state = StyleState::new();
    // Styles currently opened in `out`
    let mut emitted: Vec<StyleCode> = Vec::new();
    let mut col = 0usize;

    for token in Tokens::new(text) {
        if col >= end {
            break;
        }

        match token {
            Token::Escape(escape) => {
                if !state.apply(escape) && col >= start {
                    out.push_str(escape);
                }
            }
            Token::Grapheme(grapheme) => {
                let width = grapheme_width(grapheme);
                let next = col + width;

                if col >= start && next <= end {
                    sync_styles(&mut emitted, state.active(), &mut out);
                    out.push_str(grapheme);
                } else if next > start {
                    // Wide glyph straddling an edge of the span
                    sync_styles(&mut emitted, state.active(), &mut out);
                    for _ in col.max(start)..next.min(end) {
                        out.push(' ');
                    }
                }

                col = next;
            }
        }
    }

    transition(&emitted, &[], &mut out);
    out
}

fn sync_styles(emitted: &mut Vec<StyleCode>, active: &[StyleCode], out: &mut String) {
    if emitted.as_slice() != active {
        transition(emitted, active, out);
        emitted.clear();
        emitted.extend_from_slice(active);
    }
}

/// Truncate `text` to at most `width` columns.
#[inline]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    slice_columns(text, 0, width)
}

/// Fit `text` to exactly `width` columns: truncate if wider, pad with plain
/// spaces if narrower.
pub fn pad_to_width(text: String, width: usize) -> String {
    let current = super::string_width(&text);
    if current > width {
        return truncate_to_width(&text, width);
    }

    let mut text = text;
    text.extend(std::iter::repeat(' ').take(width - current));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{string_width, strip_ansi};

    #[test]
    fn test_slice_plain() {
        assert_eq!(slice_columns("Hello World", 0, 4), "Hell");
        assert_eq!(slice_columns("Hello World", 6, 11), "World");
        assert_eq!(slice_columns("Hello", 3, 100), "lo");
        assert_eq!(slice_columns("Hello", 4, 2), "");
        assert_eq!(slice_columns("Hello", 10, 20), "");
    }

    #[test]
    fn test_slice_reopens_and_closes_styles() {
        let text = "\x1b[31mHello\x1b[39m World";
        assert_eq!(slice_columns(text, 1, 3), "\x1b[31mel\x1b[39m");
        assert_eq!(slice_columns(text, 3, 8), "\x1b[31mlo\x1b[39m Wo");
    }

    #[test]
    fn test_slice_never_splits_escape() {
        let text = "\x1b[38;2;10;20;30mabc\x1b[0mdef";
        for start in 0..6 {
            for end in start..7 {
                let slice = slice_columns(text, start, end);
                assert_eq!(string_width(&slice), end.min(6) - start.min(end.min(6)));
                assert!(!strip_ansi(&slice).contains('\x1b'));
            }
        }
    }

    #[test]
    fn test_slice_wide_glyph_edges() {
        // 日 occupies columns 1-2, 本 columns 3-4
        let text = "a日本b";
        assert_eq!(slice_columns(text, 0, 3), "a日");
        assert_eq!(slice_columns(text, 0, 2), "a ");
        assert_eq!(slice_columns(text, 2, 5), " 本");
        assert_eq!(slice_columns(text, 2, 4), "  ");
    }

    #[test]
    fn test_slice_keeps_non_style_escapes_in_range() {
        let text = "ab\x1b[2Kcd";
        assert_eq!(slice_columns(text, 1, 3), "b\x1b[2Kc");
        assert_eq!(slice_columns(text, 3, 4), "d");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab".to_string(), 4), "ab  ");
        assert_eq!(pad_to_width("abcdef".to_string(), 3), "abc");
        assert_eq!(pad_to_width("日本".to_string(), 3), "日 ");
    }
}
