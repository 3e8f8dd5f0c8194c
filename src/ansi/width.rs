//! Visual width measurement of styled text.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use super::sequence::ESC;
use super::token::{Token, Tokens};

/// Display width of a single grapheme cluster in terminal columns (0, 1 or 2).
///
/// Control characters are zero-width.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.chars().next().is_some_and(char::is_control) {
        return 0;
    }
    grapheme.width().min(2)
}

/// Display width of a string, ignoring escape sequences.
///
/// Newlines count as zero columns; use [`widest_line`] for multi-line text.
pub fn string_width(text: &str) -> usize {
    if text.is_ascii() && !text.as_bytes().contains(&ESC) {
        return text.bytes().filter(|b| !b.is_ascii_control()).count();
    }

    Tokens::new(text)
        .map(|token| match token {
            Token::Grapheme(g) => grapheme_width(g),
            Token::Escape(_) => 0,
        })
        .sum()
}

/// Width of the widest line in a multi-line string.
pub fn widest_line(text: &str) -> usize {
    text.split('\n').map(string_width).max().unwrap_or(0)
}

/// Remove every escape sequence from a string.
///
/// Returns `Cow::Borrowed` when no escape sequences are present.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.as_bytes().contains(&ESC) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for token in Tokens::new(text) {
        if let Token::Grapheme(g) = token {
            out.push_str(g);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_width_ignores_escapes() {
        assert_eq!(string_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(
            string_width("\x1b]8;;https://example.com\x07link\x1b]8;;\x07"),
            4
        );
    }

    #[test]
    fn test_width_wide_glyphs() {
        assert_eq!(string_width("日本"), 4);
        assert_eq!(string_width("a日b"), 4);
        assert_eq!(grapheme_width("日"), 2);
    }

    #[test]
    fn test_width_combining_and_control() {
        assert_eq!(string_width("e\u{301}"), 1);
        assert_eq!(grapheme_width("\t"), 0);
        assert_eq!(string_width("a\tb"), 2);
    }

    #[test]
    fn test_widest_line() {
        assert_eq!(widest_line("ab\nabcd\n"), 4);
        assert_eq!(widest_line(""), 0);
    }

    #[test]
    fn test_strip_ansi() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_ansi("\x1b[1;31mA\x1b[0mB"), "AB");
    }
}
