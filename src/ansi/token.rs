//! Tokenizer: split styled text into escape sequences and graphemes.

use unicode_segmentation::{Graphemes, UnicodeSegmentation};

use super::sequence::{escape_len, ESC};
use super::style::StyleState;
use super::width::grapheme_width;
use crate::buffer::Cell;

/// A piece of styled text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Token<'a> {
    /// A complete escape sequence (zero columns wide).
    Escape(&'a str),
    /// A single grapheme cluster.
    Grapheme(&'a str),
}

/// Iterator over the [`Token`]s of a string.
///
/// Plain runs between escapes are segmented into extended grapheme clusters,
/// so a combining sequence or an emoji ZWJ sequence is one token.
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
    run: Option<Graphemes<'a>>,
}

impl<'a> Tokens<'a> {
    /// Tokenize `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            run: None,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(grapheme) = self.run.as_mut().and_then(Iterator::next) {
            return Some(Token::Grapheme(grapheme));
        }
        self.run = None;

        let text = self.text;
        let rest = &text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if rest.as_bytes()[0] == ESC {
            let len = escape_len(rest.as_bytes());
            self.pos += len;
            return Some(Token::Escape(&rest[..len]));
        }

        // ESC is a single ASCII byte, so this split never breaks UTF-8
        let end = rest.find('\x1b').unwrap_or(rest.len());
        self.pos += end;
        let mut run = rest[..end].graphemes(true);
        let first = run.next();
        self.run = Some(run);
        first.map(Token::Grapheme)
    }
}

/// Tokenize a single line of styled text into styled cells.
///
/// Each visible grapheme becomes one [`Cell`] carrying the styles active at
/// that point. Zero-width graphemes (control characters) and escapes that are
/// not styles are dropped, since neither can be placed in a cell.
pub fn styled_cells(line: &str) -> Vec<Cell> {
    let mut state = StyleState::new();
    let mut cells = Vec::with_capacity(line.len());

    for token in Tokens::new(line) {
        match token {
            Token::Escape(escape) => {
                state.apply(escape);
            }
            Token::Grapheme(grapheme) => {
                let width = grapheme_width(grapheme);
                if width == 0 {
                    continue;
                }
                cells.push(Cell::styled(grapheme, width, state.snapshot()));
            }
        }
    }

    cells
}
