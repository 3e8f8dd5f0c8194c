//! ANSI-aware text engine.
//!
//! Stateless utilities the compositor uses on styled text:
//! - [`string_width`] / [`widest_line`]: visual column width, escapes count zero
//! - [`slice_columns`]: slice by visual column without splitting an escape
//!   sequence or a double-width glyph
//! - [`styled_cells`]: tokenize a styled line into styled characters
//! - [`StyleState`] / [`transition`]: track active SGR styles and emit the
//!   escapes that move between two style sets

mod sequence;
mod slice;
mod style;
mod token;
mod width;

pub use sequence::{escape_len, ESC};
pub use slice::{pad_to_width, slice_columns, truncate_to_width};
pub use style::{transition, StyleCode, StyleState, HYPERLINK_CLOSE};
pub use token::{styled_cells, Token, Tokens};
pub use width::{grapheme_width, string_width, strip_ansi, widest_line};
