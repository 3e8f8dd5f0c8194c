//! Escape sequence scanning.
//!
//! Recognizes the escape forms terminals emit in styled text:
//! - CSI sequences: `ESC [` ... final byte (0x40-0x7E)
//! - OSC sequences: `ESC ]` ... BEL (0x07) or ST (`ESC \`)
//! - DCS/SOS/PM/APC sequences: `ESC P`/`ESC X`/`ESC ^`/`ESC _` ... ST
//! - `ESC` + intermediates + final byte, and plain two-character sequences
//!
//! Every length returned here ends on an ASCII byte or on the start of a
//! multi-byte character, so it is always a valid `str` boundary.

/// The escape byte.
pub const ESC: u8 = 0x1B;

/// Length in bytes of the escape sequence at the start of `bytes`.
///
/// `bytes[0]` must be [`ESC`]. Unterminated sequences consume the rest of the
/// input; a lone `ESC` (or one followed by a non-ASCII byte) has length 1.
pub fn escape_len(bytes: &[u8]) -> usize {
    debug_assert_eq!(bytes.first(), Some(&ESC));

    match bytes.get(1) {
        None => 1,
        Some(b'[') => skip_csi(bytes, 2),
        Some(b']' | b'P' | b'X' | b'^' | b'_') => skip_string_terminated(bytes, 2),
        Some(0x20..=0x2F) => skip_intermediates(bytes, 2),
        Some(0x30..=0x7E) => 2,
        Some(_) => 1,
    }
}

/// Skip a CSI sequence. `pos` is the byte after `[`.
///
/// CSI format: parameter bytes (0x30-0x3F), intermediate bytes (0x20-0x2F),
/// final byte (0x40-0x7E).
fn skip_csi(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        let b = bytes[i];
        if (0x40..=0x7E).contains(&b) {
            return i + 1;
        }
        if !(0x20..=0x7E).contains(&b) {
            // Invalid byte: the sequence ends before it
            return i;
        }
        i += 1;
    }
    bytes.len()
}

/// Skip a string-terminated sequence (OSC, DCS, SOS, PM, APC).
///
/// Terminates with BEL (0x07) or ST (`ESC \`).
fn skip_string_terminated(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            0x07 => return i + 1,
            ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skip `ESC` + intermediate bytes + final byte (e.g. charset designation).
fn skip_intermediates(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        let b = bytes[i];
        if (0x30..=0x7E).contains(&b) {
            return i + 1;
        }
        if !(0x20..=0x2F).contains(&b) {
            return i;
        }
        i += 1;
    }
    bytes.len()
}
