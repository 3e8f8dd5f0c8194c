//! Style tracking: turn SGR and hyperlink escapes into a set of active styles.
//!
//! A [`StyleCode`] pairs the escape that enables an attribute with the escape
//! that disables it. [`StyleState`] folds a stream of escapes into the list of
//! currently active codes, and [`transition`] emits the minimal escapes that
//! move a terminal from one style set to another.

use std::sync::Arc;

/// Closing escape for OSC 8 hyperlinks.
pub const HYPERLINK_CLOSE: &str = "\x1b]8;;\x07";

/// A single active style annotation.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StyleCode {
    open: String,
    close: &'static str,
}

impl StyleCode {
    /// Create a style from its opening escape and the escape that closes it.
    pub fn new(open: impl Into<String>, close: &'static str) -> Self {
        Self {
            open: open.into(),
            close,
        }
    }

    /// The escape that enables this style.
    #[inline]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The escape that disables this style.
    #[inline]
    pub const fn close(&self) -> &'static str {
        self.close
    }
}

/// Closing SGR escape for an SGR parameter that turns an attribute on.
///
/// Returns `None` for parameters that are not attributes we track
/// (fonts, resets, unknown codes).
const fn close_for(code: u16) -> Option<&'static str> {
    Some(match code {
        1 | 2 => "\x1b[22m",
        3 => "\x1b[23m",
        4 | 21 => "\x1b[24m",
        5 | 6 => "\x1b[25m",
        7 => "\x1b[27m",
        8 => "\x1b[28m",
        9 => "\x1b[29m",
        30..=38 | 90..=97 => "\x1b[39m",
        40..=48 | 100..=107 => "\x1b[49m",
        53 => "\x1b[55m",
        58 => "\x1b[59m",
        _ => return None,
    })
}

/// The closing escape an SGR "off" parameter represents, if it is one.
const fn as_close(code: u16) -> Option<&'static str> {
    Some(match code {
        22 => "\x1b[22m",
        23 => "\x1b[23m",
        24 => "\x1b[24m",
        25 => "\x1b[25m",
        27 => "\x1b[27m",
        28 => "\x1b[28m",
        29 => "\x1b[29m",
        39 => "\x1b[39m",
        49 => "\x1b[49m",
        55 => "\x1b[55m",
        59 => "\x1b[59m",
        _ => return None,
    })
}

/// The set of styles active at a point in a styled string.
///
/// Styles are kept in the order they were opened. The shared snapshot handed
/// out by [`StyleState::snapshot`] is cached until the next change, so runs of
/// characters with the same style share one allocation.
#[derive(Clone, Debug, Default)]
pub struct StyleState {
    active: Vec<StyleCode>,
    shared: Option<Arc<[StyleCode]>>,
}

impl StyleState {
    /// Create an empty style state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active styles, in opening order.
    #[inline]
    pub fn active(&self) -> &[StyleCode] {
        &self.active
    }

    /// Shared snapshot of the active styles, or `None` when unstyled.
    pub fn snapshot(&mut self) -> Option<Arc<[StyleCode]>> {
        if self.active.is_empty() {
            return None;
        }
        let shared = self
            .shared
            .get_or_insert_with(|| Arc::from(self.active.as_slice()));
        Some(Arc::clone(shared))
    }

    /// Fold an escape sequence into the state.
    ///
    /// Returns `true` if the escape is a style escape (SGR or OSC 8), whether
    /// or not it changed anything. Other escapes are left untouched.
    pub fn apply(&mut self, escape: &str) -> bool {
        if let Some(params) = escape
            .strip_prefix("\x1b[")
            .and_then(|rest| rest.strip_suffix('m'))
        {
            self.apply_sgr(params);
            return true;
        }
        if let Some(rest) = escape.strip_prefix("\x1b]8;") {
            self.apply_hyperlink(escape, rest);
            return true;
        }
        false
    }

    fn apply_sgr(&mut self, params: &str) {
        if params.is_empty() {
            self.reset();
            return;
        }

        let mut parts = params.split(';');
        while let Some(part) = parts.next() {
            // Colon sub-parameters ("4:3", "38:2::1:2:3") stay in one part
            let code = leading_number(part);

            match code {
                Some(0) => self.reset(),
                Some(c @ (38 | 48 | 58)) if !part.contains(':') => {
                    let mut open = format!("\x1b[{c}");
                    let extra = match parts.next() {
                        Some(mode) => {
                            open.push(';');
                            open.push_str(mode);
                            match leading_number(mode) {
                                Some(5) => 1,
                                Some(2) => 3,
                                _ => 0,
                            }
                        }
                        None => 0,
                    };
                    for value in parts.by_ref().take(extra) {
                        open.push(';');
                        open.push_str(value);
                    }
                    open.push('m');
                    if let Some(close) = close_for(c) {
                        self.open(StyleCode::new(open, close));
                    }
                }
                Some(c) => {
                    if let Some(close) = as_close(c) {
                        self.close(close);
                    } else if let Some(close) = close_for(c) {
                        self.open(StyleCode::new(format!("\x1b[{part}m"), close));
                    }
                }
                None => {}
            }
        }
    }

    fn apply_hyperlink(&mut self, escape: &str, rest: &str) {
        // rest = "params;uri" followed by BEL or ST
        let body = rest
            .strip_suffix('\x07')
            .or_else(|| rest.strip_suffix("\x1b\\"))
            .unwrap_or(rest);
        let uri = body.split_once(';').map_or("", |(_, uri)| uri);

        self.close(HYPERLINK_CLOSE);
        if !uri.is_empty() {
            self.open(StyleCode::new(escape, HYPERLINK_CLOSE));
        }
    }

    fn open(&mut self, style: StyleCode) {
        if self.active.contains(&style) {
            return;
        }
        // Bold and dim share a closing code but may be active together
        if style.close != "\x1b[22m" {
            self.active.retain(|s| s.close != style.close);
        }
        self.active.push(style);
        self.shared = None;
    }

    fn close(&mut self, close: &str) {
        let before = self.active.len();
        self.active.retain(|s| s.close != close);
        if self.active.len() != before {
            self.shared = None;
        }
    }

    /// Drop every active style.
    pub fn reset(&mut self) {
        self.active.clear();
        self.shared = None;
    }
}

fn leading_number(part: &str) -> Option<u16> {
    let digits = part.split(':').next().unwrap_or(part);
    if digits.is_empty() {
        // "\x1b[;1m" treats the empty parameter as 0
        return Some(0);
    }
    digits.parse().ok()
}

/// Emit the escapes that move the terminal from style set `from` to `to`.
///
/// Styles present in both sets are left alone unless a close code shared with
/// a dropped style turns them off, in which case they are re-opened.
pub fn transition(from: &[StyleCode], to: &[StyleCode], out: &mut String) {
    let mut closed: Vec<&'static str> = Vec::new();
    for style in from.iter().rev() {
        if !to.contains(style) && !closed.contains(&style.close) {
            out.push_str(style.close);
            closed.push(style.close);
        }
    }

    for style in to {
        let kept = from.contains(style) && !closed.contains(&style.close);
        if !kept {
            out.push_str(&style.open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opens(state: &StyleState) -> Vec<&str> {
        state.active().iter().map(StyleCode::open).collect()
    }

    #[test]
    fn test_basic_color_and_reset() {
        let mut state = StyleState::new();
        assert!(state.apply("\x1b[31m"));
        assert_eq!(opens(&state), ["\x1b[31m"]);
        assert!(state.apply("\x1b[39m"));
        assert!(state.active().is_empty());
    }

    #[test]
    fn test_compound_sgr_splits_into_codes() {
        let mut state = StyleState::new();
        state.apply("\x1b[1;4;32m");
        assert_eq!(opens(&state), ["\x1b[1m", "\x1b[4m", "\x1b[32m"]);
        state.apply("\x1b[0m");
        assert!(state.active().is_empty());
    }

    #[test]
    fn test_new_foreground_replaces_old() {
        let mut state = StyleState::new();
        state.apply("\x1b[31m");
        state.apply("\x1b[38;5;196m");
        assert_eq!(opens(&state), ["\x1b[38;5;196m"]);
        state.apply("\x1b[38;2;1;2;3m");
        assert_eq!(opens(&state), ["\x1b[38;2;1;2;3m"]);
    }

    #[test]
    fn test_bold_and_dim_coexist() {
        let mut state = StyleState::new();
        state.apply("\x1b[1m");
        state.apply("\x1b[2m");
        assert_eq!(state.active().len(), 2);
        state.apply("\x1b[22m");
        assert!(state.active().is_empty());
    }

    #[test]
    fn test_extended_color_followed_by_attribute() {
        let mut state = StyleState::new();
        state.apply("\x1b[48;5;17;1m");
        assert_eq!(opens(&state), ["\x1b[48;5;17m", "\x1b[1m"]);
    }

    #[test]
    fn test_hyperlink_open_and_close() {
        let mut state = StyleState::new();
        assert!(state.apply("\x1b]8;;https://example.com\x07"));
        assert_eq!(state.active().len(), 1);
        assert_eq!(state.active()[0].close(), HYPERLINK_CLOSE);
        state.apply("\x1b]8;;\x07");
        assert!(state.active().is_empty());
    }

    #[test]
    fn test_non_style_escape_is_ignored() {
        let mut state = StyleState::new();
        assert!(!state.apply("\x1b[2J"));
        assert!(!state.apply("\x1b="));
        assert!(state.active().is_empty());
    }

    #[test]
    fn test_snapshot_is_shared_until_change() {
        let mut state = StyleState::new();
        assert!(state.snapshot().is_none());
        state.apply("\x1b[31m");
        let a = state.snapshot().unwrap();
        let b = state.snapshot().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        state.apply("\x1b[1m");
        let c = state.snapshot().unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_transition_minimal() {
        let red = StyleCode::new("\x1b[31m", "\x1b[39m");
        let bold = StyleCode::new("\x1b[1m", "\x1b[22m");

        let mut out = String::new();
        transition(&[], &[red.clone()], &mut out);
        assert_eq!(out, "\x1b[31m");

        out.clear();
        transition(&[red.clone()], &[red.clone(), bold.clone()], &mut out);
        assert_eq!(out, "\x1b[1m");

        out.clear();
        transition(&[red.clone(), bold], &[], &mut out);
        assert_eq!(out, "\x1b[22m\x1b[39m");
    }

    #[test]
    fn test_transition_reopens_shared_close() {
        let bold = StyleCode::new("\x1b[1m", "\x1b[22m");
        let dim = StyleCode::new("\x1b[2m", "\x1b[22m");

        let mut out = String::new();
        transition(&[bold.clone(), dim], &[bold], &mut out);
        assert_eq!(out, "\x1b[22m\x1b[1m");
    }
}
