//! Text sanitizing applied before parsing.

use std::borrow::Cow;

/// Whether `c` is stripped by [`remove_ctrl_chars`].
///
/// Line/paragraph separators, C0 controls other than tab/newline/carriage
/// return, and DEL.
#[inline]
const fn is_stripped(c: char) -> bool {
    matches!(
        c,
        '\u{2028}' | '\u{2029}' | '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'
    )
}

/// Remove control characters that break well-formedness or round-trips.
///
/// # Example
/// ```ignore
/// assert_eq!(remove_ctrl_chars("a\u{0}b\u{2028}c\td"), "abc\td");
/// ```
pub fn remove_ctrl_chars(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_stripped) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&c| !is_stripped(c)).collect())
}
