//! HTML utility functions.
//!
//! Provides the escaping used by the serializer and the entity table used by
//! the loader:
//! - `escape()`, `escape_attr()` - entity escaping for text and attributes
//! - `named_entity()` - HTML named entities accepted on input

use std::borrow::Cow;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require escaping in text content.
const TEXT_ESCAPE_CHARS: [char; 3] = ['<', '>', '&'];

/// Characters that require escaping in double-quoted attribute values.
const ATTR_ESCAPE_CHARS: [char; 7] = ['<', '>', '&', '"', '\t', '\n', '\r'];

/// Get the entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\t' => Some("&#9;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    }
}

/// Escape special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape("a < b"), "a &lt; b");
/// assert_eq!(escape("it's"), "it's"); // quotes stay literal in text
/// ```
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &TEXT_ESCAPE_CHARS)
}

/// Escape a value for a double-quoted attribute.
///
/// Whitespace control characters are written as character references so
/// they survive attribute-value normalization on the next parse.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ATTR_ESCAPE_CHARS)
}

/// Internal: escape with specified character set.
#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c).filter(|_| chars.contains(&c)) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// Entities
// =============================================================================

/// Resolve a named entity (without `&` and `;`) to its replacement text.
///
/// Covers the XML predefined entities plus the HTML named entities that
/// commonly appear in hand-written XHTML.
pub fn named_entity(name: &str) -> Option<&'static str> {
    let resolved = match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{00A0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwnj" => "\u{200C}",
        "zwj" => "\u{200D}",
        "shy" => "\u{00AD}",
        "copy" => "©",
        "reg" => "®",
        "trade" => "™",
        "hellip" => "…",
        "mdash" => "—",
        "ndash" => "–",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "laquo" => "«",
        "raquo" => "»",
        "middot" => "·",
        "bull" => "•",
        "times" => "×",
        "divide" => "÷",
        "deg" => "°",
        "sect" => "§",
        "para" => "¶",
        "yen" => "¥",
        "euro" => "€",
        _ => return None,
    };
    Some(resolved)
}

/// Resolve a numeric character reference body (`#65`, `#x41`).
pub fn char_ref(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code).filter(|&c| c != '\0')
}

/// Attribute-value normalization: literal tab, newline and carriage return
/// (a `\r\n` pair counting once) become a single space.
///
/// Runs on the raw value, before references are resolved, so `&#10;` still
/// yields a newline.
pub fn normalize_attr(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }

    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                result.push(' ');
            }
            '\t' | '\n' => result.push(' '),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Unescape entity and character references in `s`.
///
/// Returns the name of the first reference that cannot be resolved.
pub fn unescape(s: &str) -> Result<Cow<'_, str>, String> {
    if !s.contains('&') {
        return Ok(Cow::Borrowed(s));
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find(';') else {
            return Err(after.to_string());
        };
        let body = &after[..end];
        if let Some(c) = char_ref(body) {
            result.push(c);
        } else if let Some(text) = named_entity(body) {
            result.push_str(text);
        } else {
            return Err(body.to_string());
        }
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(Cow::Owned(result))
}

// =============================================================================
// Tests
// =============================================================================
