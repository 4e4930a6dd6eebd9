//! Structured parser diagnostics.

use std::fmt;

/// Category of a parse failure.
///
/// Only the document-shape categories make the loader retry with a
/// synthetic root; everything else is reported as invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Character data before any start tag (`Start tag expected`).
    NoRootElement,
    /// Markup or text after the root element closed (`Extra content`).
    ExtraContent,
    /// Anything else: mismatched tags, bad entities, premature end.
    Malformed,
}

impl DiagnosticKind {
    /// Whether wrapping the input in a synthetic root can repair it.
    pub const fn is_fragment(self) -> bool {
        matches!(self, Self::NoRootElement | Self::ExtraContent)
    }
}

/// A single parser diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column (in characters) of the failure.
    pub column: usize,
    /// Error description
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column,
            message: message.into(),
        }
    }

    /// Build a diagnostic located at byte offset `pos` of `input`.
    pub fn at(kind: DiagnosticKind, input: &str, pos: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(input, pos);
        Self::new(kind, line, column, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// 1-based line and character column of byte offset `pos`.
fn line_column(input: &str, pos: usize) -> (usize, usize) {
    let bytes = input.as_bytes();
    let pos = pos.min(bytes.len());
    let prefix = &bytes[..pos];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let tail = &prefix[line_start..];
    // Continuation bytes do not start a character
    let column = tail.iter().filter(|&&b| (b & 0xC0) != 0x80).count() + 1;
    (line, column)
}
