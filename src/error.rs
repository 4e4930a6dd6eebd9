//! Library error types.

use crate::markup::Diagnostic;
use thiserror::Error;

// ============================================================================
// Error
// ============================================================================

/// Errors surfaced by loading and mutating a document.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be parsed, even after the fragment-wrapping retry.
    #[error("invalid input: {}", first_diagnostic(.diagnostics))]
    InvalidInput { diagnostics: Vec<Diagnostic> },

    /// A selected node was not of the kind the operation works on.
    #[error("unexpected node type: expected {expected}, found {found}")]
    UnexpectedNodeType {
        expected: &'static str,
        found: &'static str,
    },

    /// The ruby target could not be turned into a search pattern.
    #[error("invalid ruby target pattern")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an `InvalidInput` from a single diagnostic.
    pub fn invalid(diagnostic: Diagnostic) -> Self {
        Self::InvalidInput {
            diagnostics: vec![diagnostic],
        }
    }

    /// Parser diagnostics attached to this error (empty for other kinds).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::InvalidInput { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

fn first_diagnostic(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.first() {
        Some(d) => d.to_string(),
        None => "unknown parser failure".to_string(),
    }
}
