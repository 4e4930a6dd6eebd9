//! Loading text into a [`Document`](crate::dom::Document) and back.
//!
//! # Modules
//!
//! - `loader`: strict parse with the fragment-wrapping retry
//! - `serializer`: shape-preserving output
//! - `diagnostic`: structured parser diagnostics

mod diagnostic;
mod loader;
mod serializer;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use loader::{load, load_xml};
pub use serializer::{inner_xml, outer_xml, save};

/// Tag name of the wrapper element added around fragment input.
pub const SYNTHETIC_ROOT: &str = "_denshoch";
