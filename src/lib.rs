//! Denshoch - class, alt text and ruby annotation for HTML/XHTML.
//!
//! Input is parsed strictly as XML; text that is not a single well-formed
//! element (a fragment, bare text, several siblings) is retried inside a
//! synthetic `<_denshoch>` root which is stripped again on output.
//!
//! ```ignore
//! use denshoch::{HtmlModifier, RubyOptions};
//!
//! let mut modifier = HtmlModifier::new("<p>太郎です</p>")?;
//! modifier.add_ruby_text("太郎", "タロウ", RubyOptions::default().parentheses(true))?;
//! println!("{}", modifier.save());
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod logger;
pub mod markup;
pub mod modifier;
pub mod utils;

pub use config::{ConfigError, Recipe};
pub use dom::{Document, Element, Node, NodePath};
pub use error::{Error, Result};
pub use markup::{
    Diagnostic, DiagnosticKind, SYNTHETIC_ROOT, inner_xml, load, load_xml, outer_xml, save,
};
pub use modifier::{HtmlModifier, RubyOptions};
pub use utils::text::remove_ctrl_chars;
