//! Chainable in-place mutation of a loaded document.
//!
//! # Modules
//!
//! - `class`: merges `class` attributes on matched tags
//! - `alt`: fills `alt` on images by `src` substring
//! - `ruby`: wraps occurrences of a string in `<ruby>` markup
//! - `remove`: detaches matched elements with their children
//!
//! # Example
//!
//! ```ignore
//! let mut modifier = HtmlModifier::new("<p>太郎です</p>")?;
//! modifier
//!     .add_class_to_tag("p", "lead", false)?
//!     .add_ruby_text("太郎", "タロウ", RubyOptions::default())?;
//! assert_eq!(
//!     modifier.save(),
//!     r#"<p class="lead"><ruby>太郎<rt>タロウ</rt></ruby>です</p>"#
//! );
//! ```

mod alt;
mod class;
mod remove;
mod ruby;

pub use ruby::RubyOptions;

use crate::debug;
use crate::dom::{Document, NodePath};
use crate::error::Result;
use crate::markup::{load, save};

/// Holds one loaded document and mutates it in place.
#[derive(Debug, Clone)]
pub struct HtmlModifier {
    doc: Document,
    /// Whether the loader wrapped the input in a synthetic root.
    synthetic: bool,
    /// Occurrences annotated by the most recent `add_ruby_text` call.
    last_annotated: usize,
}

impl HtmlModifier {
    /// Load `html`, a full document or a fragment.
    pub fn new(html: &str) -> Result<Self> {
        let (doc, synthetic) = load(html)?;
        debug!("load"; "loaded <{}> (synthetic root: {})", doc.root.name, synthetic);
        Ok(Self {
            doc,
            synthetic,
            last_annotated: 0,
        })
    }

    /// Serialize the document back to text in its original shape.
    pub fn save(&self) -> String {
        save(&self.doc, self.synthetic)
    }

    pub const fn document(&self) -> &Document {
        &self.doc
    }

    pub const fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Number of occurrences annotated by the last `add_ruby_text` call.
    pub const fn last_annotated(&self) -> usize {
        self.last_annotated
    }

    /// Elements named `tag` in document order, never the synthetic root.
    fn elements(&self, tag: &str) -> Vec<NodePath> {
        let mut paths = self.doc.elements_by_tag(tag);
        if self.synthetic {
            paths.retain(|path| !path.is_root());
        }
        paths
    }

    // ========================================================================
    // One-shot helpers
    // ========================================================================

    /// Load `html`, add `class` to every `tag`, and serialize.
    pub fn add_class(html: &str, tag: &str, class: &str, overwrite: bool) -> Result<String> {
        let mut modifier = Self::new(html)?;
        modifier.add_class_to_tag(tag, class, overwrite)?;
        Ok(modifier.save())
    }

    /// Load `html`, apply each `(tag, class)` pair left to right, and
    /// serialize. A tag may appear more than once.
    pub fn add_class_multiple(html: &str, pairs: &[(&str, &str)], overwrite: bool) -> Result<String> {
        let mut modifier = Self::new(html)?;
        for (tag, class) in pairs {
            modifier.add_class_to_tag(tag, class, overwrite)?;
        }
        Ok(modifier.save())
    }
}
