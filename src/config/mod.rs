//! Operation recipes for `denshoch`.
//!
//! A recipe is a TOML file listing the mutations to apply to a document:
//!
//! ```toml
//! [[class]]
//! tag = "p"
//! class = "lead"
//!
//! [[alt]]
//! file = "cover.jpg"
//! text = "Cover illustration"
//!
//! [[ruby]]
//! target = "太郎"
//! reading = "タロウ"
//! limit = 1
//!
//! [[remove]]
//! tag = "rp"
//! ```
//!
//! # Sections
//!
//! | Section      | Operation                                    |
//! |--------------|----------------------------------------------|
//! | `[[class]]`  | `add_class_to_tag(tag, class, overwrite)`    |
//! | `[[alt]]`    | `add_alt_text(file, text, overwrite)`        |
//! | `[[ruby]]`   | `add_ruby_text(target, reading, options)`    |
//! | `[[remove]]` | `remove_tag(tag)`                            |
//!
//! Sections apply in the order above; entries within a section apply in
//! file order.

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::{fs, path::Path, str::FromStr};

use crate::modifier::{HtmlModifier, RubyOptions};

// ============================================================================
// Operations
// ============================================================================

/// `[[class]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassOp {
    pub tag: String,
    pub class: String,
    /// Replace an existing `class` instead of appending.
    #[serde(default)]
    pub overwrite: bool,
}

/// `[[alt]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AltOp {
    /// Substring matched against `src`.
    pub file: String,
    pub text: String,
    /// Replace a non-empty `alt` too.
    #[serde(default)]
    pub overwrite: bool,
}

/// `[[ruby]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RubyOp {
    pub target: String,
    pub reading: String,
    /// Annotate at most this many occurrences; 0 = all.
    #[serde(default)]
    pub limit: usize,
    /// Wrap the base text in `<rb>`.
    #[serde(default)]
    pub rb: bool,
    /// Add `<rp>` parenthesis fallbacks.
    #[serde(default)]
    pub parentheses: bool,
}

impl RubyOp {
    pub const fn options(&self) -> RubyOptions {
        RubyOptions {
            limit: self.limit,
            wrap_rb: self.rb,
            parentheses: self.parentheses,
        }
    }
}

/// `[[remove]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveOp {
    pub tag: String,
}

// ============================================================================
// Recipe
// ============================================================================

/// Root structure of a recipe file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Recipe {
    pub class: Vec<ClassOp>,
    pub alt: Vec<AltOp>,
    pub ruby: Vec<RubyOp>,
    pub remove: Vec<RemoveOp>,
}

impl FromStr for Recipe {
    type Err = ConfigError;

    /// Parse and validate a recipe from TOML.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let recipe: Self = toml::from_str(content)?;
        recipe.validate()?;
        Ok(recipe)
    }
}

impl Recipe {
    /// Load a recipe from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        content.parse()
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_empty() && self.alt.is_empty() && self.ruby.is_empty() && self.remove.is_empty()
    }

    /// Reject entries that could never match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let empty = |section: &str, index: usize, field: &str| {
            ConfigError::Validation(format!("[[{section}]] #{}: `{field}` is empty", index + 1))
        };

        for (i, op) in self.class.iter().enumerate() {
            if op.tag.is_empty() {
                return Err(empty("class", i, "tag"));
            }
        }
        for (i, op) in self.ruby.iter().enumerate() {
            if op.target.is_empty() {
                return Err(empty("ruby", i, "target"));
            }
        }
        for (i, op) in self.remove.iter().enumerate() {
            if op.tag.is_empty() {
                return Err(empty("remove", i, "tag"));
            }
        }
        Ok(())
    }

    /// Apply every operation to `modifier`: class, alt, ruby, then remove.
    pub fn apply(&self, modifier: &mut HtmlModifier) -> crate::Result<()> {
        for op in &self.class {
            modifier.add_class_to_tag(&op.tag, &op.class, op.overwrite)?;
        }
        for op in &self.alt {
            modifier.add_alt_text(&op.file, &op.text, op.overwrite)?;
        }
        for op in &self.ruby {
            modifier.add_ruby_text(&op.target, &op.reading, op.options())?;
        }
        for op in &self.remove {
            modifier.remove_tag(&op.tag)?;
        }
        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================
