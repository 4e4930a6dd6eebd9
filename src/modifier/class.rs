//! `class` attribute injection.

use super::HtmlModifier;
use crate::debug;
use crate::dom::Element;
use crate::error::Result;

impl HtmlModifier {
    /// Add `class` to every element named `tag`.
    ///
    /// Without `overwrite` the class is appended after a single space; tokens
    /// already present are not de-duplicated, so repeating the call repeats
    /// the token. With `overwrite` the attribute is replaced.
    ///
    /// The value is stored as given and escaped once on serialization.
    pub fn add_class_to_tag(&mut self, tag: &str, class: &str, overwrite: bool) -> Result<&mut Self> {
        let paths = self.elements(tag);
        for path in &paths {
            merge_class(self.doc.element_mut(path)?, class, overwrite);
        }

        debug!("class"; "<{}>: `{}` on {} element(s)", tag, class, paths.len());
        Ok(self)
    }
}

fn merge_class(elem: &mut Element, class: &str, overwrite: bool) {
    let merged = match elem.attribute("class") {
        Some(current) if !overwrite => format!("{current} {class}"),
        _ => class.to_string(),
    };
    elem.set_attribute("class", merged);
}
