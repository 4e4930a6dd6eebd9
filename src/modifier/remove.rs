//! Element removal.

use super::HtmlModifier;
use crate::debug;
use crate::error::{Error, Result};

impl HtmlModifier {
    /// Detach every element named `tag`, discarding its children.
    ///
    /// The document root is never detached.
    pub fn remove_tag(&mut self, tag: &str) -> Result<&mut Self> {
        let paths = self.elements(tag);
        let mut removed = 0;

        // Reverse document order keeps the remaining paths valid
        for path in paths.iter().rev() {
            if path.is_root() {
                debug!("remove"; "<{}> is the document root, kept", tag);
                continue;
            }
            self.doc
                .detach(path)
                .ok_or(Error::UnexpectedNodeType {
                    expected: "element",
                    found: "detached node",
                })?;
            removed += 1;
        }

        debug!("remove"; "<{}>: removed {} element(s)", tag, removed);
        Ok(self)
    }
}
