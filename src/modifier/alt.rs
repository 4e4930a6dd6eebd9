//! `alt` text for images, matched by file name.

use super::HtmlModifier;
use crate::debug;
use crate::error::Result;

impl HtmlModifier {
    /// Set `alt` on every `<img>` whose `src` contains `filename`.
    ///
    /// Matching is plain substring containment, so `img.jpg` also matches
    /// `big-img.jpg`. Without `overwrite` only a missing or empty `alt` is
    /// filled in.
    pub fn add_alt_text(&mut self, filename: &str, alt: &str, overwrite: bool) -> Result<&mut Self> {
        let mut changed = 0;
        for path in self.elements("img") {
            let elem = self.doc.element_mut(&path)?;
            if !elem.attribute("src").is_some_and(|src| src.contains(filename)) {
                continue;
            }
            if overwrite || elem.attribute("alt").is_none_or(str::is_empty) {
                elem.set_attribute("alt", alt);
                changed += 1;
            }
        }

        debug!("alt"; "`{}`: set alt on {} image(s)", filename, changed);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(html: &str, filename: &str, alt: &str, overwrite: bool) -> String {
        let mut modifier = HtmlModifier::new(html).unwrap();
        modifier.add_alt_text(filename, alt, overwrite).unwrap().save()
    }

    #[test]
    fn test_add_alt_text() {
        assert_eq!(
            apply(r#"<div><img src="image.jpg"/></div>"#, "image.jpg", "Description", false),
            r#"<div><img src="image.jpg" alt="Description"/></div>"#
        );
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(
            apply(
                r#"<div><img src="/assets/big-img.jpg"/><img src="other.png"/></div>"#,
                "img.jpg",
                "Big",
                false
            ),
            r#"<div><img src="/assets/big-img.jpg" alt="Big"/><img src="other.png"/></div>"#
        );
    }

    #[test]
    fn test_existing_alt_kept_without_overwrite() {
        let html = r#"<p><img src="a.jpg" alt="keep"/><img src="a.jpg" alt=""/></p>"#;
        assert_eq!(
            apply(html, "a.jpg", "new", false),
            r#"<p><img src="a.jpg" alt="keep"/><img src="a.jpg" alt="new"/></p>"#
        );
        assert_eq!(
            apply(html, "a.jpg", "new", true),
            r#"<p><img src="a.jpg" alt="new"/><img src="a.jpg" alt="new"/></p>"#
        );
    }

    #[test]
    fn test_img_without_src_is_skipped() {
        assert_eq!(apply("<p><img/></p>", "", "x", true), "<p><img/></p>");
    }

    #[test]
    fn test_fragment_input() {
        assert_eq!(
            apply(r#"<img src="a.png"/> caption"#, "a.png", "A", false),
            r#"<img src="a.png" alt="A"/> caption"#
        );
    }
}
