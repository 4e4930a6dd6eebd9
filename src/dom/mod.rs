//! Owned document tree.
//!
//! A loaded document is a root [`Element`] plus the nodes around it
//! (declaration, doctype, comments, whitespace). Every node is owned by its
//! parent; positions are addressed with [`NodePath`] child-index paths.
//!
//! # Modules
//!
//! - `query`: ordered selection and path-based splicing

mod query;

pub use query::NodePath;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Decoded character data.
    Text(String),
    /// Raw CDATA section content.
    CData(String),
    /// Raw comment content (between `<!--` and `-->`).
    Comment(String),
    /// Raw processing instruction content (between `<?` and `?>`).
    ProcessingInstruction(String),
    /// Raw XML declaration content, e.g. `xml version="1.0"`.
    Declaration(String),
    /// Raw doctype content following `<!DOCTYPE `.
    Doctype(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub const fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the node kind, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::CData(_) => "cdata",
            Self::Comment(_) => "comment",
            Self::ProcessingInstruction(_) => "processing instruction",
            Self::Declaration(_) => "declaration",
            Self::Doctype(_) => "doctype",
        }
    }
}

/// An element with ordered attributes and owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attribute name/value pairs in source order. Values are decoded.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Written as `<name/>` in the source. Only honored while childless.
    pub self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Append a child node (builder style).
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append a text child (builder style).
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) | Node::CData(text) => out.push_str(text),
            Node::Element(elem) => collect_text(&elem.children, out),
            _ => {}
        }
    }
}

/// A loaded document: the root element and the nodes surrounding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Declaration, doctype, comments and whitespace before the root.
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments, processing instructions and whitespace after the root.
    pub epilog: Vec<Node>,
}

impl Document {
    pub const fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Whether the root element is an HTML document root.
    pub fn is_html_document(&self) -> bool {
        let local = self
            .root
            .name
            .rsplit_once(':')
            .map_or(self.root.name.as_str(), |(_, local)| local);
        local.eq_ignore_ascii_case("html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut elem = Element::new("p");
        elem.set_attribute("id", "a");
        elem.set_attribute("class", "b");
        elem.set_attribute("id", "c");
        assert_eq!(
            elem.attributes,
            vec![
                ("id".to_string(), "c".to_string()),
                ("class".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_remove_attribute() {
        let mut elem = Element::new("img");
        elem.set_attribute("alt", "x");
        assert_eq!(elem.remove_attribute("alt").as_deref(), Some("x"));
        assert!(!elem.has_attribute("alt"));
        assert_eq!(elem.remove_attribute("alt"), None);
    }

    #[test]
    fn test_text_content() {
        let elem = Element::new("p")
            .with_text("a")
            .with_child(Node::Element(Element::new("b").with_text("b")))
            .with_child(Node::CData("c".to_string()))
            .with_child(Node::Comment("ignored".to_string()));
        assert_eq!(elem.text_content(), "abc");
    }

    #[test]
    fn test_is_html_document() {
        assert!(Document::new(Element::new("html")).is_html_document());
        assert!(Document::new(Element::new("HTML")).is_html_document());
        assert!(Document::new(Element::new("h:html")).is_html_document());
        assert!(!Document::new(Element::new("div")).is_html_document());
    }
}
