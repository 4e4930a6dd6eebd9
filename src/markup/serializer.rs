//! [`Document`] → text serialization.
//!
//! Output reproduces the input shape:
//!
//! | Input shape          | Output                                        |
//! |----------------------|-----------------------------------------------|
//! | bare fragment        | inner markup of the synthetic root            |
//! | full HTML document   | prolog + root + epilog, as parsed             |
//! | single-root fragment | the root element only                         |

use std::fmt::Write;

use crate::dom::{Document, Element, Node};
use crate::utils::html::{escape, escape_attr};

/// Serialize `doc` back to text in its original shape.
///
/// `synthetic` is the flag recorded at load time; the root's name is never
/// consulted to decide whether a wrapper must be stripped.
pub fn save(doc: &Document, synthetic: bool) -> String {
    if synthetic {
        return inner_xml(&doc.root);
    }

    let mut out = String::new();
    if doc.is_html_document() {
        write_nodes(&mut out, &doc.prolog);
        write_element(&mut out, &doc.root);
        write_nodes(&mut out, &doc.epilog);
    } else {
        write_element(&mut out, &doc.root);
    }
    out
}

/// Concatenated serialization of the children of `elem`.
pub fn inner_xml(elem: &Element) -> String {
    let mut out = String::new();
    write_nodes(&mut out, &elem.children);
    out
}

/// Serialization of a single element, tags included.
pub fn outer_xml(elem: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, elem);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) => out.push_str(&escape(text)),
        Node::CData(content) => {
            let _ = write!(out, "<![CDATA[{content}]]>");
        }
        Node::Comment(content) => {
            let _ = write!(out, "<!--{content}-->");
        }
        Node::ProcessingInstruction(content) => {
            let _ = write!(out, "<?{content}?>");
        }
        Node::Declaration(content) => {
            let _ = write!(out, "<?{content}?>");
        }
        Node::Doctype(content) => {
            let _ = write!(out, "<!DOCTYPE {content}>");
        }
    }
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.name);
    for (key, value) in &elem.attributes {
        let _ = write!(out, " {key}=\"{}\"", escape_attr(value));
    }

    if elem.children.is_empty() && elem.self_closing {
        out.push_str("/>");
        return;
    }

    out.push('>');
    write_nodes(out, &elem.children);
    let _ = write!(out, "</{}>", elem.name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{load, load_xml};

    fn round_trip(input: &str) -> String {
        let (doc, synthetic) = load(input).unwrap();
        save(&doc, synthetic)
    }

    #[test]
    fn test_round_trip_fragment() {
        for input in [
            "test<p>Hello, world!</p>test",
            "<p>a</p>\n<p>b</p>",
            "  leading <b>bold</b> trailing  ",
            "<!-- note --><br/>tail",
            "",
            "\u{3000}<p>本文</p>",
            "<p>本文</p>\u{3000}",
            "\u{a0}<p>x</p>",
            "&amp;<p>x</p>",
            "<p>x</p>&lt;",
        ] {
            assert_eq!(round_trip(input), input, "round trip failed for {input:?}");
        }
    }

    #[test]
    fn test_round_trip_single_root() {
        for input in [
            "<div><p>Hello, world!</p></div>",
            "<div class=\"a\"><img src=\"x.png\"/><p></p></div>",
            "<p>a &amp; b &lt; c</p>",
            "<p><![CDATA[x < y]]></p>",
        ] {
            assert_eq!(round_trip(input), input, "round trip failed for {input:?}");
        }
    }

    #[test]
    fn test_top_level_reference_keeps_character() {
        assert_eq!(round_trip("&nbsp;<p>x</p>"), "\u{a0}<p>x</p>");
    }

    #[test]
    fn test_attribute_whitespace_round_trip() {
        assert_eq!(round_trip("<p title=\"a\nb\">x</p>"), "<p title=\"a b\">x</p>");
        assert_eq!(round_trip("<p title=\"a\r\n\tb\">x</p>"), "<p title=\"a  b\">x</p>");
        for input in ["<p title=\"a&#10;b\">x</p>", "<p title=\"a&#9;b\">x</p>"] {
            assert_eq!(round_trip(input), input, "round trip failed for {input:?}");
        }
    }

    #[test]
    fn test_single_root_drops_declaration() {
        let out = round_trip("<?xml version=\"1.0\"?>\n<div>x</div>");
        assert_eq!(out, "<div>x</div>");
    }

    #[test]
    fn test_round_trip_full_document() {
        let input = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE html>\n",
            "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n",
            "<head><title>t</title></head>\n",
            "<body><p>本文</p></body>\n",
            "</html>",
        );
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_synthetic_flag_not_root_name() {
        // A genuine root that happens to carry the reserved name is kept.
        let input = "<_denshoch><p>x</p></_denshoch>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_inner_xml() {
        let doc = load_xml(concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<_denshoch><item id=\"1\">Item 1</item><item id=\"2\">Item 2</item>",
            "<item id=\"3\">Item 3</item></_denshoch>",
        ))
        .unwrap();
        assert_eq!(
            inner_xml(&doc.root),
            "<item id=\"1\">Item 1</item><item id=\"2\">Item 2</item><item id=\"3\">Item 3</item>"
        );
    }

    #[test]
    fn test_escaping() {
        let mut elem = Element::new("a").with_text("1 < 2 & \"q\"");
        elem.set_attribute("title", "say \"hi\" & <go>");
        assert_eq!(
            outer_xml(&elem),
            "<a title=\"say &quot;hi&quot; &amp; &lt;go&gt;\">1 &lt; 2 &amp; \"q\"</a>"
        );
    }

    #[test]
    fn test_self_closing_gains_end_tag_with_children() {
        let mut elem = Element::new("span");
        elem.self_closing = true;
        assert_eq!(outer_xml(&elem), "<span/>");
        elem.children.push(Node::text("x"));
        assert_eq!(outer_xml(&elem), "<span>x</span>");
    }
}
