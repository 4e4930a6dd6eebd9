//! Text → [`Document`] loading.
//!
//! Parsing is strict XML over `quick-xml` events. A bare fragment (text
//! before the first tag, or content after the root closed) is retried once
//! wrapped in a synthetic root element; any other failure is invalid input.
//! quick-xml never resolves external entities or DTDs.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use super::{Diagnostic, DiagnosticKind, SYNTHETIC_ROOT};
use crate::debug;
use crate::dom::{Document, Element, Node};
use crate::error::{Error, Result};
use crate::utils::html::{char_ref, named_entity, normalize_attr, unescape};
use crate::utils::text::remove_ctrl_chars;

/// Load `raw` into a tree, wrapping it in a synthetic root if it is a
/// fragment. Returns the document and whether the synthetic root was used.
pub fn load(raw: &str) -> Result<(Document, bool)> {
    let text = remove_ctrl_chars(raw);

    match parse(&text) {
        Ok(doc) => Ok((doc, false)),
        Err(diagnostic) if diagnostic.kind.is_fragment() => {
            debug!("load"; "fragment input ({}), wrapping in <{}>", diagnostic, SYNTHETIC_ROOT);
            let wrapped = format!("<{SYNTHETIC_ROOT}>{text}</{SYNTHETIC_ROOT}>");
            let doc = parse(&wrapped).map_err(|retry| Error::InvalidInput {
                diagnostics: vec![diagnostic, retry],
            })?;
            Ok((doc, true))
        }
        Err(diagnostic) => Err(Error::invalid(diagnostic)),
    }
}

/// Load `raw` as a standalone document, without the fragment retry.
pub fn load_xml(raw: &str) -> Result<Document> {
    parse(&remove_ctrl_chars(raw)).map_err(Error::invalid)
}

// ============================================================================
// Tree Building
// ============================================================================

/// Accumulates quick-xml events into a [`Document`].
struct TreeBuilder<'a> {
    input: &'a str,
    prolog: Vec<Node>,
    epilog: Vec<Node>,
    /// Open elements, innermost last.
    stack: Vec<Element>,
    root: Option<Element>,
    saw_markup: bool,
}

fn parse(input: &str) -> std::result::Result<Document, Diagnostic> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;
    reader.config_mut().expand_empty_elements = false;

    let mut builder = TreeBuilder::new(input);

    loop {
        let event = reader.read_event().map_err(|e| {
            Diagnostic::at(
                DiagnosticKind::Malformed,
                input,
                position(reader.error_position()),
                e.to_string(),
            )
        })?;
        let pos = position(reader.buffer_position());

        match event {
            Event::Start(e) => {
                let elem = builder.element(&e, pos)?;
                builder.open(elem, pos)?;
            }
            Event::Empty(e) => {
                let mut elem = builder.element(&e, pos)?;
                elem.self_closing = true;
                builder.close(elem, pos)?;
            }
            Event::End(_) => {
                let Some(elem) = builder.stack.pop() else {
                    return Err(builder.malformed(pos, "Unexpected end tag"));
                };
                builder.close(elem, pos)?;
            }
            Event::Text(e) => {
                let raw = e
                    .decode()
                    .map_err(|err| builder.malformed(pos, err.to_string()))?;
                let text = unescape(&raw).map_err(|name| {
                    builder.malformed(pos, format!("Entity '{name}' not defined"))
                })?;
                builder.text(&text, pos)?;
            }
            Event::GeneralRef(e) => {
                if builder.stack.is_empty() {
                    return Err(builder.outside_root(pos));
                }
                let name = e
                    .decode()
                    .map_err(|err| builder.malformed(pos, err.to_string()))?;
                let mut buf = [0u8; 4];
                let text = match char_ref(&name) {
                    Some(c) => &*c.encode_utf8(&mut buf),
                    None => named_entity(&name).ok_or_else(|| {
                        builder.malformed(pos, format!("Entity '{name}' not defined"))
                    })?,
                };
                builder.text(text, pos)?;
            }
            Event::CData(e) => {
                let content = utf8(&e).map_err(|msg| builder.malformed(pos, msg))?;
                builder.content(Node::CData(content.to_string()), pos)?;
            }
            Event::Comment(e) => {
                let content = utf8(&e).map_err(|msg| builder.malformed(pos, msg))?;
                builder.misc(Node::Comment(content.to_string()));
            }
            Event::PI(e) => {
                let content = utf8(&e).map_err(|msg| builder.malformed(pos, msg))?;
                builder.misc(Node::ProcessingInstruction(content.to_string()));
            }
            Event::Decl(e) => {
                if builder.saw_markup || !builder.prolog.is_empty() {
                    return Err(builder.malformed(
                        pos,
                        "XML declaration allowed only at the start of the document",
                    ));
                }
                let content = utf8(&e).map_err(|msg| builder.malformed(pos, msg))?;
                builder.prolog.push(Node::Declaration(content.to_string()));
            }
            Event::DocType(e) => {
                if builder.root.is_some() || !builder.stack.is_empty() {
                    return Err(builder.malformed(pos, "DOCTYPE improperly placed"));
                }
                let content = utf8(&e).map_err(|msg| builder.malformed(pos, msg))?;
                builder.prolog.push(Node::Doctype(content.to_string()));
            }
            Event::Eof => return builder.finish(pos),
        }
    }
}

impl<'a> TreeBuilder<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            prolog: Vec::new(),
            epilog: Vec::new(),
            stack: Vec::new(),
            root: None,
            saw_markup: false,
        }
    }

    fn malformed(&self, pos: usize, message: impl Into<String>) -> Diagnostic {
        Diagnostic::at(DiagnosticKind::Malformed, self.input, pos, message)
    }

    /// Diagnostic for content found outside any element.
    fn outside_root(&self, pos: usize) -> Diagnostic {
        if self.root.is_some() {
            Diagnostic::at(
                DiagnosticKind::ExtraContent,
                self.input,
                pos,
                "Extra content at the end of the document",
            )
        } else {
            Diagnostic::at(
                DiagnosticKind::NoRootElement,
                self.input,
                pos,
                "Start tag expected, '<' not found",
            )
        }
    }

    fn element(&self, start: &BytesStart<'_>, pos: usize) -> std::result::Result<Element, Diagnostic> {
        let qname = start.name();
        let name = utf8(qname.as_ref()).map_err(|msg| self.malformed(pos, msg))?;
        let mut elem = Element::new(name);

        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.malformed(pos, e.to_string()))?;
            let key = utf8(attr.key.as_ref()).map_err(|msg| self.malformed(pos, msg))?;
            let raw = utf8(&attr.value).map_err(|msg| self.malformed(pos, msg))?;
            let normalized = normalize_attr(raw);
            let value = unescape(&normalized)
                .map_err(|name| self.malformed(pos, format!("Entity '{name}' not defined")))?;
            elem.attributes.push((key.to_string(), value.into_owned()));
        }

        Ok(elem)
    }

    fn open(&mut self, elem: Element, pos: usize) -> std::result::Result<(), Diagnostic> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(self.outside_root(pos));
        }
        self.saw_markup = true;
        self.stack.push(elem);
        Ok(())
    }

    /// Attach a finished element to its parent, or make it the root.
    fn close(&mut self, elem: Element, pos: usize) -> std::result::Result<(), Diagnostic> {
        self.saw_markup = true;
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(Node::Element(elem)),
            None if self.root.is_none() => self.root = Some(elem),
            None => return Err(self.outside_root(pos)),
        }
        Ok(())
    }

    /// Append character data, merging with a preceding text node.
    fn text(&mut self, text: &str, pos: usize) -> std::result::Result<(), Diagnostic> {
        let Some(parent) = self.stack.last_mut() else {
            if is_xml_space(text) {
                self.misc(Node::text(text));
                return Ok(());
            }
            return Err(self.outside_root(pos));
        };
        match parent.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => parent.children.push(Node::text(text)),
        }
        Ok(())
    }

    /// Append a node that is only valid inside an element.
    fn content(&mut self, node: Node, pos: usize) -> std::result::Result<(), Diagnostic> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(node);
                Ok(())
            }
            None => Err(self.outside_root(pos)),
        }
    }

    /// Append a node that may also live before or after the root.
    fn misc(&mut self, node: Node) {
        self.saw_markup = true;
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        } else if self.root.is_some() {
            self.epilog.push(node);
        } else {
            self.prolog.push(node);
        }
    }

    fn finish(mut self, pos: usize) -> std::result::Result<Document, Diagnostic> {
        if let Some(open) = self.stack.last() {
            return Err(self.malformed(
                pos,
                format!("Premature end of data in tag {}", open.name),
            ));
        }
        match self.root.take() {
            Some(root) => Ok(Document {
                prolog: self.prolog,
                root,
                epilog: self.epilog,
            }),
            None => Err(Diagnostic::at(
                DiagnosticKind::NoRootElement,
                self.input,
                pos,
                "Document is empty",
            )),
        }
    }
}

/// Only `#x20 | #x9 | #xD | #xA` may appear around the root element.
fn is_xml_space(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

#[inline]
fn utf8(bytes: &[u8]) -> std::result::Result<&str, String> {
    std::str::from_utf8(bytes).map_err(|e| e.to_string())
}

#[inline]
fn position<P: TryInto<usize>>(pos: P) -> usize {
    pos.try_into().unwrap_or(usize::MAX)
}
