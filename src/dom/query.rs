//! Ordered selection over a [`Document`].
//!
//! Selections are materialised as `Vec<NodePath>` before any mutation pass,
//! so callers never mutate the tree while a selection is being walked.
//! Document order is the lexicographic order of paths.

use std::fmt;

use super::{Document, Element, Node};
use crate::error::{Error, Result};

/// Child-index path from the root element. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    fn split_last(&self) -> Option<(&[usize], usize)> {
        self.0.split_last().map(|(last, parent)| (parent, *last))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Selection
// ============================================================================

impl Document {
    /// Every element named `tag`, root included, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodePath> {
        let mut out = Vec::new();
        if self.root.name == tag {
            out.push(NodePath::root());
        }
        collect_elements(&self.root, &NodePath::root(), tag, &mut out);
        out
    }

    /// Every text node without an ancestor element named in `excluded`,
    /// in document order.
    pub fn text_nodes_excluding(&self, excluded: &[&str]) -> Vec<NodePath> {
        let mut out = Vec::new();
        if !excluded.contains(&self.root.name.as_str()) {
            collect_text_nodes(&self.root, &NodePath::root(), excluded, &mut out);
        }
        out
    }

    /// Whether any element enclosing `path` is named `tag`.
    ///
    /// Walks the ancestor chain from the root down to the parent of the node
    /// addressed by `path`; the node itself is not considered.
    pub fn has_ancestor(&self, path: &NodePath, tag: &str) -> bool {
        let Some((parent, _)) = path.split_last() else {
            return false;
        };
        let mut current = &self.root;
        if current.name == tag {
            return true;
        }
        for &index in parent {
            match current.children.get(index) {
                Some(Node::Element(elem)) => {
                    if elem.name == tag {
                        return true;
                    }
                    current = elem;
                }
                _ => return false,
            }
        }
        false
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// The node at a non-root path.
    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        let (parent, index) = path.split_last()?;
        self.element_at(parent)?.children.get(index)
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (parent, index) = path.split_last()?;
        self.element_at_mut(parent)?.children.get_mut(index)
    }

    /// The element at `path`, or `UnexpectedNodeType` if something else
    /// (or nothing) lives there.
    pub fn element_mut(&mut self, path: &NodePath) -> Result<&mut Element> {
        if path.is_root() {
            return Ok(&mut self.root);
        }
        match self.node_mut(path) {
            Some(Node::Element(elem)) => Ok(elem),
            Some(other) => Err(Error::UnexpectedNodeType {
                expected: "element",
                found: other.kind(),
            }),
            None => Err(Error::UnexpectedNodeType {
                expected: "element",
                found: "detached node",
            }),
        }
    }

    fn element_at(&self, indices: &[usize]) -> Option<&Element> {
        let mut current = &self.root;
        for &index in indices {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    fn element_at_mut(&mut self, indices: &[usize]) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for &index in indices {
            current = current.children.get_mut(index)?.as_element_mut()?;
        }
        Some(current)
    }

    // ========================================================================
    // Splicing
    // ========================================================================

    /// Replace the node at `path` with `nodes`. Returns false if the path
    /// does not resolve (the root cannot be replaced).
    ///
    /// Paths of later siblings shift; apply batches in reverse document order.
    pub fn replace_with(&mut self, path: &NodePath, nodes: Vec<Node>) -> bool {
        let Some((parent, index)) = path.split_last() else {
            return false;
        };
        let Some(parent) = self.element_at_mut(parent) else {
            return false;
        };
        if index >= parent.children.len() {
            return false;
        }
        parent.children.splice(index..=index, nodes);
        true
    }

    /// Detach the node at `path` from its parent, children included.
    pub fn detach(&mut self, path: &NodePath) -> Option<Node> {
        let (parent, index) = path.split_last()?;
        let parent = self.element_at_mut(parent)?;
        (index < parent.children.len()).then(|| parent.children.remove(index))
    }
}

fn collect_elements(elem: &Element, path: &NodePath, tag: &str, out: &mut Vec<NodePath>) {
    for (i, child) in elem.children.iter().enumerate() {
        if let Node::Element(child_elem) = child {
            let child_path = path.child(i);
            if child_elem.name == tag {
                out.push(child_path.clone());
            }
            collect_elements(child_elem, &child_path, tag, out);
        }
    }
}

fn collect_text_nodes(elem: &Element, path: &NodePath, excluded: &[&str], out: &mut Vec<NodePath>) {
    for (i, child) in elem.children.iter().enumerate() {
        match child {
            Node::Text(_) => out.push(path.child(i)),
            Node::Element(child_elem) if !excluded.contains(&child_elem.name.as_str()) => {
                collect_text_nodes(child_elem, &path.child(i), excluded, out);
            }
            _ => {}
        }
    }
}
