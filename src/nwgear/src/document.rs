//! Rendered gear-build document tree
//!
//! The page renderer is an external collaborator; what reaches this crate is a
//! JSON snapshot of the rendered DOM reduced to the parts the extractor needs:
//! tag, id, CSS classes, the node's own text, and ordered children.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One node of the rendered document.
///
/// `text` holds only the node's direct text; use [`Node::text_content`] for
/// the text of the whole subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create an element with no classes, text, or children
    pub fn element(tag: &str) -> Self {
        Node {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Parse a tree from its JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a tree snapshot from disk
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// All nodes below this one in document (pre-order) order, excluding self
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant carrying `class`
    pub fn find_class(&self, class: &str) -> Option<&Node> {
        self.descendants().find(|n| n.has_class(class))
    }

    /// All descendants carrying `class`, in document order
    pub fn find_all_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.descendants().filter(move |n| n.has_class(class))
    }

    /// Follow a chain of classes, each step searching the previous match's
    /// subtree for the first node with the next class.
    pub fn find_path(&self, classes: &[String]) -> Option<&Node> {
        let mut current = self;
        for class in classes {
            current = current.find_class(class)?;
        }
        Some(current)
    }

    /// Text of this node and all of its descendants, whitespace collapsed
    pub fn text_content(&self) -> String {
        let mut raw = String::new();
        collect_text(self, &mut raw);
        collapse_ws(&raw)
    }
}

fn collect_text(node: &Node, out: &mut String) {
    if !node.text.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&node.text);
    }
    for child in &node.children {
        collect_text(child, out);
    }
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pre-order iterator over a node's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
