//! Ordered documentation trees
//!
//! A [`DocTree`] is the parsed content of one `<member>` entry: a list of
//! top-level nodes (`summary`, `remarks`, `param`, `inheritdoc`, text, ...).

use crate::error::XmlResult;
use serde::{Deserialize, Serialize};

/// Name of the inheritance marker element
pub const INHERITDOC: &str = "inheritdoc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocNode {
    Element(DocElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTree {
    pub nodes: Vec<DocNode>,
}

impl DocNode {
    pub fn text(text: impl Into<String>) -> Self {
        DocNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&DocElement> {
        match self {
            DocNode::Element(element) => Some(element),
            DocNode::Text(_) => None,
        }
    }

    /// True for whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            DocNode::Text(text) => text.trim().is_empty(),
            DocNode::Element(_) => false,
        }
    }

    pub fn contains_inheritdoc(&self) -> bool {
        match self {
            DocNode::Element(element) => {
                element.is_inheritdoc()
                    || element.children.iter().any(DocNode::contains_inheritdoc)
            }
            DocNode::Text(_) => false,
        }
    }

    fn write_xml(&self, out: &mut String) {
        match self {
            DocNode::Text(text) => escape_into(text, false, out),
            DocNode::Element(element) => element.write_xml(out),
        }
    }
}

impl From<DocElement> for DocNode {
    fn from(element: DocElement) -> Self {
        DocNode::Element(element)
    }
}

impl DocElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<DocNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(DocNode::Text(text.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_inheritdoc(&self) -> bool {
        self.name == INHERITDOC
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// The children serialized back to XML
    pub fn inner_xml(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_xml(&mut out);
        }
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl From<Vec<DocNode>> for DocTree {
    fn from(nodes: Vec<DocNode>) -> Self {
        Self { nodes }
    }
}

impl DocTree {
    pub fn new(nodes: Vec<DocNode>) -> Self {
        Self { nodes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse an XML fragment such as the content of a `<member>` element
    pub fn from_xml(fragment: &str) -> XmlResult<Self> {
        super::xml::parse_fragment(fragment).map(Self::new)
    }

    /// No elements and no non-whitespace text
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(DocNode::is_blank)
    }

    pub fn contains_inheritdoc(&self) -> bool {
        self.nodes.iter().any(DocNode::contains_inheritdoc)
    }

    /// First top-level element with the given name
    pub fn element(&self, name: &str) -> Option<&DocElement> {
        self.nodes
            .iter()
            .filter_map(DocNode::as_element)
            .find(|element| element.name == name)
    }

    /// All top-level elements with the given name, in document order
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocElement> + 'a {
        self.nodes
            .iter()
            .filter_map(DocNode::as_element)
            .filter(move |element| element.name == name)
    }

    /// Drop whitespace-only text at the top level
    pub fn trimmed(mut self) -> Self {
        self.nodes.retain(|node| !node.is_blank());
        self
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_xml(&mut out);
        }
        out
    }
}

fn collect_text(nodes: &[DocNode], out: &mut String) {
    for node in nodes {
        match node {
            DocNode::Text(text) => out.push_str(text),
            DocNode::Element(element) => collect_text(&element.children, out),
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
