//! Structured view over a documentation tree
//!
//! Renderers mostly want the well-known tags as fields rather than a tree.
//! [`XmlDocumentation`] pulls them out of a resolved [`DocTree`]; inline markup
//! inside a tag (`<see cref=".."/>`, `<paramref/>`, `<c>`) is kept as XML text.
//!
//! # Example
//!
//! ```
//! use docweave::doc::{DocTree, XmlDocumentation};
//!
//! let tree = DocTree::from_xml(
//!     r#"<summary>Adds two numbers</summary><param name="a">First</param>"#,
//! )
//! .unwrap();
//!
//! let doc = XmlDocumentation::from_tree(&tree);
//! assert_eq!(doc.summary.as_deref(), Some("Adds two numbers"));
//! assert_eq!(doc.params[0].name, "a");
//! ```

use super::tree::{DocElement, DocTree};
use serde::{Deserialize, Serialize};

/// Structured representation of XML documentation
///
/// All fields are optional as not all documentation will have all tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct XmlDocumentation {
    /// Content of `<summary>` tag - main description
    pub summary: Option<String>,

    /// Content of `<remarks>` tag - additional remarks/notes
    pub remarks: Option<String>,

    /// Content of `<returns>` tag - return value description
    pub returns: Option<String>,

    /// Content of `<value>` tag - property value description
    pub value: Option<String>,

    /// All `<param>` tags - parameter descriptions
    pub params: Vec<XmlParam>,

    /// All `<typeparam>` tags - generic type parameter descriptions
    pub type_params: Vec<XmlTypeParam>,

    /// All `<exception>` tags - exception documentation
    pub exceptions: Vec<XmlException>,

    /// All `<example>` tags - code examples
    pub examples: Vec<String>,

    /// All `<seealso>` tags - cross-references
    pub see_also: Vec<String>,

    /// The tree serialized back to XML (for fallback)
    pub raw: String,
}

/// Parameter documentation from `<param>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlParam {
    pub name: String,
    pub description: String,
}

/// Generic type parameter documentation from `<typeparam>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlTypeParam {
    pub name: String,
    pub description: String,
}

/// Exception documentation from `<exception>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlException {
    /// Exception type from `cref` attribute
    pub cref: String,
    pub description: String,
}

impl XmlDocumentation {
    pub fn from_tree(tree: &DocTree) -> Self {
        Self {
            summary: single(tree, "summary"),
            remarks: single(tree, "remarks"),
            returns: single(tree, "returns"),
            value: single(tree, "value"),
            params: named(tree, "param", "name")
                .map(|(name, description)| XmlParam { name, description })
                .collect(),
            type_params: named(tree, "typeparam", "name")
                .map(|(name, description)| XmlTypeParam { name, description })
                .collect(),
            exceptions: named(tree, "exception", "cref")
                .map(|(cref, description)| XmlException { cref, description })
                .collect(),
            examples: tree
                .elements("example")
                .map(content)
                .filter(|text| !text.is_empty())
                .collect(),
            see_also: tree
                .elements("seealso")
                .filter_map(|element| element.attribute("cref"))
                .map(str::to_string)
                .collect(),
            raw: tree.to_xml(),
        }
    }

    /// Check if this documentation is empty (no meaningful content)
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.remarks.is_none()
            && self.returns.is_none()
            && self.value.is_none()
            && self.params.is_empty()
            && self.type_params.is_empty()
            && self.exceptions.is_empty()
            && self.examples.is_empty()
            && self.see_also.is_empty()
    }
}

fn content(element: &DocElement) -> String {
    element.inner_xml().trim().to_string()
}

fn single(tree: &DocTree, tag: &str) -> Option<String> {
    tree.element(tag)
        .map(content)
        .filter(|text| !text.is_empty())
}

fn named<'a>(
    tree: &'a DocTree,
    tag: &'a str,
    attribute: &'a str,
) -> impl Iterator<Item = (String, String)> + 'a {
    tree.elements(tag).filter_map(move |element| {
        element
            .attribute(attribute)
            .map(|key| (key.to_string(), content(element)))
    })
}
