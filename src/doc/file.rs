//! Compiled XML documentation files
//!
//! The compiler writes one file per assembly:
//!
//! ```xml
//! <doc>
//!     <assembly><name>MyLibrary</name></assembly>
//!     <members>
//!         <member name="T:MyLibrary.Animal"><summary>An animal.</summary></member>
//!     </members>
//! </doc>
//! ```
//!
//! This module flattens it into `(raw id, tree)` pairs for the attacher.

use super::tree::{DocNode, DocTree};
use super::xml;
use crate::error::{DocError, DocResult, XmlResult};
use std::path::Path;

/// One `<member>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub raw_id: String,
    pub tree: DocTree,
}

impl DocEntry {
    pub fn new(raw_id: impl Into<String>, tree: DocTree) -> Self {
        Self {
            raw_id: raw_id.into(),
            tree,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocFile {
    pub assembly: Option<String>,
    pub entries: Vec<DocEntry>,
}

impl DocFile {
    pub fn parse(content: &str) -> XmlResult<Self> {
        let root = xml::parse_document(content)?;
        let mut file = DocFile::default();

        for child in root.children.iter().filter_map(DocNode::as_element) {
            match child.name.as_str() {
                "assembly" => {
                    file.assembly = child
                        .children
                        .iter()
                        .filter_map(DocNode::as_element)
                        .find(|element| element.name == "name")
                        .map(|name| name.text_content().trim().to_string());
                }
                "members" => {
                    for member in child.children.iter().filter_map(DocNode::as_element) {
                        if member.name != "member" {
                            continue;
                        }
                        match member.attribute("name") {
                            Some(raw_id) => file.entries.push(DocEntry::new(
                                raw_id,
                                DocTree::new(member.children.clone()).trimmed(),
                            )),
                            None => tracing::debug!("Skipping <member> without a name attribute"),
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(file)
    }

    pub fn load(path: impl AsRef<Path>) -> DocResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| DocError::Xml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>MyLibrary</name>
    </assembly>
    <members>
        <member name="T:MyLibrary.Animal">
            <summary>An animal.</summary>
        </member>
        <member name="F:MyLibrary.Animal.weight">
            <summary>Weight in kilograms.</summary>
        </member>
        <member>
            <summary>Orphan</summary>
        </member>
        <member name="M:MyLibrary.Dog.Speak">
            <inheritdoc/>
        </member>
    </members>
</doc>"#;

    #[test]
    fn test_parse_members() {
        let file = DocFile::parse(SAMPLE).unwrap();
        assert_eq!(file.assembly.as_deref(), Some("MyLibrary"));
        assert_eq!(file.entries.len(), 3);
        assert_eq!(file.entries[1].raw_id, "F:MyLibrary.Animal.weight");

        let summary = file.entries[0].tree.element("summary").unwrap();
        assert_eq!(summary.text_content(), "An animal.");
        // Only the element survives; surrounding whitespace is dropped
        assert_eq!(file.entries[0].tree.nodes.len(), 1);
        assert!(file.entries[2].tree.contains_inheritdoc());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DocFile::load("/nonexistent/MyLibrary.xml").unwrap_err();
        assert_eq!(err.status_code(), "FILE_READ_ERROR");
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<doc><members><member name=\"T:A\"></members></doc>").unwrap();

        let err = DocFile::load(&path).unwrap_err();
        assert_eq!(err.status_code(), "XML_ERROR");
    }
}
