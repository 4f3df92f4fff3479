//! Documentation trees, the XML documentation file format and path selection

pub mod file;
pub mod path;
pub mod tree;
pub mod xml;
pub mod xml_doc;

pub use file::{DocEntry, DocFile};
pub use path::PathExpr;
pub use tree::{DocElement, DocNode, DocTree, INHERITDOC};
pub use xml_doc::{XmlDocumentation, XmlException, XmlParam, XmlTypeParam};
