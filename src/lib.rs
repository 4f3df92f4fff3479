/// The main library module for docweave
pub mod attach;
pub mod config;
pub mod doc;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod registry;
pub mod resolution;
pub mod types;

// Explicit exports for better API clarity
pub use attach::{AttachReport, AttachedRegistry, DocumentationAttacher};
pub use config::Settings;
pub use doc::{DocElement, DocEntry, DocFile, DocNode, DocTree, PathExpr, XmlDocumentation};
pub use error::{DocError, DocResult, EncodeError, EncodeResult, XmlError, XmlResult};
pub use identity::{DocId, DocTarget, encode, encode_type_ref, prefixed_id, qualified_id};
pub use pipeline::{AnalysisRun, run, run_many};
pub use registry::{Registry, RegistryEntry};
pub use resolution::{InheritanceResolver, ResolvedRegistry};
pub use types::{
    ElementDescriptor, ElementKind, IdPrefix, OperatorCategory, ParameterDescriptor,
    TypeCategory, TypeDeclaration, TypeParameterScope, TypeParameterSlot, TypeRef,
};
