#![allow(dead_code)]

use docweave::{
    AttachedRegistry, DocEntry, DocTree, DocumentationAttacher, ElementDescriptor, Registry,
    TypeDeclaration, TypeRef,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// `(raw id, xml fragment)` pairs as documentation entries
pub fn entries(docs: &[(&str, &str)]) -> Vec<DocEntry> {
    docs.iter()
        .map(|(id, xml)| {
            DocEntry::new(*id, DocTree::from_xml(xml).expect("fixture XML must parse"))
        })
        .collect()
}

pub fn attach(declarations: Vec<TypeDeclaration>, docs: &[(&str, &str)]) -> AttachedRegistry {
    let registry = Registry::build(declarations).expect("fixture descriptors must encode");
    DocumentationAttacher::new().attach(registry, entries(docs))
}

/// Wrap entries into a compiled documentation file
pub fn doc_file_xml(assembly: &str, docs: &[(&str, &str)]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\"?>\n<doc>\n    <assembly>\n        <name>{assembly}</name>\n    </assembly>\n    <members>\n"
    );
    for (id, body) in docs {
        xml.push_str(&format!(
            "        <member name=\"{id}\">\n            {body}\n        </member>\n"
        ));
    }
    xml.push_str("    </members>\n</doc>\n");
    xml
}

/// Interface `Work.IWorker` and a three-level class chain below it, each declaring `Run()`
///
/// `Worker : IWorker`, `SpecialWorker : Worker`, `ExpertWorker : SpecialWorker`.
pub fn worker_chain() -> Vec<TypeDeclaration> {
    let iworker = TypeRef::named("Work", "IWorker");
    vec![
        TypeDeclaration::new(ElementDescriptor::interface("Work", "IWorker"))
            .with_member(ElementDescriptor::method("Run")),
        TypeDeclaration::new(ElementDescriptor::class("Work", "Worker"))
            .extends(TypeRef::named("System", "Object"))
            .implements(iworker.clone())
            .with_member(ElementDescriptor::method("Run")),
        TypeDeclaration::new(ElementDescriptor::class("Work", "SpecialWorker"))
            .extends(TypeRef::named("Work", "Worker"))
            .implements(iworker.clone())
            .with_member(ElementDescriptor::method("Run")),
        TypeDeclaration::new(ElementDescriptor::class("Work", "ExpertWorker"))
            .extends(TypeRef::named("Work", "SpecialWorker"))
            .implements(iworker)
            .with_member(ElementDescriptor::method("Run")),
    ]
}

/// Two classes that name each other as base type
pub fn cyclic_pair() -> Vec<TypeDeclaration> {
    vec![
        TypeDeclaration::new(ElementDescriptor::class("Loop", "A"))
            .extends(TypeRef::named("Loop", "B"))
            .with_member(ElementDescriptor::method("Spin")),
        TypeDeclaration::new(ElementDescriptor::class("Loop", "B"))
            .extends(TypeRef::named("Loop", "A"))
            .with_member(ElementDescriptor::method("Spin")),
    ]
}
