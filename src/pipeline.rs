//! Batch driver: descriptors + documentation file in, resolved documentation out
//!
//! One [`AnalysisRun`] is processed sequentially through
//! build → attach → resolve. Independent runs share nothing and
//! [`run_many`] processes them in parallel.

use crate::attach::{AttachReport, DocumentationAttacher};
use crate::config::Settings;
use crate::doc::{DocEntry, DocFile, DocTree};
use crate::error::{DocError, DocResult, ErrorContext};
use crate::registry::Registry;
use crate::resolution::{InheritanceResolver, ResolvedRegistry};
use crate::types::TypeDeclaration;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Inputs of one analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalysisRun {
    /// Label used in logs and reports, usually the assembly name
    pub name: String,
    pub declarations: Vec<TypeDeclaration>,
    pub doc_entries: Vec<DocEntry>,
}

impl AnalysisRun {
    pub fn new(
        name: impl Into<String>,
        declarations: Vec<TypeDeclaration>,
        doc_entries: Vec<DocEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            declarations,
            doc_entries,
        }
    }

    /// Read a JSON descriptor file and a compiled XML documentation file
    pub fn from_files(descriptors: impl AsRef<Path>, docs: impl AsRef<Path>) -> DocResult<Self> {
        let declarations = load_declarations(descriptors.as_ref())?;
        let file = DocFile::load(docs.as_ref())?;
        let name = file.assembly.unwrap_or_else(|| {
            docs.as_ref()
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        Ok(Self::new(name, declarations, file.entries))
    }
}

/// Parse a JSON array of type declarations
pub fn load_declarations(path: &Path) -> DocResult<Vec<TypeDeclaration>> {
    let content = std::fs::read_to_string(path).map_err(|source| DocError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DocError::Descriptors {
        path: path.to_path_buf(),
        source,
    })
}

/// Process one run through every phase
pub fn run(analysis: AnalysisRun, settings: &Settings) -> DocResult<ResolvedRegistry> {
    let start = Instant::now();
    let registry = Registry::build(analysis.declarations)?;

    let attached = DocumentationAttacher::new()
        .with_unmatched_logging(settings.attach.log_unmatched)
        .attach(registry, analysis.doc_entries);

    let resolved = InheritanceResolver::from_config(&settings.resolution).resolve(attached);
    info!(
        "Run '{}' finished: {} elements in {:?}",
        analysis.name,
        resolved.len(),
        start.elapsed()
    );
    Ok(resolved)
}

/// Process independent runs in parallel; results keep the input order
pub fn run_many(
    runs: Vec<AnalysisRun>,
    settings: &Settings,
) -> Vec<(String, DocResult<ResolvedRegistry>)> {
    runs.into_par_iter()
        .map(|analysis| {
            let name = analysis.name.clone();
            (name, run(analysis, settings))
        })
        .collect()
}

/// Serializable view of a resolved run
#[derive(Debug, Serialize)]
pub struct RunExport<'a> {
    pub report: AttachReport,
    pub elements: Vec<ElementExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ElementExport<'a> {
    pub id: &'a str,
    pub doc_id: String,
    pub documentation: &'a DocTree,
}

impl<'a> RunExport<'a> {
    /// Every element, or only `only` when given
    pub fn new(resolved: &'a ResolvedRegistry, only: Option<&str>) -> Self {
        let elements = resolved
            .iter()
            .filter(|(id, _)| only.is_none_or(|wanted| wanted == *id))
            .filter_map(|(id, documentation)| {
                let entry = resolved.lookup(id)?;
                Some(ElementExport {
                    id,
                    doc_id: format!("{}:{id}", entry.descriptor.kind.id_prefix()),
                    documentation,
                })
            })
            .collect();

        Self {
            report: resolved.attach_report(),
            elements,
        }
    }
}

/// JSON rendering of a resolved run
pub fn export_json(resolved: &ResolvedRegistry, only: Option<&str>, pretty: bool) -> DocResult<String> {
    let export = RunExport::new(resolved, only);
    if pretty {
        serde_json::to_string_pretty(&export).context("Failed to serialize resolved documentation")
    } else {
        serde_json::to_string(&export).context("Failed to serialize resolved documentation")
    }
}
