//! Attaching documentation file entries to registry elements
//!
//! Every `(raw id, tree)` pair from a documentation file is parsed with the
//! same grammar the encoder uses and matched against the registry. Entries
//! that reference elements outside the analysis scope, or whose id cannot be
//! parsed, are skipped and counted; they never abort the run.

use crate::doc::{DocEntry, DocTree};
use crate::identity::{DocId, DocTarget};
use crate::registry::{Registry, RegistryEntry};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Outcome counts of one attach pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttachReport {
    pub matched: usize,
    /// Well-formed ids with no matching registry element
    pub unmatched: usize,
    /// Ids that could not be parsed
    pub malformed: usize,
    /// Matched entries that replaced an earlier entry for the same element
    pub overwritten: usize,
}

/// Registry plus the raw documentation attached to its entries
#[derive(Debug)]
pub struct AttachedRegistry {
    registry: Registry,
    raw_docs: HashMap<String, DocTree>,
    report: AttachReport,
}

impl AttachedRegistry {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn lookup(&self, id: &str) -> Option<&RegistryEntry> {
        self.registry.lookup(id)
    }

    /// Raw documentation of an element, if the documentation file had any
    pub fn raw_doc(&self, id: &str) -> Option<&DocTree> {
        self.raw_docs.get(id)
    }

    pub fn report(&self) -> AttachReport {
        self.report
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentationAttacher {
    log_unmatched: bool,
}

impl DocumentationAttacher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log every skipped entry at debug level
    pub fn with_unmatched_logging(mut self, enabled: bool) -> Self {
        self.log_unmatched = enabled;
        self
    }

    /// Consume the registry and attach `entries` to it
    ///
    /// Duplicate ids in the input are not an error; the last entry wins.
    pub fn attach(
        &self,
        registry: Registry,
        entries: impl IntoIterator<Item = DocEntry>,
    ) -> AttachedRegistry {
        let mut raw_docs = HashMap::new();
        let mut report = AttachReport::default();

        for entry in entries {
            let doc_id = match DocId::parse(&entry.raw_id) {
                Ok(doc_id) => doc_id,
                Err(e) => {
                    report.malformed += 1;
                    if self.log_unmatched {
                        debug!("Skipping documentation entry: {e}");
                    }
                    continue;
                }
            };

            match resolve_target(&registry, &doc_id.target) {
                Some(id) => {
                    report.matched += 1;
                    if raw_docs.insert(id, entry.tree).is_some() {
                        report.overwritten += 1;
                    }
                }
                None => {
                    report.unmatched += 1;
                    if self.log_unmatched {
                        debug!("No element for documentation entry '{}'", entry.raw_id);
                    }
                }
            }
        }

        info!(
            "Attached documentation: {} matched, {} unmatched, {} malformed",
            report.matched, report.unmatched, report.malformed
        );

        AttachedRegistry {
            registry,
            raw_docs,
            report,
        }
    }
}

/// Registry id for a parsed target: the type itself, or a member of a found type
pub(crate) fn resolve_target(registry: &Registry, target: &DocTarget) -> Option<String> {
    match target {
        DocTarget::Type { type_id } => registry
            .lookup(type_id)
            .filter(|entry| entry.is_type())
            .map(|entry| entry.id.clone()),
        DocTarget::Member { type_id, .. } => {
            registry.lookup(type_id).filter(|entry| entry.is_type())?;
            let id = target.qualified_id();
            registry.has_member(type_id, &id).then_some(id)
        }
    }
}
