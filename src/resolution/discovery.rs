//! Candidate discovery strategies for `inheritdoc` markers
//!
//! The resolution engine is one algorithm; what differs between type-level,
//! member-level and `cref` inheritance is only where the candidate parents
//! come from. Each strategy answers that for one marker.

use crate::attach::resolve_target;
use crate::doc::DocElement;
use crate::identity::{DocId, DocTarget};
use crate::registry::{Registry, RegistryEntry};

/// Source of candidate parent ids for one `inheritdoc` marker
pub trait CandidateDiscovery {
    /// Candidate ids in priority order; the first with documentation wins
    fn candidates(
        &self,
        registry: &Registry,
        entry: &RegistryEntry,
        marker: &DocElement,
    ) -> Vec<String>;
}

/// Base type, then implemented interfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeDiscovery;

/// The same member on each ancestor, nearest first
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberDiscovery;

/// The single element named by the marker's `cref` attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct CrefDiscovery;

impl CandidateDiscovery for TypeDiscovery {
    fn candidates(
        &self,
        registry: &Registry,
        entry: &RegistryEntry,
        _marker: &DocElement,
    ) -> Vec<String> {
        if !entry.is_type() {
            return Vec::new();
        }
        registry.base_elements_of(&entry.id).to_vec()
    }
}

impl CandidateDiscovery for MemberDiscovery {
    fn candidates(
        &self,
        registry: &Registry,
        entry: &RegistryEntry,
        _marker: &DocElement,
    ) -> Vec<String> {
        if entry.is_type() {
            return Vec::new();
        }
        registry.base_elements_of(&entry.id).to_vec()
    }
}

impl CandidateDiscovery for CrefDiscovery {
    fn candidates(
        &self,
        registry: &Registry,
        _entry: &RegistryEntry,
        marker: &DocElement,
    ) -> Vec<String> {
        let Some(cref) = marker.attribute("cref") else {
            return Vec::new();
        };

        let targets: Vec<DocTarget> = if cref.contains(':') {
            // `!:` marks a reference the compiler could not resolve
            match DocId::parse(cref) {
                Ok(doc_id) => vec![doc_id.target],
                Err(_) => Vec::new(),
            }
        } else {
            DocId::parse_unprefixed(cref)
        };

        targets
            .iter()
            .find_map(|target| resolve_target(registry, target))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementDescriptor, TypeDeclaration, TypeRef};

    fn registry() -> Registry {
        Registry::build(vec![
            TypeDeclaration::new(ElementDescriptor::interface("MyApp", "IRunner"))
                .with_member(ElementDescriptor::method("Run")),
            TypeDeclaration::new(ElementDescriptor::class("MyApp", "Runner"))
                .implements(TypeRef::named("MyApp", "IRunner"))
                .with_member(ElementDescriptor::method("Run")),
        ])
        .unwrap()
    }

    fn marker(cref: Option<&str>) -> DocElement {
        let marker = DocElement::new("inheritdoc");
        match cref {
            Some(cref) => marker.with_attribute("cref", cref),
            None => marker,
        }
    }

    #[test]
    fn test_structural_strategies_respect_entry_kind() {
        let registry = registry();
        let runner = registry.lookup("MyApp.Runner").unwrap();
        let run = registry.lookup("MyApp.Runner.Run").unwrap();

        assert_eq!(
            TypeDiscovery.candidates(&registry, runner, &marker(None)),
            ["MyApp.IRunner"]
        );
        assert!(TypeDiscovery.candidates(&registry, run, &marker(None)).is_empty());
        assert_eq!(
            MemberDiscovery.candidates(&registry, run, &marker(None)),
            ["MyApp.IRunner.Run"]
        );
    }

    #[test]
    fn test_cref_targets() {
        let registry = registry();
        let runner = registry.lookup("MyApp.Runner").unwrap();

        let found = |cref: &str| CrefDiscovery.candidates(&registry, runner, &marker(Some(cref)));
        assert_eq!(found("T:MyApp.IRunner"), ["MyApp.IRunner"]);
        assert_eq!(found("M:MyApp.IRunner.Run"), ["MyApp.IRunner.Run"]);
        assert_eq!(found("MyApp.IRunner.Run"), ["MyApp.IRunner.Run"]);
        assert!(found("T:MyApp.Missing").is_empty());
        assert!(found("!:IRunner").is_empty());
        assert!(found("M:broken(").is_empty());
        assert!(CrefDiscovery
            .candidates(&registry, runner, &marker(None))
            .is_empty());
    }
}
