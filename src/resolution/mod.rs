//! Inheritance resolution: expanding `inheritdoc` markers into documentation
//!
//! Every entry is resolved by one memoized, cycle-safe algorithm:
//!
//! 1. A resolved entry is returned from the memo.
//! 2. The entry is marked in progress.
//! 3. Each `inheritdoc` marker (depth-first, document order) asks a
//!    [`CandidateDiscovery`] strategy for parent ids, resolves them
//!    recursively and substitutes the first non-empty one in place: either
//!    the sub-tree selected by its `path`, the matching section when nested,
//!    or the whole tree at the root. Markers without a usable parent vanish.
//! 4. The result is memoized and the mark cleared.
//!
//! Re-entering an entry that is still in progress yields empty documentation,
//! which guarantees termination on cyclic hierarchies.

pub mod discovery;

pub use discovery::{CandidateDiscovery, CrefDiscovery, MemberDiscovery, TypeDiscovery};

use crate::attach::{AttachReport, AttachedRegistry};
use crate::config::ResolutionConfig;
use crate::doc::{DocElement, DocNode, DocTree, PathExpr, XmlDocumentation};
use crate::registry::{Registry, RegistryEntry};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Resolution options and entry point
#[derive(Debug, Clone)]
pub struct InheritanceResolver {
    resolve_crefs: bool,
    inherit_undocumented_members: bool,
}

impl Default for InheritanceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl InheritanceResolver {
    pub fn new() -> Self {
        Self {
            resolve_crefs: true,
            inherit_undocumented_members: true,
        }
    }

    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self {
            resolve_crefs: config.resolve_crefs,
            inherit_undocumented_members: config.inherit_undocumented_members,
        }
    }

    /// Follow `cref` attributes on markers; when off, such markers are dropped
    pub fn with_cref_resolution(mut self, enabled: bool) -> Self {
        self.resolve_crefs = enabled;
        self
    }

    /// Treat undocumented inherited members as if they carried `<inheritdoc/>`
    pub fn with_inherited_member_fallback(mut self, enabled: bool) -> Self {
        self.inherit_undocumented_members = enabled;
        self
    }

    /// Resolve every entry without consuming the attached registry
    pub fn resolve_docs(&self, attached: &AttachedRegistry) -> HashMap<String, DocTree> {
        let mut pass = ResolutionPass {
            resolver: self,
            attached,
            resolved: HashMap::new(),
            in_progress: HashSet::new(),
        };

        // Sorted so cyclic graphs resolve the same way on every run
        for id in attached.registry().ids() {
            pass.resolve_entry(id);
        }

        let unresolved = pass
            .resolved
            .values()
            .filter(|tree| tree.is_empty())
            .count();
        info!(
            "Resolved documentation for {} entries ({} without documentation)",
            pass.resolved.len(),
            unresolved
        );
        pass.resolved
    }

    /// Resolve every entry and move to the final phase
    pub fn resolve(&self, attached: AttachedRegistry) -> ResolvedRegistry {
        let resolved = self.resolve_docs(&attached);
        ResolvedRegistry { attached, resolved }
    }
}

struct ResolutionPass<'a> {
    resolver: &'a InheritanceResolver,
    attached: &'a AttachedRegistry,
    resolved: HashMap<String, DocTree>,
    in_progress: HashSet<String>,
}

impl<'a> ResolutionPass<'a> {
    fn registry(&self) -> &'a Registry {
        self.attached.registry()
    }

    fn resolve_entry(&mut self, id: &str) -> DocTree {
        if let Some(tree) = self.resolved.get(id) {
            return tree.clone();
        }
        if self.in_progress.contains(id) {
            debug!("Inheritance cycle through '{id}'; contributing nothing");
            return DocTree::empty();
        }
        let Some(entry) = self.registry().lookup(id) else {
            return DocTree::empty();
        };

        let raw = self.raw_doc(entry);
        if !raw.contains_inheritdoc() {
            self.resolved.insert(id.to_string(), raw.clone());
            return raw;
        }

        self.in_progress.insert(id.to_string());
        let mut sections = Vec::new();
        let nodes = self.expand(entry, raw.nodes, &mut sections);
        self.in_progress.remove(id);

        let tree = DocTree::new(nodes);
        self.resolved.insert(id.to_string(), tree.clone());
        tree
    }

    fn raw_doc(&self, entry: &RegistryEntry) -> DocTree {
        match self.attached.raw_doc(&entry.id) {
            Some(tree) => tree.clone(),
            None if self.resolver.inherit_undocumented_members && entry.is_inherited() => {
                DocTree::new(vec![DocElement::new(crate::doc::INHERITDOC).into()])
            }
            None => DocTree::empty(),
        }
    }

    /// Rebuild `nodes` with every marker replaced; `sections` holds the enclosing elements, childless
    fn expand(
        &mut self,
        entry: &RegistryEntry,
        nodes: Vec<DocNode>,
        sections: &mut Vec<DocElement>,
    ) -> Vec<DocNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                DocNode::Element(element) if element.is_inheritdoc() => {
                    out.extend(self.substitute(entry, &element, sections));
                }
                DocNode::Element(mut element) => {
                    let children = std::mem::take(&mut element.children);
                    sections.push(element.clone());
                    element.children = self.expand(entry, children, sections);
                    sections.pop();
                    out.push(DocNode::Element(element));
                }
                text => out.push(text),
            }
        }
        out
    }

    fn substitute(
        &mut self,
        entry: &RegistryEntry,
        marker: &DocElement,
        sections: &[DocElement],
    ) -> Vec<DocNode> {
        let candidates = if marker.attribute("cref").is_some() {
            if !self.resolver.resolve_crefs {
                return Vec::new();
            }
            CrefDiscovery.candidates(self.registry(), entry, marker)
        } else if entry.is_type() {
            TypeDiscovery.candidates(self.registry(), entry, marker)
        } else {
            MemberDiscovery.candidates(self.registry(), entry, marker)
        };

        let selection = match marker.attribute("path") {
            Some(path) => match path.parse::<PathExpr>() {
                Ok(expr) => Some(expr),
                Err(e) => {
                    debug!("Ignoring inheritdoc on '{}': {e}", entry.id);
                    return Vec::new();
                }
            },
            None if sections.is_empty() => None,
            None => Some(PathExpr::content_of(sections)),
        };

        for candidate in candidates {
            if candidate == entry.id {
                continue;
            }
            let parent = self.resolve_entry(&candidate);
            if parent.is_empty() {
                continue;
            }
            return match &selection {
                Some(expr) => expr.select(&parent.nodes),
                None => parent.nodes,
            };
        }

        debug!("No documentation to inherit for '{}'", entry.id);
        Vec::new()
    }
}

/// Final phase: every registry entry with its resolved documentation
#[derive(Debug)]
pub struct ResolvedRegistry {
    attached: AttachedRegistry,
    resolved: HashMap<String, DocTree>,
}

impl ResolvedRegistry {
    pub fn registry(&self) -> &Registry {
        self.attached.registry()
    }

    pub fn lookup(&self, id: &str) -> Option<&RegistryEntry> {
        self.attached.lookup(id)
    }

    pub fn raw_doc(&self, id: &str) -> Option<&DocTree> {
        self.attached.raw_doc(id)
    }

    /// Resolved documentation; present (possibly empty) for every registry id
    pub fn resolved_doc(&self, id: &str) -> Option<&DocTree> {
        self.resolved.get(id)
    }

    pub fn to_xml_documentation(&self, id: &str) -> Option<XmlDocumentation> {
        self.resolved_doc(id).map(XmlDocumentation::from_tree)
    }

    pub fn attach_report(&self) -> AttachReport {
        self.attached.report()
    }

    /// `(id, resolved doc)` pairs sorted by id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocTree)> {
        let mut ids: Vec<&String> = self.resolved.keys().collect();
        ids.sort_unstable();
        ids.into_iter()
            .map(move |id| (id.as_str(), &self.resolved[id]))
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
