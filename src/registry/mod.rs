//! Element registry: every declared type and member keyed by canonical id
//!
//! The registry is built once per analysis run from [`TypeDeclaration`]s and
//! is read-only afterwards. Besides the id index it records, for each entry,
//! the ids documentation may be inherited from:
//!
//! - types: the base type followed by the directly implemented interfaces
//! - members: the same-signature member in each ancestor type, nearest first

mod ancestry;

use crate::error::EncodeResult;
use crate::identity::{declaration_id, encode};
use crate::types::{ElementDescriptor, TypeDeclaration};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use ancestry::linearize;

/// One declared type or member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: String,
    pub descriptor: ElementDescriptor,
    /// Id of the type this member is indexed under; `None` for types
    pub owner: Option<String>,
    /// Id of the type that declares this member (differs from `owner` when inherited)
    pub declaring_type: Option<String>,
    pub base_elements: Vec<String>,
}

impl RegistryEntry {
    pub fn is_type(&self) -> bool {
        self.descriptor.kind.is_type()
    }

    /// Visible on `owner` but declared on an ancestor
    pub fn is_inherited(&self) -> bool {
        match (&self.owner, &self.declaring_type) {
            (Some(owner), Some(declaring)) => owner != declaring,
            _ => false,
        }
    }
}

/// Hierarchy links of one type, in declaration-id form
#[derive(Debug, Clone, Default)]
pub(crate) struct TypeLinks {
    pub base: Option<String>,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, RegistryEntry>,
    members_by_type: HashMap<String, HashSet<String>>,
    ancestors: HashMap<String, Vec<String>>,
}

/// A member candidate competing for an id on one type
struct MemberCandidate {
    rank: usize,
    declaring_type: String,
    local_id: String,
    descriptor: ElementDescriptor,
}

impl Registry {
    /// Index all declarations of one analysis run
    ///
    /// The result does not depend on input order. When several members of a
    /// type encode to the same id, the one declared on the type itself wins,
    /// then the one declared on the nearest ancestor. Of several declarations
    /// of one type, the one with the most members is kept.
    pub fn build(declarations: impl IntoIterator<Item = TypeDeclaration>) -> EncodeResult<Self> {
        let mut declarations = declarations
            .into_iter()
            .map(|declaration| {
                let key = serde_json::to_string(&declaration).unwrap_or_default();
                Ok((encode(&declaration.descriptor)?, key, declaration))
            })
            .collect::<EncodeResult<Vec<_>>>()?;
        // Within one id: the larger declaration first, then a total order on content
        declarations.sort_by(|(a_id, a_key, a), (b_id, b_key, b)| {
            a_id.cmp(b_id)
                .then_with(|| b.members.len().cmp(&a.members.len()))
                .then_with(|| a_key.cmp(b_key))
        });

        let mut registry = Registry::default();
        let mut links: HashMap<String, TypeLinks> = HashMap::new();
        let mut kept: Vec<(String, TypeDeclaration)> = Vec::new();

        for (type_id, _, declaration) in declarations {
            if kept.last().is_some_and(|(id, _)| *id == type_id) {
                warn!("Type '{type_id}' declared more than once; keeping the larger declaration");
                continue;
            }

            let type_links = TypeLinks {
                base: declaration.base_type.as_ref().map(declaration_id).transpose()?,
                interfaces: declaration
                    .interfaces
                    .iter()
                    .map(declaration_id)
                    .collect::<EncodeResult<Vec<_>>>()?,
            };
            links.insert(type_id.clone(), type_links);
            kept.push((type_id, declaration));
        }

        for (type_id, declaration) in &kept {
            let type_links = links.get(type_id).cloned().unwrap_or_default();
            let mut base_elements = Vec::new();
            base_elements.extend(type_links.base);
            base_elements.extend(type_links.interfaces);

            registry.entries.insert(
                type_id.clone(),
                RegistryEntry {
                    id: type_id.clone(),
                    descriptor: declaration.descriptor.clone(),
                    owner: None,
                    declaring_type: None,
                    base_elements,
                },
            );
            registry
                .ancestors
                .insert(type_id.clone(), linearize(type_id, &links));
        }

        let mut pending = Vec::new();
        for (type_id, declaration) in &kept {
            let candidates = registry.rank_members(type_id, &declaration.members)?;
            pending.extend(candidates);
        }

        for (id, owner, candidate) in &pending {
            if registry.entries.contains_key(id) {
                warn!("Member id '{id}' collides with a type id; skipping member");
                continue;
            }
            registry
                .members_by_type
                .entry(owner.clone())
                .or_default()
                .insert(id.clone());
            registry.entries.insert(
                id.clone(),
                RegistryEntry {
                    id: id.clone(),
                    descriptor: candidate.descriptor.clone(),
                    owner: Some(owner.clone()),
                    declaring_type: Some(candidate.declaring_type.clone()),
                    base_elements: Vec::new(),
                },
            );
        }

        // Base links need every member in place
        for (id, owner, candidate) in &pending {
            let base_elements = registry.member_base_elements(id, owner, candidate)?;
            if let Some(entry) = registry.entries.get_mut(id) {
                if entry.owner.as_deref() == Some(owner.as_str()) {
                    entry.base_elements = base_elements;
                }
            }
        }

        debug!(
            "Registry built: {} types, {} entries",
            kept.len(),
            registry.entries.len()
        );
        Ok(registry)
    }

    /// Pick one descriptor per member id of `type_id`
    fn rank_members(
        &self,
        type_id: &str,
        members: &[ElementDescriptor],
    ) -> EncodeResult<Vec<(String, String, MemberCandidate)>> {
        let ancestors = self.ancestors_of(type_id);
        let mut best: HashMap<String, MemberCandidate> = HashMap::new();

        for member in members {
            let local_id = encode(member)?;
            let declaring_type = match &member.enclosing_type {
                Some(enclosing) => encode(enclosing)?,
                None => type_id.to_string(),
            };
            let rank = if declaring_type == type_id {
                0
            } else {
                ancestors
                    .iter()
                    .position(|ancestor| *ancestor == declaring_type)
                    .map_or(usize::MAX, |index| index + 1)
            };

            let id = format!("{type_id}.{local_id}");
            let candidate = MemberCandidate {
                rank,
                declaring_type,
                local_id,
                descriptor: member.clone(),
            };

            let replace = match best.get(&id) {
                Some(current) => {
                    (candidate.rank, &candidate.declaring_type)
                        < (current.rank, &current.declaring_type)
                }
                None => true,
            };
            if replace {
                best.insert(id, candidate);
            }
        }

        let mut ranked: Vec<_> = best
            .into_iter()
            .map(|(id, candidate)| (id, type_id.to_string(), candidate))
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(ranked)
    }

    /// Same-signature members up the ancestor chain, then the explicitly implemented one
    fn member_base_elements(
        &self,
        id: &str,
        owner: &str,
        candidate: &MemberCandidate,
    ) -> EncodeResult<Vec<String>> {
        let mut bases: Vec<String> = self
            .ancestors_of(owner)
            .iter()
            .map(|ancestor| format!("{ancestor}.{}", candidate.local_id))
            .filter(|base| base != id && self.entries.contains_key(base))
            .collect();

        if let Some(interface) = &candidate.descriptor.explicit_interface {
            let mut plain = candidate.descriptor.clone();
            plain.explicit_interface = None;
            let target = format!("{}.{}", declaration_id(interface)?, encode(&plain)?);
            if self.entries.contains_key(&target) && !bases.contains(&target) {
                bases.push(target);
            }
        }

        Ok(bases)
    }

    /// Exact-match lookup
    pub fn lookup(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    /// Ids documentation may be inherited from; empty for unknown ids
    pub fn base_elements_of(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map(|entry| entry.base_elements.as_slice())
            .unwrap_or(&[])
    }

    /// Linearized ancestors of a type: base chain nearest first, then interfaces
    pub fn ancestors_of(&self, type_id: &str) -> &[String] {
        self.ancestors
            .get(type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `member_id` (qualified) is indexed under `type_id`
    pub fn has_member(&self, type_id: &str, member_id: &str) -> bool {
        self.members_by_type
            .get(type_id)
            .is_some_and(|members| members.contains(member_id))
    }

    /// Qualified ids of all members indexed under `type_id`, sorted
    pub fn members_of(&self, type_id: &str) -> Vec<&str> {
        let mut members: Vec<&str> = self
            .members_by_type
            .get(type_id)
            .map(|members| members.iter().map(String::as_str).collect())
            .unwrap_or_default();
        members.sort_unstable();
        members
    }

    /// All ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
