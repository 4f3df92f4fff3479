use super::TypeLinks;
use std::collections::{HashMap, HashSet, VecDeque};

/// Order the ancestors of `type_id` for member lookup
///
/// The base class chain comes first, nearest to furthest. Interfaces follow:
/// those of the type itself, then those of each base in chain order, each
/// interface followed breadth-first by the interfaces it extends. Every id
/// appears once and the type never appears in its own list, so cyclic input
/// terminates.
pub(crate) fn linearize(type_id: &str, links: &HashMap<String, TypeLinks>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::from([type_id]);
    let mut ordered = Vec::new();

    let mut chain = vec![type_id];
    let mut current = links.get(type_id).and_then(|l| l.base.as_deref());
    while let Some(base) = current {
        if !seen.insert(base) {
            break;
        }
        ordered.push(base.to_string());
        chain.push(base);
        current = links.get(base).and_then(|l| l.base.as_deref());
    }

    let mut queue: VecDeque<&str> = chain
        .iter()
        .filter_map(|id| links.get(*id))
        .flat_map(|l| l.interfaces.iter().map(String::as_str))
        .collect();

    while let Some(interface) = queue.pop_front() {
        if !seen.insert(interface) {
            continue;
        }
        ordered.push(interface.to_string());
        if let Some(l) = links.get(interface) {
            queue.extend(l.interfaces.iter().map(String::as_str));
            queue.extend(l.base.as_deref());
        }
    }

    ordered
}
