//! Resolution output depends only on the registry contents.

use crate::common::{attach, worker_chain};
use docweave::{DocTree, InheritanceResolver};
use std::collections::HashMap;

const DOCS: &[(&str, &str)] = &[
    ("T:Work.IWorker", "<summary>Does work.</summary><remarks>Interface remarks.</remarks>"),
    ("T:Work.Worker", "<inheritdoc/>"),
    ("T:Work.SpecialWorker", r#"<inheritdoc path="/remarks"/><summary>Special.</summary>"#),
    ("M:Work.IWorker.Run", "<summary>Runs once.</summary>"),
    ("M:Work.ExpertWorker.Run", "<inheritdoc/>"),
];

fn as_xml(resolved: &HashMap<String, DocTree>) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = resolved
        .iter()
        .map(|(id, tree)| (id.clone(), tree.to_xml()))
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn resolving_twice_gives_identical_trees() {
    let attached = attach(worker_chain(), DOCS);
    let resolver = InheritanceResolver::new();

    let first = resolver.resolve_docs(&attached);
    let second = resolver.resolve_docs(&attached);
    assert_eq!(first, second);
}

#[test]
fn declaration_order_does_not_matter() {
    let forward = attach(worker_chain(), DOCS);
    let mut reversed_declarations = worker_chain();
    reversed_declarations.reverse();
    let mut reversed_docs = DOCS.to_vec();
    reversed_docs.reverse();
    let reversed = attach(reversed_declarations, &reversed_docs);

    let resolver = InheritanceResolver::new();
    assert_eq!(
        as_xml(&resolver.resolve_docs(&forward)),
        as_xml(&resolver.resolve_docs(&reversed))
    );
}

#[test]
fn path_selection_is_stable() {
    let resolved = InheritanceResolver::new().resolve(attach(worker_chain(), DOCS));
    assert_eq!(
        resolved.resolved_doc("Work.SpecialWorker").unwrap().to_xml(),
        "<remarks>Interface remarks.</remarks><summary>Special.</summary>"
    );
    // Nearest documented ancestor member is the interface one
    assert_eq!(
        resolved.resolved_doc("Work.ExpertWorker.Run").unwrap().to_xml(),
        "<summary>Runs once.</summary>"
    );
}
