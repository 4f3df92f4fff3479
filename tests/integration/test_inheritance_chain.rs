//! Four-level hierarchy: interface, implementing class, overriding class with a
//! partial `inheritdoc`, and a class pointing straight at the interface via `cref`.

use crate::common::{attach, worker_chain};
use docweave::InheritanceResolver;

const INTERFACE_DOC: &str = "<summary>Does work.</summary><remarks>Interface remarks.</remarks>";

fn resolved_chain() -> docweave::ResolvedRegistry {
    let attached = attach(
        worker_chain(),
        &[
            ("T:Work.IWorker", INTERFACE_DOC),
            ("T:Work.Worker", "<inheritdoc/>"),
            (
                "T:Work.SpecialWorker",
                "<summary>Special.</summary><remarks><inheritdoc/></remarks>",
            ),
            ("T:Work.ExpertWorker", r#"<inheritdoc cref="T:Work.IWorker"/>"#),
            (
                "M:Work.IWorker.Run",
                "<summary>Runs once.</summary><remarks>May block.</remarks>",
            ),
            ("M:Work.Worker.Run", "<inheritdoc/>"),
            (
                "M:Work.SpecialWorker.Run",
                "<summary>Runs carefully.</summary><remarks>Checks first. <inheritdoc/></remarks>",
            ),
            ("M:Work.ExpertWorker.Run", r#"<inheritdoc cref="M:Work.IWorker.Run"/>"#),
        ],
    );
    InheritanceResolver::new().resolve(attached)
}

fn xml(resolved: &docweave::ResolvedRegistry, id: &str) -> String {
    resolved
        .resolved_doc(id)
        .unwrap_or_else(|| panic!("no resolved doc for {id}"))
        .to_xml()
}

#[test]
fn level_one_takes_interface_doc_after_skipping_unknown_base() {
    let resolved = resolved_chain();
    assert_eq!(xml(&resolved, "Work.Worker"), INTERFACE_DOC);
    assert_eq!(
        xml(&resolved, "Work.Worker.Run"),
        "<summary>Runs once.</summary><remarks>May block.</remarks>"
    );
}

#[test]
fn level_two_keeps_own_summary_and_pulls_remarks_content() {
    let resolved = resolved_chain();
    assert_eq!(
        xml(&resolved, "Work.SpecialWorker"),
        "<summary>Special.</summary><remarks>Interface remarks.</remarks>"
    );
    assert_eq!(
        xml(&resolved, "Work.SpecialWorker.Run"),
        "<summary>Runs carefully.</summary><remarks>Checks first. May block.</remarks>"
    );
}

#[test]
fn level_three_follows_cref_past_nearer_ancestors() {
    let resolved = resolved_chain();
    assert_eq!(xml(&resolved, "Work.ExpertWorker"), INTERFACE_DOC);
    assert_eq!(
        xml(&resolved, "Work.ExpertWorker.Run"),
        "<summary>Runs once.</summary><remarks>May block.</remarks>"
    );
}

#[test]
fn structured_view_of_resolved_member() {
    let resolved = resolved_chain();
    let doc = resolved
        .to_xml_documentation("Work.SpecialWorker.Run")
        .expect("entry exists");

    assert_eq!(doc.summary.as_deref(), Some("Runs carefully."));
    assert_eq!(doc.remarks.as_deref(), Some("Checks first. May block."));
}

#[test]
fn raw_documentation_is_left_untouched() {
    let resolved = resolved_chain();
    assert_eq!(
        resolved.raw_doc("Work.Worker").map(|tree| tree.to_xml()),
        Some("<inheritdoc />".to_string())
    );
}
