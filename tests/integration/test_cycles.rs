//! Resolution must terminate on cyclic hierarchies and cyclic `cref` chains.

use crate::common::{attach, cyclic_pair};
use docweave::{ElementDescriptor, InheritanceResolver, TypeDeclaration};

#[test]
fn mutual_base_types_resolve_to_empty() {
    let attached = attach(
        cyclic_pair(),
        &[
            ("T:Loop.A", "<inheritdoc/>"),
            ("T:Loop.B", "<inheritdoc/>"),
            ("M:Loop.A.Spin", "<inheritdoc/>"),
            ("M:Loop.B.Spin", "<inheritdoc/>"),
        ],
    );
    let resolved = InheritanceResolver::new().resolve(attached);

    for id in ["Loop.A", "Loop.B", "Loop.A.Spin", "Loop.B.Spin"] {
        let doc = resolved.resolved_doc(id).expect("every entry is resolved");
        assert!(doc.is_empty(), "{id} should resolve to nothing, got {}", doc.to_xml());
    }
}

#[test]
fn cycle_does_not_hide_unrelated_content() {
    let attached = attach(
        cyclic_pair(),
        &[
            ("T:Loop.A", "<summary>Alpha.</summary><inheritdoc/>"),
            ("T:Loop.B", "<summary>Beta.</summary><inheritdoc/>"),
        ],
    );
    let resolved = InheritanceResolver::new().resolve(attached);

    // A is resolved first; while it is in progress B cannot pull from it
    assert_eq!(
        resolved.resolved_doc("Loop.A").unwrap().to_xml(),
        "<summary>Alpha.</summary><summary>Beta.</summary>"
    );
    assert_eq!(
        resolved.resolved_doc("Loop.B").unwrap().to_xml(),
        "<summary>Beta.</summary>"
    );
}

#[test]
fn self_referencing_cref_contributes_nothing() {
    let attached = attach(
        vec![TypeDeclaration::new(ElementDescriptor::class("Loop", "Solo"))],
        &[(
            "T:Loop.Solo",
            r#"<summary>Alone.</summary><inheritdoc cref="T:Loop.Solo"/>"#,
        )],
    );
    let resolved = InheritanceResolver::new().resolve(attached);
    assert_eq!(
        resolved.resolved_doc("Loop.Solo").unwrap().to_xml(),
        "<summary>Alone.</summary>"
    );
}

#[test]
fn long_cref_ring_terminates() {
    let size = 50;
    let declarations = (0..size)
        .map(|i| TypeDeclaration::new(ElementDescriptor::class("Ring", format!("N{i:02}"))))
        .collect();
    let ids: Vec<String> = (0..size).map(|i| format!("T:Ring.N{i:02}")).collect();
    let bodies: Vec<String> = (0..size)
        .map(|i| format!(r#"<inheritdoc cref="T:Ring.N{:02}"/>"#, (i + 1) % size))
        .collect();
    let docs: Vec<(&str, &str)> = ids
        .iter()
        .zip(&bodies)
        .map(|(id, body)| (id.as_str(), body.as_str()))
        .collect();

    let resolved = InheritanceResolver::new().resolve(attach(declarations, &docs));

    assert_eq!(resolved.len(), size);
    assert!(resolved.iter().all(|(_, doc)| doc.is_empty()));
}
