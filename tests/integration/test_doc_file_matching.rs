//! Compiled documentation files attach to the ids the encoder produces.

use crate::common::{TestProject, doc_file_xml};
use docweave::{
    AttachReport, DocFile, DocumentationAttacher, ElementDescriptor, Registry, TypeDeclaration,
    TypeRef, encode,
};

fn library() -> Vec<TypeDeclaration> {
    let string = TypeRef::named("System", "String");
    let int = TypeRef::named("System", "Int32");
    vec![
        TypeDeclaration::new(ElementDescriptor::class("MyLibrary", "Animal"))
            .with_member(ElementDescriptor::field("weight"))
            .with_member(ElementDescriptor::constructor().with_parameter(string.clone()))
            .with_member(
                ElementDescriptor::method("Feed")
                    .with_parameter(string)
                    .with_by_ref_parameter(int),
            ),
    ]
}

#[test]
fn field_id_from_file_matches_encoded_id() {
    let project = TestProject::new();
    let path = project.add_file(
        "MyLibrary.xml",
        &doc_file_xml(
            "MyLibrary",
            &[("F:MyLibrary.Animal.weight", "<summary>Weight in kilograms.</summary>")],
        ),
    );

    let file = DocFile::load(&path).unwrap();
    assert_eq!(file.assembly.as_deref(), Some("MyLibrary"));

    let attached = DocumentationAttacher::new().attach(Registry::build(library()).unwrap(), file.entries);
    let doc = attached.raw_doc("MyLibrary.Animal.weight").expect("field doc attached");
    assert_eq!(
        doc.element("summary").unwrap().text_content(),
        "Weight in kilograms."
    );
}

#[test]
fn parameterized_members_match() {
    let feed = ElementDescriptor::method("Feed")
        .with_parameter(TypeRef::named("System", "String"))
        .with_by_ref_parameter(TypeRef::named("System", "Int32"));
    assert_eq!(encode(&feed).unwrap(), "Feed(System.String,System.Int32@)");

    let file = DocFile::parse(&doc_file_xml(
        "MyLibrary",
        &[
            ("M:MyLibrary.Animal.#ctor(System.String)", "<summary>Creates one.</summary>"),
            (
                "M:MyLibrary.Animal.Feed(System.String,System.Int32@)",
                "<summary>Feeds it.</summary>",
            ),
            ("M:MyLibrary.Animal.Feed(System.String)", "<summary>Wrong overload.</summary>"),
            ("P:MyLibrary.Animal.Name", "<summary>Not analyzed.</summary>"),
            ("Garbage", "<summary>No prefix.</summary>"),
        ],
    ))
    .unwrap();

    let attached = DocumentationAttacher::new().attach(Registry::build(library()).unwrap(), file.entries);

    assert!(attached.raw_doc("MyLibrary.Animal.#ctor(System.String)").is_some());
    assert!(attached
        .raw_doc("MyLibrary.Animal.Feed(System.String,System.Int32@)")
        .is_some());
    assert_eq!(
        attached.report(),
        AttachReport {
            matched: 2,
            unmatched: 2,
            malformed: 1,
            overwritten: 0,
        }
    );
}

#[test]
fn missing_file_reports_read_error() {
    let project = TestProject::new();
    let err = DocFile::load(project.path().join("absent.xml")).unwrap_err();
    assert_eq!(err.status_code(), "FILE_READ_ERROR");
}

#[test]
fn truncated_file_reports_xml_error() {
    let project = TestProject::new();
    let path = project.add_file("broken.xml", "<doc><members><member name=\"T:A\">");
    let err = DocFile::load(&path).unwrap_err();
    assert_eq!(err.status_code(), "XML_ERROR");
    assert!(!err.recovery_suggestions().is_empty());
}
