//! End-to-end runs from a JSON descriptor file and a compiled documentation file.

use crate::common::{TestProject, doc_file_xml, worker_chain};
use docweave::pipeline::{AnalysisRun, export_json, run, run_many};
use docweave::{DocError, Settings};

const DESCRIPTORS: &str = r#"[
  {
    "descriptor": { "kind": "type", "category": "interface", "name": "IGreeter", "namespace": "Demo" },
    "members": [
      {
        "kind": "method",
        "name": "Greet",
        "parameters": [ { "type": { "namespace": "System", "short_name": "String" }, "position": 0 } ]
      }
    ]
  },
  {
    "descriptor": { "kind": "type", "category": "class", "name": "Greeter", "namespace": "Demo" },
    "interfaces": [ { "namespace": "Demo", "short_name": "IGreeter" } ],
    "members": [
      {
        "kind": "method",
        "name": "Greet",
        "parameters": [ { "type": { "namespace": "System", "short_name": "String" }, "position": 0 } ]
      }
    ]
  }
]"#;

fn greeter_project() -> (TestProject, std::path::PathBuf, std::path::PathBuf) {
    let project = TestProject::new();
    let descriptors = project.add_file("demo.json", DESCRIPTORS);
    let docs = project.add_file(
        "Demo.xml",
        &doc_file_xml(
            "Demo",
            &[
                ("T:Demo.IGreeter", "<summary>Greets people.</summary>"),
                (
                    "M:Demo.IGreeter.Greet(System.String)",
                    r#"<summary>Greets <paramref name="name"/>.</summary><param name="name">Who to greet.</param>"#,
                ),
                ("T:Demo.Greeter", "<inheritdoc/>"),
                ("M:Demo.Greeter.Greet(System.String)", "<inheritdoc/>"),
                ("M:Demo.Gone.Method", "<summary>Excluded.</summary>"),
            ],
        ),
    );
    (project, descriptors, docs)
}

#[test]
fn run_from_files() {
    let (_project, descriptors, docs) = greeter_project();

    let analysis = AnalysisRun::from_files(&descriptors, &docs).unwrap();
    assert_eq!(analysis.name, "Demo");
    assert_eq!(analysis.declarations.len(), 2);

    let resolved = run(analysis, &Settings::default()).unwrap();
    assert_eq!(
        resolved.resolved_doc("Demo.Greeter").unwrap().to_xml(),
        "<summary>Greets people.</summary>"
    );
    assert_eq!(
        resolved
            .resolved_doc("Demo.Greeter.Greet(System.String)")
            .unwrap()
            .to_xml(),
        r#"<summary>Greets <paramref name="name" />.</summary><param name="name">Who to greet.</param>"#
    );

    let report = resolved.attach_report();
    assert_eq!(report.matched, 4);
    assert_eq!(report.unmatched, 1);

    let doc = resolved
        .to_xml_documentation("Demo.Greeter.Greet(System.String)")
        .unwrap();
    assert_eq!(doc.params.len(), 1);
    assert_eq!(doc.params[0].name, "name");
}

#[test]
fn json_export_lists_prefixed_ids() {
    let (_project, descriptors, docs) = greeter_project();
    let resolved = run(
        AnalysisRun::from_files(&descriptors, &docs).unwrap(),
        &Settings::default(),
    )
    .unwrap();

    let json = export_json(&resolved, None, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let doc_ids: Vec<&str> = value["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|element| element["doc_id"].as_str().unwrap())
        .collect();

    assert_eq!(
        doc_ids,
        [
            "T:Demo.Greeter",
            "M:Demo.Greeter.Greet(System.String)",
            "T:Demo.IGreeter",
            "M:Demo.IGreeter.Greet(System.String)",
        ]
    );
}

#[test]
fn malformed_descriptor_file_is_reported() {
    let project = TestProject::new();
    let descriptors = project.add_file("bad.json", r#"[{ "descriptor": { "kind": "gadget" } }]"#);
    let docs = project.add_file("Bad.xml", &doc_file_xml("Bad", &[]));

    let err = AnalysisRun::from_files(&descriptors, &docs).unwrap_err();
    assert!(matches!(err, DocError::Descriptors { .. }));
    assert_eq!(err.status_code(), "DESCRIPTOR_ERROR");
}

#[test]
fn settings_from_file_change_resolution() {
    let (project, descriptors, docs) = greeter_project();
    let config = project.add_file(
        ".docweave/settings.toml",
        "[resolution]\ninherit_undocumented_members = false\nresolve_crefs = false\n",
    );
    let settings = Settings::load_from(&config).unwrap();
    assert!(!settings.resolution.resolve_crefs);

    let resolved = run(AnalysisRun::from_files(&descriptors, &docs).unwrap(), &settings).unwrap();
    // Structural inheritance does not depend on cref resolution
    assert!(!resolved.resolved_doc("Demo.Greeter").unwrap().is_empty());
}

#[test]
fn independent_runs_in_parallel() {
    let runs: Vec<AnalysisRun> = (0..4)
        .map(|i| {
            AnalysisRun::new(
                format!("assembly-{i}"),
                worker_chain(),
                crate::common::entries(&[
                    ("T:Work.IWorker", "<summary>Does work.</summary>"),
                    ("T:Work.Worker", "<inheritdoc/>"),
                ]),
            )
        })
        .collect();

    let results = run_many(runs, &Settings::default());
    assert_eq!(results.len(), 4);
    for (name, result) in results {
        let resolved = result.unwrap_or_else(|e| panic!("{name} failed: {e}"));
        assert_eq!(
            resolved.resolved_doc("Work.Worker").unwrap().to_xml(),
            "<summary>Does work.</summary>"
        );
    }
}
