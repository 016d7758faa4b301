use logview_scanner::{Error, scan_records};
use logview_testing::ProjectFixture;
use logview_types::Scalar;
use serde_json::json;
use std::collections::HashSet;
use std::path::Path;

#[test]
fn scans_matching_files_into_records() {
    let project = ProjectFixture::new().unwrap();
    project
        .write_json(
            "runs/a/metrics.json",
            &json!({"loss": 0.5, "step": 100, "tag": "baseline"}),
        )
        .unwrap();
    project
        .write_json("runs/b/metrics.json", &json!({"loss": 0.25}))
        .unwrap();
    project.write_raw("notes.txt", "not a log").unwrap();

    let result = scan_records(project.root(), r"metrics\.json$", None).unwrap();

    assert_eq!(result.summary.total_files, 3);
    assert_eq!(result.summary.matched_files, 2);
    assert_eq!(result.summary.parsed_records, 2);
    assert_eq!(result.summary.warning_count, 0);

    // Sorted path order, with `path` as the leading field
    assert_eq!(
        result.records[0]["path"],
        Scalar::from("runs/a/metrics.json")
    );
    assert_eq!(result.records[0].get_index(0).unwrap().0, "path");
    assert_eq!(result.records[0]["loss"], Scalar::Float(0.5));
    assert_eq!(result.records[0]["step"], Scalar::Int(100));
    assert_eq!(
        result.records[1]["path"],
        Scalar::from("runs/b/metrics.json")
    );
}

#[test]
fn malformed_json_becomes_a_warning_not_an_error() {
    let project = ProjectFixture::new().unwrap();
    project.write_raw("bad.json", "{ not json").unwrap();
    project.write_json("good.json", &json!({"ok": true})).unwrap();

    let result = scan_records(project.root(), r"\.json$", None).unwrap();

    assert_eq!(result.summary.parsed_records, 1);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, "bad.json");
    assert!(result.warnings[0].message.contains("Failed to parse JSON"));
}

#[test]
fn non_object_root_is_skipped_with_a_warning() {
    let project = ProjectFixture::new().unwrap();
    project.write_json("list.json", &json!([1, 2, 3])).unwrap();

    let result = scan_records(project.root(), r"\.json$", None).unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].message.contains("not an object"));
}

#[test]
fn structured_fields_coerce_to_null_with_a_warning() {
    let project = ProjectFixture::new().unwrap();
    project
        .write_json("log.json", &json!({"nested": {"a": 1}, "loss": 0.5}))
        .unwrap();

    let result = scan_records(project.root(), r"\.json$", None).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0]["nested"], Scalar::Null);
    assert_eq!(result.records[0]["loss"], Scalar::Float(0.5));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].message.contains("coerced to null"));
}

#[test]
fn ignored_directories_are_pruned() {
    let project = ProjectFixture::new().unwrap();
    project
        .write_json("runs/metrics.json", &json!({"loss": 1.0}))
        .unwrap();
    project
        .write_json("node_modules/dep/metrics.json", &json!({"loss": 2.0}))
        .unwrap();

    let result = scan_records(project.root(), r"metrics\.json$", None).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0]["path"], Scalar::from("runs/metrics.json"));

    // A custom ignore set replaces the default one
    let ignored: HashSet<String> = ["runs".to_string()].into_iter().collect();
    let result = scan_records(project.root(), r"metrics\.json$", Some(&ignored)).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(
        result.records[0]["path"],
        Scalar::from("node_modules/dep/metrics.json")
    );
}

#[test]
fn own_path_field_wins_over_the_relative_path() {
    let project = ProjectFixture::new().unwrap();
    project
        .write_json("log.json", &json!({"path": "custom-id"}))
        .unwrap();

    let result = scan_records(project.root(), r"\.json$", None).unwrap();
    assert_eq!(result.records[0]["path"], Scalar::from("custom-id"));
}

#[test]
fn invalid_inputs_are_structural_errors() {
    let missing = Path::new("/definitely/not/a/real/dir");
    assert!(matches!(
        scan_records(missing, ".*", None),
        Err(Error::InvalidRoot(_))
    ));

    let project = ProjectFixture::new().unwrap();
    assert!(matches!(
        scan_records(project.root(), "[unclosed", None),
        Err(Error::Pattern(_))
    ));
}
