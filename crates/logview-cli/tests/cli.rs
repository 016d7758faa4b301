use assert_cmd::Command;
use logview_testing::ProjectFixture;
use predicates::prelude::*;
use serde_json::json;

fn logview() -> Command {
    Command::cargo_bin("logview").expect("binary builds")
}

fn project_with_logs() -> ProjectFixture {
    let project = ProjectFixture::new().unwrap();
    project
        .write_json(
            "runs/a/metrics.json",
            &json!({"loss": 0.5, "step": 100}),
        )
        .unwrap();
    project
        .write_json(
            "runs/b/metrics.json",
            &json!({"loss": 0.125, "step": 2}),
        )
        .unwrap();
    project
}

#[test]
fn create_saves_a_view_and_reports_the_scan() {
    let project = project_with_logs();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", r"metrics\.json$"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created view 'default'"))
        .stdout(predicate::str::contains("matched_files=2"))
        .stdout(predicate::str::contains("parsed_records=2"));

    assert!(
        project
            .root()
            .join(".logview/views/default.json")
            .is_file()
    );
}

#[test]
fn scan_renders_a_plain_table() {
    let project = project_with_logs();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", r"metrics\.json$"])
        .assert()
        .success();

    logview()
        .arg("scan")
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("runs/a/metrics.json"))
        .stdout(predicate::str::contains("2 row(s)"));
}

#[test]
fn scan_json_emits_the_render_payload() {
    let project = project_with_logs();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", r"metrics\.json$"])
        .assert()
        .success();

    let output = logview()
        .arg("scan")
        .arg(project.root())
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["columns"]["all"][0], "path");
    assert_eq!(payload["summary"]["parsed_records"], 2);
    assert_eq!(payload["rows"][0]["path"], "runs/a/metrics.json");
    assert!(payload["columns"]["hidden"].as_array().unwrap().is_empty());
}

#[test]
fn scan_csv_uses_visible_columns() {
    let project = project_with_logs();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", r"metrics\.json$"])
        .assert()
        .success();

    logview()
        .arg("scan")
        .arg(project.root())
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path,loss,step"))
        .stdout(predicate::str::contains("runs/b/metrics.json,0.125,2"));
}

#[test]
fn scan_without_a_view_fails_with_a_hint() {
    let project = ProjectFixture::new().unwrap();

    logview()
        .arg("scan")
        .arg(project.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("logview create"));
}

#[test]
fn invalid_pattern_is_rejected_at_create_time() {
    let project = ProjectFixture::new().unwrap();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", "[unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid view configuration"));
}

#[test]
fn view_management_flow() {
    let project = project_with_logs();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", r"metrics\.json$"])
        .args(["--name", "base"])
        .assert()
        .success();

    logview()
        .args(["view", "copy"])
        .arg(project.root())
        .args(["base", "fork"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied view 'base' to 'fork'"));

    logview()
        .args(["view", "rename"])
        .arg(project.root())
        .args(["fork", "main"])
        .assert()
        .success();

    logview()
        .args(["view", "list"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("base"))
        .stdout(predicate::str::contains("main"))
        .stdout(predicate::str::contains("fork").not());

    logview()
        .args(["view", "show"])
        .arg(project.root())
        .args(["--name", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"main\""));
}

#[test]
fn config_file_default_view_is_honored() {
    let project = project_with_logs();
    project
        .write_raw(".logview/config.toml", "default_view = \"alt\"\n")
        .unwrap();

    logview()
        .arg("create")
        .arg(project.root())
        .args(["--pattern", r"metrics\.json$"])
        .args(["--name", "alt"])
        .assert()
        .success();

    // `scan` without --name picks up the configured default view
    logview()
        .arg("scan")
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 row(s)"));
}
