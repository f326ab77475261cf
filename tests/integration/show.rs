use crate::common::{TestProject, distkit};
use predicates::prelude::*;

#[test]
fn test_show_pkg_info() {
    let project = TestProject::sample().unwrap();

    distkit(&project)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Metadata-Version: 1.1\nName: Twisted\n"))
        .stdout(predicate::str::contains("Platform: posix"))
        .stdout(predicate::str::contains("Author-email: twisted-python@twistedmatrix.com"));
}

#[test]
fn test_show_json() {
    let project = TestProject::sample().unwrap();

    let output = distkit(&project).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata-version"], "1.1");
    assert_eq!(json["name"], "Twisted");
    assert_eq!(json["keywords"], "internet www tcp framework games");
    assert_eq!(json["packages"], serde_json::json!(["twisted", "twisted.im"]));
    assert_eq!(json["command-overrides"]["install-data"], "lib-relative");
}

#[test]
fn test_show_json_metadata_1_0_omits_optional_fields() {
    let project = TestProject::sample().unwrap();

    let output =
        distkit(&project).args(["show", "--json", "--metadata-version", "1.0"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata-version"], "1.0");
    assert!(json.get("keywords").is_none());
    assert!(json.get("platforms").is_none());
}

#[cfg(unix)]
#[test]
fn test_show_lists_scripts_on_posix() {
    let project = TestProject::sample().unwrap();

    distkit(&project)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bin/twistd"));
}

#[test]
fn test_show_from_subdirectory_finds_descriptor() {
    let project = TestProject::sample().unwrap();

    assert_cmd::Command::cargo_bin("distkit")
        .unwrap()
        .current_dir(project.path().join("twisted").join("im"))
        .env_remove("RUST_LOG")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Twisted"));
}
