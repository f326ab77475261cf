use crate::common::{TestProject, distkit};
use predicates::prelude::*;

#[test]
fn test_missing_data_file_reports_path() {
    let project = TestProject::sample().unwrap();
    project.remove_file("data/instancemessenger.glade").unwrap();

    distkit(&project)
        .args(["install", "--prefix", "dest"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source file not found"))
        .stderr(predicate::str::contains("instancemessenger.glade"));

    // Library files installed before the failure stay in place
    assert!(project.path().join("dest").join("lib").join("twisted").join("main.py").is_file());
}

#[test]
fn test_missing_descriptor() {
    let project = TestProject::new().unwrap();

    distkit(&project)
        .args(["--descriptor", "nowhere/dist.toml", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dist.toml not found"))
        .stderr(predicate::str::contains("--descriptor"));
}

#[test]
fn test_invalid_descriptor_syntax() {
    let project = TestProject::new().unwrap().with_descriptor("[metadata\nname = ").unwrap();

    distkit(&project)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid descriptor file syntax"));
}

#[test]
fn test_descriptor_without_version() {
    let project = TestProject::new().unwrap().with_descriptor("[metadata]\nname = \"x\"\n").unwrap();

    distkit(&project)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("version"));
}

#[test]
fn test_missing_package_directory() {
    let project = TestProject::sample().unwrap();
    std::fs::remove_dir_all(project.path().join("twisted").join("im")).unwrap();

    distkit(&project)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package 'twisted.im' not found"));
}

#[test]
fn test_unknown_override_only_warns() {
    let descriptor = format!("{}build-py = \"lib-relative\"\n", crate::common::SAMPLE_DESCRIPTOR);
    let project = TestProject::sample().unwrap().with_descriptor(&descriptor).unwrap();

    distkit(&project)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring override for unknown command 'build-py'"));
}
