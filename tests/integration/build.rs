use crate::common::{TestProject, distkit, read};
use predicates::prelude::*;

#[test]
fn test_build_stages_packages() {
    let project = TestProject::sample().unwrap();

    distkit(&project)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built"))
        .stdout(predicate::str::contains("2 staged"));

    let build_lib = project.path().join("build").join("lib");
    assert_eq!(read(&build_lib.join("twisted").join("main.py")), "print('twisted')\n");
    assert!(build_lib.join("twisted").join("im").join("chat.py").is_file());
    // Data files are not part of any package
    assert!(!build_lib.join("data").exists());
}

#[test]
fn test_build_lib_option() {
    let project = TestProject::sample().unwrap();

    distkit(&project).args(["build", "--build-lib", "staging"]).assert().success();

    assert!(project.path().join("staging").join("twisted").join("main.py").is_file());
    assert!(!project.path().join("build").exists());
}

#[test]
fn test_build_lib_from_descriptor() {
    let descriptor = format!("{}\n[build]\nbuild-lib = \"out/lib\"\n", crate::common::SAMPLE_DESCRIPTOR);
    let project = TestProject::sample().unwrap().with_descriptor(&descriptor).unwrap();

    distkit(&project).arg("build").assert().success();

    assert!(project.path().join("out").join("lib").join("twisted").join("im").join("chat.py").is_file());
}

#[test]
fn test_rebuild_reports_up_to_date() {
    let project = TestProject::sample().unwrap();

    distkit(&project).arg("build").assert().success();
    distkit(&project)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 staged, 2 up to date"));
}
