use crate::common::{TestProject, distkit, read};
use predicates::prelude::*;

const GLADE: &str = "instancemessenger.glade";

#[test]
fn test_install_with_prefix_and_install_lib() {
    let project = TestProject::sample().unwrap();
    let prefix = project.path().join("opt").join("pkg");
    let install_lib = prefix.join("lib");

    distkit(&project)
        .arg("install")
        .arg("--prefix")
        .arg(&prefix)
        .arg("--install-lib")
        .arg(&install_lib)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed"))
        .stdout(predicate::str::contains("Twisted-0.15.5"));

    assert!(install_lib.join("twisted").join("main.py").is_file());
    assert_eq!(read(&install_lib.join("twisted").join("im").join(GLADE)), "<glade-interface/>\n");
    assert!(read(&install_lib.join("Twisted-0.15.5.pkg-info")).contains("Keywords: internet www tcp framework games"));
    assert!(!prefix.join("share").exists());
}

#[cfg(unix)]
#[test]
fn test_install_under_root_prefixes_once() {
    let project = TestProject::sample().unwrap();
    let stage = project.path().join("stage");

    distkit(&project)
        .args(["install", "--prefix", "/opt/pkg", "--install-lib", "/opt/pkg/lib", "--root"])
        .arg(&stage)
        .assert()
        .success();

    let install_lib = stage.join("opt").join("pkg").join("lib");
    assert!(install_lib.join("twisted").join("im").join(GLADE).is_file());
    assert!(stage.join("opt").join("pkg").join("bin").join("twistd").is_file());
    assert!(!project.path().join("opt").exists());
}

#[test]
fn test_install_reads_defaults_from_descriptor() {
    let descriptor = format!("{}\n[install]\nprefix = \"dest\"\n", crate::common::SAMPLE_DESCRIPTOR);
    let project = TestProject::sample().unwrap().with_descriptor(&descriptor).unwrap();

    distkit(&project).arg("install").assert().success();

    assert!(project.path().join("dest").join("lib").join("Twisted-0.15.5.pkg-info").is_file());
}

#[test]
fn test_command_line_overrides_descriptor_defaults() {
    let descriptor = format!("{}\n[install]\nprefix = \"dest\"\n", crate::common::SAMPLE_DESCRIPTOR);
    let project = TestProject::sample().unwrap().with_descriptor(&descriptor).unwrap();

    distkit(&project).args(["install", "--prefix", "cli-dest"]).assert().success();

    assert!(project.path().join("cli-dest").join("lib").join("Twisted-0.15.5.pkg-info").is_file());
    assert!(!project.path().join("dest").exists());
}

#[cfg(unix)]
#[test]
fn test_record_lists_paths_without_root() {
    let project = TestProject::sample().unwrap();
    let stage = project.path().join("stage");

    distkit(&project)
        .args(["install", "--prefix", "/opt/pkg", "--record", "installed.txt", "--root"])
        .arg(&stage)
        .assert()
        .success();

    let record = read(&project.path().join("installed.txt"));
    assert!(record.lines().any(|line| line == "/opt/pkg/lib/twisted/im/instancemessenger.glade"));
    assert!(record.lines().any(|line| line == "/opt/pkg/bin/twistd"));
    assert!(!record.contains(&stage.display().to_string()));
}

#[test]
fn test_dry_run_leaves_filesystem_untouched() {
    let project = TestProject::sample().unwrap();

    distkit(&project)
        .args(["--dry-run", "install", "--prefix", "dest", "--record", "installed.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would install"));

    assert!(!project.path().join("dest").exists());
    assert!(!project.path().join("build").exists());
    assert!(!project.path().join("installed.txt").exists());
}

#[test]
fn test_force_reinstall_is_idempotent() {
    let project = TestProject::sample().unwrap();
    let glade = project.path().join("dest").join("lib").join("twisted").join("im").join(GLADE);

    for _ in 0..2 {
        distkit(&project).args(["install", "--prefix", "dest", "--force"]).assert().success();
    }

    assert_eq!(read(&glade), "<glade-interface/>\n");
}

#[test]
fn test_reinstall_without_force_keeps_local_edits() {
    let project = TestProject::sample().unwrap();
    let glade = project.path().join("dest").join("lib").join("twisted").join("im").join(GLADE);

    distkit(&project).args(["install", "--prefix", "dest"]).assert().success();
    std::fs::write(&glade, "edited").unwrap();
    distkit(&project).args(["install", "--prefix", "dest"]).assert().success();

    assert_eq!(read(&glade), "edited");
}

#[test]
fn test_metadata_version_1_0_omits_optional_fields() {
    let project = TestProject::sample().unwrap();

    distkit(&project)
        .args(["install", "--prefix", "dest", "--metadata-version", "1.0"])
        .assert()
        .success();

    let record = read(&project.path().join("dest").join("lib").join("Twisted-0.15.5.pkg-info"));
    assert!(record.starts_with("Metadata-Version: 1.0\n"));
    assert!(!record.contains("Keywords"));
    assert!(!record.contains("Platform"));
}

#[test]
fn test_descriptor_flag_from_other_directory() {
    let project = TestProject::sample().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();

    assert_cmd::Command::cargo_bin("distkit")
        .unwrap()
        .current_dir(elsewhere.path())
        .env_remove("RUST_LOG")
        .arg("--descriptor")
        .arg(project.descriptor_path())
        .args(["install", "--prefix"])
        .arg(project.path().join("dest"))
        .assert()
        .success();

    assert!(project.path().join("dest").join("lib").join("twisted").join("main.py").is_file());
}
