use super::*;
use crate::descriptor::DistributionBuilder;
use crate::test_utils::{TestProject, init_test_logging};
use crate::utils::platform::Platform;
use std::fs;

const GLADE: &str = "instancemessenger.glade";

fn distribution(project: &TestProject, version: MetadataVersion) -> Distribution {
    DistributionBuilder::new(project.load_descriptor().unwrap())
        .capabilities(version.capabilities())
        .platform(Platform::Posix)
        .build()
}

fn without_override(project: &TestProject) -> Distribution {
    let mut dist = distribution(project, MetadataVersion::V1_1);
    dist.command_overrides.clear();
    dist
}

fn dist_error(err: &anyhow::Error) -> Option<&DistError> {
    err.chain().find_map(|cause| cause.downcast_ref::<DistError>())
}

#[test]
fn test_install_places_data_next_to_library() {
    init_test_logging(None);
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let prefix = project.path().join("opt").join("pkg");
    let install_lib = prefix.join("lib");

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    let cmd = InstallCommand::new().with_prefix(&prefix).with_install_lib(&install_lib);
    let report = pipeline.install(&dist, &cmd).unwrap();

    assert!(install_lib.join("twisted").join("main.py").is_file());
    assert!(install_lib.join("twisted").join("im").join("chat.py").is_file());
    let glade = install_lib.join("twisted").join("im").join(GLADE);
    assert_eq!(fs::read_to_string(&glade).unwrap(), "<glade-interface/>\n");
    assert!(!prefix.join("share").exists());
    assert!(report.outputs.contains(&glade));

    let record = install_lib.join("Twisted-0.15.5.pkg-info");
    assert!(fs::read_to_string(record).unwrap().contains("Name: Twisted\n"));
}

#[cfg(unix)]
#[test]
fn test_install_scripts_follow_prefix() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let prefix = project.path().join("prefix");

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    pipeline.install(&dist, &InstallCommand::new().with_prefix(&prefix)).unwrap();

    assert!(prefix.join("bin").join("twistd").is_file());
    assert!(prefix.join("bin").join("im").is_file());
}

#[cfg(unix)]
#[test]
fn test_root_is_prefixed_exactly_once() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let stage = project.path().join("stage");

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    let cmd = InstallCommand::new()
        .with_prefix("/opt/pkg")
        .with_install_lib("/opt/pkg/lib")
        .with_root(&stage);
    pipeline.install(&dist, &cmd).unwrap();

    let install_lib = stage.join("opt").join("pkg").join("lib");
    assert!(install_lib.join("twisted").join("im").join(GLADE).is_file());
    assert!(stage.join("opt").join("pkg").join("bin").join("twistd").is_file());

    let doubled = change_root_twice(&stage);
    assert!(!doubled.exists());

    let paths = pipeline.resolved_install_paths().unwrap();
    assert_eq!(paths.install_lib, install_lib);
    assert_eq!(paths.root.as_deref(), Some(stage.as_path()));
}

#[cfg(unix)]
fn change_root_twice(stage: &Path) -> PathBuf {
    let once = crate::utils::platform::change_root(stage, Path::new("/opt/pkg/lib"));
    crate::utils::platform::change_root(stage, &once)
}

#[test]
fn test_data_step_before_finalize_is_ordering_error() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let pipeline = Pipeline::new(PipelineSettings::default());

    let err = pipeline.install_data_step(&dist).err().unwrap();
    assert!(matches!(dist_error(&err), Some(DistError::ConfigurationOrdering)));
    assert!(matches!(pipeline.resolved_install_paths(), Err(DistError::ConfigurationOrdering)));
}

#[test]
fn test_override_step_selected_by_descriptor() {
    let project = TestProject::sample().unwrap();
    let mut pipeline = Pipeline::new(PipelineSettings::default());
    pipeline.finalize_install(&InstallCommand::new().with_prefix(project.path()));

    let with_override = distribution(&project, MetadataVersion::V1_1);
    assert_eq!(pipeline.install_data_step(&with_override).unwrap().name(), "install-data (lib-relative)");

    let generic = without_override(&project);
    assert_eq!(pipeline.install_data_step(&generic).unwrap().name(), "install-data");
}

#[test]
fn test_generic_data_step_uses_shared_data_dir() {
    let project = TestProject::sample().unwrap();
    let dist = without_override(&project);
    let prefix = project.path().join("prefix");

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    pipeline.install(&dist, &InstallCommand::new().with_prefix(&prefix)).unwrap();

    assert!(prefix.join("share").join("twisted").join("im").join(GLADE).is_file());
    assert!(!prefix.join("lib").join("twisted").join("im").join(GLADE).exists());
}

#[test]
fn test_force_install_is_idempotent() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let prefix = project.path().join("prefix");
    let cmd = InstallCommand::new().with_prefix(&prefix).with_force(true);

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    let first = pipeline.install(&dist, &cmd).unwrap();
    let second = pipeline.install(&dist, &cmd).unwrap();

    assert_eq!(first.outputs, second.outputs);
    assert_eq!(second.skipped, 0);
    let glade = prefix.join("lib").join("twisted").join("im").join(GLADE);
    assert_eq!(fs::read_to_string(glade).unwrap(), "<glade-interface/>\n");
}

#[test]
fn test_reinstall_without_force_skips_up_to_date_files() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let cmd = InstallCommand::new().with_prefix(project.path().join("prefix"));

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    let first = pipeline.install(&dist, &cmd).unwrap();
    let second = pipeline.install(&dist, &cmd).unwrap();

    assert_eq!(first.outputs, second.outputs);
    assert!(second.skipped > 0);
    // Only the metadata record is rewritten
    assert_eq!(second.copied, 1);
}

#[test]
fn test_missing_data_file_aborts_with_path() {
    let project = TestProject::sample().unwrap();
    project.remove_file(format!("data/{GLADE}")).unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let prefix = project.path().join("prefix");

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    let err = pipeline.install(&dist, &InstallCommand::new().with_prefix(&prefix)).unwrap_err();

    match dist_error(&err) {
        Some(DistError::SourceFileNotFound {
            path,
        }) => assert!(path.ends_with(GLADE)),
        other => panic!("unexpected error: {other:?}"),
    }
    // Steps before the data step keep what they wrote
    assert!(prefix.join("lib").join("twisted").join("main.py").is_file());
    assert!(!prefix.join("lib").join("Twisted-0.15.5.pkg-info").exists());
}

#[test]
fn test_missing_package_fails_build() {
    let project = TestProject::sample().unwrap();
    fs::remove_dir_all(project.path().join("twisted").join("im")).unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);

    let err = Pipeline::new(PipelineSettings::default()).build(&dist).unwrap_err();
    match dist_error(&err) {
        Some(DistError::PackageNotFound {
            package, ..
        }) => assert_eq!(package, "twisted.im"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let prefix = project.path().join("prefix");
    let record = project.path().join("installed.txt");

    let mut pipeline = Pipeline::new(PipelineSettings {
        dry_run: true,
        ..PipelineSettings::default()
    });
    let cmd = InstallCommand::new().with_prefix(&prefix).with_record(&record);
    pipeline.install(&dist, &cmd).unwrap();

    assert!(!project.path().join("build").exists());
    assert!(!prefix.exists());
    assert!(!record.exists());
}

#[cfg(unix)]
#[test]
fn test_record_strips_root() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let stage = project.path().join("stage");
    let record = project.path().join("installed.txt");

    let mut pipeline = Pipeline::new(PipelineSettings::default());
    let cmd = InstallCommand::new().with_prefix("/opt/pkg").with_root(&stage).with_record(&record);
    pipeline.install(&dist, &cmd).unwrap();

    let lines: Vec<String> = fs::read_to_string(&record).unwrap().lines().map(String::from).collect();
    assert!(lines.contains(&"/opt/pkg/lib/Twisted-0.15.5.pkg-info".to_string()));
    assert!(lines.contains(&"/opt/pkg/bin/twistd".to_string()));
    assert!(lines.iter().all(|line| !line.contains("stage")));
}

#[test]
fn test_metadata_version_controls_optional_fields() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_0);
    let prefix = project.path().join("prefix");

    let mut pipeline = Pipeline::new(PipelineSettings {
        metadata_version: MetadataVersion::V1_0,
        ..PipelineSettings::default()
    });
    pipeline.install(&dist, &InstallCommand::new().with_prefix(&prefix)).unwrap();

    let text = fs::read_to_string(prefix.join("lib").join("Twisted-0.15.5.pkg-info")).unwrap();
    assert!(text.starts_with("Metadata-Version: 1.0\n"));
    assert!(!text.contains("Keywords"));
    assert!(!text.contains("Platform"));
}

#[test]
fn test_custom_build_lib() {
    let project = TestProject::sample().unwrap();
    let dist = distribution(&project, MetadataVersion::V1_1);
    let pipeline = Pipeline::new(PipelineSettings {
        build_lib: Some(PathBuf::from("staging")),
        ..PipelineSettings::default()
    });

    pipeline.build(&dist).unwrap();
    assert!(project.path().join("staging").join("twisted").join("im").join("chat.py").is_file());
}
