#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch workspace with a fake zipper installed in a runfiles tree
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(zipper_script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let zipper = dir.path().join("runfiles/bazel_tools/tools/zip/zipper/zipper");
        fs::create_dir_all(zipper.parent().unwrap()).unwrap();
        fs::write(&zipper, zipper_script).unwrap();
        fs::set_permissions(&zipper, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_inputs<C: AsRef<[u8]>>(&self, content: C) -> PathBuf {
        let path = self.path("inputs.txt");
        fs::write(&path, content).unwrap();
        path
    }

    fn command(&self, inputs: &Path) -> Command {
        let mut cmd = Command::cargo_bin("py-zipapp-gen").unwrap();
        cmd.env_remove("RUNFILES_MANIFEST_FILE")
            .env("RUNFILES_DIR", self.path("runfiles"))
            .arg("--output")
            .arg(self.path("app.zip"))
            .args(["--workspace-name", "myws", "--main-file", "/tmp/src/main.py"])
            .arg(inputs);
        cmd
    }
}

#[test]
fn writes_manifest_and_runs_zipper() {
    // Record the arguments and create the output like the real zipper would
    let fixture = Fixture::new("#!/bin/sh\necho \"$@\" > \"$2.args\"\ntouch \"$2\"\n");
    let inputs = fixture.write_inputs("pkg/mod.py=/tmp/src/pkg/mod.py\n");

    fixture.command(&inputs).assert().success();

    let manifest = fs::read_to_string(fixture.path("app.zip.manifest.txt")).unwrap();
    assert_eq!(
        manifest,
        "__main__.py=/tmp/src/main.py\n\
         __init__.py=\n\
         runfiles/myws/__init__.py=\n\
         runfiles/myws/pkg/mod.py=/tmp/src/pkg/mod.py\n"
    );

    let output = fixture.path("app.zip");
    assert!(output.exists());
    let recorded = fs::read_to_string(fixture.path("app.zip.args")).unwrap();
    assert_eq!(
        recorded.trim_end(),
        format!(
            "cC {} @{}",
            output.display(),
            fixture.path("app.zip.manifest.txt").display()
        )
    );
}

#[test]
fn non_utf8_disk_path_is_copied_through() {
    let fixture = Fixture::new("#!/bin/sh\nexit 0\n");
    let inputs = fixture.write_inputs(b"a.py=/x/\xff.py\n");

    fixture.command(&inputs).assert().success();

    let manifest = fs::read(fixture.path("app.zip.manifest.txt")).unwrap();
    assert!(manifest.ends_with(b"runfiles/myws/a.py=/x/\xff.py\n"));
}

#[test]
fn repo_mapping_and_legacy_layout() {
    let fixture = Fixture::new("#!/bin/sh\nexit 0\n");
    let inputs = fixture.write_inputs("external/dep/lib.py=/ext/lib.py\n");

    fixture
        .command(&inputs)
        .args(["--legacy-external-runfiles", "--repo-mapping-manifest", "/out/rm"])
        .assert()
        .success();

    let manifest = fs::read_to_string(fixture.path("app.zip.manifest.txt")).unwrap();
    let lines: Vec<&str> = manifest.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "runfiles/dep/lib.py=/ext/lib.py");
    assert_eq!(lines[4], "runfiles/_repo_mapping=/out/rm");
}

#[test]
fn zipper_failure_is_reported() {
    let fixture = Fixture::new("#!/bin/sh\nexit 2\n");
    let inputs = fixture.write_inputs("pkg/mod.py=/tmp/src/pkg/mod.py\n");

    fixture
        .command(&inputs)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exit code 2"));
}

#[test]
fn bad_input_line_stops_before_manifest() {
    let fixture = Fixture::new("#!/bin/sh\nexit 0\n");
    let inputs = fixture.write_inputs("badline_no_equals\n");

    fixture
        .command(&inputs)
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("invalid file entry")
                .and(predicate::str::contains("badline_no_equals")),
        );

    assert!(!fixture.path("app.zip.manifest.txt").exists());
}

#[test]
fn missing_zipper_is_reported() {
    let fixture = Fixture::new("#!/bin/sh\nexit 0\n");
    fs::remove_file(fixture.path("runfiles/bazel_tools/tools/zip/zipper/zipper")).unwrap();
    let inputs = fixture.write_inputs("a.py=/a.py\n");

    fixture
        .command(&inputs)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not locate zipper"));
}

#[test]
fn missing_output_flag_is_usage_error() {
    let fixture = Fixture::new("#!/bin/sh\nexit 0\n");
    let inputs = fixture.write_inputs("a.py=/a.py\n");

    Command::cargo_bin("py-zipapp-gen")
        .unwrap()
        .args(["--workspace-name", "myws", "--main-file", "/tmp/src/main.py"])
        .arg(&inputs)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn missing_input_list_is_reported() {
    let fixture = Fixture::new("#!/bin/sh\nexit 0\n");

    fixture
        .command(&fixture.path("absent.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot open input files manifest"));
}
