//! Tests for exit codes, error messages, and suggestions.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn monoseed(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("monoseed").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("MONOSEED_TEMPLATE_DIR")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn invalid_project_name_exits_one() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    monoseed(home.path())
        .current_dir(work.path())
        .args(["Demo_App", "--yes", "--no-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("lowercase letters, numbers, and hyphens"));

    assert!(!work.path().join("Demo_App").exists());
}

#[test]
fn existing_directory_exits_one_and_is_untouched() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let template = home.path().join("template");
    fs::create_dir_all(&template).unwrap();
    let existing = work.path().join("demo-app");
    fs::create_dir_all(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();

    monoseed(home.path())
        .current_dir(work.path())
        .args(["demo-app", "--yes", "--no-install", "--template-dir"])
        .arg(&template)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("different project name"));

    assert_eq!(fs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
}

#[test]
fn missing_template_exits_one_without_creating_target() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    monoseed(home.path())
        .current_dir(work.path())
        .args(["demo-app", "--yes", "--no-install", "--template-dir"])
        .arg(home.path().join("absent"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template directory not found"));

    assert!(!work.path().join("demo-app").exists());
}

#[test]
fn template_without_manifest_is_rolled_back() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let template = home.path().join("template");
    fs::create_dir_all(template.join("client")).unwrap();
    fs::write(template.join("README.md"), "# NestJS + React Monorepo Template\n").unwrap();

    monoseed(home.path())
        .current_dir(work.path())
        .args(["demo-app", "--yes", "--no-install", "--template-dir"])
        .arg(&template)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package.json"));

    assert!(!work.path().join("demo-app").exists());
}

#[test]
fn unknown_flag_exits_two() {
    let home = TempDir::new().unwrap();
    monoseed(home.path())
        .args(["demo-app", "--frobnicate"])
        .assert()
        .code(2);
}

#[test]
fn unknown_bundler_exits_two() {
    let home = TempDir::new().unwrap();
    monoseed(home.path())
        .args(["demo-app", "--bundler", "rollup"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rollup"));
}

#[test]
fn broken_config_file_exits_one() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "[defaults]\nbundler = \"rollup\"\n").unwrap();

    monoseed(home.path())
        .args(["--config"])
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_packaging_source_exits_one() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    monoseed(home.path())
        .current_dir(work.path())
        .args(["package", "--source", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist"));
}
