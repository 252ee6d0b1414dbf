//! Integration tests for the metagen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{name}}Impl", template = "impl.mustache" }

[[elements]]
package = "app.model"
name = "Base"
metadata = [{ marker = "app.Spec", values = { name = "Widget" } }]
"#;

fn workspace(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("model.toml"), manifest).unwrap();
    fs::create_dir(temp.path().join("templates")).unwrap();
    fs::write(
        temp.path().join("templates/impl.mustache"),
        "package {{this.package}};\n\nclass {{this.class}} {}\n",
    )
    .unwrap();
    temp
}

fn metagen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("metagen").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("METAGEN__GENERATION__EXTENSION")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("metagen")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("metagen")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_writes_artifact() {
    let temp = workspace(MANIFEST);

    metagen(temp.path())
        .args(["generate", "model.toml", "--out", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 artifact(s)"));

    let written = temp.path().join("out/app/model/WidgetImpl.java");
    assert_eq!(
        fs::read_to_string(written).unwrap(),
        "package app.model;\n\nclass WidgetImpl {}\n"
    );
}

#[test]
fn test_generate_extension_flag() {
    let temp = workspace(MANIFEST);

    metagen(temp.path())
        .args(["gen", "model.toml", "-o", "out", "-e", "kt"])
        .assert()
        .success();

    assert!(temp.path().join("out/app/model/WidgetImpl.kt").exists());
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let temp = workspace(MANIFEST);

    metagen(temp.path())
        .args(["generate", "model.toml", "--out", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app.model.WidgetImpl"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generate_json_summary() {
    let temp = workspace(MANIFEST);

    let assert = metagen(temp.path())
        .args(["--output-format", "json", "generate", "model.toml", "--dry-run"])
        .assert()
        .success();

    let summary: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["resolved"], 1);
    assert_eq!(summary["errors"], 0);
    assert_eq!(summary["generated"][0], "app.model.WidgetImpl");
}

#[test]
fn test_config_file_sets_extension() {
    let temp = workspace(MANIFEST);
    fs::write(
        temp.path().join("metagen.toml"),
        "[generation]\nextension = \"groovy\"\noutput_dir = \"build\"\n",
    )
    .unwrap();

    metagen(temp.path())
        .args(["--config", "metagen.toml", "generate", "model.toml"])
        .assert()
        .success();

    assert!(temp.path().join("build/app/model/WidgetImpl.groovy").exists());
}

#[test]
fn test_inspect_json() {
    let temp = workspace(MANIFEST);

    let assert = metagen(temp.path())
        .args(["inspect", "model.toml", "--format", "json"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["markers"][0]["name"], "app.Spec");
    assert_eq!(report["triples"][0]["element"], "app.model.Base");
    assert_eq!(report["triples"][0]["template"], "impl.mustache");
}

#[test]
fn test_inspect_table() {
    let temp = workspace(MANIFEST);

    metagen(temp.path())
        .args(["inspect", "model.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Markers:"))
        .stdout(predicate::str::contains("{{name}}Impl <- impl.mustache"));
}

#[test]
fn test_completions_bash() {
    Command::cargo_bin("metagen")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("metagen"));
}
