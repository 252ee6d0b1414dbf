//! Tests for error handling, exit codes, and suggestions.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn metagen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("metagen").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn test_error_missing_manifest() {
    let temp = TempDir::new().unwrap();

    metagen(&temp)
        .args(["generate", "absent.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_error_unknown_marker_in_manifest() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("model.toml"),
        r#"
[[elements]]
package = "app"
name = "Base"
metadata = [{ marker = "app.Missing" }]
"#,
    )
    .unwrap();

    metagen(&temp)
        .args(["inspect", "model.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("app.Missing"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_error_malformed_package_is_input_error_not_panic() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("model.toml"),
        r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{annotated}}Impl", template = "impl.mustache" }

[[elements]]
package = "my app"
name = "Base"
metadata = [{ marker = "app.Spec" }]
"#,
    )
    .unwrap();

    metagen(&temp)
        .args(["generate", "model.toml", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("my app"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_error_package_cannot_escape_output_dir() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    fs::write(
        temp.path().join("model.toml"),
        format!(
            r#"
[[markers]]
name = "app.Spec"
generates = {{ class_name = "{{{{annotated}}}}Impl", template = "impl.mustache" }}

[[elements]]
package = {:?}
name = "Base"
metadata = [{{ marker = "app.Spec" }}]
"#,
            outside.display().to_string()
        ),
    )
    .unwrap();
    fs::create_dir(temp.path().join("templates")).unwrap();
    fs::write(temp.path().join("templates/impl.mustache"), "class {{this.class}} {}").unwrap();

    metagen(&temp)
        .args(["generate", "model.toml", "--out", "out"])
        .assert()
        .code(2);

    assert!(!outside.exists());
}

#[test]
fn test_error_unsupported_value_fails_its_artifact_only() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("model.toml"),
        r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{annotated}}Impl", template = "impl.mustache" }

[[elements]]
package = "app"
name = "Broken"
metadata = [{ marker = "app.Spec", values = { handle = { pointer = 7 } } }]

[[elements]]
package = "app"
name = "Fine"
metadata = [{ marker = "app.Spec" }]
"#,
    )
    .unwrap();
    fs::create_dir(temp.path().join("templates")).unwrap();
    fs::write(temp.path().join("templates/impl.mustache"), "class {{this.class}} {}").unwrap();

    metagen(&temp)
        .args(["generate", "model.toml", "--out", "out"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'handle'"))
        .stderr(predicate::str::contains("1 error(s)"));

    assert!(temp.path().join("out/app/FineImpl.java").exists());
    assert!(!temp.path().join("out/app/BrokenImpl.java").exists());
}

#[test]
fn test_error_explicit_templates_dir_missing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("model.toml"), "").unwrap();

    metagen(&temp)
        .args(["generate", "model.toml", "--templates", "nowhere"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_error_missing_config_file() {
    let temp = TempDir::new().unwrap();

    metagen(&temp)
        .args(["--config", "absent.toml", "inspect", "model.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_error_unknown_subcommand() {
    let temp = TempDir::new().unwrap();

    metagen(&temp).arg("scaffold").assert().code(2);
}
