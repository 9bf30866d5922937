use assert_cmd::Command;
use predicates::prelude::*;

fn cardboard() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cardboard"))
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("cardboard.kdl");
    std::fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn test_help_command() {
    let mut cmd = cardboard();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pluggable manager backends"));
}

#[test]
fn test_version_flag() {
    let mut cmd = cardboard();

    let version = env!("CARGO_PKG_VERSION");
    let expected = format!("cardboard {}", version);

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_unknown_subcommand() {
    let mut cmd = cardboard();

    cmd.arg("unknown-command-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: cardboard"));
}

#[test]
fn test_url_is_computed_offline() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "managers {\n npm\n}\n");

    let mut cmd = cardboard();
    cmd.args(["--config"])
        .arg(&config)
        .args(["url", "npm", "left-pad"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://www.npmjs.com/package/left-pad",
        ));
}

#[test]
fn test_url_with_unknown_manager_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "managers {\n npm\n}\n");

    let mut cmd = cardboard();
    cmd.args(["--config"])
        .arg(&config)
        .args(["url", "pip", "requests"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No manager registered under id 'pip'"));
}

#[test]
fn test_config_with_unknown_manager_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "managers {\n mystery\n}\n");

    let mut cmd = cardboard();
    cmd.args(["--config"])
        .arg(&config)
        .arg("managers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown manager 'mystery'"));
}

#[test]
fn test_managers_json_lists_registry_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "managers {\n bower\n npm\n}\n");

    let mut cmd = cardboard();
    let assert = cmd
        .args(["--config"])
        .arg(&config)
        .args(["managers", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let bower_pos = stdout.find("\"bower\"").expect("bower in output");
    let npm_pos = stdout.find("\"npm\"").expect("npm in output");
    assert!(bower_pos < npm_pos, "registry order not preserved: {}", stdout);
}

#[test]
fn test_search_with_no_managers_is_vacuous() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "managers {\n}\n");

    let mut cmd = cardboard();
    cmd.args(["--config"])
        .arg(&config)
        .args(["search", "left-pad"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No managers registered"));
}
