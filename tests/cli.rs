// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `cmlint` command isolated from any user or project configuration.
fn cmlint(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cmlint").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn lint_valid_message_argument() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .args(["lint", "feat(core): add thing"])
        .assert()
        .success();
}

#[test]
fn lint_reports_failed_rule_and_help_url() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .args(["lint", "feat(core): add thing."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[subject-full-stop]"))
        .stdout(predicate::str::contains("https://www.conventionalcommits.org/"));
}

#[test]
fn lint_reads_stdin() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .arg("lint")
        .write_stdin("Feat: Add Thing\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[type-case]"))
        .stdout(predicate::str::contains("[subject-case]"));
}

#[test]
fn lint_edit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("MSG");
    fs::write(&path, "fix(api): handle empty body\n\nCloses #42\n").unwrap();

    cmlint(&dir)
        .args(["lint", "--edit"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn lint_edit_ignores_scissors_and_comments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("MSG");
    fs::write(
        &path,
        "docs: update readme\n\n# Please enter the commit message\n\
         # ------------------------ >8 ------------------------\n\
         diff --git a/README.md b/README.md\n",
    )
    .unwrap();

    cmlint(&dir)
        .args(["lint", "--edit"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn lint_edit_accepts_merge_template() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("MERGE_MSG");
    fs::write(
        &path,
        "Merge branch 'feature'\n\
         # Please enter a commit message to explain why this merge is necessary,\n\
         # especially if it merges an updated upstream into a topic branch.\n",
    )
    .unwrap();

    cmlint(&dir)
        .args(["lint", "--edit"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn lint_body_line_with_colon() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .args([
            "lint",
            "fix(api): handle timeouts\n\nRetry once.\nReason: the upstream service flakes.",
        ])
        .assert()
        .success();
}

#[test]
fn lint_skips_merge_commits() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .args(["lint", "Merge branch 'main' into feature"])
        .assert()
        .success();
}

#[test]
fn lint_json_output() {
    let dir = TempDir::new().unwrap();
    let output = cmlint(&dir)
        .args(["lint", "--format", "json", "feat: add thing."])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json[0]["valid"], false);
    assert!(json[0]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|issue| issue["name"] == "subject-full-stop"));
}

#[test]
fn lint_strict_fails_on_warnings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cmlint.toml"),
        "[rules]\nbody-leading-blank = [1, \"always\"]\n",
    )
    .unwrap();

    cmlint(&dir)
        .args(["lint", "fix: x\nno blank line"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[body-leading-blank]"));

    cmlint(&dir)
        .args(["lint", "--strict", "fix: x\nno blank line"])
        .assert()
        .failure();
}

#[test]
fn lint_rejects_unknown_rule() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cmlint.toml"),
        "[rules]\nno-such-rule = [2, \"always\"]\n",
    )
    .unwrap();

    cmlint(&dir)
        .args(["lint", "feat: x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-rule"));
}

#[test]
fn lint_missing_config_file() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .args(["--config", "missing.toml", "lint", "feat: x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn print_config_json() {
    let dir = TempDir::new().unwrap();
    let output = cmlint(&dir)
        .args(["print-config", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["helpUrl"], "https://www.conventionalcommits.org/");
    assert_eq!(json["rules"]["subject-max-length"], serde_json::json!([2, "always", 50]));
    assert_eq!(
        json["parserPreset"]["parserOpts"]["issuePrefixes"],
        serde_json::json!(["#", "PROJ-"])
    );
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    cmlint(&dir).arg("init").assert().success();
    let written = fs::read_to_string(dir.path().join("cmlint.toml")).unwrap();
    assert!(written.contains("subject-max-length = [2, \"always\", 50]"));

    cmlint(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cmlint(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn init_json_is_loadable() {
    let dir = TempDir::new().unwrap();

    cmlint(&dir).args(["init", "--json"]).assert().success();
    assert!(dir.path().join(".commitlintrc.json").is_file());

    cmlint(&dir)
        .args(["lint", "feat(ui): add button"])
        .assert()
        .success();
    cmlint(&dir)
        .args(["lint", "feat(ui): add button."])
        .assert()
        .failure();
}

#[test]
fn hooks_install_and_uninstall() {
    let dir = TempDir::new().unwrap();
    git2::Repository::init(dir.path()).unwrap();
    let hook = dir.path().join(".git").join("hooks").join("commit-msg");

    cmlint(&dir).args(["hooks", "install"]).assert().success();
    let script = fs::read_to_string(&hook).unwrap();
    assert!(script.contains("cmlint lint --edit"));

    cmlint(&dir)
        .args(["hooks", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ commit-msg"));

    cmlint(&dir).args(["hooks", "uninstall"]).assert().success();
    assert!(!hook.exists());
}

#[test]
fn version_command() {
    let dir = TempDir::new().unwrap();
    cmlint(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cmlint "));
}
