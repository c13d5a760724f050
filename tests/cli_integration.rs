use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn run_cli(project_root: &Path, args: &[&str]) -> Output {
    let binary = assert_cmd::cargo::cargo_bin!("studio-migrate");
    let mut cmd = Command::new(binary);
    cmd.env("RUST_LOG", "off");
    cmd.arg("--format").arg("json");
    cmd.arg("--project").arg(project_root);
    cmd.args(args);
    cmd.output().expect("studio-migrate executes")
}

fn run_cli_ok(project_root: &Path, args: &[&str]) -> Output {
    let output = run_cli(project_root, args);
    assert!(
        output.status.success(),
        "studio-migrate {:?} failed:\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout_events(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("json event line"))
        .collect()
}

fn stderr_error(output: &Output) -> Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    serde_json::from_str(line).expect("valid json error line in stderr")
}

fn project(root: &Path, version: &str) {
    fs::write(
        root.join("project.studio"),
        format!(r#"{{"studioVersion": "{version}", "languagesTranslation": [{{"code": "en", "name": "English"}}, {{"code": "es", "name": "Spanish"}}]}}"#),
    )
    .unwrap();
    fs::create_dir_all(root.join("Data/Text/Dialogs")).unwrap();
    fs::write(root.join("Data/Text/Dialogs/100000.csv"), "en\nHello\n").unwrap();
}

#[test]
fn migrate_uses_recorded_version() {
    let dir = tempdir().unwrap();
    project(dir.path(), "1.4.1");

    let output = run_cli_ok(dir.path(), &["migrate"]);
    let events = stdout_events(&output);

    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event"], "progress");
    assert_eq!(events[0]["step"], 1);
    assert_eq!(events[0]["total"], 2);
    assert_eq!(events[2]["event"], "success");
    let csv = fs::read_to_string(dir.path().join("Data/Text/Dialogs/100000.csv")).unwrap();
    assert!(csv.starts_with("en,es"));
}

#[test]
fn migrate_from_unknown_version_only_reports_success() {
    let dir = tempdir().unwrap();
    project(dir.path(), "1.4.1");

    let output = run_cli_ok(dir.path(), &["migrate", "--from", "9.9.9"]);
    let events = stdout_events(&output);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "success");
}

#[test]
fn migrate_outside_a_project_fails_with_json_error() {
    let dir = tempdir().unwrap();

    let output = run_cli(dir.path(), &["migrate"]);

    assert!(!output.status.success());
    assert_eq!(stderr_error(&output)["error"], "project_not_found");
}

#[test]
fn steps_lists_registered_steps() {
    let dir = tempdir().unwrap();

    let output = run_cli_ok(dir.path(), &["steps", "1.0.2"]);
    let listing: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(listing["version"], "1.0.2");
    let ids: Vec<_> = listing["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["link-resources", "sync-text-languages", "stamp-maps"]);
}

#[test]
fn run_step_rejects_unknown_ids() {
    let dir = tempdir().unwrap();
    project(dir.path(), "1.4.1");

    let output = run_cli(dir.path(), &["run-step", "does-not-exist"]);

    assert!(!output.status.success());
    assert_eq!(stderr_error(&output)["error"], "unknown_step");
}

#[test]
fn pretty_migrate_prints_step_descriptions() {
    let dir = tempdir().unwrap();
    project(dir.path(), "1.4.1");

    let binary = assert_cmd::cargo::cargo_bin!("studio-migrate");
    let output = Command::new(binary)
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .arg("--pretty")
        .arg("--project")
        .arg(dir.path())
        .arg("migrate")
        .output()
        .expect("studio-migrate executes");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        predicate::str::contains("[1/2] Add missing language columns to the text files")
            .eval(&stdout)
    );
    assert!(predicate::str::contains("migration complete").eval(&stdout));
}

#[test]
fn configure_installs_descriptor_and_configs() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let configs = root.join("Data/configs");
    fs::create_dir_all(&configs).unwrap();
    fs::write(configs.join("infos_config.json"), r#"{"gameTitle": "Template"}"#).unwrap();
    fs::write(
        configs.join("game_options_config.json"),
        r#"{"order": ["language", "volume"]}"#,
    )
    .unwrap();
    fs::write(
        configs.join("scene_title_config.json"),
        r#"{"isLanguageSelectionEnabled": true}"#,
    )
    .unwrap();
    fs::create_dir_all(root.join("graphics/icons")).unwrap();
    fs::write(root.join("graphics/icons/game.png"), b"png").unwrap();

    let inputs = tempdir().unwrap();
    let data = inputs.path().join("project.json");
    let languages = inputs.path().join("languages.json");
    fs::write(
        &data,
        r#"{"studioVersion": "2.0.0", "languagesTranslation": [{"code": "en", "name": "English"}]}"#,
    )
    .unwrap();
    fs::write(&languages, r#"{"defaultLanguage": "en"}"#).unwrap();

    let output = run_cli_ok(
        root,
        &[
            "configure",
            "--project-data",
            data.to_str().unwrap(),
            "--language-config",
            languages.to_str().unwrap(),
            "--title",
            "New Game",
        ],
    );
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["maps_stamped"], 0);
    assert!(root.join("project.studio").exists());
    assert!(root.join("psdk.bat").exists());
    let infos: Value =
        serde_json::from_str(&fs::read_to_string(configs.join("infos_config.json")).unwrap())
            .unwrap();
    assert_eq!(infos["gameTitle"], "New Game");
}
