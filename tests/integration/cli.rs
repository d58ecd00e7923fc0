use crate::common::{TestEnv, is_executable};
use predicates::prelude::*;
use puff_cli::test_utils::tarball;
use std::fs;

#[test]
fn test_list_shows_featured_repositories() {
    let env = TestEnv::new();

    let output = env.run_puff(&["list"], "");
    output.assert_success();
    assert!(output.stdout.contains("pgulb/plasma"), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("pgulb/puff"));
    assert!(env.paths().log_file().exists());
}

#[test]
fn test_list_marks_installed_featured_repository() {
    let env = TestEnv::new();
    env.write_metadata(r#"{"metadata":[{"path":"pgulb/plasma","version":"v0.4.1"}]}"#);

    env.puff_command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgulb/plasma"))
        .stdout(predicate::str::contains("(installed v0.4.1)"));
}

#[test]
fn test_list_installed_when_empty() {
    let env = TestEnv::new();

    let output = env.run_puff(&["list", "--installed"], "");
    output.assert_success();
    assert!(output.stdout.contains("Nothing installed yet"));
}

#[test]
fn test_add_list_remove_freeform_repository() {
    let mut env = TestEnv::new();
    let _latest = env
        .latest_mock("acme/widget", "v0.9.0", &["widget-darwin-arm64.tar.gz", "widget-linux-amd64.tar.gz"])
        .create();
    let download = env
        .download_mock("acme/widget", "widget-linux-amd64.tar.gz", tarball(&[("widget", b"widget bin")]))
        .create();

    let output = env.run_puff(&["add", "acme/widget"], "linux amd64\n");
    output.assert_success();
    assert!(output.stdout.contains("widget-darwin-arm64.tar.gz"));
    assert!(output.stdout.contains("Installed acme/widget v0.9.0"), "stdout: {}", output.stdout);
    download.assert();

    assert_eq!(fs::read(env.binary("widget")).unwrap(), b"widget bin");
    assert!(is_executable(&env.binary("widget")));
    assert_eq!(env.state().find("acme/widget").unwrap().name_fragments, vec!["linux", "amd64"]);

    let output = env.run_puff(&["list", "--installed"], "");
    output.assert_success();
    assert!(output.stdout.contains("acme/widget v0.9.0 [linux amd64]"), "stdout: {}", output.stdout);

    let output = env.run_puff(&["remove", "acme/widget", "--yes"], "");
    output.assert_success();
    assert!(output.stdout.contains("Removed acme/widget"));
    assert!(!env.binary("widget").exists());
    assert!(env.state().is_empty());
}

#[test]
fn test_update_reports_current_versions() {
    let mut env = TestEnv::new();
    env.write_metadata(r#"{"metadata":[{"path":"acme/widget","version":"v1","name_fragments":["linux"]}]}"#);
    let _latest = env.latest_mock("acme/widget", "v1", &["widget-linux"]).create();

    let output = env.run_puff(&["update"], "");
    output.assert_success();
    assert!(output.stdout.contains("acme/widget is already at v1"), "stdout: {}", output.stdout);
}

#[test]
fn test_update_with_nothing_installed() {
    let env = TestEnv::new();

    let output = env.run_puff(&["update"], "");
    output.assert_success();
    assert!(output.stdout.contains("Nothing installed"));
}

#[test]
fn test_remove_declined_on_stdin() {
    let env = TestEnv::new();
    env.write_metadata(r#"{"metadata":[{"path":"acme/widget","version":"v1"}]}"#);
    fs::write(env.binary("widget"), b"bin").unwrap();

    let output = env.run_puff(&["remove", "acme/widget"], "n\n");
    output.assert_success();
    assert!(output.stdout.contains("Skipped"), "stdout: {}", output.stdout);
    assert!(env.binary("widget").exists());
    assert!(env.state().find("acme/widget").is_some());
}

#[test]
fn test_api_error_exits_with_suggestion() {
    let mut env = TestEnv::new();
    let _missing = env.server.mock("GET", "/repos/acme/missing/releases/latest").with_status(404).create();

    let output = env.run_puff(&["add", "acme/missing"], "");
    output.assert_failure();
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error:"), "stderr: {}", output.stderr);
    assert!(output.stderr.contains("suggestion:"), "stderr: {}", output.stderr);
    assert!(env.state().is_empty());
}

#[test]
fn test_invalid_repository_path_fails() {
    let env = TestEnv::new();

    let output = env.run_puff(&["add", "not-a-repo"], "");
    output.assert_failure();
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("not-a-repo"), "stderr: {}", output.stderr);
}

#[test]
fn test_new_config_dir_announced_unless_quiet() {
    let env = TestEnv::new();
    let fresh = env.paths().root().with_file_name("fresh");
    let quiet = env.paths().root().with_file_name("quiet");

    env.puff_command()
        .arg("--config-dir")
        .arg(&fresh)
        .args(["list", "--installed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config directory"));

    env.puff_command()
        .arg("--config-dir")
        .arg(&quiet)
        .args(["-q", "list", "--installed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config directory").not());
    assert!(quiet.join("bin").is_dir());
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let env = TestEnv::new();

    env.puff_command()
        .args(["-q", "-v", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
