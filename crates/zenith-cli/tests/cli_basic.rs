//! Basic CLI E2E tests.
//!
//! Tests invoke the built `zenith` binary with an explicit config file so the
//! user's own config never leaks in.

use std::io::Write;
use std::process::Command;

/// Run a CLI command against `config` and return (code, stdout, stderr).
fn run_cli(config: &str, args: &[&str]) -> (i32, String, String) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.as_bytes()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_zenith"))
        .arg("--config")
        .arg(file.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_view_events_json() {
    let (code, stdout, _) = run_cli("", &["view", "--tab", "events"]);
    assert_eq!(code, 0, "view failed");
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["tab"], "events");
    assert_eq!(view["view"]["featured"]["event"]["id"], "evt1");
}

#[test]
fn test_view_uses_start_tab() {
    let (code, stdout, _) = run_cli("[ui]\nstart_tab = \"My Schedule\"\n", &["view"]);
    assert_eq!(code, 0, "view failed");
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["tab"], "my_schedule");
    assert_eq!(
        view["view"]["empty_message"],
        "You haven't RSVP'd for any events yet."
    );
}

#[test]
fn test_view_rejects_unknown_tab() {
    let (code, _, stderr) = run_cli("", &["view", "--tab", "settings"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("settings"));
}

#[test]
fn test_catalog_resources() {
    let (code, stdout, _) = run_cli("", &["catalog", "resources"]);
    assert_eq!(code, 0, "catalog failed");
    let resources: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(resources.as_array().map(Vec::len), Some(6));
}

#[test]
fn test_config_get() {
    let (code, stdout, _) = run_cli("[timer]\nmax_focus_minutes = 90\n", &["config", "get", "timer.max_focus_minutes"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "90");

    let (code, stdout, _) = run_cli("", &["config", "get", "ui.user_name"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Alex");
}

#[test]
fn test_config_get_unknown_key() {
    let (code, _, stderr) = run_cli("", &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key: timer.nope"));
}

#[test]
fn test_config_show_is_toml() {
    let (code, stdout, _) = run_cli("", &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[timer]"));
    assert!(stdout.contains("default_focus_minutes = 25"));
}

#[test]
fn test_broken_config_fails() {
    let (code, _, stderr) = run_cli("[timer\n", &["config", "show"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_inverted_timer_bounds_fail() {
    let (code, _, stderr) = run_cli("[timer]\nmax_break_minutes = 2\n", &["view"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("timer.min_break_minutes"), "stderr: {stderr}");
}

#[test]
fn test_completions_bash() {
    let (code, stdout, _) = run_cli("", &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("zenith"));
}
