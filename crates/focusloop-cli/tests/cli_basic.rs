//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway home
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with its state rooted in `home`; returns
/// (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusloop-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("FOCUSLOOP_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn settings_show_prints_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["work_minutes"], 25);
    assert_eq!(parsed["cycles_per_long_break"], 4);
}

#[test]
fn settings_set_persists_across_invocations() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(
        home.path(),
        &[
            "settings",
            "set",
            "--work",
            "50",
            "--short-break",
            "10",
            "--long-break",
            "20",
            "--cycles",
            "3",
        ],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["work_minutes"], 50);
    assert_eq!(parsed["cycles_per_long_break"], 3);
}

#[test]
fn settings_set_rejects_zero() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "settings",
            "set",
            "--work",
            "0",
            "--short-break",
            "5",
            "--long-break",
            "15",
            "--cycles",
            "4",
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("work_minutes"));
}

#[test]
fn goal_set_and_show() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["goal", "set", "5"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["target"], 5);

    let (stdout, _, code) = run_cli(home.path(), &["goal", "show"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["target"], 5);
    assert_eq!(parsed["completed_today"], 0);
}

#[test]
fn achievements_list_shows_locked_catalog() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["achievements", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[ ] First Step"));
    assert!(stdout.contains("Pomodoro Master"));
}

#[test]
fn timer_run_bounded_ticks_exits_cleanly() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["timer", "run", "--ticks", "3", "--interval-ms", "5"],
    );
    assert_eq!(code, 0);
    // Final snapshot reports the clock still in the work phase.
    assert!(stdout.contains("StateSnapshot"));
}
