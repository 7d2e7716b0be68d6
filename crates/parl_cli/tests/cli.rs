//! Black-box runs of the `parl` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn parl() -> Command {
    let mut cmd = Command::cargo_bin("parl").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn default_run_prints_text_report() {
    parl()
        .assert()
        .success()
        .stdout(predicate::str::contains("=== RESULTS WITH COALITIONS ==="))
        .stdout(predicate::str::contains("↑ +71 advantage"))
        .stdout(predicate::str::contains("net coalition effect: +0 seats"));
}

#[test]
fn json_render_is_parseable() {
    let out = parl().args(["--render", "json"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v.pointer("/summary/seats_with").and_then(|x| x.as_u64()), Some(230));
    assert_eq!(v.pointer("/results_without/1/name").and_then(|x| x.as_str()), Some("PSD"));
}

#[test]
fn seat_and_threshold_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("small.json");
    fs::write(
        &scenario,
        r#"{"parties":[{"name":"A","votes":300},{"name":"B","votes":200},{"name":"C","votes":100}]}"#,
    )
    .unwrap();

    let out = parl()
        .arg("--scenario")
        .arg(&scenario)
        .args(["--seats", "6", "--total-votes", "600", "--threshold", "0", "--render", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let seats: Vec<u64> = (0..3)
        .map(|i| v.pointer(&format!("/results_without/{i}/seats")).and_then(|x| x.as_u64()).unwrap())
        .collect();
    assert_eq!(seats, [3, 2, 1]);
}

#[test]
fn out_dir_gets_canonical_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("artifacts");
    parl().arg("--out").arg(&out_dir).arg("--quiet").assert().success();

    let text = fs::read_to_string(out_dir.join("comparison.json")).unwrap();
    assert!(text.starts_with(r#"{"advisory_with":"#));
    assert!(!text.ends_with('\n'));
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v.pointer("/coalition_impact/0/coalition").and_then(|x| x.as_str()), Some("AD"));
}

#[test]
fn validate_only_skips_allocation() {
    parl()
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("validate-only: scenario OK (9 parties, 1 coalitions)"));
}

#[test]
fn negative_seats_are_a_usage_error() {
    parl()
        .args(["--seats", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("seats must be >= 0"));
}

#[test]
fn zero_seats_fail_validation() {
    parl()
        .args(["--seats", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("total_seats must be > 0"));
}

#[test]
fn negative_votes_in_file_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("bad.json");
    fs::write(&scenario, r#"{"parties":[{"name":"A","votes":-10}]}"#).unwrap();
    parl()
        .arg("--scenario")
        .arg(&scenario)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be >= 0"));
}

#[test]
fn missing_scenario_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    parl()
        .arg("--scenario")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(4);
}

#[test]
fn remote_paths_rejected() {
    parl()
        .args(["--scenario", "https://example.org/s.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path must be local"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    parl()
        .args(["--verbose", "--render", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("run done"))
        .stdout(predicate::str::starts_with("{"));
}
