//! Integration tests for the etude CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn score_cmd() -> Command {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("score")
        .arg(fixture_path("gold"))
        .arg(fixture_path("test"))
        .arg("--quiet");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_score_prints_aggregate_row() {
    score_cmd()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\n#########\tTP\tFP\tTN\tFN\n"))
        .stdout(predicate::str::contains("aggregate\t3.0\t1.0\t0.0\t2.0\n"))
        .stdout(predicate::str::contains("0001.xml").not());
}

#[test]
fn test_verbose_adds_per_file_rows() {
    score_cmd()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregate\t3.0\t1.0\t0.0\t2.0\n"))
        .stdout(predicate::str::contains("0001.xml\t2.0\t1.0\t0.0\t1.0\n"))
        .stdout(predicate::str::contains("0002.xml\t1.0\t0.0\t0.0\t1.0\n"));
}

#[test]
fn test_metrics_are_printed_in_requested_order() {
    score_cmd()
        .args(["-m", "Recall", "TP", "Precision"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#########\tRecall\tTP\tPrecision\n"))
        .stdout(predicate::str::contains("aggregate\t0.6\t3.0\t0.75\n"));
}

#[test]
fn test_custom_delimiter() {
    score_cmd()
        .args(["-d", ",", "-m", "TP,FN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#########,TP,FN\n"))
        .stdout(predicate::str::contains("aggregate,3.0,2.0\n"));
}

#[test]
fn test_json_output() {
    score_cmd()
        .args(["-f", "json", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"metrics\""))
        .stdout(predicate::str::contains("\"label\": \"aggregate\""))
        .stdout(predicate::str::contains("\"label\": \"0002.xml\""));
}

#[test]
fn test_markdown_output() {
    score_cmd()
        .args(["-f", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Scope | TP | FP | TN | FN |"))
        .stdout(predicate::str::contains("| aggregate | 3.0 | 1.0 | 0.0 | 2.0 |"))
        .stdout(predicate::str::contains("*Rows: 1*"));
}

#[test]
fn test_invalid_metric_fails_before_scoring() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("score")
        .arg("does-not-exist")
        .arg("does-not-exist")
        .args(["-m", "Fscore"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Fscore"));
}

#[test]
fn test_missing_gold_directory() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("score")
        .arg("tests/fixtures/nonexistent")
        .arg(fixture_path("test"))
        .arg("--quiet");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_missing_test_document_fails() {
    let temp_dir = TempDir::new().unwrap();
    let test_dir = temp_dir.path().join("test");
    fs::create_dir(&test_dir).unwrap();
    fs::copy(
        fixture_path("test/0001.txt"),
        test_dir.join("0001.txt"),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("score")
        .arg(fixture_path("gold"))
        .arg(&test_dir)
        .arg("--quiet");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("0002.txt"));
}

#[test]
fn test_file_prefix_filters_gold_documents() {
    score_cmd()
        .args(["--file-prefix", "0002", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregate\t1.0\t0.0\t0.0\t1.0\n"))
        .stdout(predicate::str::contains("0001.xml").not());
}

#[test]
fn test_parallel_matches_sequential() {
    score_cmd()
        .args(["--parallel", "--threads", "2", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregate\t3.0\t1.0\t0.0\t2.0\n"))
        .stdout(predicate::str::contains("0001.xml\t2.0\t1.0\t0.0\t1.0\n"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("report.tsv");

    score_cmd()
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("aggregate\t3.0\t1.0\t0.0\t2.0"));
}

#[test]
fn test_ledger_records_every_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let ledger_path = temp_dir.path().join("ledger.json");

    score_cmd().arg("--ledger").arg(&ledger_path).assert().success();

    let ledger: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&ledger_path).unwrap()).unwrap();
    let records = ledger["records"].as_array().unwrap();
    assert_eq!(records.len(), 6);

    let fp = records
        .iter()
        .find(|r| r["score"] == "FP")
        .expect("one false positive");
    assert_eq!(fp["file"], "0001.xml");
    assert_eq!(fp["start"], "200");
    assert_eq!(fp["type"], "Dates and Times");

    let starts: Vec<&str> = records
        .iter()
        .filter(|r| r["file"] == "0001.xml")
        .filter_map(|r| r["start"].as_str())
        .collect();
    assert_eq!(starts, vec!["16", "45", "120", "200"]);
}

#[test]
fn test_config_file_supplies_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("etude.toml");
    fs::write(
        &config_path,
        "[report]\nmetrics = [\"TP\", \"F1\"]\ndelimiter = \"|\"\n",
    )
    .unwrap();

    score_cmd()
        .arg("-c")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("#########|TP|F1\n"))
        .stdout(predicate::str::contains("aggregate|3.0|"));
}

#[test]
fn test_external_gold_profile() {
    score_cmd()
        .arg("--gold-profile-file")
        .arg(fixture_path("profiles/short_name.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregate\t3.0\t1.0\t0.0\t2.0\n"));
}

#[test]
fn test_unknown_builtin_profile() {
    score_cmd()
        .args(["--test-profile", "WebAnno"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WebAnno"));
}

#[test]
fn test_list_profiles() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("list").arg("profiles");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("i2b2_2016_track-1"))
        .stdout(predicate::str::contains("CAS XMI"));
}

#[test]
fn test_list_metrics() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("list").arg("metrics");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Specificity"))
        .stdout(predicate::str::contains("TP (default)"));
}

#[test]
fn test_validate_profile() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("validate")
        .arg("-p")
        .arg(fixture_path("profiles/short_name.toml"))
        .args(["--score-key", "short_name"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("✓ Profile is valid!"))
        .stdout(predicate::str::contains("Patterns: 1"))
        .stdout(predicate::str::contains("DateTime"));
}

#[test]
fn test_validate_rejects_profile_without_patterns() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("validate")
        .arg("-p")
        .arg(fixture_path("profiles/broken.toml"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("✗ Profile is invalid!"));
}

#[test]
fn test_validate_rejects_unknown_score_key() {
    let mut cmd = Command::cargo_bin("etude").unwrap();
    cmd.arg("validate")
        .arg("-p")
        .arg(fixture_path("profiles/short_name.toml"))
        .args(["--score-key", "Nickname"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid score key 'Nickname'"))
        .stdout(predicate::str::contains("Validating").not());
}
