//! Drives the `assemblyscore` binary end to end in a scratch directory.

mod common;

use assert_cmd::Command;
use common::{sample_facts, write_facts};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn assemblyscore(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("assemblyscore").unwrap();
    cmd.current_dir(dir)
        .env_remove("ASSEMBLYSCORE_CONFIG")
        .env_remove("ASSEMBLYSCORE_STORE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

/// Scratch directory with a fact snapshot already scored into `performance.json`.
fn recomputed() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_facts(dir.path(), &sample_facts());
    assemblyscore(dir.path())
        .args(["recompute", "--facts", "facts.json", "--format", "json"])
        .assert()
        .success();
    dir
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    assemblyscore(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".assemblyscore.toml").exists());

    assemblyscore(dir.path()).arg("init").assert().failure();
    assemblyscore(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_recompute_reports_summary() {
    let dir = TempDir::new().unwrap();
    write_facts(dir.path(), &sample_facts());

    let summary = json_stdout(assemblyscore(dir.path()).args([
        "recompute",
        "--facts",
        "facts.json",
        "--format",
        "json",
    ]));

    assert_eq!(summary["lawmakers_written"], 29);
    assert_eq!(summary["serving_lawmakers"], 27);
    assert_eq!(summary["parties_written"], 3);
    assert!(dir.path().join("performance.json").exists());
}

#[test]
fn test_recompute_honors_store_flag_and_weights_file() {
    let dir = TempDir::new().unwrap();
    write_facts(dir.path(), &sample_facts());
    std::fs::write(dir.path().join("weights.toml"), "small_caucus_threshold = 5\n").unwrap();

    assemblyscore(dir.path())
        .args([
            "--store",
            "out/scores.json",
            "recompute",
            "--facts",
            "facts.json",
            "--weights",
            "weights.toml",
        ])
        .assert()
        .success();
    assert!(dir.path().join("out/scores.json").exists());

    let parties = json_stdout(assemblyscore(dir.path()).args([
        "--store",
        "out/scores.json",
        "rank",
        "parties",
        "--field",
        "penalty-factor",
        "--format",
        "json",
    ]));
    let rows = parties.as_array().unwrap();
    assert!(rows
        .iter()
        .all(|row| row["item"]["penalty_factor"].as_f64() == Some(1.0)));
}

#[test]
fn test_invalid_weights_fail_before_writing() {
    let dir = TempDir::new().unwrap();
    write_facts(dir.path(), &sample_facts());
    std::fs::write(dir.path().join("weights.json"), r#"{"penalty_ratio": 2.0}"#).unwrap();

    assemblyscore(dir.path())
        .args(["recompute", "--facts", "facts.json", "--weights", "weights.json"])
        .assert()
        .failure();
    assert!(!dir.path().join("performance.json").exists());
}

#[test]
fn test_rank_lawmakers_json() {
    let dir = recomputed();

    let rows = json_stdout(assemblyscore(dir.path()).args([
        "rank",
        "lawmakers",
        "--all",
        "--limit",
        "3",
        "--format",
        "json",
    ]));
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["percentile"], 100.0);
    assert_eq!(rows[0]["item"]["total_score"], 100.0);
}

#[test]
fn test_rank_excludes_former_lawmakers_unless_all() {
    let dir = recomputed();

    let serving = json_stdout(assemblyscore(dir.path()).args(["rank", "lawmakers", "-f", "json"]));
    let everyone = json_stdout(assemblyscore(dir.path()).args([
        "rank",
        "lawmakers",
        "--all",
        "-f",
        "json",
    ]));

    assert_eq!(serving.as_array().unwrap().len(), 27);
    assert_eq!(everyone.as_array().unwrap().len(), 29);
}

#[test]
fn test_rank_parties_terminal_output() {
    let dir = recomputed();

    let output = assemblyscore(dir.path())
        .args(["--plain", "rank", "parties"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    for party in ["Blue", "Red", "Green"] {
        assert!(text.contains(party), "missing {} in:\n{}", party, text);
    }
}

#[test]
fn test_party_members_ranks_one_party() {
    let dir = recomputed();

    let rows = json_stdout(assemblyscore(dir.path()).args(["party-members", "Green", "-f", "json"]));
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row["item"]["party"] == "Green"));
}

#[test]
fn test_party_members_unknown_party_fails() {
    let dir = recomputed();

    assemblyscore(dir.path())
        .args(["party-members", "Purple"])
        .assert()
        .failure();
}

#[test]
fn test_compare_lawmakers_and_parties() {
    let dir = recomputed();

    let lawmakers = json_stdout(assemblyscore(dir.path()).args([
        "compare", "lawmakers", "M001", "M002", "-f", "json",
    ]));
    assert_eq!(lawmakers["left"]["lawmaker_id"], "M001");
    assert_eq!(lawmakers["population"], 29);
    assert_eq!(lawmakers["fields"].as_array().unwrap().len(), 16);

    let parties = json_stdout(assemblyscore(dir.path()).args([
        "compare", "parties", "Blue", "Green", "-f", "json",
    ]));
    assert_eq!(parties["right"]["party"], "Green");
    assert_eq!(parties["population"], 3);

    assemblyscore(dir.path())
        .args(["compare", "lawmakers", "M001", "M999"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_discovered_config_warns_on_stderr() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".assemblyscore.toml"), "[weights\n").unwrap();

    let output = assemblyscore(dir.path())
        .args(["rank", "parties", "-f", "json"])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();

    assert!(stderr.contains("Using defaults"), "stderr was:\n{}", stderr);
}
