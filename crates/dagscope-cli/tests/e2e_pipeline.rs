//! E2E tests for the analysis commands:
//! `dagscope generate`, `dagscope run`, `dagscope report`, `dagscope completions`.
//!
//! Covers: suite generation, JSON/text output for single runs, CSV reports,
//! cyclic input, and structured errors for malformed input.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

fn dagscope_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dagscope"));
    cmd.current_dir(dir);
    cmd.env("DAGSCOPE_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn generate_suite(dir: &Path) {
    dagscope_cmd(dir)
        .args(["generate", "--out", "data", "--json"])
        .assert()
        .success();
}

fn run_json(dir: &Path, file: &str) -> Value {
    let output = dagscope_cmd(dir)
        .args(["run", file, "--json"])
        .output()
        .expect("run should not crash");
    assert!(
        output.status.success(),
        "dagscope run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("run --json must produce valid JSON")
}

const DIAMOND: &str = r#"{"directed": true, "n": 4, "source": 0, "weight_model": "edge",
    "edges": [{"u": 0, "v": 1, "w": 1}, {"u": 0, "v": 2, "w": 4},
              {"u": 1, "v": 2, "w": 2}, {"u": 1, "v": 3, "w": 5},
              {"u": 2, "v": 3, "w": 1}]}"#;

const CYCLE: &str = r#"{"directed": true, "n": 4, "source": 0,
    "edges": [{"u": 0, "v": 1, "w": 1}, {"u": 1, "v": 2, "w": 1},
              {"u": 2, "v": 0, "w": 1}, {"u": 2, "v": 3, "w": 7}]}"#;

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_writes_nine_datasets() {
    let dir = TempDir::new().expect("temp dir");
    let output = dagscope_cmd(dir.path())
        .args(["generate", "--out", "data", "--seed", "7", "--json"])
        .output()
        .expect("generate should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["seed"], 7);
    assert_eq!(json["files"].as_array().map(Vec::len), Some(9));
    assert!(dir.path().join("data/data_small_1.json").is_file());
    assert!(dir.path().join("data/data_large_3.json").is_file());
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_generated_dataset_reports_every_stage() {
    let dir = TempDir::new().expect("temp dir");
    generate_suite(dir.path());

    let json = run_json(dir.path(), "data/data_medium_1.json");
    for key in [
        "file",
        "vertex_count",
        "sccs",
        "condensation",
        "vertex_order",
        "shortest",
        "longest",
        "critical_path",
        "metrics",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["condensation"]["is_dag"], true);
}

#[test]
fn run_diamond_text_output() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("diamond.json"), DIAMOND).expect("write");

    dagscope_cmd(dir.path())
        .env("FORMAT", "text")
        .args(["run", "diamond.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sccs=4"))
        .stdout(predicate::str::contains("order=0 1 2 3"))
        .stdout(predicate::str::contains("critical_path=0 1 3 length=6"));
}

#[test]
fn run_cyclic_graph_collapses_cycle() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("cycle.json"), CYCLE).expect("write");

    let json = run_json(dir.path(), "cycle.json");
    assert_eq!(json["sccs"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["condensation"]["components"], 2);
    assert_eq!(json["condensation"]["edges"], 1);
    assert_eq!(json["critical_path"]["length"], 7);
    assert_eq!(json["vertex_order"].as_array().map(Vec::len), Some(4));
}

#[test]
fn run_with_dfs_strategy_and_source_override() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("diamond.json"), DIAMOND).expect("write");

    let output = dagscope_cmd(dir.path())
        .args(["run", "diamond.json", "--strategy", "dfs", "--source", "-1", "--json"])
        .output()
        .expect("run should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["strategy"], "dfs");
    assert!(json["source"].is_null());
    assert!(json["critical_path"].is_null());
}

#[test]
fn run_malformed_file_emits_error_json() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("broken.json"), "{ not json").expect("write");

    let output = dagscope_cmd(dir.path())
        .args(["run", "broken.json", "--json"])
        .output()
        .expect("run should not crash");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find('{').expect("error JSON on stderr");
    let mut stream = serde_json::Deserializer::from_str(&stderr[start..]).into_iter::<Value>();
    let json = stream
        .next()
        .expect("one JSON value")
        .expect("valid error JSON");
    assert_eq!(json["error"]["error_code"], "E1003");
}

#[test]
fn run_out_of_range_edge_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("bad.json"),
        r#"{"n": 2, "edges": [{"u": 0, "v": 5, "w": 1}]}"#,
    )
    .expect("write");

    dagscope_cmd(dir.path())
        .env("FORMAT", "text")
        .args(["run", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn run_huge_vertex_count_fails_with_code() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("huge.json"),
        r#"{"n": 18446744073709551615, "edges": []}"#,
    )
    .expect("write");

    let output = dagscope_cmd(dir.path())
        .args(["run", "huge.json", "--json"])
        .output()
        .expect("run should not crash");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "unexpected panic: {stderr}");
    let start = stderr.find('{').expect("error JSON on stderr");
    let mut stream = serde_json::Deserializer::from_str(&stderr[start..]).into_iter::<Value>();
    let json = stream
        .next()
        .expect("one JSON value")
        .expect("valid error JSON");
    assert_eq!(json["error"]["error_code"], "E2003");
}

#[test]
fn run_missing_file_fails() {
    let dir = TempDir::new().expect("temp dir");
    dagscope_cmd(dir.path())
        .args(["run", "nope.json"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

#[test]
fn report_writes_csv_for_generated_suite() {
    let dir = TempDir::new().expect("temp dir");
    generate_suite(dir.path());

    dagscope_cmd(dir.path())
        .env("FORMAT", "text")
        .args(["report", "--data", "data", "--out", "out/results.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 9 rows"));

    let csv = std::fs::read_to_string(dir.path().join("out/results.csv")).expect("csv written");
    let mut lines = csv.lines();
    let header = lines.next().expect("header");
    assert!(header.starts_with("file,n,edges,directed,scc_count"));
    assert_eq!(header.split(',').count(), 19);
    assert_eq!(lines.count(), 9);
}

#[test]
fn report_uses_project_config_defaults() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join("graphs")).expect("mkdir");
    std::fs::write(dir.path().join("graphs/diamond.json"), DIAMOND).expect("write");
    std::fs::write(
        dir.path().join("dagscope.toml"),
        "[report]\ndata_dir = \"graphs\"\noutput = \"custom.csv\"\n",
    )
    .expect("write config");

    let output = dagscope_cmd(dir.path())
        .args(["report", "--json"])
        .output()
        .expect("report should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(1));
    assert!(dir.path().join("custom.csv").is_file());
}

#[test]
fn report_missing_directory_fails() {
    let dir = TempDir::new().expect("temp dir");
    dagscope_cmd(dir.path())
        .args(["report", "--data", "missing"])
        .assert()
        .failure();
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("dagscope.toml"), "[report\n").expect("write config");

    dagscope_cmd(dir.path())
        .env("FORMAT", "text")
        .args(["generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

// ---------------------------------------------------------------------------
// completions
// ---------------------------------------------------------------------------

#[test]
fn completions_bash_mentions_binary() {
    let dir = TempDir::new().expect("temp dir");
    dagscope_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dagscope"));
}
