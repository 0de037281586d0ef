//! Integration tests for the CLI subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("starlane-cli");
    cmd.env("NO_COLOR", "1").env("RUST_LOG", "error");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("command runs");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// A three-star branching map: the seed star at the origin with one star on
/// each chain, so the start star is always `Star 0`.
fn write_small_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(
        &path,
        r#"{ "star_count": 3, "layout": "branching", "seed": 7 }"#,
    )
    .expect("write config");
    path
}

#[test]
fn generate_prints_summary() {
    cli()
        .args(["--seed", "42", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated scatter map (seed: 42)"))
        .stdout(predicate::str::contains("Stars:     100"))
        .stdout(predicate::str::contains("Connected: yes"));
}

#[test]
fn generate_json_is_machine_readable() {
    let json = stdout_json(cli().args(["--seed", "42", "--format", "json", "generate"]));

    assert_eq!(json["stars"], 100);
    assert_eq!(json["connected"], true);
    assert_eq!(json["layout"], "scatter");
    assert_eq!(json["seed"], 42);
}

#[test]
fn config_file_controls_generation() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    let json = stdout_json(cli().arg("--config").arg(&config).args(["--format", "json", "generate"]));
    assert_eq!(json["stars"], 3);
    assert_eq!(json["layout"], "branching");
    assert_eq!(json["start"], "Star 0");
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "star_count": 0 }"#).expect("write config");

    cli()
        .arg("--config")
        .arg(&path)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"))
        .stderr(predicate::str::contains("star_count"));
}

#[test]
fn stars_lists_every_star() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    let json = stdout_json(cli().arg("--config").arg(&config).args(["--format", "json", "stars"]));
    let rows = json.as_array().expect("array of stars");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "Star 0");
    assert!(rows.iter().all(|row| row["neighbours"].as_u64() >= Some(1)));
}

#[test]
fn star_names_file_renames_stars() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());
    let names = dir.path().join("names.txt");
    fs::write(&names, "Vega\nAltair\n\nDeneb\n").expect("write names");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--names")
        .arg(&names)
        .args(["route", "--from", "Vega", "--to", "Deneb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route from Vega to Deneb"))
        .stdout(predicate::str::contains("Route ready"));
}

#[test]
fn route_reports_length_and_cost() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    let json = stdout_json(cli().arg("--config").arg(&config).args([
        "--format",
        "json",
        "route",
        "--from",
        "Star 0",
        "--to",
        "Star 2",
        "--cost-model",
        "consistent",
    ]));
    assert_eq!(json["outcome"], "route_ready");
    assert_eq!(json["route"][0], "Star 0");
    assert_eq!(json["cost_model"], "consistent");
    assert!(json["length"].as_f64().expect("length") > 0.0);
}

#[test]
fn route_star_limit_is_advisory() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    cli()
        .arg("--config")
        .arg(&config)
        .args(["route", "--from", "Star 0", "--to", "Star 2", "--max-path-stars", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path too long"));
}

#[test]
fn route_fuel_limit_is_advisory() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    let json = stdout_json(cli().arg("--config").arg(&config).args([
        "--format",
        "json",
        "route",
        "--from",
        "Star 0",
        "--to",
        "Star 2",
        "--fuel",
        "1",
    ]));
    assert_eq!(json["outcome"], "insufficient_resource");
    assert_eq!(json["available"], 1.0);
}

#[test]
fn unknown_star_suggests_names() {
    cli()
        .args(["--seed", "1", "route", "--from", "Star 0", "--to", "Star 1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown star name: Star 1000"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn play_runs_to_completion() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    let json = stdout_json(cli().arg("--config").arg(&config).args([
        "--format",
        "json",
        "play",
        "--to",
        "Star 2",
        "--pirate-chance",
        "0",
    ]));
    let events = json.as_array().expect("event log");
    assert_eq!(events[0]["state"], "selecting_destination");
    assert_eq!(events[1]["state"], "route_ready");
    let last = events.last().expect("events");
    assert_eq!(last["state"], "completed");
    assert_eq!(last["star"], "Star 2");
}

#[test]
fn play_text_log_shows_states() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_small_config(dir.path());

    cli()
        .arg("--config")
        .arg(&config)
        .args(["play", "--to", "Star 1", "--pirate-chance", "0", "--colonise"])
        .assert()
        .success()
        .stdout(predicate::str::contains("route_ready"))
        .stdout(predicate::str::contains("arrived"));
}
