use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const CATALOG: &str = r#"{"probabilities": {
    "intact": {"common": 0.25, "uncommon": 0.11, "rare": 0.02},
    "exceptional": {"common": 0.23, "uncommon": 0.13, "rare": 0.04},
    "flawless": {"common": 0.2, "uncommon": 0.17, "rare": 0.06},
    "radiant": {"common": 0.1667, "uncommon": 0.2, "rare": 0.1}
},
"relics": [
    {"name": "Meso V1", "drops": []}
]}"#;

fn relicworth() -> Command {
    Command::cargo_bin("relicworth").expect("binary")
}

#[test]
fn help_describes_the_overrides() {
    relicworth()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--catalog"))
        .stdout(predicate::str::contains("--cache-dir"));
}

#[test]
fn missing_catalog_is_a_fatal_startup_error() {
    let dir = tempdir().expect("tempdir");
    relicworth()
        .current_dir(dir.path())
        .args(["--catalog", "missing.json", "--cache-dir", "cache"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn malformed_catalog_is_a_fatal_startup_error() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("set.json"), "{not json").expect("write catalog");

    relicworth()
        .current_dir(dir.path())
        .args(["--catalog", "set.json", "--cache-dir", "cache"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog"));
}

#[test]
fn exit_token_terminates_the_session() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("set.json"), CATALOG).expect("write catalog");

    relicworth()
        .current_dir(dir.path())
        .args(["--catalog", "set.json", "--cache-dir", "cache"])
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Which relic?"));
}

#[test]
fn unknown_relic_reports_and_the_loop_continues() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("set.json"), CATALOG).expect("write catalog");

    relicworth()
        .current_dir(dir.path())
        .args(["--catalog", "set.json", "--cache-dir", "cache"])
        .write_stdin("Meso Z9\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no relic matches 'Meso Z9'"));
}

#[test]
fn relic_without_drops_values_at_zero() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("set.json"), CATALOG).expect("write catalog");

    relicworth()
        .current_dir(dir.path())
        .args(["--catalog", "set.json", "--cache-dir", "cache"])
        .write_stdin("meso v1\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expected value of Meso V1 (intact): 0.0"));
}

#[test]
fn invalid_quality_warns_and_falls_back_to_intact() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("set.json"), CATALOG).expect("write catalog");

    relicworth()
        .current_dir(dir.path())
        .args(["--catalog", "set.json", "--cache-dir", "cache"])
        .write_stdin("Meso V1 -q shiny\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("'shiny' is not a quality"))
        .stdout(predicate::str::contains("(intact)"));
}
