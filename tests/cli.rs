use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SQUARE: &str = "SECTION Graph
Nodes 4
Edges 4
E 1 2 2
E 2 4 2
E 1 3 2
E 3 4 2
END

SECTION Terminals
Terminals 2
T 1
T 4
END

EOF
";

#[test]
fn test_binary_help() {
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tie-break"));
}

#[test]
fn test_solve_from_stdin() {
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.write_stdin(SQUARE)
        .assert()
        .success()
        .stdout("VALUE 4\n1 2\n2 4\n");
}

#[test]
fn test_solve_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("square.gr");
    fs::write(&path, SQUARE).unwrap();

    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg(&path)
        .args(["--tie-break", "endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("VALUE 4\n"));
}

#[test]
fn test_predictions_file() {
    let dir = tempdir().unwrap();
    let predictions = dir.path().join("square.pred");
    fs::write(&predictions, "0\n0\n1\n1\n").unwrap();

    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg("--predictions")
        .arg(&predictions)
        .args(["--alpha", "2"])
        .write_stdin(SQUARE)
        .assert()
        .success()
        .stdout("VALUE 4\n1 3\n3 4\n");
}

#[test]
fn test_wrong_prediction_count() {
    let dir = tempdir().unwrap();
    let predictions = dir.path().join("short.pred");
    fs::write(&predictions, "1\n").unwrap();

    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg("--predictions")
        .arg(&predictions)
        .write_stdin(SQUARE)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_malformed_graph() {
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.write_stdin(SQUARE.replace("E 1 3 2", "E 1 3"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 6"));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg(dir.path().join("missing.gr"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg("-v")
        .env_remove("RUST_LOG")
        .write_stdin(SQUARE)
        .assert()
        .success()
        .stdout("VALUE 4\n1 2\n2 4\n")
        .stderr(predicate::str::contains("labelled clusters"));
}

#[test]
fn test_verbose_flag_overrides_rust_log() {
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg("-v")
        .env("RUST_LOG", "error")
        .write_stdin(SQUARE)
        .assert()
        .success()
        .stderr(predicate::str::contains("labelled clusters"));
}

#[test]
fn test_rust_log_applies_without_verbose_flag() {
    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.env("RUST_LOG", "debug")
        .write_stdin(SQUARE)
        .assert()
        .success()
        .stderr(predicate::str::contains("labelled clusters"));
}

#[test]
fn test_verbose_logs_prediction_solve() {
    let dir = tempdir().unwrap();
    let predictions = dir.path().join("square.pred");
    fs::write(&predictions, "0\n0\n1\n1\n").unwrap();

    let mut cmd = cargo_bin_cmd!("steiner-apx");
    cmd.arg("-v")
        .arg("--predictions")
        .arg(&predictions)
        .write_stdin(SQUARE)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "approximated Steiner tree with predictions",
        ))
        .stderr(predicate::str::contains("n_predicted=2"));
}
