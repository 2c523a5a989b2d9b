use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

const SONAR: &str = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n";

fn cmd() -> Command {
    Command::cargo_bin("advent21").unwrap()
}

#[test]
fn solves_from_file() {
    let tmp = TempDir::new().expect("create temp dir");
    let input = tmp.path().join("day01.txt");
    fs::write(&input, SONAR).expect("write input");

    cmd()
        .args(["--day", "1", "--challenge", "1"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Day 1, challenge 1: 7"));
}

#[test]
fn solves_from_stdin() {
    cmd()
        .args(["-d", "1", "-c", "2"])
        .write_stdin(SONAR)
        .assert()
        .success()
        .stdout(contains("Day 1, challenge 2: 5"));
}

#[test]
fn dash_reads_stdin() {
    cmd()
        .args(["-d", "2", "-c", "1", "-"])
        .write_stdin("forward 5\ndown 5\nforward 8\nup 3\ndown 8\nforward 2\n")
        .assert()
        .success()
        .stdout(contains("Day 2, challenge 1: 150"));
}

#[test]
fn multi_line_answer() {
    cmd()
        .args(["-d", "13", "-c", "2"])
        .write_stdin(
            "6,10\n0,14\n9,10\n0,3\n10,4\n4,11\n6,0\n6,12\n4,1\n0,13\n10,12\n3,4\n3,0\n8,4\n1,10\n2,14\n8,10\n9,0\n\nfold along y=7\nfold along x=5\n",
        )
        .assert()
        .success()
        .stdout(contains("#####\n#...#\n#...#\n#...#\n#####"));
}

#[test]
fn rejects_day_out_of_range() {
    cmd()
        .args(["-d", "26", "-c", "1"])
        .write_stdin(SONAR)
        .assert()
        .failure();
}

#[test]
fn rejects_challenge_out_of_range() {
    cmd()
        .args(["-d", "1", "-c", "3"])
        .write_stdin(SONAR)
        .assert()
        .failure();
}

#[test]
fn missing_file_is_reported() {
    let tmp = TempDir::new().expect("create temp dir");
    cmd()
        .args(["-d", "1", "-c", "1"])
        .arg(tmp.path().join("nope.txt"))
        .assert()
        .code(1)
        .stderr(contains("Error:"));
}

#[test]
fn malformed_input_is_reported() {
    cmd()
        .args(["-d", "1", "-c", "1"])
        .write_stdin("12\nfish\n")
        .assert()
        .code(1)
        .stderr(contains("Error: invalid number"));
}
