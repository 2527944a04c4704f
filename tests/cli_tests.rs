//! Integration tests for the `splitwiser` binary: flags, prompts on stdin,
//! report output and exit codes.

// `Command::cargo_bin` is deprecated in newer assert_cmd releases.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn splitwiser() -> Command {
    let mut cmd = Command::cargo_bin("splitwiser").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn equal_split_from_flags() {
    splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "2"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal=100.00 Tax=10.00 Common=100.00"))
        .stdout(predicate::str::contains("Person 1: amount=50.00 total=55.00"))
        .stdout(predicate::str::contains("Person 2: amount=50.00 total=55.00"));
}

#[test]
fn individual_items_from_flags() {
    splitwiser()
        .args([
            "--total", "110", "--subtotal", "100", "--people", "2", "--individual", "--items",
            "30", "--items", "20",
        ])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Person 1: amount=55.00 total=60.50"))
        .stdout(predicate::str::contains("Person 2: amount=45.00 total=49.50"))
        .stdout(predicate::str::contains("Sum of totals=110.00"));
}

#[test]
fn individual_items_from_prompts() {
    splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "2", "-i"])
        .write_stdin("10 20\n20\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Enter individual item prices separated by space for person 2:",
        ))
        .stdout(predicate::str::contains("Person 1: amount=55.00 total=60.50"));
}

#[test]
fn excluded_items_go_to_the_other_person() {
    splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "2", "-e"])
        .write_stdin("10\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter items to exclude from person 1:"))
        .stdout(predicate::str::contains("Person 1: amount=45.00"))
        .stdout(predicate::str::contains("Person 2: amount=55.00"));
}

#[test]
fn missing_values_are_prompted() {
    splitwiser()
        .write_stdin("110\n100\n2\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter the total amount of the bill:"))
        .stdout(predicate::str::contains("total=55.00"));
}

#[test]
fn json_output() {
    let output = splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "2", "--json"])
        .write_stdin("")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["totalCommon"], 100.0);
    assert_eq!(value["people"].as_array().map(Vec::len), Some(2));
}

#[test]
fn zero_subtotal_fails_with_division_by_zero() {
    splitwiser()
        .args(["-t", "110", "-s", "0", "-p", "2"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("division by zero"))
        .stderr(predicate::str::contains("inf").not())
        .stderr(predicate::str::contains("NaN").not());
}

#[test]
fn bad_price_token_fails_with_parse_error() {
    splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "2", "-i"])
        .write_stdin("30 abc\n20\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not parse 'abc'"));
}

#[test]
fn single_person_exclusion_fails() {
    splitwiser()
        .args(["-t", "11", "-s", "10", "-p", "1", "-e", "--excluded-items", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody else to share it with"));
}

#[test]
fn missing_total_without_input_is_configuration_error() {
    splitwiser()
        .args(["-s", "100", "-p", "2"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("total is required"));
}

#[test]
fn item_flag_count_must_match_people() {
    splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "3", "-i", "--items", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--items was given 1 times"));
}

#[test]
fn help_lists_serve_subcommand() {
    splitwiser()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("--total"));
}

#[test]
fn serve_rejects_out_of_range_port() {
    splitwiser()
        .args(["serve", "80800"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("80800"));
}

#[test]
fn huge_people_count_fails_without_panicking() {
    splitwiser()
        .args(["-t", "110", "-s", "100", "-p", "18446744073709551615"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("--people"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn unknown_flag_exits_with_one() {
    splitwiser()
        .args(["--bogus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}
