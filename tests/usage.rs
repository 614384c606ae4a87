use predicates::prelude::*;

mod common;
use common::cargo_bin;

#[test]
fn missing_argument_prints_usage_and_exits_0() {
    cargo_bin()
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn help_flag_prints_usage_and_exits_0() {
    cargo_bin()
        .arg("--help")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("--tape-size")));
}

#[test]
fn unknown_flag_is_an_error() {
    cargo_bin()
        .arg("--bogus")
        .assert()
        .failure();
}
