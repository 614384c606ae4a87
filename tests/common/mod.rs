#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

/// Config file path that never exists, so the caller's bf.toml is not read.
fn missing_config() -> PathBuf {
    std::env::temp_dir().join("tapeworm-tests-no-such-dir").join("bf.toml")
}

/// The `bf` binary with the caller's configuration cleared.
pub fn cargo_bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("bf").unwrap();
    cmd.env_remove("BF_TAPE_SIZE")
        .env_remove("BF_QUIET")
        .env("BF_CONFIG", missing_config());
    cmd
}

/// Same isolation for tests that need a spawned child process.
pub fn spawnable_bin() -> std::process::Command {
    use assert_cmd::cargo::CommandCargoExt;

    let mut cmd = std::process::Command::cargo_bin("bf").unwrap();
    cmd.env_remove("BF_TAPE_SIZE")
        .env_remove("BF_QUIET")
        .env("BF_CONFIG", missing_config());
    cmd
}

pub fn write_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}
