#![cfg(unix)]

use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

mod common;
use common::{spawnable_bin, write_tempfile};

fn send_sigint(child: &Child) {
    let status = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .expect("kill");
    assert!(status.success());
}

/// Wait up to `limit` for the child to exit on its own, then collect its output.
fn wait_exited(mut child: Child, limit: Duration) -> Output {
    let started = Instant::now();
    while child.try_wait().unwrap().is_none() {
        if started.elapsed() > limit {
            let _ = child.kill();
            panic!("bf still running {limit:?} after a single SIGINT");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    child.wait_with_output().unwrap()
}

#[test]
fn sigint_during_execution_aborts_with_status_0() {
    let tf = write_tempfile("+[]"); // never terminates on its own

    let child = spawnable_bin()
        .arg(tf.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Give the process time to install its handler and enter the loop.
    std::thread::sleep(Duration::from_millis(300));
    send_sigint(&child);

    let output = wait_exited(child, Duration::from_secs(2));
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("aborted"), "stderr: {stderr}");
}

#[test]
fn one_sigint_aborts_a_program_waiting_for_input() {
    // Prints 'A', then blocks on ',' because stdin stays open.
    let tf = write_tempfile("+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++.,.");

    let mut child = spawnable_bin()
        .arg(tf.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Keep the write end open for the whole test so the read never sees EOF.
    let stdin = child.stdin.take().unwrap();

    std::thread::sleep(Duration::from_millis(300));
    send_sigint(&child);

    let output = wait_exited(child, Duration::from_secs(2));
    drop(stdin);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"A", "output written before the read must survive");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("aborted"), "stderr: {stderr}");
}
