// Exercises the ',' (input) instruction by feeding bytes on stdin.

mod common;
use common::{cargo_bin, write_tempfile};

#[test]
fn reads_from_stdin_and_echoes_byte() {
    let tf = write_tempfile(",.");
    cargo_bin()
        .arg(tf.path())
        .write_stdin("Z")
        .assert()
        .success()
        .stdout("Z");
}

#[test]
fn cat_program_copies_stdin_until_eof() {
    // On EOF the cell keeps its last value, so clear it before the next read.
    let tf = write_tempfile(",[.[-],]");
    cargo_bin()
        .arg(tf.path())
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn eof_leaves_cell_unchanged() {
    // 'A' then an input at EOF; the cell must still print 'A'.
    let tf = write_tempfile("+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++,.");
    cargo_bin()
        .arg(tf.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout("A");
}
