use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.timeout(Duration::from_secs(5))
        .env("BF_CONFIG", "/nonexistent/bf.toml")
        .env("BF_COLOR", "never")
        .env_remove("BF_QUIET")
        .env_remove("BF_TRACE");
    cmd
}

fn program_file(code: &[u8]) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    tf.write_all(code).unwrap();
    tf
}

#[test]
fn outputs_raw_cell_value() {
    let tf = program_file(b"++.");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::eq(&[2u8][..]))
        .stderr(
            predicate::str::contains("loaded program, size: 3")
                .and(predicate::str::contains("running, press ctrl+c to abort"))
                .and(predicate::str::contains("done, took:")),
        );
}

#[test]
fn loop_clears_cell_and_exits_cleanly() {
    let tf = program_file(b"+[-]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn lone_close_bracket_is_noop() {
    let tf = program_file(b"]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(0)
        .stderr(predicate::str::contains("unmatched").not());
}

#[test]
fn lone_open_bracket_is_unmatched() {
    let tf = program_file(b"[");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: unmatched [").and(predicate::str::contains("done").not()));
}

#[test]
fn unmatched_close_with_nonzero_cell() {
    let tf = program_file(b"+]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: unmatched ]"));
}

#[test]
fn running_off_the_tape_fails() {
    let tf = program_file(">".repeat(30_001).as_bytes());
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: data pointer out of bounds (ip=29999"));
}

#[test]
fn moving_left_of_first_cell_fails() {
    let tf = program_file(b"<");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("data pointer out of bounds"));
}

#[test]
fn output_before_error_is_kept() {
    let tf = program_file(b"+++.<");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stdout(predicate::eq(&[3u8][..]));
}

#[test]
fn inert_and_non_utf8_bytes_are_ignored() {
    let tf = program_file(&[0xff, 0xfe, b'+', b'\n', b'a', b'.', 0x00]);
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::eq(&[1u8][..]))
        .stderr(predicate::str::contains("loaded program, size: 7"));
}

#[test]
fn hello_world() {
    let tf = program_file(b"++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("Hello World!\n");
}
