use serial_test::serial;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_hashslot");
const TEST_STORAGE: &str = "test_cli_catalog.dat";
const TEST_TARGET: &str = "test_cli_catalog_copy.dat";

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .arg(TEST_STORAGE)
        .args(args)
        .env("FORCE_NO_TTY", "1")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute process")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn cleanup() {
    fs::remove_file(TEST_STORAGE).ok();
    fs::remove_file(TEST_TARGET).ok();
}

#[test]
#[serial]
fn test_create_insert_and_read() {
    cleanup();

    let output = run(&["create", "--slots", "7"]);
    assert!(output.status.success(), "Create failed: {:?}", output);
    assert_eq!(fs::metadata(TEST_STORAGE).unwrap().len(), 8 + 7 * 256);

    let output = run(&["insert", "1", "hammer | 12.50 | 40"]);
    assert!(output.status.success(), "Insert failed: {:?}", output);
    assert!(stdout(&output).contains("at slot 1"));

    let output = run(&["insert", "8", "saw | 20.00 | 5"]);
    assert!(stdout(&output).contains("at slot 2"), "{:?}", output);

    let output = run(&["read", "8"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "saw | 20.00 | 5");

    cleanup();
}

#[test]
#[serial]
fn test_create_refuses_to_overwrite_without_force() {
    cleanup();

    assert!(run(&["create"]).status.success());

    let output = run(&["create", "--slots", "11"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));

    let output = run(&["create", "--slots", "11", "--force"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(fs::metadata(TEST_STORAGE).unwrap().len(), 8 + 11 * 256);

    cleanup();
}

#[test]
#[serial]
fn test_create_rejects_zero_slots_before_touching_disk() {
    cleanup();

    let output = run(&["create", "--slots", "0"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid value"), "{:?}", output);
    assert!(!stderr(&output).contains("not prime"));
    assert!(!std::path::Path::new(TEST_STORAGE).exists());

    let output = run(&["create", "--slots", "2147483648"]);
    assert!(!output.status.success());
    assert!(!std::path::Path::new(TEST_STORAGE).exists());

    cleanup();
}

#[test]
#[serial]
fn test_create_with_rows_then_list() {
    cleanup();

    let output = run(&[
        "create",
        "--slots",
        "7",
        "--row",
        "8=saw",
        "--row",
        "1=hammer",
        "--row",
        "1=duplicate",
    ]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("Rows inserted: 2, rejected: 1"));

    let output = run(&["list", "--json"]);
    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["slot"], 1);
    assert_eq!(records[1]["id"], 8);
    assert_eq!(records[1]["content"], "saw");
    assert_eq!(records[1]["slot"], 2);

    let output = run(&["list"]);
    assert!(stdout(&output).contains("2 record(s)"));

    cleanup();
}

#[test]
#[serial]
fn test_insert_from_stdin() {
    cleanup();
    assert!(run(&["create", "--slots", "7"]).status.success());

    let mut child = Command::new(BIN)
        .args([TEST_STORAGE, "insert", "22"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute process");

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(b"wrench | 7.25 | 18\n")
            .expect("Failed to write to stdin");
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{:?}", output);

    assert_eq!(stdout(&run(&["read", "22"])).trim(), "wrench | 7.25 | 18");

    cleanup();
}

#[test]
#[serial]
fn test_insert_without_value() {
    cleanup();
    assert!(run(&["create", "--slots", "7"]).status.success());

    let output = run(&["insert", "3"]);
    assert!(!output.status.success(), "Expected failure on missing value");
    assert!(
        stderr(&output).contains("No value provided"),
        "Unexpected error message: {:?}",
        stderr(&output)
    );

    cleanup();
}

#[test]
#[serial]
fn test_duplicate_update_save_and_delete() {
    cleanup();
    assert!(run(&["create", "--slots", "7"]).status.success());
    assert!(run(&["insert", "5", "first"]).status.success());

    let output = run(&["insert", "5", "second"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("item 5 already exists"));

    assert!(run(&["update", "5", "changed"]).status.success());
    assert_eq!(stdout(&run(&["read", "5"])).trim(), "changed");

    let output = run(&["update", "6", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("item 6 not found"));

    assert!(stdout(&run(&["save", "6", "new"])).contains("Inserted id 6"));
    assert!(stdout(&run(&["save", "6", "newer"])).contains("Updated id 6"));

    let output = run(&["delete", "5"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("tombstone"));

    let output = run(&["read", "5"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("item 5 not found"));

    for id in ["-5", "0"] {
        let output = run(&["read", id]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("invalid value"), "{:?}", output);

        let output = run(&["save", id, "never stored"]);
        assert!(!output.status.success());
    }
    assert!(stdout(&run(&["list"])).contains("1 record(s)"));

    cleanup();
}

#[test]
#[serial]
fn test_info_reports_occupancy() {
    cleanup();
    assert!(run(&["create", "--slots", "7"]).status.success());
    assert!(run(&["insert", "1", "a"]).status.success());
    assert!(run(&["insert", "8", "b"]).status.success());
    assert!(run(&["delete", "1"]).status.success());

    let output = run(&["info", "--json"]);
    assert!(output.status.success(), "{:?}", output);
    let props: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(props["total_slots"], 7);
    assert_eq!(props["occupied"], 1);
    assert_eq!(props["deleted"], 1);
    assert_eq!(props["empty"], 5);

    let output = run(&["info"]);
    let text = stdout(&output);
    assert!(text.contains("HASH FILE INFO"));
    assert!(text.contains("14.3%"), "{text}");

    cleanup();
}

#[test]
#[serial]
fn test_open_invalid_file_fails() {
    cleanup();
    fs::write(TEST_STORAGE, b"not a table").unwrap();

    let output = run(&["read", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to open storage"));

    let output = run(&["copy", TEST_TARGET]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not a valid hash file"));

    cleanup();
}

#[test]
#[serial]
fn test_copy_move_and_remove_file() {
    cleanup();
    assert!(run(&["create", "--slots", "7"]).status.success());
    assert!(run(&["insert", "3", "kept"]).status.success());

    assert!(run(&["copy", TEST_TARGET]).status.success());
    assert_eq!(fs::read(TEST_STORAGE).unwrap(), fs::read(TEST_TARGET).unwrap());

    fs::remove_file(TEST_STORAGE).unwrap();
    let output = Command::new(BIN)
        .args([TEST_TARGET, "move", TEST_STORAGE])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    assert!(!std::path::Path::new(TEST_TARGET).exists());
    assert_eq!(stdout(&run(&["read", "3"])).trim(), "kept");

    assert!(run(&["remove"]).status.success());
    assert!(!std::path::Path::new(TEST_STORAGE).exists());

    cleanup();
}
