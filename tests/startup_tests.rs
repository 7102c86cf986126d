use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Runs the binary with `home` as both home and working directory, no stdin.
fn run_well_in(home: &Path, env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_well"));
    command
        .current_dir(home)
        .env_clear()
        .env("HOME", home)
        .stdin(Stdio::null());
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

fn empty_home() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_missing_api_key_fails_before_menu() {
    let home = empty_home();
    let output = run_well_in(home.path(), &[]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("Well API"), "menu was shown: {stdout}");
    assert!(stderr.contains("WELL_API_KEY"), "stderr: {stderr}");
}

#[test]
fn test_end_of_input_exits_successfully() {
    let home = empty_home();
    let output = run_well_in(
        home.path(),
        &[
            ("WELL_API_KEY", "test-key"),
            ("WELL_BASE_URL", "http://127.0.0.1:9/well"),
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Well API"));
    assert!(stdout.contains("Goodbye!"));
}

#[test]
fn test_api_key_from_local_env_file() {
    let home = empty_home();
    fs::create_dir_all(home.path().join(".well")).unwrap();
    fs::write(home.path().join(".well").join(".env"), "WELL_API_KEY=from-file\n").unwrap();

    let output = run_well_in(home.path(), &[("WELL_BASE_URL", "http://127.0.0.1:9/well")]);

    assert!(output.status.success());
}
