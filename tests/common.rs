#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rcl() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollcall.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize DB schema via the CLI (no config file writes in test mode)
pub fn init_db(db_path: &str) {
    rcl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and seed a long-lived general-category token
pub fn init_db_with_token(db_path: &str, token: &str) {
    init_db(db_path);

    rcl()
        .args([
            "--db",
            db_path,
            "token",
            "add",
            token,
            "--category",
            "general",
            "--expires",
            "2030-01-01T00:00:00+09:00",
        ])
        .assert()
        .success();
}
