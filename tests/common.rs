#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, Local};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rct() -> Command {
    cargo_bin_cmd!("rcycletimer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcycletimer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB through the CLI (test mode: no config file written)
pub fn init_db(db_path: &str) {
    rct()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run one complete cycle for `task` through the CLI
pub fn run_cycle(db_path: &str, task: &str) {
    for args in [
        vec!["start", task],
        vec!["wait"],
        vec!["resume"],
        vec!["complete"],
    ] {
        let mut full = vec!["--db", db_path];
        full.extend(args);
        rct().args(full).assert().success();
    }
}

/// Fixed reference instant (2025-03-10T08:00:00Z) in local time
pub fn t0() -> DateTime<Local> {
    DateTime::from_timestamp(1_741_593_600, 0)
        .expect("valid timestamp")
        .with_timezone(&Local)
}

pub fn at(secs: i64) -> DateTime<Local> {
    t0() + Duration::seconds(secs)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
