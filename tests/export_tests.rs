mod common;
use common::{init_db, rct, run_cycle, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

fn db_with_cycles(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db(&db_path);

    rct()
        .args(["--db", &db_path, "session", "start", "--operator", "Alice"])
        .assert()
        .success();
    run_cycle(&db_path, "Assemble");
    run_cycle(&db_path, "Weld");

    db_path
}

#[test]
fn test_export_csv_all() {
    let db_path = db_with_cycles("export_csv_all");
    let out = temp_out("export_csv_all", "csv");

    rct()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(
            "session_start,seq,task_name,operator,start_time,end_time,work_seconds,wait_seconds,total_seconds"
        )
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains(",1,Assemble,Alice,"));
    assert!(rows[1].contains(",2,Weld,Alice,"));
}

#[test]
fn test_export_json_today_range() {
    let db_path = db_with_cycles("export_json_today");
    let out = temp_out("export_json_today", "json");
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    rct()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", &today,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["task_name"], "Assemble");
    assert_eq!(rows[1]["operator"], "Alice");

    for r in rows {
        let work = r["work_seconds"].as_f64().unwrap();
        let wait = r["wait_seconds"].as_f64().unwrap();
        let total = r["total_seconds"].as_f64().unwrap();
        assert!(work >= 0.0 && wait >= 0.0);
        assert!((work + wait - total).abs() < 0.01);
    }
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = db_with_cycles("export_empty_range");
    let out = temp_out("export_empty_range", "csv");

    rct()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "1999",
        ])
        .assert()
        .success()
        .stdout(contains("No cycles found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = db_with_cycles("export_relative_path");

    rct()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites() {
    let db_path = db_with_cycles("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").unwrap();

    rct()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("session_start,"));
}

#[test]
fn test_export_without_force_keeps_existing_file() {
    let db_path = db_with_cycles("export_no_force");
    let out = temp_out("export_no_force", "csv");
    fs::write(&out, "old").unwrap();

    rct()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("existing file not overwritten"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "old");
}
