mod common;
use common::{init_db, rct, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

/// 33 landmarks per frame, right wrist raised above the left shoulder or not.
fn frame_json(raised: bool) -> String {
    let wrist_y = if raised { 0.2 } else { 0.7 };
    let points: Vec<String> = (0..33)
        .map(|i| match i {
            11 => "[0.6, 0.4, 0.0]".to_string(),
            16 => format!("[0.3, {wrist_y}, 0.0]"),
            _ => "[0.5, 0.5, 0.0]".to_string(),
        })
        .collect();
    format!("[{}]", points.join(","))
}

fn write_recording(name: &str, pattern: &[bool]) -> String {
    let path = temp_out(name, "json");
    let frames: Vec<String> = pattern.iter().map(|r| frame_json(*r)).collect();
    fs::write(&path, format!("[{}]", frames.join(","))).unwrap();
    path
}

#[test]
fn test_classify_recording_report() {
    let db_path = setup_test_db("classify_report");
    init_db(&db_path);
    let input = write_recording("classify_report", &[true, true, true, false]);

    rct()
        .args([
            "--db", &db_path, "classify", "--input", &input, "--fps", "1", "--window", "1",
            "--frames",
        ])
        .assert()
        .success()
        .stdout(contains("Window: 1"))
        .stdout(contains("VA: assembling"))
        .stdout(contains("NVA: reaching"))
        .stdout(contains("Value-Added Time: 3.00s (75.0%)"))
        .stdout(contains("Non-Value-Added Time: 1.00s (25.0%)"));
}

#[test]
fn test_classify_rejects_malformed_input() {
    let db_path = setup_test_db("classify_malformed");
    init_db(&db_path);
    let input = temp_out("classify_malformed", "json");
    fs::write(&input, "[[[0.1, 0.2, 0.3]]]").unwrap();

    rct()
        .args(["--db", &db_path, "classify", "--input", &input])
        .assert()
        .failure()
        .stderr(contains("Invalid landmarks"));
}
