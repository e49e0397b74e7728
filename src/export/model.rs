// src/export/model.rs

use crate::models::cycle::CycleRecord;
use serde::Serialize;

/// Flat row for CSV / JSON export of archived cycles.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CycleExport {
    pub session_start: String,
    pub seq: u32,
    pub task_name: String,
    pub operator: String,
    pub start_time: String,
    pub end_time: String,
    pub work_seconds: f64,
    pub wait_seconds: f64,
    pub total_seconds: f64,
}

impl From<&CycleRecord> for CycleExport {
    fn from(r: &CycleRecord) -> Self {
        let c = &r.cycle;
        Self {
            session_start: r.session_start.to_rfc3339(),
            seq: c.seq,
            task_name: c.task_name.clone(),
            operator: c.operator_str().to_string(),
            start_time: c.start_time.to_rfc3339(),
            end_time: c.end_time.to_rfc3339(),
            work_seconds: round3(c.work_seconds),
            wait_seconds: round3(c.wait_seconds),
            total_seconds: round3(c.total_seconds),
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
