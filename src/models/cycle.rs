use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// What an open cycle is accruing right now.
///
/// `Waiting` carries the wait window start; it exists only while waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CycleActivity {
    Working { resumed_at: DateTime<Local> },
    Waiting { wait_start: DateTime<Local> },
}

/// The cycle currently owned by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenCycle {
    pub task_name: String,
    pub start_time: DateTime<Local>,
    pub work_seconds: f64,
    pub wait_seconds: f64,
    pub activity: CycleActivity,
}

impl OpenCycle {
    pub fn new(task_name: String, now: DateTime<Local>) -> Self {
        Self {
            task_name,
            start_time: now,
            work_seconds: 0.0,
            wait_seconds: 0.0,
            activity: CycleActivity::Working { resumed_at: now },
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.activity, CycleActivity::Waiting { .. })
    }
}

/// A closed cycle. Never modified once appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedCycle {
    /// 1-based position in the session log.
    pub seq: u32,
    pub task_name: String,
    pub operator: Option<String>,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub work_seconds: f64,
    pub wait_seconds: f64,
    pub total_seconds: f64,
}

impl CompletedCycle {
    pub fn operator_str(&self) -> &str {
        self.operator.as_deref().unwrap_or("")
    }
}

/// A completed cycle as archived in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub id: i64,
    pub session_start: DateTime<Local>,
    pub cycle: CompletedCycle,
}
