use serde::Serialize;

/// Aggregate work/wait figures across a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimerStats {
    pub work_seconds: f64,
    pub wait_seconds: f64,
    pub total_seconds: f64,
    pub work_percentage: f64,
    pub wait_percentage: f64,
    pub completed_cycles: usize,
    pub open_cycle: bool,
    pub waiting: bool,
}
