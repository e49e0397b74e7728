/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Work share colour:
/// ≥ 85% → green
/// ≥ 60% → yellow
/// otherwise red, grey when nothing accrued
pub fn color_for_work_share(percentage: f64, total_seconds: f64) -> &'static str {
    if total_seconds <= 0.0 {
        GREY
    } else if percentage >= 85.0 {
        GREEN
    } else if percentage >= 60.0 {
        YELLOW
    } else {
        RED
    }
}

/// Greys out empty values, e.g. a missing operator.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
