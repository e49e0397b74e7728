use chrono::{DateTime, Local};

/// Seconds from `start` to `end`, clamped at zero when the clock went backwards.
pub fn seconds_between(start: DateTime<Local>, end: DateTime<Local>) -> f64 {
    let delta = end - start;
    let secs = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    };
    secs.max(0.0)
}

/// Share of `part` over `total` as a percentage; 0 when nothing accrued.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
