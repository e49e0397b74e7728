//! Pose based VA / NVA classification.
//!
//! Fixed-threshold rule on pose landmarks, smoothed by a short moving
//! average, plus a tracker that turns the label stream into VA/NVA time.

use crate::core::calculator::elapsed::percentage;
use crate::errors::{AppError, AppResult};
use crate::models::activity::{Activity, ActivityLabel, ValueClass};
use crate::models::landmark::{LEFT_SHOULDER, Landmark, RIGHT_WRIST};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_WINDOW: usize = 5;

/// Vertical offset of the right wrist from the left shoulder.
/// Negative means the hand is raised above the shoulder.
pub fn wrist_offset(landmarks: &[Landmark]) -> AppResult<f32> {
    if landmarks.len() <= RIGHT_WRIST.max(LEFT_SHOULDER) {
        return Err(AppError::InvalidLandmarks(format!(
            "expected at least {} landmarks, got {}",
            RIGHT_WRIST.max(LEFT_SHOULDER) + 1,
            landmarks.len()
        )));
    }
    Ok(landmarks[RIGHT_WRIST].y - landmarks[LEFT_SHOULDER].y)
}

fn label_for_offset(offset: f32) -> ActivityLabel {
    if offset < 0.0 {
        ActivityLabel::new(Activity::Assembling)
    } else {
        ActivityLabel::new(Activity::Reaching)
    }
}

/// Single-frame rule: hand above the shoulder is productive motion.
pub fn classify_landmarks(landmarks: &[Landmark]) -> AppResult<ActivityLabel> {
    wrist_offset(landmarks).map(label_for_offset)
}

/// Applies the rule to the moving average of the last `window` offsets.
#[derive(Debug, Clone)]
pub struct PoseClassifier {
    window: usize,
    offsets: VecDeque<f32>,
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl PoseClassifier {
    /// A window of 0 is treated as 1 (no smoothing).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            offsets: VecDeque::with_capacity(window),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn classify(&mut self, landmarks: &[Landmark]) -> AppResult<ActivityLabel> {
        let offset = wrist_offset(landmarks)?;

        if self.offsets.len() == self.window {
            self.offsets.pop_front();
        }
        self.offsets.push_back(offset);

        let avg = self.offsets.iter().sum::<f32>() / self.offsets.len() as f32;
        Ok(label_for_offset(avg))
    }

    pub fn reset(&mut self) {
        self.offsets.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityReport {
    pub value_added_seconds: f64,
    pub non_value_added_seconds: f64,
    pub value_added_percentage: f64,
    pub non_value_added_percentage: f64,
}

/// Accumulates time per label. Elapsed time between two label changes is
/// credited to the label that was active during it.
#[derive(Debug, Clone, Default)]
pub struct ActivityTracker {
    current: Option<(ActivityLabel, f64)>,
    per_label: HashMap<ActivityLabel, f64>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the label observed at `t` seconds. Timestamps must not go backwards.
    pub fn update(&mut self, label: ActivityLabel, t: f64) {
        match self.current {
            Some((prev, _)) if prev == label => {}
            Some((prev, since)) => {
                *self.per_label.entry(prev).or_default() += (t - since).max(0.0);
                self.current = Some((label, t));
            }
            None => self.current = Some((label, t)),
        }
    }

    /// Credit the running label up to `t`.
    pub fn finish(&mut self, t: f64) {
        if let Some((prev, since)) = self.current.take() {
            *self.per_label.entry(prev).or_default() += (t - since).max(0.0);
        }
    }

    pub fn current(&self) -> Option<ActivityLabel> {
        self.current.map(|(label, _)| label)
    }

    pub fn seconds_for(&self, label: ActivityLabel) -> f64 {
        self.per_label.get(&label).copied().unwrap_or(0.0)
    }

    /// Per-label totals, sorted by label text.
    pub fn breakdown(&self) -> Vec<(ActivityLabel, f64)> {
        let mut rows: Vec<_> = self.per_label.iter().map(|(l, s)| (*l, *s)).collect();
        rows.sort_by_key(|(l, _)| l.to_string());
        rows
    }

    pub fn report(&self) -> ActivityReport {
        let mut va = 0.0;
        let mut nva = 0.0;
        for (label, secs) in &self.per_label {
            match label.class() {
                ValueClass::ValueAdded => va += secs,
                ValueClass::NonValueAdded => nva += secs,
            }
        }
        let total = va + nva;

        ActivityReport {
            value_added_seconds: va,
            non_value_added_seconds: nva,
            value_added_percentage: percentage(va, total),
            non_value_added_percentage: percentage(nva, total),
        }
    }
}
