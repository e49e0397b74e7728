use crate::core::classifier::{ActivityReport, ActivityTracker, PoseClassifier};
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityLabel;
use crate::models::landmark::Frame;
use std::fs;
use std::path::Path;

/// Result of running the classifier over a recorded landmark sequence.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub frames: usize,
    /// Effective smoothing window, in frames.
    pub window: usize,
    pub duration_seconds: f64,
    pub labels: Vec<ActivityLabel>,
    pub breakdown: Vec<(ActivityLabel, f64)>,
    pub report: ActivityReport,
}

pub struct AnalysisLogic;

impl AnalysisLogic {
    /// Read frames from a JSON file: `[[[x, y, z], ...], ...]`.
    pub fn load_frames(path: &Path) -> AppResult<Vec<Frame>> {
        let content = fs::read_to_string(path)?;
        let frames: Vec<Frame> = serde_json::from_str(&content)
            .map_err(|e| AppError::InvalidLandmarks(format!("{}: {}", path.display(), e)))?;
        Ok(frames)
    }

    /// Classify every frame, frame `i` being observed at `i / fps` seconds.
    /// The last frame lasts one frame interval.
    pub fn analyze(frames: &[Frame], fps: f64, window: usize) -> AppResult<AnalysisSummary> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(AppError::InvalidLandmarks(format!(
                "frame rate must be positive, got {fps}"
            )));
        }

        let mut classifier = PoseClassifier::new(window);
        let mut tracker = ActivityTracker::new();
        let mut labels = Vec::with_capacity(frames.len());

        for (i, frame) in frames.iter().enumerate() {
            let label = classifier.classify(frame).map_err(|e| match e {
                AppError::InvalidLandmarks(msg) => {
                    AppError::InvalidLandmarks(format!("frame {}: {}", i, msg))
                }
                other => other,
            })?;
            tracker.update(label, i as f64 / fps);
            labels.push(label);
        }

        let duration_seconds = frames.len() as f64 / fps;
        tracker.finish(duration_seconds);

        Ok(AnalysisSummary {
            frames: frames.len(),
            window: classifier.window(),
            duration_seconds,
            labels,
            breakdown: tracker.breakdown(),
            report: tracker.report(),
        })
    }
}
