use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Lifecycle of a timer session.
///
/// `Ended` is terminal: a new session needs a new timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    NotStarted,
    Active {
        start_time: DateTime<Local>,
    },
    Ended {
        start_time: DateTime<Local>,
        end_time: DateTime<Local>,
    },
}

impl SessionState {
    pub fn start_time(&self) -> Option<DateTime<Local>> {
        match self {
            SessionState::NotStarted => None,
            SessionState::Active { start_time } | SessionState::Ended { start_time, .. } => {
                Some(*start_time)
            }
        }
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        match self {
            SessionState::Ended { end_time, .. } => Some(*end_time),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, SessionState::Ended { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::Active { .. } => "active",
            SessionState::Ended { .. } => "ended",
        }
    }
}
