use crate::core::timer::{TimerResult, Transition};
use serde::Serialize;

/// `(success, message)` pair handed to whatever renders the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub success: bool,
    pub message: String,
}

impl Feedback {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<&TimerResult<Transition>> for Feedback {
    fn from(result: &TimerResult<Transition>) -> Self {
        match result {
            Ok(t) => Feedback::ok(t.to_string()),
            Err(e) => Feedback::fail(e.to_string()),
        }
    }
}

impl From<TimerResult<Transition>> for Feedback {
    fn from(result: TimerResult<Transition>) -> Self {
        Feedback::from(&result)
    }
}
