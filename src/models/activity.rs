use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueClass {
    ValueAdded,
    NonValueAdded,
}

impl ValueClass {
    pub fn code(&self) -> &'static str {
        match self {
            ValueClass::ValueAdded => "VA",
            ValueClass::NonValueAdded => "NVA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Activity {
    Assembling,
    Welding,
    Installing,
    Reaching,
    Waiting,
    Searching,
}

impl Activity {
    pub const ALL: [Activity; 6] = [
        Activity::Assembling,
        Activity::Welding,
        Activity::Installing,
        Activity::Reaching,
        Activity::Waiting,
        Activity::Searching,
    ];

    pub fn class(&self) -> ValueClass {
        match self {
            Activity::Assembling | Activity::Welding | Activity::Installing => {
                ValueClass::ValueAdded
            }
            Activity::Reaching | Activity::Waiting | Activity::Searching => {
                ValueClass::NonValueAdded
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Assembling => "assembling",
            Activity::Welding => "welding",
            Activity::Installing => "installing",
            Activity::Reaching => "reaching",
            Activity::Waiting => "waiting",
            Activity::Searching => "searching",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Activity::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

/// Label produced by the pose classifier, e.g. `VA: assembling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivityLabel {
    pub activity: Activity,
}

impl ActivityLabel {
    pub fn new(activity: Activity) -> Self {
        Self { activity }
    }

    pub fn class(&self) -> ValueClass {
        self.activity.class()
    }

    pub fn is_value_added(&self) -> bool {
        self.class() == ValueClass::ValueAdded
    }
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class().code(), self.activity.as_str())
    }
}
