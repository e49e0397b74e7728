//! Work/wait cycle timer.
//!
//! `CycleTimer` owns the session state, the cycle in progress and the log of
//! completed cycles. It performs no I/O: callers load it, apply one command
//! and persist it again. Every command has an `*_at` variant taking the
//! timestamp explicitly; the plain variant reads the wall clock.

use crate::core::calculator::elapsed::{percentage, seconds_between};
use crate::models::cycle::{CompletedCycle, CycleActivity, OpenCycle};
use crate::models::session::SessionState;
use crate::models::stats::TimerStats;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Precondition violations. None of them is fatal and none mutates the timer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("No active session. Start a session first.")]
    NoActiveSession,

    #[error("A session is already active.")]
    SessionAlreadyActive,

    #[error("The session has ended. Start a new session.")]
    SessionEnded,

    #[error("Task name cannot be empty.")]
    EmptyTaskName,

    #[error("Task '{task}' is still running. Complete it before starting another one.")]
    CycleAlreadyOpen { task: String },

    #[error("No task is running.")]
    NoOpenCycle,

    #[error("Already waiting.")]
    AlreadyWaiting,

    #[error("Not waiting.")]
    NotWaiting,
}

pub type TimerResult<T> = Result<T, TimerError>;

/// Successful state change, displayed as the operator message.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SessionStarted {
        at: DateTime<Local>,
    },
    TaskStarted {
        task: String,
    },
    WaitStarted {
        task: String,
        worked: f64,
    },
    Resumed {
        task: String,
        waited: f64,
    },
    CycleCompleted(CompletedCycle),
    SessionEnded {
        closed: Option<CompletedCycle>,
        cycles: usize,
    },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::SessionStarted { at } => {
                write!(f, "Session started at {}", at.format("%Y-%m-%d %H:%M:%S"))
            }
            Transition::TaskStarted { task } => write!(f, "Started task '{task}'"),
            Transition::WaitStarted { task, worked } => {
                write!(f, "Waiting on '{task}' (worked {worked:.1}s so far)")
            }
            Transition::Resumed { task, waited } => {
                write!(f, "Resumed '{task}' (waited {waited:.1}s so far)")
            }
            Transition::CycleCompleted(c) => write!(
                f,
                "Completed '{}': work {:.1}s, wait {:.1}s, total {:.1}s",
                c.task_name, c.work_seconds, c.wait_seconds, c.total_seconds
            ),
            Transition::SessionEnded { closed, cycles } => {
                write!(f, "Session ended with {cycles} completed cycle(s)")?;
                if let Some(c) = closed {
                    write!(f, " ('{}' was closed automatically)", c.task_name)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleTimer {
    operator: Option<String>,
    session: SessionState,
    current: Option<OpenCycle>,
    completed: Vec<CompletedCycle>,
}

impl CycleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operator(operator: impl Into<String>) -> Self {
        let mut timer = Self::new();
        timer.set_operator(operator);
        timer
    }

    /// Operator stamped on cycles as they close. Blank clears it.
    pub fn set_operator(&mut self, operator: impl Into<String>) {
        let name = operator.into();
        let name = name.trim();
        self.operator = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current(&self) -> Option<&OpenCycle> {
        self.current.as_ref()
    }

    pub fn completed(&self) -> &[CompletedCycle] {
        &self.completed
    }

    pub fn is_waiting(&self) -> bool {
        self.current.as_ref().is_some_and(OpenCycle::is_waiting)
    }

    // ---------------------------
    // Commands (wall clock)
    // ---------------------------

    pub fn start_session(&mut self) -> TimerResult<Transition> {
        self.start_session_at(Local::now())
    }

    pub fn start_timer(&mut self, task_name: &str) -> TimerResult<Transition> {
        self.start_timer_at(task_name, Local::now())
    }

    pub fn start_waiting(&mut self) -> TimerResult<Transition> {
        self.start_waiting_at(Local::now())
    }

    pub fn resume_timer(&mut self) -> TimerResult<Transition> {
        self.resume_timer_at(Local::now())
    }

    pub fn complete_cycle(&mut self) -> TimerResult<Transition> {
        self.complete_cycle_at(Local::now())
    }

    pub fn end_session(&mut self) -> TimerResult<Transition> {
        self.end_session_at(Local::now())
    }

    pub fn stats(&self) -> TimerStats {
        self.stats_at(Local::now())
    }

    // ---------------------------
    // Commands (explicit time)
    // ---------------------------

    pub fn start_session_at(&mut self, now: DateTime<Local>) -> TimerResult<Transition> {
        match self.session {
            SessionState::NotStarted => {
                self.session = SessionState::Active { start_time: now };
                Ok(Transition::SessionStarted { at: now })
            }
            SessionState::Active { .. } => Err(TimerError::SessionAlreadyActive),
            SessionState::Ended { .. } => Err(TimerError::SessionEnded),
        }
    }

    pub fn start_timer_at(
        &mut self,
        task_name: &str,
        now: DateTime<Local>,
    ) -> TimerResult<Transition> {
        self.ensure_active()?;

        let task = task_name.trim();
        if task.is_empty() {
            return Err(TimerError::EmptyTaskName);
        }

        if let Some(open) = &self.current {
            return Err(TimerError::CycleAlreadyOpen {
                task: open.task_name.clone(),
            });
        }

        self.current = Some(OpenCycle::new(task.to_string(), now));
        Ok(Transition::TaskStarted {
            task: task.to_string(),
        })
    }

    pub fn start_waiting_at(&mut self, now: DateTime<Local>) -> TimerResult<Transition> {
        self.ensure_active()?;
        let open = self.current.as_mut().ok_or(TimerError::NoOpenCycle)?;

        let CycleActivity::Working { resumed_at } = open.activity else {
            return Err(TimerError::AlreadyWaiting);
        };

        open.work_seconds += seconds_between(resumed_at, now);
        open.activity = CycleActivity::Waiting { wait_start: now };

        Ok(Transition::WaitStarted {
            task: open.task_name.clone(),
            worked: open.work_seconds,
        })
    }

    pub fn resume_timer_at(&mut self, now: DateTime<Local>) -> TimerResult<Transition> {
        self.ensure_active()?;
        let open = self.current.as_mut().ok_or(TimerError::NoOpenCycle)?;

        let CycleActivity::Waiting { wait_start } = open.activity else {
            return Err(TimerError::NotWaiting);
        };

        open.wait_seconds += seconds_between(wait_start, now);
        open.activity = CycleActivity::Working { resumed_at: now };

        Ok(Transition::Resumed {
            task: open.task_name.clone(),
            waited: open.wait_seconds,
        })
    }

    pub fn complete_cycle_at(&mut self, now: DateTime<Local>) -> TimerResult<Transition> {
        self.ensure_active()?;
        let closed = self.close_current(now).ok_or(TimerError::NoOpenCycle)?;
        Ok(Transition::CycleCompleted(closed))
    }

    /// Ends the session, closing the open cycle (if any) first.
    pub fn end_session_at(&mut self, now: DateTime<Local>) -> TimerResult<Transition> {
        let start_time = match self.session {
            SessionState::Active { start_time } => start_time,
            SessionState::NotStarted => return Err(TimerError::NoActiveSession),
            SessionState::Ended { .. } => return Err(TimerError::SessionEnded),
        };

        let closed = self.close_current(now);
        self.session = SessionState::Ended {
            start_time,
            end_time: now,
        };

        Ok(Transition::SessionEnded {
            closed,
            cycles: self.completed.len(),
        })
    }

    /// Totals over completed cycles plus the live share of the open one.
    /// Never touches stored state.
    pub fn stats_at(&self, now: DateTime<Local>) -> TimerStats {
        let mut work: f64 = self.completed.iter().map(|c| c.work_seconds).sum();
        let mut wait: f64 = self.completed.iter().map(|c| c.wait_seconds).sum();

        if let Some(open) = &self.current {
            let (live_work, live_wait) = live_totals(open, now);
            work += live_work;
            wait += live_wait;
        }

        let total = work + wait;

        TimerStats {
            work_seconds: work,
            wait_seconds: wait,
            total_seconds: total,
            work_percentage: percentage(work, total),
            wait_percentage: percentage(wait, total),
            completed_cycles: self.completed.len(),
            open_cycle: self.current.is_some(),
            waiting: self.is_waiting(),
        }
    }

    fn ensure_active(&self) -> TimerResult<()> {
        match self.session {
            SessionState::Active { .. } => Ok(()),
            SessionState::NotStarted => Err(TimerError::NoActiveSession),
            SessionState::Ended { .. } => Err(TimerError::SessionEnded),
        }
    }

    fn close_current(&mut self, now: DateTime<Local>) -> Option<CompletedCycle> {
        let open = self.current.take()?;
        let (work_seconds, wait_seconds) = live_totals(&open, now);

        // clamped intervals can outgrow a backwards-running wall clock
        let total_seconds = seconds_between(open.start_time, now).max(work_seconds + wait_seconds);

        let closed = CompletedCycle {
            seq: self.completed.len() as u32 + 1,
            task_name: open.task_name,
            operator: self.operator.clone(),
            start_time: open.start_time,
            end_time: now,
            work_seconds,
            wait_seconds,
            total_seconds,
        };

        self.completed.push(closed.clone());
        Some(closed)
    }
}

/// Work and wait of an open cycle including the bucket accruing at `now`.
fn live_totals(open: &OpenCycle, now: DateTime<Local>) -> (f64, f64) {
    match open.activity {
        CycleActivity::Working { resumed_at } => (
            open.work_seconds + seconds_between(resumed_at, now),
            open.wait_seconds,
        ),
        CycleActivity::Waiting { wait_start } => (
            open.work_seconds,
            open.wait_seconds + seconds_between(wait_start, now),
        ),
    }
}
