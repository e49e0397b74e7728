use crate::core::timer::{CycleTimer, TimerResult, Transition};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{archive_cycles, load_timer, save_timer};
use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::{DateTime, Local};

/// One operator command against the persisted timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    StartSession { operator: Option<String> },
    StartTask(String),
    Wait,
    Resume,
    Complete,
    EndSession,
}

impl TimerCommand {
    /// Operation name written to the internal log.
    pub fn operation(&self) -> &'static str {
        match self {
            TimerCommand::StartSession { .. } => "session_start",
            TimerCommand::StartTask(_) => "start",
            TimerCommand::Wait => "wait",
            TimerCommand::Resume => "resume",
            TimerCommand::Complete => "complete",
            TimerCommand::EndSession => "session_end",
        }
    }
}

/// Loads the timer from the database, applies a command and stores it back.
pub struct SessionLogic;

impl SessionLogic {
    pub fn apply(pool: &mut DbPool, cmd: &TimerCommand) -> AppResult<Transition> {
        Self::apply_at(pool, cmd, Local::now())
    }

    /// Rejected commands are returned as `AppError::Timer` and nothing is saved.
    pub fn apply_at(
        pool: &mut DbPool,
        cmd: &TimerCommand,
        now: DateTime<Local>,
    ) -> AppResult<Transition> {
        let mut timer = load_timer(&pool.conn)?;

        let transition = Self::run(&mut timer, cmd, now)?;

        let tx = pool.conn.unchecked_transaction()?;
        save_timer(&tx, &timer)?;
        if let Some(session_start) = timer.session().start_time() {
            archive_cycles(&tx, session_start, timer.completed())?;
        }
        tx.commit()?;

        let target = timer
            .current()
            .map(|c| c.task_name.clone())
            .or_else(|| timer.completed().last().map(|c| c.task_name.clone()))
            .unwrap_or_default();

        if let Err(e) = ttlog(&pool.conn, cmd.operation(), &target, &transition.to_string()) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(transition)
    }

    /// Current persisted timer, untouched.
    pub fn load(pool: &DbPool) -> AppResult<CycleTimer> {
        load_timer(&pool.conn)
    }

    fn run(
        timer: &mut CycleTimer,
        cmd: &TimerCommand,
        now: DateTime<Local>,
    ) -> TimerResult<Transition> {
        match cmd {
            TimerCommand::StartSession { operator } => {
                if timer.session().is_ended() {
                    // the operator carries over to the next session
                    let previous = timer.operator().map(str::to_string);
                    *timer = CycleTimer::new();
                    if let Some(name) = previous {
                        timer.set_operator(name);
                    }
                }
                if !timer.session().is_active()
                    && let Some(name) = operator
                {
                    timer.set_operator(name.as_str());
                }
                timer.start_session_at(now)
            }
            TimerCommand::StartTask(task) => timer.start_timer_at(task, now),
            TimerCommand::Wait => timer.start_waiting_at(now),
            TimerCommand::Resume => timer.resume_timer_at(now),
            TimerCommand::Complete => timer.complete_cycle_at(now),
            TimerCommand::EndSession => timer.end_session_at(now),
        }
    }
}
