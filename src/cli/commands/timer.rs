use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feedback::Feedback;
use crate::core::session::{SessionLogic, TimerCommand};
use crate::core::timer::{TimerResult, Transition};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::feedback;

/// Handle `start`, `wait`, `resume` and `complete`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let timer_cmd = match cmd {
        Commands::Start { task } => TimerCommand::StartTask(task.clone()),
        Commands::Wait => TimerCommand::Wait,
        Commands::Resume => TimerCommand::Resume,
        Commands::Complete => TimerCommand::Complete,
        _ => return Ok(()),
    };

    run(&timer_cmd, cfg)
}

/// Apply a timer command and report the outcome.
/// A rejected command is shown as a warning and still fails the process.
pub(crate) fn run(timer_cmd: &TimerCommand, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    let outcome: TimerResult<Transition> = match SessionLogic::apply(&mut pool, timer_cmd) {
        Ok(transition) => Ok(transition),
        Err(AppError::Timer(e)) => Err(e),
        Err(other) => return Err(other),
    };

    feedback(&Feedback::from(&outcome));
    outcome.map(|_| ()).map_err(AppError::from)
}
