use crate::cli::commands::timer;
use crate::cli::parser::{Commands, SessionAction};
use crate::config::Config;
use crate::core::calculator::elapsed::seconds_between;
use crate::core::session::{SessionLogic, TimerCommand};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::cycle::CycleActivity;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW, colorize_optional};
use crate::utils::secs2readable;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { action } = cmd {
        match action {
            SessionAction::Start { operator } => {
                let operator = operator
                    .clone()
                    .or_else(|| Some(cfg.operator.clone()).filter(|o| !o.trim().is_empty()));
                timer::run(&TimerCommand::StartSession { operator }, cfg)?;
            }
            SessionAction::End => timer::run(&TimerCommand::EndSession, cfg)?,
            SessionAction::Status => print_status(cfg)?,
        }
    }
    Ok(())
}

fn print_status(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;
    let timer = SessionLogic::load(&pool)?;
    let now = Local::now();

    header("Session status");

    let session = timer.session();
    println!("{}• Session:{}   {}", CYAN, RESET, session.label());
    if let Some(start) = session.start_time() {
        println!("{}• Started:{}   {}", CYAN, RESET, start.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(end) = session.end_time() {
        println!("{}• Ended:{}     {}", CYAN, RESET, end.format("%Y-%m-%d %H:%M:%S"));
    }
    println!(
        "{}• Operator:{}  {}",
        CYAN,
        RESET,
        colorize_optional(timer.operator().unwrap_or(""))
    );
    println!("{}• Completed:{} {}", CYAN, RESET, timer.completed().len());

    match timer.current() {
        None => println!("{}• Task:{}      {}", CYAN, RESET, colorize_optional("")),
        Some(open) => {
            let (state, since) = match open.activity {
                CycleActivity::Working { resumed_at } => {
                    (format!("{GREEN}working{RESET}"), resumed_at)
                }
                CycleActivity::Waiting { wait_start } => {
                    (format!("{YELLOW}waiting{RESET}"), wait_start)
                }
            };
            println!("{}• Task:{}      {} ({})", CYAN, RESET, open.task_name, state);
            println!(
                "{}• Since:{}     {} ({} ago)",
                CYAN,
                RESET,
                since.format("%H:%M:%S"),
                secs2readable(seconds_between(since, now), false)
            );
        }
    }

    println!();
    Ok(())
}
