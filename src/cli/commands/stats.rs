use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET, color_for_work_share};
use crate::utils::formatting::format_percentage;
use crate::utils::secs2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { json } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let timer = SessionLogic::load(&pool)?;
        let stats = timer.stats();

        if *json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        header(format!("Session statistics ({})", timer.session().label()));

        let share = color_for_work_share(stats.work_percentage, stats.total_seconds);

        println!(
            "{}• Work:{}  {} ({}{}{})",
            CYAN,
            RESET,
            secs2readable(stats.work_seconds, false),
            share,
            format_percentage(stats.work_percentage),
            RESET
        );
        println!(
            "{}• Wait:{}  {} ({})",
            CYAN,
            RESET,
            secs2readable(stats.wait_seconds, false),
            format_percentage(stats.wait_percentage)
        );
        println!(
            "{}• Total:{} {}",
            CYAN,
            RESET,
            secs2readable(stats.total_seconds, false)
        );
        println!(
            "{}• Cycles:{} {} completed{}",
            CYAN,
            RESET,
            stats.completed_cycles,
            if stats.open_cycle {
                if stats.waiting {
                    ", 1 running (waiting)"
                } else {
                    ", 1 running"
                }
            } else {
                ""
            }
        );
        println!();
    }
    Ok(())
}
