use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::count_cycles;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }
        if *check {
            check_database(&pool)?;
        }
        if *vacuum {
            vacuum_database(&pool)?;
        }
    }

    Ok(())
}

/// SQLite integrity check, then a decode of the saved timer.
fn check_database(pool: &DbPool) -> AppResult<()> {
    info("Running integrity check…");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        error(format!("Integrity check failed: {integrity}"));
        return Ok(());
    }
    success("Integrity check passed.");

    // a payload that no longer decodes blocks every timer command
    match SessionLogic::load(pool) {
        Ok(timer) => success(format!(
            "Timer state readable: session {}, {} archived cycle(s).",
            timer.session().label(),
            count_cycles(&pool.conn)?
        )),
        Err(e) => warning(e),
    }
    Ok(())
}

fn vacuum_database(pool: &DbPool) -> AppResult<()> {
    info("Running VACUUM…");
    pool.conn.execute_batch("VACUUM;")?;
    if let Err(e) = ttlog(&pool.conn, "vacuum", "", "Database compacted") {
        warning(format!("Failed to write internal log: {}", e));
    }
    success("Vacuum completed.");
    Ok(())
}
