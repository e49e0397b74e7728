use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::{DateTime, Local};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ARCHIVED CYCLES
    //
    let (count, sessions): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT session_start) FROM cycles",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!(
        "{}• Archived cycles:{} {}{}{} in {} session(s)",
        CYAN, RESET, GREEN, count, RESET, sessions
    );

    //
    // 3) DATE RANGE
    //
    let bounds: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(start_time), MAX(start_time) FROM cycles",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = bounds.unwrap_or((None, None));
    let dash = format!("{GREY}--{RESET}");
    let local_day = |ts: Option<String>| {
        ts.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| dash.clone())
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", local_day(first));
    println!("    to:   {}", local_day(last));

    //
    // 4) SCHEMA
    //
    let versions = applied_versions(&pool.conn)?;
    println!("{}• Migrations applied:{} {}", CYAN, RESET, versions.len());
    if let Some(latest) = versions.last() {
        println!("    latest: {}", latest);
    }

    println!();
    Ok(())
}
