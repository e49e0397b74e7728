use crate::core::timer::CycleTimer;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::cycle::{CompletedCycle, CycleRecord};
use chrono::{DateTime, DurationRound, Local, NaiveDate, SecondsFormat, TimeDelta, Utc};
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Optional filters for archived cycles. Dates refer to the local start date.
#[derive(Debug, Clone, Default)]
pub struct CycleFilter {
    pub dates: Option<(NaiveDate, NaiveDate)>,
    pub task: Option<String>,
    pub operator: Option<String>,
}

/// Archive form of a timestamp: UTC, millisecond precision, `Z` suffix.
/// Independent of the process timezone, and sorts chronologically as text.
/// Rounds like SQLite's `strftime('%f')`, which normalised older rows.
pub fn archive_ts(dt: &DateTime<Local>) -> String {
    let utc = dt.with_timezone(&Utc);
    utc.duration_round(TimeDelta::milliseconds(1))
        .unwrap_or(utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(s: &str) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

// ---------------------------
// Timer state
// ---------------------------

/// Load the persisted timer, or a fresh one when nothing was saved yet.
pub fn load_timer(conn: &Connection) -> AppResult<CycleTimer> {
    let payload: Option<String> = conn
        .query_row("SELECT payload FROM timer_state WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    match payload {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| AppError::TimerState(e.to_string()))
        }
        None => Ok(CycleTimer::new()),
    }
}

pub fn save_timer(conn: &Connection, timer: &CycleTimer) -> AppResult<()> {
    let payload = serde_json::to_string(timer)?;
    conn.execute(
        "INSERT INTO timer_state (id, payload, updated_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        params![payload, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

// ---------------------------
// Archived cycles
// ---------------------------

/// Archive completed cycles of a session. Already archived ones are skipped,
/// so this can run after every command. Returns the number of new rows.
pub fn archive_cycles(
    conn: &Connection,
    session_start: DateTime<Local>,
    cycles: &[CompletedCycle],
) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO cycles
            (session_start, seq, task_name, operator, start_time, end_time,
             work_seconds, wait_seconds, total_seconds, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;

    let session_key = archive_ts(&session_start);
    let now = Local::now().to_rfc3339();
    let mut inserted = 0;

    for c in cycles {
        inserted += stmt.execute(params![
            session_key,
            c.seq,
            c.task_name,
            c.operator_str(),
            archive_ts(&c.start_time),
            archive_ts(&c.end_time),
            c.work_seconds,
            c.wait_seconds,
            c.total_seconds,
            now,
        ])?;
    }

    Ok(inserted)
}

pub fn map_cycle_row(row: &Row) -> rusqlite::Result<CycleRecord> {
    let session_start: String = row.get("session_start")?;
    let start_time: String = row.get("start_time")?;
    let end_time: String = row.get("end_time")?;
    let operator: String = row.get("operator")?;

    Ok(CycleRecord {
        id: row.get("id")?,
        session_start: parse_ts(&session_start)?,
        cycle: CompletedCycle {
            seq: row.get("seq")?,
            task_name: row.get("task_name")?,
            operator: if operator.is_empty() {
                None
            } else {
                Some(operator)
            },
            start_time: parse_ts(&start_time)?,
            end_time: parse_ts(&end_time)?,
            work_seconds: row.get("work_seconds")?,
            wait_seconds: row.get("wait_seconds")?,
            total_seconds: row.get("total_seconds")?,
        },
    })
}

/// Archived cycles matching `filter`, oldest first.
/// The date filter applies to the local start date, so it runs after mapping.
pub fn load_cycles(pool: &mut DbPool, filter: &CycleFilter) -> AppResult<Vec<CycleRecord>> {
    let mut sql = String::from(
        "SELECT id, session_start, seq, task_name, operator, start_time, end_time,
                work_seconds, wait_seconds, total_seconds
         FROM cycles WHERE 1 = 1",
    );
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(task) = &filter.task {
        sql.push_str(" AND task_name = ? COLLATE NOCASE");
        args.push(Box::new(task.clone()));
    }
    if let Some(op) = &filter.operator {
        sql.push_str(" AND operator = ? COLLATE NOCASE");
        args.push(Box::new(op.clone()));
    }
    sql.push_str(" ORDER BY start_time ASC, id ASC");

    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        map_cycle_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        let rec = r?;
        if let Some((from, to)) = filter.dates {
            let day = rec.cycle.start_time.date_naive();
            if day < from || day > to {
                continue;
            }
        }
        out.push(rec);
    }
    Ok(out)
}

pub fn count_cycles(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM cycles", [], |row| row.get(0))?)
}
