use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// One schema step, identified by a stable version string.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_timer_state",
        description: "Created timer_state table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS timer_state (
                id          INTEGER PRIMARY KEY CHECK (id = 1),
                payload     TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: "20250301_0002_create_cycles",
        description: "Created cycles table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS cycles (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                session_start  TEXT NOT NULL,
                seq            INTEGER NOT NULL,
                task_name      TEXT NOT NULL,
                operator       TEXT NOT NULL DEFAULT '',
                start_time     TEXT NOT NULL,
                end_time       TEXT NOT NULL,
                work_seconds   REAL NOT NULL DEFAULT 0 CHECK (work_seconds >= 0),
                wait_seconds   REAL NOT NULL DEFAULT 0 CHECK (wait_seconds >= 0),
                total_seconds  REAL NOT NULL DEFAULT 0,
                created_at     TEXT NOT NULL,
                UNIQUE (session_start, seq)
            );

            CREATE INDEX IF NOT EXISTS idx_cycles_start_time ON cycles(start_time);
        "#,
    },
    Migration {
        version: "20250412_0003_index_cycles_task",
        description: "Added task/operator index on cycles",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_cycles_task_operator ON cycles(task_name, operator);
        "#,
    },
    Migration {
        version: "20250520_0004_cycles_utc_timestamps",
        description: "Normalised archived cycle timestamps to UTC",
        sql: r#"
            UPDATE cycles SET
                session_start = strftime('%Y-%m-%dT%H:%M:%fZ', session_start),
                start_time    = strftime('%Y-%m-%dT%H:%M:%fZ', start_time),
                end_time      = strftime('%Y-%m-%dT%H:%M:%fZ', end_time)
            WHERE session_start NOT LIKE '%Z';
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()
}

/// Versions already recorded in the `log` table, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(())
}
