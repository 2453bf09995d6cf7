use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
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

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20261001_0001_create_timestamps",
        description: "Created timestamps table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS timestamps (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL,
            stamp_type  TEXT NOT NULL CHECK(stamp_type IN
                ('sign-in','sign-out','start-break','end-break','register-leave')),
            stamp_time  TEXT NOT NULL,
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_timestamps_user_time ON timestamps(user_id, stamp_time);
        CREATE INDEX IF NOT EXISTS idx_timestamps_user_type ON timestamps(user_id, stamp_type);
        "#,
    },
    Migration {
        version: "20261001_0002_append_only_timestamps",
        description: "Timestamps are now append-only",
        sql: r#"
        CREATE TRIGGER IF NOT EXISTS timestamps_no_update
        BEFORE UPDATE ON timestamps
        BEGIN
            SELECT RAISE(ABORT, 'timestamps are append-only');
        END;

        CREATE TRIGGER IF NOT EXISTS timestamps_no_delete
        BEFORE DELETE ON timestamps
        BEGIN
            SELECT RAISE(ABORT, 'timestamps are append-only');
        END;
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &mut Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    tx.commit()?;
    log::info!("migration applied: {} ({})", m.version, m.description);
    Ok(())
}

/// Public entry point: run all pending migrations, returns how many were applied.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
