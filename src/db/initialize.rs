use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine,
/// then enables WAL so readers never wait on the single writer.
pub fn init_db(conn: &mut Connection) -> AppResult<usize> {
    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    let applied = run_pending_migrations(conn)?;

    // In-memory databases answer "memory" instead of "wal"; both are fine.
    let _mode: String = conn.query_row("PRAGMA journal_mode=WAL;", [], |row| row.get(0))?;

    Ok(applied)
}
