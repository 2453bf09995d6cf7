//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file and bring its schema up to date.
    pub fn new(path: &str) -> AppResult<Self> {
        let mut conn = Connection::open(Path::new(path))?;
        init_db(&mut conn)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, used by tests and embedding callers.
    pub fn in_memory() -> AppResult<Self> {
        let mut conn = Connection::open_in_memory()?;
        init_db(&mut conn)?;
        Ok(Self { conn })
    }
}
