//! Persistence seam for per-user event logs.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::event::{EventId, NewStamp, TimestampEvent, UserId};
use clap::ValueEnum;
use rusqlite::{Connection, TransactionBehavior};
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Pagination of the stamp feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedQuery {
    pub limit: u32,
    pub offset: u32,
    pub sort: SortOrder,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            sort: SortOrder::Desc,
        }
    }
}

/// Append-only storage of stamps, partitioned by user.
///
/// `append` is a compare-and-append: it must fail with
/// [`AppError::ConcurrentUpdate`] unless the user's newest stored event id is
/// still `expected_last`, and it must make the event visible atomically.
pub trait EventStore: Send + Sync {
    fn load_events(&self, user_id: UserId) -> AppResult<Vec<TimestampEvent>>;

    fn latest_event(&self, user_id: UserId) -> AppResult<Option<TimestampEvent>>;

    fn latest_clock_event(&self, user_id: UserId) -> AppResult<Option<TimestampEvent>>;

    /// Id of the newest event, the key every derived cache is checked against.
    fn latest_event_id(&self, user_id: UserId) -> AppResult<Option<EventId>> {
        Ok(self.latest_event(user_id)?.map(|ev| ev.id))
    }

    fn append(
        &self,
        user_id: UserId,
        stamp: NewStamp,
        expected_last: Option<EventId>,
    ) -> AppResult<TimestampEvent>;

    fn feed(&self, user_id: UserId, query: &FeedQuery) -> AppResult<Vec<TimestampEvent>>;

    /// Record an audit line; stores without an audit trail ignore it.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// SQLite-backed store. The connection is shared behind a mutex; every
/// append runs in an IMMEDIATE transaction so other processes on the same
/// file are serialized too.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            conn: Mutex::new(pool.conn),
        }
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(DbPool::new(path)?))
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self::new(DbPool::in_memory()?))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // a panic while holding the guard leaves no half-written rows behind
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `func` with the underlying connection (for audit printing, raw checks).
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        func(&self.conn())
    }
}

impl EventStore for SqliteStore {
    fn load_events(&self, user_id: UserId) -> AppResult<Vec<TimestampEvent>> {
        queries::load_events(&self.conn(), user_id)
    }

    fn latest_event(&self, user_id: UserId) -> AppResult<Option<TimestampEvent>> {
        queries::latest_event(&self.conn(), user_id)
    }

    fn latest_clock_event(&self, user_id: UserId) -> AppResult<Option<TimestampEvent>> {
        queries::latest_clock_event(&self.conn(), user_id)
    }

    fn latest_event_id(&self, user_id: UserId) -> AppResult<Option<EventId>> {
        queries::latest_event_id(&self.conn(), user_id)
    }

    fn append(
        &self,
        user_id: UserId,
        stamp: NewStamp,
        expected_last: Option<EventId>,
    ) -> AppResult<TimestampEvent> {
        let mut conn = self.conn();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if queries::latest_event_id(&tx, user_id)? != expected_last {
            return Err(AppError::ConcurrentUpdate(user_id));
        }

        let mut ev = TimestampEvent::accepted(0, user_id, stamp);
        ev.id = queries::insert_event(&tx, &ev)?;
        tx.commit()?;

        Ok(ev)
    }

    fn feed(&self, user_id: UserId, query: &FeedQuery) -> AppResult<Vec<TimestampEvent>> {
        queries::load_feed(&self.conn(), user_id, query)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn(), operation, target, message)
    }
}
