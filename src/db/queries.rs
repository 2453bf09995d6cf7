use crate::db::store::{FeedQuery, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::models::event::{EventId, TimestampEvent, UserId, from_db_time, to_db_time};
use crate::models::stamp_type::StampType;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const EVENT_COLUMNS: &str = "id, user_id, stamp_type, stamp_time, source, created_at";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<TimestampEvent> {
    let kind_str: String = row.get("stamp_type")?;
    let stamp_type = StampType::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidStampType(kind_str.clone())))?;

    let time_str: String = row.get("stamp_time")?;
    let stamp_time = from_db_time(&time_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidTime(time_str.clone())))?;

    let created_str: String = row.get("created_at")?;
    let created_at = from_db_time(&created_str)
        .ok_or_else(|| conversion_error(5, AppError::InvalidTime(created_str.clone())))?;

    Ok(TimestampEvent {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        stamp_type,
        stamp_time,
        source: row.get("source")?,
        created_at,
    })
}

/// Insert an accepted event and return the id assigned by SQLite.
pub fn insert_event(conn: &Connection, ev: &TimestampEvent) -> AppResult<EventId> {
    conn.execute(
        "INSERT INTO timestamps (user_id, stamp_type, stamp_time, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.user_id,
            ev.stamp_type.as_str(),
            to_db_time(&ev.stamp_time),
            ev.source,
            to_db_time(&ev.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Whole log of one user, oldest first.
pub fn load_events(conn: &Connection, user_id: UserId) -> AppResult<Vec<TimestampEvent>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM timestamps
         WHERE user_id = ?1
         ORDER BY stamp_time ASC, id ASC"
    ))?;

    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn latest_event(conn: &Connection, user_id: UserId) -> AppResult<Option<TimestampEvent>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM timestamps
         WHERE user_id = ?1
         ORDER BY stamp_time DESC, id DESC
         LIMIT 1"
    ))?;
    Ok(stmt.query_row([user_id], map_row).optional()?)
}

/// Latest stamp that moves the clock state (leave markers skipped).
pub fn latest_clock_event(
    conn: &Connection,
    user_id: UserId,
) -> AppResult<Option<TimestampEvent>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM timestamps
         WHERE user_id = ?1 AND stamp_type <> ?2
         ORDER BY stamp_time DESC, id DESC
         LIMIT 1"
    ))?;
    Ok(stmt
        .query_row(params![user_id, StampType::RegisterLeave.as_str()], map_row)
        .optional()?)
}

pub fn latest_event_id(conn: &Connection, user_id: UserId) -> AppResult<Option<EventId>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id FROM timestamps
         WHERE user_id = ?1
         ORDER BY stamp_time DESC, id DESC
         LIMIT 1",
    )?;
    Ok(stmt.query_row([user_id], |row| row.get(0)).optional()?)
}

/// One page of a user's stamps.
pub fn load_feed(
    conn: &Connection,
    user_id: UserId,
    query: &FeedQuery,
) -> AppResult<Vec<TimestampEvent>> {
    let order = match query.sort {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM timestamps
         WHERE user_id = ?1
         ORDER BY stamp_time {order}, id {order}
         LIMIT ?2 OFFSET ?3"
    ))?;

    let rows = stmt.query_map(params![user_id, query.limit, query.offset], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
