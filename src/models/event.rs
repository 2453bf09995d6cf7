use super::stamp_type::StampType;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;

pub type UserId = i64;
pub type EventId = i64;

/// A stamp that has not been accepted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStamp {
    pub stamp_type: StampType,
    pub stamp_time: DateTime<Utc>,
    pub source: String,
}

impl NewStamp {
    /// Stamp submitted from the CLI (`source = "cli"`).
    /// Sub-second precision is dropped: the log stores whole seconds.
    pub fn new(stamp_type: StampType, stamp_time: DateTime<Utc>) -> Self {
        Self {
            stamp_type,
            stamp_time: stamp_time.trunc_subsecs(0),
            source: "cli".to_string(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// An accepted, immutable entry of a user's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampEvent {
    pub id: EventId,               // ⇔ timestamps.id
    pub user_id: UserId,           // ⇔ timestamps.user_id
    pub stamp_type: StampType,     // ⇔ timestamps.stamp_type ('sign-in' | ...)
    pub stamp_time: DateTime<Utc>, // ⇔ timestamps.stamp_time (RFC3339, UTC)
    pub source: String,            // ⇔ timestamps.source
    pub created_at: DateTime<Utc>, // ⇔ timestamps.created_at
}

impl TimestampEvent {
    pub fn accepted(id: EventId, user_id: UserId, stamp: NewStamp) -> Self {
        Self {
            id,
            user_id,
            stamp_type: stamp.stamp_type,
            stamp_time: stamp.stamp_time,
            source: stamp.source,
            created_at: Utc::now().trunc_subsecs(0),
        }
    }
}

/// Storage format for instants: fixed-precision UTC so text order equals time order.
pub fn to_db_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn from_db_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
