//! Attendance state machine.
//!
//! The state is nothing more than "what was the last clock stamp". Whether a
//! candidate stamp is legal is answered by [`TRANSITIONS`], read in one
//! direction by [`is_permitted`] (validation) and in the other by
//! [`permitted_actions`] (which buttons/commands to offer).

use crate::errors::{AppError, AppResult};
use crate::models::event::{NewStamp, TimestampEvent};
use crate::models::stamp_type::{StampType, TRANSITIONS};
use chrono::{DateTime, Utc};

/// True iff `last` is one of `candidate`'s legal predecessors.
pub fn is_permitted(candidate: StampType, last: Option<StampType>) -> bool {
    candidate.predecessors().admits(last)
}

/// Every stamp kind that may be submitted after `last`, in catalog order.
pub fn permitted_actions(last: Option<StampType>) -> Vec<StampType> {
    TRANSITIONS
        .iter()
        .filter(|(_, preds)| preds.admits(last))
        .map(|(kind, _)| *kind)
        .collect()
}

/// State derived from a user's persisted log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceState {
    /// Kind of the latest clock stamp; leave markers are skipped.
    pub last_stamp_type: Option<StampType>,
    /// Time of the latest accepted stamp of any kind.
    pub last_stamp_time: Option<DateTime<Utc>>,
}

impl AttendanceState {
    /// Derive the state from a log ordered by stamp time.
    pub fn from_events(events: &[TimestampEvent]) -> Self {
        let mut state = Self::default();
        for ev in events {
            state.advance(ev.stamp_type, ev.stamp_time);
        }
        state
    }

    /// Build the state from the two "latest" lookups a store can answer directly.
    pub fn from_latest(
        latest_clock: Option<&TimestampEvent>,
        latest_any: Option<&TimestampEvent>,
    ) -> Self {
        Self {
            last_stamp_type: latest_clock.map(|ev| ev.stamp_type),
            last_stamp_time: latest_any.map(|ev| ev.stamp_time),
        }
    }

    /// Apply an accepted stamp.
    pub fn advance(&mut self, kind: StampType, at: DateTime<Utc>) {
        if kind.is_clock_event() {
            self.last_stamp_type = Some(kind);
        }
        self.last_stamp_time = Some(at);
    }

    pub fn permitted_actions(&self) -> Vec<StampType> {
        permitted_actions(self.last_stamp_type)
    }

    pub fn is_clocked_in(&self) -> bool {
        matches!(
            self.last_stamp_type,
            Some(StampType::SignIn | StampType::StartBreak | StampType::EndBreak)
        )
    }

    pub fn is_on_break(&self) -> bool {
        self.last_stamp_type == Some(StampType::StartBreak)
    }

    /// Check `stamp` against this state and hand it back untouched.
    pub fn validate(&self, stamp: NewStamp) -> AppResult<NewStamp> {
        if !is_permitted(stamp.stamp_type, self.last_stamp_type) {
            return Err(AppError::IllegalTransition {
                candidate: stamp.stamp_type,
                last: self.last_stamp_type,
            });
        }

        if let Some(last) = self.last_stamp_time
            && stamp.stamp_time <= last
        {
            return Err(AppError::NonMonotonicTime {
                submitted: stamp.stamp_time,
                last,
            });
        }

        Ok(stamp)
    }
}

/// Human description of the current state, for status output.
pub fn describe_state(state: &AttendanceState) -> &'static str {
    match state.last_stamp_type {
        None => "not signed in yet",
        Some(StampType::SignOut) => "signed out",
        Some(StampType::StartBreak) => "on break",
        Some(StampType::SignIn | StampType::EndBreak) => "signed in",
        Some(StampType::RegisterLeave) => "on leave",
    }
}
