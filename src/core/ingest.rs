//! The only place where stamps enter a user's log.
//!
//! `submit` serializes read-validate-append per user, readers work on
//! snapshots and never take the per-user lock. Attendance states and timelines are
//! cached per user and keyed by the id of the newest event they were built from.

use crate::core::attendance::AttendanceState;
use crate::core::calculator::summary::{self, OpenShiftPolicy};
use crate::core::calculator::timeline::{Timeline, build_timeline};
use crate::db::store::{EventStore, FeedQuery};
use crate::errors::{AppError, AppResult};
use crate::models::event::{EventId, NewStamp, TimestampEvent, UserId};
use crate::models::shift::{DailyTotals, RollingSummary, Shift};
use crate::models::stamp_type::StampType;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Why a submission was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    InvalidStampType(String),
    IllegalTransition {
        candidate: StampType,
        last: Option<StampType>,
    },
    NonMonotonicTime {
        submitted: DateTime<Utc>,
        last: DateTime<Utc>,
    },
    CorruptedLog,
    ConcurrentUpdate,
}

impl RejectionKind {
    /// User-facing rejections can be fixed by picking another action;
    /// the rest are reported as system problems.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RejectionKind::InvalidStampType(_) | RejectionKind::IllegalTransition { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
    /// Actions that would have been accepted instead.
    pub permitted: Vec<StampType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(TimestampEvent),
    Rejected(Rejection),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedState {
    state: AttendanceState,
    last_event_id: Option<EventId>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read<T>(m: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    m.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(m: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    m.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct IngestService<S: EventStore> {
    store: S,
    policy: OpenShiftPolicy,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
    states: RwLock<HashMap<UserId, CachedState>>,
    timelines: RwLock<HashMap<UserId, Arc<Timeline>>>,
}

impl<S: EventStore> IngestService<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, OpenShiftPolicy::Include)
    }

    pub fn with_policy(store: S, policy: OpenShiftPolicy) -> Self {
        Self {
            store,
            policy,
            user_locks: Mutex::new(HashMap::new()),
            states: RwLock::new(HashMap::new()),
            timelines: RwLock::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        lock(&self.user_locks).entry(user_id).or_default().clone()
    }

    fn invalidate(&self, user_id: UserId) {
        write(&self.states).remove(&user_id);
        write(&self.timelines).remove(&user_id);
    }

    /// State of the user's log, reused only while the store's newest event
    /// is still the one it was derived from (other processes may append).
    fn cached_state(&self, user_id: UserId) -> AppResult<CachedState> {
        let newest = self.store.latest_event_id(user_id)?;

        if let Some(cached) = read(&self.states).get(&user_id)
            && cached.last_event_id == newest
        {
            return Ok(*cached);
        }

        let latest = self.store.latest_event(user_id)?;
        let latest_clock = match &latest {
            Some(ev) if ev.stamp_type.is_clock_event() => Some(ev.clone()),
            Some(_) => self.store.latest_clock_event(user_id)?,
            None => None,
        };

        let cached = CachedState {
            state: AttendanceState::from_latest(latest_clock.as_ref(), latest.as_ref()),
            last_event_id: latest.map(|ev| ev.id),
        };
        // an entry overwritten by an older snapshot is rebuilt on the next read
        write(&self.states).insert(user_id, cached);
        Ok(cached)
    }

    // -----------------------------
    // Attendance state
    // -----------------------------

    pub fn attendance_state(&self, user_id: UserId) -> AppResult<AttendanceState> {
        Ok(self.cached_state(user_id)?.state)
    }

    /// Kind of the latest clock stamp, `None` for an empty log.
    pub fn latest_stamp_type(&self, user_id: UserId) -> AppResult<Option<StampType>> {
        Ok(self.attendance_state(user_id)?.last_stamp_type)
    }

    pub fn permitted_actions(&self, user_id: UserId) -> AppResult<Vec<StampType>> {
        Ok(self.attendance_state(user_id)?.permitted_actions())
    }

    // -----------------------------
    // Writes
    // -----------------------------

    pub fn submit(
        &self,
        user_id: UserId,
        stamp_type: StampType,
        stamp_time: DateTime<Utc>,
    ) -> AppResult<TimestampEvent> {
        self.submit_stamp(user_id, NewStamp::new(stamp_type, stamp_time))
    }

    /// Validate `stamp` against the user's log and append it.
    /// At most one event is appended; on error the log is untouched.
    pub fn submit_stamp(&self, user_id: UserId, stamp: NewStamp) -> AppResult<TimestampEvent> {
        let user_lock = self.user_lock(user_id);
        let _guard = lock(&user_lock);

        let cached = self.cached_state(user_id)?;
        let stamp = cached.state.validate(stamp)?;

        match self.store.append(user_id, stamp, cached.last_event_id) {
            Ok(ev) => {
                let mut state = cached.state;
                state.advance(ev.stamp_type, ev.stamp_time);
                write(&self.states).insert(
                    user_id,
                    CachedState {
                        state,
                        last_event_id: Some(ev.id),
                    },
                );
                write(&self.timelines).remove(&user_id);

                log::info!(
                    "user {}: accepted {} at {} (#{})",
                    user_id,
                    ev.stamp_type,
                    ev.stamp_time,
                    ev.id
                );
                if let Err(e) = self.store.audit(
                    "stamp",
                    &format!("user {}", user_id),
                    &format!("{} at {}", ev.stamp_type, ev.stamp_time.to_rfc3339()),
                ) {
                    log::warn!("failed to write audit line: {}", e);
                }
                Ok(ev)
            }
            Err(e) => {
                self.invalidate(user_id);
                Err(e)
            }
        }
    }

    /// Protocol boundary: parse the raw kind, submit, and turn domain errors
    /// into a [`Rejection`]. Storage failures stay errors.
    pub fn submit_event(
        &self,
        user_id: UserId,
        raw_stamp_type: &str,
        stamp_time: DateTime<Utc>,
        source: &str,
    ) -> AppResult<SubmitOutcome> {
        let result = raw_stamp_type.parse::<StampType>().and_then(|kind| {
            self.submit_stamp(user_id, NewStamp::new(kind, stamp_time).with_source(source))
        });

        let err = match result {
            Ok(ev) => return Ok(SubmitOutcome::Accepted(ev)),
            Err(e) => e,
        };

        let kind = match &err {
            AppError::InvalidStampType(s) => RejectionKind::InvalidStampType(s.clone()),
            AppError::IllegalTransition { candidate, last } => RejectionKind::IllegalTransition {
                candidate: *candidate,
                last: *last,
            },
            AppError::NonMonotonicTime { submitted, last } => RejectionKind::NonMonotonicTime {
                submitted: *submitted,
                last: *last,
            },
            AppError::CorruptedLog(_) => RejectionKind::CorruptedLog,
            AppError::ConcurrentUpdate(_) => RejectionKind::ConcurrentUpdate,
            _ => return Err(err),
        };

        log::warn!("user {}: rejected {}: {}", user_id, raw_stamp_type, err);

        Ok(SubmitOutcome::Rejected(Rejection {
            kind,
            message: err.to_string(),
            permitted: self.permitted_actions(user_id)?,
        }))
    }

    // -----------------------------
    // Reads
    // -----------------------------

    /// Timeline of the user's log, rebuilt only when the newest event changed.
    pub fn timeline(&self, user_id: UserId) -> AppResult<Arc<Timeline>> {
        let newest = self.store.latest_event_id(user_id)?;

        if let Some(cached) = read(&self.timelines).get(&user_id)
            && cached.last_event_id == newest
        {
            return Ok(Arc::clone(cached));
        }

        let events = self.store.load_events(user_id)?;
        let timeline = Arc::new(build_timeline(&events)?);
        write(&self.timelines).insert(user_id, Arc::clone(&timeline));
        Ok(timeline)
    }

    pub fn shifts(&self, user_id: UserId, now: DateTime<Utc>) -> AppResult<Vec<Shift>> {
        Ok(self.timeline(user_id)?.shifts_at(now))
    }

    pub fn leaves(&self, user_id: UserId) -> AppResult<Vec<DateTime<Utc>>> {
        Ok(self.timeline(user_id)?.leaves.clone())
    }

    pub fn summary(
        &self,
        user_id: UserId,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<RollingSummary> {
        let shifts = self.shifts(user_id, now)?;
        Ok(summary::rolling_summary(
            &shifts,
            window_days,
            now,
            self.policy,
        ))
    }

    pub fn daily_breakdown(
        &self,
        user_id: UserId,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<DailyTotals>> {
        let shifts = self.shifts(user_id, now)?;
        Ok(summary::daily_breakdown(
            &shifts,
            window_days,
            now,
            self.policy,
        ))
    }

    pub fn feed(&self, user_id: UserId, query: &FeedQuery) -> AppResult<Vec<TimestampEvent>> {
        self.store.feed(user_id, query)
    }
}
