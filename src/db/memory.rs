//! In-process store with the same contract as the SQLite one.

use crate::db::store::{EventStore, FeedQuery, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::models::event::{EventId, NewStamp, TimestampEvent, UserId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    next_id: EventId,
    logs: HashMap<UserId, Vec<TimestampEvent>>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Total number of events across all users.
    pub fn len(&self) -> usize {
        self.inner().logs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventStore for MemoryStore {
    fn load_events(&self, user_id: UserId) -> AppResult<Vec<TimestampEvent>> {
        Ok(self.inner().logs.get(&user_id).cloned().unwrap_or_default())
    }

    fn latest_event(&self, user_id: UserId) -> AppResult<Option<TimestampEvent>> {
        Ok(self
            .inner()
            .logs
            .get(&user_id)
            .and_then(|log| log.last().cloned()))
    }

    fn latest_clock_event(&self, user_id: UserId) -> AppResult<Option<TimestampEvent>> {
        Ok(self.inner().logs.get(&user_id).and_then(|log| {
            log.iter()
                .rev()
                .find(|ev| ev.stamp_type.is_clock_event())
                .cloned()
        }))
    }

    fn append(
        &self,
        user_id: UserId,
        stamp: NewStamp,
        expected_last: Option<EventId>,
    ) -> AppResult<TimestampEvent> {
        let mut inner = self.inner();

        let current_last = inner
            .logs
            .get(&user_id)
            .and_then(|log| log.last())
            .map(|ev| ev.id);
        if current_last != expected_last {
            return Err(AppError::ConcurrentUpdate(user_id));
        }

        inner.next_id += 1;
        let ev = TimestampEvent::accepted(inner.next_id, user_id, stamp);
        inner.logs.entry(user_id).or_default().push(ev.clone());

        Ok(ev)
    }

    fn feed(&self, user_id: UserId, query: &FeedQuery) -> AppResult<Vec<TimestampEvent>> {
        let mut events = self.load_events(user_id)?;
        if query.sort == SortOrder::Desc {
            events.reverse();
        }

        Ok(events
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }
}
