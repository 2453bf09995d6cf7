//! Folds a user's event log into shifts.

use crate::errors::{AppError, AppResult};
use crate::models::event::{EventId, TimestampEvent};
use crate::models::shift::{BreakSpan, Shift};
use crate::models::stamp_type::StampType;
use chrono::{DateTime, Duration, Utc};

/// A shift that has been signed into but not out of yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenShift {
    pub sign_in: DateTime<Utc>,
    pub breaks: Vec<BreakSpan>,
    pub break_start: Option<DateTime<Utc>>,
    pub total_break_time: Duration,
}

impl OpenShift {
    fn new(sign_in: DateTime<Utc>) -> Self {
        Self {
            sign_in,
            breaks: Vec::new(),
            break_start: None,
            total_break_time: Duration::zero(),
        }
    }

    fn close(self, sign_out: DateTime<Utc>) -> Shift {
        let total_shift_time = sign_out - self.sign_in;
        Shift {
            sign_in: self.sign_in,
            sign_out: Some(sign_out),
            net_work_time: total_shift_time - self.total_break_time,
            total_shift_time,
            total_break_time: self.total_break_time,
            breaks: self.breaks,
        }
    }

    /// Provisional totals measured against `now`; never persisted.
    /// A running break counts up to `now`, and `now` before the sign-in yields zero.
    pub fn provisional(&self, now: DateTime<Utc>) -> Shift {
        let now = now.max(self.sign_in);
        let running_break = self
            .break_start
            .map(|start| (now - start).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);

        let total_shift_time = now - self.sign_in;
        let total_break_time = (self.total_break_time + running_break).min(total_shift_time);

        Shift {
            sign_in: self.sign_in,
            sign_out: None,
            breaks: self.breaks.clone(),
            total_shift_time,
            total_break_time,
            net_work_time: total_shift_time - total_break_time,
        }
    }
}

/// Everything derived from one pass over the log. Independent of "now":
/// the open shift is kept as an accumulator and materialized on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pub shifts: Vec<Shift>,
    pub open: Option<OpenShift>,
    pub leaves: Vec<DateTime<Utc>>,
    /// Id of the newest event folded in; cache key for the owning service.
    pub last_event_id: Option<EventId>,
}

impl Timeline {
    /// Closed shifts followed by the open one (if any) evaluated at `now`.
    pub fn shifts_at(&self, now: DateTime<Utc>) -> Vec<Shift> {
        let mut out = self.shifts.clone();
        if let Some(open) = &self.open {
            out.push(open.provisional(now));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty() && self.open.is_none() && self.leaves.is_empty()
    }
}

fn corrupted(ev: &TimestampEvent, reason: &str) -> AppError {
    let msg = format!(
        "event #{} ({} at {}) {}",
        ev.id, ev.stamp_type, ev.stamp_time, reason
    );
    log::error!("user {}: corrupted event log: {}", ev.user_id, msg);
    AppError::CorruptedLog(msg)
}

pub fn build_timeline(events: &[TimestampEvent]) -> AppResult<Timeline> {
    if events.is_empty() {
        return Ok(Timeline::default());
    }

    // -----------------------------
    // Sort events chronologically
    // -----------------------------
    let mut sorted: Vec<&TimestampEvent> = events.iter().collect();
    sorted.sort_by_key(|e| (e.stamp_time, e.id));

    let mut shifts = Vec::new();
    let mut leaves = Vec::new();
    let mut open: Option<OpenShift> = None;

    for ev in &sorted {
        match ev.stamp_type {
            StampType::SignIn => {
                if open.is_some() {
                    return Err(corrupted(ev, "signs in while a shift is still open"));
                }
                open = Some(OpenShift::new(ev.stamp_time));
            }

            StampType::StartBreak => {
                let acc = open
                    .as_mut()
                    .ok_or_else(|| corrupted(ev, "starts a break outside of a shift"))?;
                if acc.break_start.is_some() {
                    return Err(corrupted(ev, "starts a break while already on break"));
                }
                acc.break_start = Some(ev.stamp_time);
            }

            StampType::EndBreak => {
                let acc = open
                    .as_mut()
                    .ok_or_else(|| corrupted(ev, "ends a break outside of a shift"))?;
                let start = acc
                    .break_start
                    .take()
                    .ok_or_else(|| corrupted(ev, "ends a break that was never started"))?;
                let span = BreakSpan {
                    start,
                    end: ev.stamp_time,
                };
                acc.total_break_time += span.duration();
                acc.breaks.push(span);
            }

            StampType::SignOut => {
                let acc = open
                    .take()
                    .ok_or_else(|| corrupted(ev, "signs out without a matching sign-in"))?;
                if acc.break_start.is_some() {
                    return Err(corrupted(ev, "signs out during an active break"));
                }
                shifts.push(acc.close(ev.stamp_time));
            }

            StampType::RegisterLeave => leaves.push(ev.stamp_time),
        }
    }

    Ok(Timeline {
        shifts,
        open,
        leaves,
        last_event_id: sorted.iter().map(|e| e.id).max(),
    })
}
