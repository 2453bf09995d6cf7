//! Rolling-window reductions over derived shifts.
//!
//! A shift belongs to the window `[now - window_days, now)` when its sign-in
//! falls inside it. The upper bound is exclusive so that consecutive windows
//! partition time: a 7-day summary equals the sum of seven 1-day summaries.

use crate::models::shift::{DailyTotals, RollingSummary, Shift, Totals};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::collections::BTreeMap;

/// Whether an open shift contributes its provisional totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenShiftPolicy {
    Include,
    Exclude,
}

impl OpenShiftPolicy {
    pub fn from_flag(include: bool) -> Self {
        if include {
            OpenShiftPolicy::Include
        } else {
            OpenShiftPolicy::Exclude
        }
    }

    fn admits(self, shift: &Shift) -> bool {
        self == OpenShiftPolicy::Include || !shift.is_open()
    }
}

/// Longest window accepted from the command line and the config file.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Start of the window; saturates at the earliest representable instant.
pub fn window_start(window_days: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(window_days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn in_window(shift: &Shift, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    shift.sign_in >= start && shift.sign_in < now
}

/// Totals of the shifts signed into during `[now - window_days, now)`.
///
/// Note the half-open bound: a shift signed into exactly at `now` is not
/// counted yet, unlike a closed `[now - window_days, now]` reading.
pub fn rolling_summary(
    shifts: &[Shift],
    window_days: u32,
    now: DateTime<Utc>,
    policy: OpenShiftPolicy,
) -> RollingSummary {
    let start = window_start(window_days, now);
    let mut totals = Totals::default();

    for shift in shifts
        .iter()
        .filter(|s| policy.admits(s) && in_window(s, start, now))
    {
        totals.add_shift(shift);
    }

    RollingSummary {
        window_days,
        evaluated_at: now,
        totals,
    }
}

/// Per calendar day (UTC, by sign-in) totals of the same window, oldest first.
/// Days without shifts are omitted.
pub fn daily_breakdown(
    shifts: &[Shift],
    window_days: u32,
    now: DateTime<Utc>,
    policy: OpenShiftPolicy,
) -> Vec<DailyTotals> {
    let start = window_start(window_days, now);
    let mut days: BTreeMap<NaiveDate, Totals> = BTreeMap::new();

    for shift in shifts
        .iter()
        .filter(|s| policy.admits(s) && in_window(s, start, now))
    {
        days.entry(shift.sign_in.date_naive())
            .or_default()
            .add_shift(shift);
    }

    days.into_iter()
        .map(|(date, totals)| DailyTotals { date, totals })
        .collect()
}
