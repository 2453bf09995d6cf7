use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Serialize, Serializer};

/// Durations leave the crate as whole seconds.
pub(crate) fn as_seconds<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(d.num_seconds())
}

/// One completed break inside a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BreakSpan {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A sign-in .. sign-out span derived from the event log.
/// `sign_out == None` marks an open shift whose totals were measured against "now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub sign_in: DateTime<Utc>,
    pub sign_out: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakSpan>,
    #[serde(serialize_with = "as_seconds")]
    pub total_shift_time: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub total_break_time: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub net_work_time: Duration,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.sign_out.is_none()
    }
}

/// Totals shared by the rolling summary and its per-day breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub shift_count: usize,
    #[serde(serialize_with = "as_seconds")]
    pub total_shift_time: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub total_break_time: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub net_work_time: Duration,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            shift_count: 0,
            total_shift_time: Duration::zero(),
            total_break_time: Duration::zero(),
            net_work_time: Duration::zero(),
        }
    }
}

impl Totals {
    pub fn add_shift(&mut self, shift: &Shift) {
        self.shift_count += 1;
        self.total_shift_time += shift.total_shift_time;
        self.total_break_time += shift.total_break_time;
        self.net_work_time += shift.net_work_time;
    }

    pub fn merge(&mut self, other: &Totals) {
        self.shift_count += other.shift_count;
        self.total_shift_time += other.total_shift_time;
        self.total_break_time += other.total_break_time;
        self.net_work_time += other.net_work_time;
    }

    pub fn is_zero(&self) -> bool {
        self.shift_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollingSummary {
    pub window_days: u32,
    pub evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: Totals,
}
