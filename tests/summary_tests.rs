use chrono::{Duration, NaiveDate};
use rattendance::core::calculator::summary::{
    OpenShiftPolicy, daily_breakdown, rolling_summary, window_start,
};
use rattendance::core::calculator::timeline::build_timeline;
use rattendance::models::event::TimestampEvent;
use rattendance::models::shift::{Shift, Totals};
use rattendance::models::stamp_type::StampType::*;

mod common;
use common::{at, ev};

/// One shift per day from 2025-09-01 to 2025-09-07, 08:00-16:00 UTC with a
/// day-dependent break, plus a leave marker.
fn week() -> Vec<TimestampEvent> {
    let mut events = Vec::new();
    let mut id = 0;
    let mut push = |kind, t: String| {
        id += 1;
        events.push(ev(id, kind, &t));
    };
    for day in 1..=7 {
        push(SignIn, format!("2025-09-0{day}T08:00:00Z"));
        push(StartBreak, format!("2025-09-0{day}T12:00:00Z"));
        push(EndBreak, format!("2025-09-0{day}T12:{:02}:00Z", day * 5));
        push(SignOut, format!("2025-09-0{day}T16:00:00Z"));
    }
    push(RegisterLeave, "2025-09-07T18:00:00Z".to_string());
    events
}

fn week_shifts() -> Vec<Shift> {
    build_timeline(&week())
        .unwrap()
        .shifts_at(at("2025-09-08T00:00:00Z"))
}

#[test]
fn test_seven_day_summary_is_sum_of_daily_summaries() {
    let shifts = week_shifts();
    let now = at("2025-09-08T00:00:00Z");

    let weekly = rolling_summary(&shifts, 7, now, OpenShiftPolicy::Include);

    let mut summed = Totals::default();
    for k in 0..7 {
        let day = rolling_summary(&shifts, 1, now - Duration::days(k), OpenShiftPolicy::Include);
        summed.merge(&day.totals);
    }

    assert_eq!(weekly.totals, summed);
    assert_eq!(weekly.totals.shift_count, 7);
    assert_eq!(weekly.totals.total_shift_time, Duration::hours(56));
    // 5 + 10 + ... + 35 minutes
    assert_eq!(weekly.totals.total_break_time, Duration::minutes(140));
    assert_eq!(
        weekly.totals.net_work_time,
        weekly.totals.total_shift_time - weekly.totals.total_break_time
    );
}

#[test]
fn test_window_bounds() {
    let shifts = week_shifts();

    // sign-in exactly at now - 1 day is inside
    let s = rolling_summary(&shifts, 1, at("2025-09-03T08:00:00Z"), OpenShiftPolicy::Include);
    assert_eq!(s.totals.shift_count, 1);
    assert_eq!(s.totals.total_break_time, Duration::minutes(10));

    // sign-in exactly at now is outside
    let s = rolling_summary(&shifts, 1, at("2025-09-02T08:00:00Z"), OpenShiftPolicy::Include);
    assert_eq!(s.totals.total_break_time, Duration::minutes(5));

    assert_eq!(
        window_start(7, at("2025-09-08T00:00:00Z")),
        at("2025-09-01T00:00:00Z")
    );
}

#[test]
fn test_shifts_outside_window_are_ignored() {
    let shifts = week_shifts();
    let s = rolling_summary(&shifts, 7, at("2025-10-01T00:00:00Z"), OpenShiftPolicy::Include);
    assert!(s.totals.is_zero());
    assert_eq!(s.totals.net_work_time, Duration::zero());
    assert_eq!(s.window_days, 7);
}

#[test]
fn test_window_start_saturates() {
    let now = at("2025-09-08T00:00:00Z");
    assert_eq!(window_start(u32::MAX, now), chrono::DateTime::<chrono::Utc>::MIN_UTC);

    let s = rolling_summary(&week_shifts(), u32::MAX, now, OpenShiftPolicy::Include);
    assert_eq!(s.totals.shift_count, 7);
}

#[test]
fn test_shift_signed_in_at_now_is_not_counted_yet() {
    let events = vec![ev(1, SignIn, "2025-09-01T08:00:00Z")];
    let now = at("2025-09-01T08:00:00Z");
    let shifts = build_timeline(&events).unwrap().shifts_at(now);
    let s = rolling_summary(&shifts, 1, now, OpenShiftPolicy::Include);
    assert!(s.totals.is_zero());
}

#[test]
fn test_open_shift_policy() {
    let events = vec![
        ev(1, SignIn, "2025-09-01T08:00:00Z"),
        ev(2, SignOut, "2025-09-01T12:00:00Z"),
        ev(3, SignIn, "2025-09-01T13:00:00Z"),
    ];
    let now = at("2025-09-01T15:00:00Z");
    let shifts = build_timeline(&events).unwrap().shifts_at(now);

    let included = rolling_summary(&shifts, 1, now, OpenShiftPolicy::Include);
    assert_eq!(included.totals.shift_count, 2);
    assert_eq!(included.totals.total_shift_time, Duration::hours(6));

    let excluded = rolling_summary(&shifts, 1, now, OpenShiftPolicy::Exclude);
    assert_eq!(excluded.totals.shift_count, 1);
    assert_eq!(excluded.totals.total_shift_time, Duration::hours(4));

    assert_eq!(OpenShiftPolicy::from_flag(false), OpenShiftPolicy::Exclude);
}

#[test]
fn test_daily_breakdown_groups_by_sign_in_day() {
    let shifts = week_shifts();
    let now = at("2025-09-08T00:00:00Z");

    let days = daily_breakdown(&shifts, 3, now, OpenShiftPolicy::Include);
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
        ]
    );

    let mut total = Totals::default();
    for d in &days {
        assert_eq!(d.totals.shift_count, 1);
        total.merge(&d.totals);
    }
    assert_eq!(
        total,
        rolling_summary(&shifts, 3, now, OpenShiftPolicy::Include).totals
    );
}

#[test]
fn test_summary_serializes_durations_as_seconds() {
    let shifts = week_shifts();
    let s = rolling_summary(&shifts, 1, at("2025-09-08T00:00:00Z"), OpenShiftPolicy::Include);
    let json = serde_json::to_value(&s).unwrap();

    assert_eq!(json["window_days"], 1);
    assert_eq!(json["shift_count"], 1);
    assert_eq!(json["total_shift_time"], 8 * 3600);
    assert_eq!(json["total_break_time"], 35 * 60);
}
