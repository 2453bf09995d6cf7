#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use rattendance::models::event::TimestampEvent;
use rattendance::models::stamp_type::StampType;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{}-wal", db_path)).ok();
    fs::remove_file(format!("{}-shm", db_path)).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// "2025-09-01T08:00:00Z" → instant
pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid RFC3339 in test")
        .with_timezone(&Utc)
}

/// Build an already-accepted event without going through a store.
pub fn ev(id: i64, kind: StampType, rfc3339: &str) -> TimestampEvent {
    TimestampEvent {
        id,
        user_id: 1,
        stamp_type: kind,
        stamp_time: at(rfc3339),
        source: "test".to_string(),
        created_at: at(rfc3339),
    }
}

/// Scenario A: 08:00 in, 10:00-10:30 break, 16:00 out (UTC).
pub fn scenario_a() -> Vec<TimestampEvent> {
    vec![
        ev(1, StampType::SignIn, "2025-09-01T08:00:00Z"),
        ev(2, StampType::StartBreak, "2025-09-01T10:00:00Z"),
        ev(3, StampType::EndBreak, "2025-09-01T10:30:00Z"),
        ev(4, StampType::SignOut, "2025-09-01T16:00:00Z"),
    ]
}

/// Initialize DB and record one full shift via the CLI (local times).
pub fn init_db_with_shift(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (kind, time) in [
        ("sign-in", "2025-09-01 08:00"),
        ("start-break", "2025-09-01 12:00"),
        ("end-break", "2025-09-01 12:30"),
        ("sign-out", "2025-09-01 16:00"),
    ] {
        rti()
            .args(["--db", db_path, "stamp", kind, "--at", time])
            .assert()
            .success();
    }
}
