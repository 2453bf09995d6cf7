use rattendance::config::Config;
use rattendance::core::log::LogLogic;
use rattendance::db::log::LogEntry;
use rattendance::utils::format_duration;
use rattendance::errors::AppError;
use rattendance::utils::time::{parse_stamp_time, to_local_string};
use chrono::{Duration, Local, TimeZone, Utc};

mod common;
use common::at;

#[test]
fn test_partial_config_uses_defaults() {
    let cfg = Config::from_yaml("database: /tmp/att.sqlite\ndefault_user: 42\n").unwrap();
    assert_eq!(cfg.database, "/tmp/att.sqlite");
    assert_eq!(cfg.default_user, 42);
    assert_eq!(cfg.summary_window_days, 7);
    assert!(cfg.include_open_shift);
    assert_eq!(cfg.time_format, "%Y-%m-%d %H:%M");
    assert_eq!(cfg.source, "cli");
}

#[test]
fn test_config_tilde_is_expanded() {
    let cfg = Config::from_yaml("database: ~/att.sqlite\n").unwrap();
    if let Some(home) = dirs::home_dir() {
        assert_eq!(
            cfg.database,
            home.join("att.sqlite").to_string_lossy().to_string()
        );
    }
}

#[test]
fn test_config_yaml_is_readable_back() {
    let cfg = Config {
        include_open_shift: false,
        summary_window_days: 30,
        ..Config::default()
    };
    let back = Config::from_yaml(&cfg.to_yaml().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_missing_config_file_gives_defaults() {
    let path = std::env::temp_dir().join("rattendance_missing_config.conf");
    std::fs::remove_file(&path).ok();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_broken_config_file_is_an_error() {
    let path = std::env::temp_dir().join("rattendance_broken_config.conf");
    std::fs::write(&path, "default_user: [not a number").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_out_of_range_window_is_rejected() {
    for yaml in ["summary_window_days: 4000000000\n", "summary_window_days: 0\n"] {
        match Config::from_yaml(yaml) {
            Err(AppError::Config(msg)) => assert!(msg.contains("summary_window_days")),
            other => panic!("expected a config error for {:?}, got {:?}", yaml, other),
        }
    }
    assert_eq!(
        Config::from_yaml("summary_window_days: 3660\n")
            .unwrap()
            .summary_window_days,
        3660
    );
}

#[test]
fn test_invalid_time_format_is_rejected() {
    match Config::from_yaml("time_format: \"%Q\"\n") {
        Err(AppError::Config(msg)) => assert!(msg.contains("%Q")),
        other => panic!("expected a config error, got {:?}", other),
    }
    assert!(Config::from_yaml("time_format: \"%d/%m %H:%M\"\n").is_ok());
}

#[test]
fn test_config_file_errors_name_the_file() {
    let path = std::env::temp_dir().join("rattendance_bad_format.conf");
    std::fs::write(&path, "time_format: \"%Q\"\n").unwrap();
    match Config::load_from(&path) {
        Err(AppError::Config(msg)) => assert!(msg.contains("rattendance_bad_format.conf")),
        other => panic!("expected a config error, got {:?}", other),
    }
}

#[test]
fn test_local_string_with_bad_format_does_not_panic() {
    let t = at("2025-09-01T08:00:00Z");
    let rendered = to_local_string(&t, "%Q");
    assert!(rendered.starts_with("2025-09-01T") || rendered.starts_with("2025-08-31T"));
}

#[test]
fn test_parse_stamp_time_forms() {
    let now = at("2025-09-01T12:34:56Z");

    assert_eq!(parse_stamp_time("now", now).unwrap(), now);
    assert_eq!(
        parse_stamp_time("2025-09-01T08:00:00+02:00", now).unwrap(),
        at("2025-09-01T06:00:00Z")
    );

    let local = Local
        .with_ymd_and_hms(2025, 9, 1, 8, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(parse_stamp_time("2025-09-01 08:00", now).unwrap(), local);
    assert_eq!(parse_stamp_time("2025-09-01T08:00", now).unwrap(), local);

    assert!(parse_stamp_time("yesterday", now).is_err());
    assert!(parse_stamp_time("25:00", now).is_err());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(&Duration::minutes(450)), "07h 30m");
    assert_eq!(format_duration(&Duration::zero()), "00h 00m");
    assert_eq!(format_duration(&Duration::minutes(-90)), "-01h 30m");
}

#[test]
fn test_log_render_truncates_long_targets() {
    let entries = vec![
        LogEntry {
            id: 1,
            date: "2025-09-01T08:00:00+00:00".to_string(),
            operation: "stamp".to_string(),
            target: "user 1".to_string(),
            message: "sign-in at 2025-09-01T08:00:00+00:00".to_string(),
        },
        LogEntry {
            id: 2,
            date: "2025-09-01T09:00:00+00:00".to_string(),
            operation: "export".to_string(),
            target: "x".repeat(60),
            message: "1 shifts".to_string(),
        },
    ];

    let lines = LogLogic::render(&entries);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("sign-in at"));
    assert!(lines[1].contains("..."));
    assert!(!lines[1].contains(&"x".repeat(60)));
}
