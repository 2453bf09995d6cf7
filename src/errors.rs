//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::stamp_type::StampType;
use chrono::{DateTime, Utc};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid stamp type: {0}")]
    InvalidStampType(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Attendance errors
    // ---------------------------
    #[error("Cannot {} now: last stamp is {}", .candidate.label(), last_label(.last))]
    IllegalTransition {
        candidate: StampType,
        last: Option<StampType>,
    },

    #[error("Stamp time {submitted} is not after the last accepted stamp at {last}")]
    NonMonotonicTime {
        submitted: DateTime<Utc>,
        last: DateTime<Utc>,
    },

    #[error("Corrupted event log: {0}")]
    CorruptedLog(String),

    #[error("Event log of user {0} changed while the stamp was being recorded")]
    ConcurrentUpdate(i64),

    #[error("Stamp rejected: {0}")]
    Rejected(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

fn last_label(last: &Option<StampType>) -> &'static str {
    match last {
        Some(kind) => kind.as_str(),
        None => "none",
    }
}

pub type AppResult<T> = Result<T, AppError>;
