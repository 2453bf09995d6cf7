// src/export/mod.rs

mod csv_writer;
mod fs_utils;
mod json_writer;

pub(crate) use self::csv_writer::write_csv;
pub(crate) use self::fs_utils::ensure_writable;
pub(crate) use self::json_writer::write_json;

use crate::models::shift::Shift;
use crate::utils::time::to_local_string;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat row used by every export format; durations in seconds.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ShiftExport {
    pub sign_in: String,
    pub sign_out: String,
    pub open: bool,
    pub breaks: usize,
    pub total_shift_seconds: i64,
    pub total_break_seconds: i64,
    pub net_work_seconds: i64,
}

impl ShiftExport {
    pub fn from_shift(shift: &Shift, time_format: &str) -> Self {
        Self {
            sign_in: to_local_string(&shift.sign_in, time_format),
            sign_out: shift
                .sign_out
                .map(|t| to_local_string(&t, time_format))
                .unwrap_or_default(),
            open: shift.is_open(),
            breaks: shift.breaks.len(),
            total_shift_seconds: shift.total_shift_time.num_seconds(),
            total_break_seconds: shift.total_break_time.num_seconds(),
            net_work_seconds: shift.net_work_time.num_seconds(),
        }
    }
}
