use crate::core::ingest::IngestService;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ShiftExport, ensure_writable, write_csv, write_json};
use crate::models::event::UserId;
use chrono::{DateTime, Utc};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the user's shifts (open one included, evaluated at `now`).
    /// Returns the number of exported rows.
    pub fn export<S: EventStore>(
        service: &IngestService<S>,
        user_id: UserId,
        format: ExportFormat,
        file: &str,
        force: bool,
        time_format: &str,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let rows: Vec<ShiftExport> = service
            .shifts(user_id, now)?
            .iter()
            .map(|s| ShiftExport::from_shift(s, time_format))
            .collect();

        match format {
            ExportFormat::Csv => write_csv(path, &rows)?,
            ExportFormat::Json => write_json(path, &rows)?,
        }

        if let Err(e) = service.store().audit(
            "export",
            format.as_str(),
            &format!("{} shifts of user {} to {}", rows.len(), user_id, file),
        ) {
            log::warn!("failed to write audit line: {}", e);
        }

        Ok(rows.len())
    }
}
