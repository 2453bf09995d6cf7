use super::ShiftExport;
use crate::errors::{AppError, AppResult};
use csv::Writer;
use std::path::Path;

/// Scrive i turni in CSV nel file indicato.
pub fn write_csv(path: &Path, rows: &[ShiftExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
