use super::ShiftExport;
use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Scrive i turni in JSON formattato.
pub fn write_json(path: &Path, rows: &[ShiftExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
