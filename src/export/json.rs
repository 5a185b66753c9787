use crate::errors::{AppError, AppResult};
use crate::export::model::AttendeeExport;
use std::fs;

/// Write attendance rows as pretty-printed JSON to the given file.
pub fn write_json(path: &str, rows: &[AttendeeExport]) -> AppResult<()> {
    let body = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization failed: {e}")))?;
    fs::write(path, body)?;
    Ok(())
}
