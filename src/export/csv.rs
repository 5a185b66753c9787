use crate::errors::{AppError, AppResult};
use crate::export::model::AttendeeExport;
use csv::Writer;

fn csv_err(e: csv::Error) -> AppError {
    AppError::Export(format!("CSV write failed: {e}"))
}

/// Write attendance rows as CSV to the given file.
pub fn write_csv(path: &str, rows: &[AttendeeExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(csv_err)?;

    wtr.write_record([
        "event_id",
        "user_id",
        "time_in",
        "time_out",
        "has_timed_out",
        "provenance",
        "late",
    ])
    .map_err(csv_err)?;

    for row in rows {
        wtr.write_record(&[
            row.event_id.to_string(),
            row.user_id.clone(),
            row.time_in.clone().unwrap_or_default(),
            row.time_out.clone().unwrap_or_default(),
            row.has_timed_out.to_string(),
            row.provenance.to_string(),
            row.late.to_string(),
        ])
        .map_err(csv_err)?;
    }

    wtr.flush()?;
    Ok(())
}
