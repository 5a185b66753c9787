use crate::core::ledger;
use crate::db::pool::DbPool;
use crate::db::queries::load_admission_window;
use crate::errors::AppResult;
use crate::export::model::AttendeeExport;
use crate::export::{ExportFormat, csv, json, notify_export_success};
use chrono::FixedOffset;
use std::path::Path;

/// High-level business logic for the `export` command.
pub struct ExportLogic;

impl ExportLogic {
    pub fn apply(
        pool: &mut DbPool,
        tz: FixedOffset,
        event_id: i64,
        format: &ExportFormat,
        file: &str,
    ) -> AppResult<()> {
        let entries = ledger::get_all_attendees(pool, event_id)?;
        let window = load_admission_window(&pool.conn)?;

        let rows: Vec<AttendeeExport> = entries
            .iter()
            .map(|e| AttendeeExport::from_entry(e, &window, tz))
            .collect();

        match format {
            ExportFormat::Csv => csv::write_csv(file, &rows)?,
            ExportFormat::Json => json::write_json(file, &rows)?,
        }

        notify_export_success(format.as_str().to_uppercase().as_str(), Path::new(file));
        Ok(())
    }
}
