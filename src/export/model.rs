use crate::core::policy;
use crate::models::admission_window::AdmissionWindow;
use crate::models::attendance::AttendanceEntry;
use crate::utils::time::local_time_of_day;
use chrono::FixedOffset;
use serde::Serialize;

/// Flattened attendance row for reporting/export.
/// The `late` flag is derived against the live admission window at export
/// time; it is not stored on the entry.
#[derive(Debug, Serialize)]
pub struct AttendeeExport {
    pub event_id: i64,
    pub user_id: String,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub has_timed_out: bool,
    pub provenance: &'static str,
    pub late: bool,
}

impl AttendeeExport {
    pub fn from_entry(entry: &AttendanceEntry, window: &AdmissionWindow, tz: FixedOffset) -> Self {
        let late = entry
            .time_in
            .map(|t| policy::is_late(window, local_time_of_day(t, tz)))
            .unwrap_or(false);

        Self {
            event_id: entry.event_id,
            user_id: entry.user_id.clone(),
            time_in: entry.time_in.map(|t| t.to_rfc3339()),
            time_out: entry.time_out.map(|t| t.to_rfc3339()),
            has_timed_out: entry.has_timed_out,
            provenance: entry.provenance.to_db_str(),
            late,
        }
    }
}
