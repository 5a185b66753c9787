use chrono::NaiveTime;
use serde::Serialize;

/// Institution-wide daily time-of-day rules gating attendance actions,
/// independent of any specific event's schedule. Stored as a singleton row
/// and mutated out-of-band by an admin; every check reads the latest value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AdmissionWindow {
    pub daily_start: NaiveTime,    // ⇔ admission_window.daily_start ("HH:MM")
    pub daily_end: NaiveTime,      // ⇔ admission_window.daily_end
    pub late_threshold: NaiveTime, // ⇔ admission_window.late_threshold
    pub break_start: NaiveTime,    // ⇔ admission_window.break_start
    pub break_end: NaiveTime,      // ⇔ admission_window.break_end
}

impl Default for AdmissionWindow {
    fn default() -> Self {
        // Seed values written by `init`; admins adjust them via `policy set`.
        Self {
            daily_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            daily_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            late_threshold: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            break_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            break_end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        }
    }
}
