use super::provenance::Provenance;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One attendance record per `(event_id, user_id)` pair.
///
/// Invariants (enforced by the ledger's conditional writes):
/// - `time_out` set ⇒ `time_in` set and `has_timed_out = true`
/// - `certificate_dispatched` flips false→true exactly once, together with
///   the first successful time-in
/// - entries are never deleted (audit record)
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    pub event_id: i64,                    // ⇔ attendance.event_id
    pub user_id: String,                  // ⇔ attendance.user_id
    pub time_in: Option<DateTime<Utc>>,   // ⇔ attendance.time_in (TEXT, RFC3339, nullable)
    pub time_out: Option<DateTime<Utc>>,  // ⇔ attendance.time_out (TEXT, RFC3339, nullable)
    pub has_timed_out: bool,              // ⇔ attendance.has_timed_out (INT 0/1)
    pub provenance: Provenance,           // ⇔ attendance.provenance ('qr'|'manual')
    pub certificate_dispatched: bool,     // ⇔ attendance.certificate_dispatched (INT 0/1)
    pub created_at: String,               // ⇔ attendance.created_at (TEXT, ISO8601)
}
