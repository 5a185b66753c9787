use super::event_status::EventStatus;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A scheduled event.
///
/// `scheduled_start` is an absolute instant stored in UTC; the configured
/// fixed timezone offset is applied only for display and for time-of-day
/// admission checks. The status column is mutated only by the scheduler
/// tick or by an explicit cancel action.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,          // ⇔ events.name (TEXT)
    pub department_id: String, // ⇔ events.department_id (TEXT)
    pub scheduled_start: DateTime<Utc>, // ⇔ events.scheduled_start (TEXT, RFC3339 UTC)
    pub duration_secs: i64,    // ⇔ events.duration_secs (INT, >= 0)
    pub status: EventStatus,   // ⇔ events.status ('upcoming'|'ongoing'|'ended'|'cancelled')
    pub venue: String,         // ⇔ events.venue (TEXT)
    pub created_at: String,    // ⇔ events.created_at (TEXT, ISO8601)
}

impl Event {
    /// High-level constructor for events created via the CLI.
    /// New events always start at `Upcoming`; `id` is assigned on insert.
    pub fn new(
        name: String,
        department_id: String,
        scheduled_start: DateTime<Utc>,
        duration_secs: i64,
        venue: String,
    ) -> Self {
        Self {
            id: 0,
            name,
            department_id,
            scheduled_start,
            duration_secs,
            status: EventStatus::Upcoming,
            venue,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// End of the scheduled window (inclusive for `Ongoing`).
    /// A zero duration collapses the window to the single start instant.
    pub fn window_end(&self) -> DateTime<Utc> {
        self.scheduled_start + Duration::seconds(self.duration_secs)
    }
}
