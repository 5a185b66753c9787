use serde::Serialize;

/// Lifecycle status of an event.
///
/// `Upcoming`, `Ongoing` and `Ended` are derived purely from the clock
/// versus the scheduled window. `Cancelled` is a manual terminal override:
/// once set, the scheduler never recomputes the event again.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Ended,
    Cancelled,
}

impl EventStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Ended => "ended",
            EventStatus::Cancelled => "cancelled",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "upcoming" => Some(EventStatus::Upcoming),
            "ongoing" => Some(EventStatus::Ongoing),
            "ended" => Some(EventStatus::Ended),
            "cancelled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }

    /// Display string exposed to collaborators (UI filtering and export).
    pub fn as_display(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Ended => "Ended",
            EventStatus::Cancelled => "Cancelled",
        }
    }

    /// The scheduler never transitions out of a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Ended | EventStatus::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, EventStatus::Cancelled)
    }
}
