//! Admission control: pure predicates over the live admission window.
//!
//! The window is admin-mutable out-of-band; `PolicyProvider::current`
//! reads the latest value on every check (last write wins). There is no
//! snapshot tied to a ledger transaction: a policy update landing between
//! the admission check and the ledger write can make a decision stale
//! before it commits. Accepted, documented trade-off.

use crate::db::queries::load_admission_window;
use crate::errors::AppResult;
use crate::models::admission_window::AdmissionWindow;
use chrono::NaiveTime;
use rusqlite::Connection;

/// Why an attendance action was refused by the admission window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedReason {
    BeforeDailyStart,
    InsideBreak,
    BeforeDailyEnd,
}

impl DeniedReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DeniedReason::BeforeDailyStart => "too early: before the daily start time",
            DeniedReason::InsideBreak => "inside the configured break window",
            DeniedReason::BeforeDailyEnd => "too early to time out: before the daily end time",
        }
    }
}

/// Time-in gate. Times at or after `daily_end` are deliberately admitted:
/// late arrivals remain permitted (business rule, not a bug).
pub fn check_time_in(w: &AdmissionWindow, t: NaiveTime) -> Option<DeniedReason> {
    if t < w.daily_start {
        return Some(DeniedReason::BeforeDailyStart);
    }
    if t >= w.break_start && t < w.break_end {
        return Some(DeniedReason::InsideBreak);
    }
    None
}

/// Time-out gate: rejected before the configured end-of-day, regardless of
/// the specific event's own schedule.
pub fn check_time_out(w: &AdmissionWindow, t: NaiveTime) -> Option<DeniedReason> {
    if t < w.daily_end {
        return Some(DeniedReason::BeforeDailyEnd);
    }
    None
}

pub fn is_late(w: &AdmissionWindow, t: NaiveTime) -> bool {
    t >= w.late_threshold
}

/// Source of the current admission window. Call sites depend on this trait
/// so tests can pin a fixed policy instead of the live one.
pub trait PolicyProvider {
    fn current(&self) -> AppResult<AdmissionWindow>;
}

/// Live policy backed by the singleton DB row; every call re-reads it.
pub struct DbPolicy {
    conn: Connection,
}

impl DbPolicy {
    pub fn open(db_path: &str) -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open(db_path)?,
        })
    }
}

impl PolicyProvider for DbPolicy {
    fn current(&self) -> AppResult<AdmissionWindow> {
        load_admission_window(&self.conn)
    }
}

/// A policy frozen at a given window, for tests and dry runs.
pub struct FixedPolicy(pub AdmissionWindow);

impl PolicyProvider for FixedPolicy {
    fn current(&self) -> AppResult<AdmissionWindow> {
        Ok(self.0)
    }
}
