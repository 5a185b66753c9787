//! The attendance ledger: system of record for per-(event, user)
//! attendance. At-most-one time-in and a well-ordered time-out are
//! guaranteed by conditional writes against the store (see db::queries),
//! so QR self-scans and admin manual actions racing on the same key yield
//! exactly one `Created`.

use crate::core::dispatch::DispatchQueue;
use crate::core::policy::{self, DeniedReason, PolicyProvider};
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_attendees, load_attendees, load_event, try_insert_time_in, try_set_time_out};
use crate::errors::AppResult;
use crate::models::attendance::AttendanceEntry;
use crate::models::provenance::Provenance;
use crate::utils::time::local_time_of_day;
use chrono::{DateTime, FixedOffset, Utc};

/// Outcome of a time-in action. All three are expected business results,
/// not failures: callers branch, they don't bail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInOutcome {
    /// First time-in for this pair; the certificate signal was scheduled.
    Created { late: bool },
    /// Idempotent no-op: a time-in already exists, nothing dispatched.
    AlreadyPresent,
    AdmissionDenied(DeniedReason),
}

/// Outcome of a time-out action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOutOutcome {
    Updated,
    /// No prior time-in (or already timed out) for this pair.
    NotTimedIn,
    AdmissionDenied(DeniedReason),
}

/// Record a time-in for `(event_id, user_id)`.
///
/// Order matters: the admission gate is consulted before any storage is
/// touched, and the certificate trigger fires only for the call that won
/// the conditional write.
pub fn record_time_in(
    pool: &mut DbPool,
    policy: &dyn PolicyProvider,
    tz: FixedOffset,
    dispatch: &DispatchQueue,
    event_id: i64,
    user_id: &str,
    provenance: Provenance,
    now: DateTime<Utc>,
) -> AppResult<TimeInOutcome> {
    // Unknown event is a lookup failure, not an outcome.
    load_event(&pool.conn, event_id)?;

    let window = policy.current()?;
    let tod = local_time_of_day(now, tz);

    if let Some(reason) = policy::check_time_in(&window, tod) {
        return Ok(TimeInOutcome::AdmissionDenied(reason));
    }

    if !try_insert_time_in(&pool.conn, event_id, user_id, provenance, now)? {
        return Ok(TimeInOutcome::AlreadyPresent);
    }

    // First successful time-in: schedule the certificate signal. The
    // attendance row is already committed; dispatch cannot undo it.
    dispatch.fire(event_id, user_id);

    oplog(
        &pool.conn,
        "timein",
        &format!("{}/{}", event_id, user_id),
        &format!("time-in recorded ({})", provenance.as_display()),
    )?;

    Ok(TimeInOutcome::Created {
        late: policy::is_late(&window, tod),
    })
}

/// Record a time-out for `(event_id, user_id)`.
pub fn record_time_out(
    pool: &mut DbPool,
    policy: &dyn PolicyProvider,
    tz: FixedOffset,
    event_id: i64,
    user_id: &str,
    provenance: Provenance,
    now: DateTime<Utc>,
) -> AppResult<TimeOutOutcome> {
    load_event(&pool.conn, event_id)?;

    let window = policy.current()?;
    let tod = local_time_of_day(now, tz);

    if let Some(reason) = policy::check_time_out(&window, tod) {
        return Ok(TimeOutOutcome::AdmissionDenied(reason));
    }

    if !try_set_time_out(&pool.conn, event_id, user_id, now)? {
        return Ok(TimeOutOutcome::NotTimedIn);
    }

    oplog(
        &pool.conn,
        "timeout",
        &format!("{}/{}", event_id, user_id),
        &format!("time-out recorded ({})", provenance.as_display()),
    )?;

    Ok(TimeOutOutcome::Updated)
}

/// One page of an event's attendance entries, stable user order.
pub fn get_attendees(
    pool: &mut DbPool,
    event_id: i64,
    page: usize,
    page_size: usize,
) -> AppResult<Vec<AttendanceEntry>> {
    load_event(&pool.conn, event_id)?;
    let offset = page.saturating_sub(1) * page_size;
    load_attendees(pool, event_id, page_size, offset)
}

/// Every attendance entry for an event (export path).
pub fn get_all_attendees(pool: &mut DbPool, event_id: i64) -> AppResult<Vec<AttendanceEntry>> {
    load_event(&pool.conn, event_id)?;
    load_all_attendees(pool, event_id)
}
