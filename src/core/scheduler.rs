//! Event lifecycle scheduling.
//!
//! `reconcile` is a pure time-window state machine: status is a function
//! of `(scheduled_start, duration, now)` alone, except for the terminal
//! `Cancelled` override. `tick` applies it to every active event and
//! persists only real transitions.

use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_active_events, load_event, mark_event_cancelled, update_event_status};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::event_status::EventStatus;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Recompute an event's status from the authoritative clock.
///
/// The window end is inclusive of `Ongoing`: the instant strictly after
/// `scheduled_start + duration` becomes `Ended`. A zero duration collapses
/// `Ongoing` to the single instant `scheduled_start`.
pub fn reconcile(
    scheduled_start: DateTime<Utc>,
    duration_secs: i64,
    current: EventStatus,
    now: DateTime<Utc>,
) -> EventStatus {
    if current.is_cancelled() {
        return EventStatus::Cancelled;
    }

    let window_end = scheduled_start + Duration::seconds(duration_secs);

    if now < scheduled_start {
        EventStatus::Upcoming
    } else if now <= window_end {
        EventStatus::Ongoing
    } else {
        EventStatus::Ended
    }
}

pub fn reconcile_event(ev: &Event, now: DateTime<Utc>) -> EventStatus {
    reconcile(ev.scheduled_start, ev.duration_secs, ev.status, now)
}

/// Runs the reconciliation tick. Overlapping ticks are coalesced: if a
/// previous pass is still in flight the new one is skipped, so a
/// transition is never applied twice.
pub struct Scheduler {
    in_flight: Mutex<()>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            in_flight: Mutex::new(()),
        }
    }

    /// One reconciliation pass over all non-terminal events.
    ///
    /// Returns `Some(n)` with the number of persisted transitions, or
    /// `None` when the pass was skipped because another one is running.
    /// A persistence error aborts the pass; the unapplied transitions are
    /// simply recomputed by the next tick.
    pub fn tick(&self, pool: &mut DbPool, now: DateTime<Utc>) -> AppResult<Option<usize>> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            return Ok(None);
        };

        let mut applied = 0;

        for ev in load_active_events(pool)? {
            let next = reconcile_event(&ev, now);
            if next == ev.status {
                continue; // no-op write suppressed
            }

            update_event_status(&pool.conn, ev.id, next)?;
            oplog(
                &pool.conn,
                "tick",
                &ev.id.to_string(),
                &format!("status {} → {}", ev.status.as_display(), next.as_display()),
            )?;
            applied += 1;
        }

        Ok(Some(applied))
    }
}

/// Explicit admin cancellation: immediate, unconditional, terminal.
/// Bypasses `reconcile`; later ticks never reconsider the event.
/// Returns the event as it stands after the cancel.
pub fn cancel(pool: &mut DbPool, event_id: i64) -> AppResult<Event> {
    // Existence check first so an unknown id is a lookup error,
    // not a silent no-op.
    let ev = load_event(&pool.conn, event_id)?;

    if mark_event_cancelled(&pool.conn, event_id)? {
        oplog(
            &pool.conn,
            "cancel",
            &event_id.to_string(),
            &format!("event '{}' cancelled", ev.name),
        )?;
    }

    load_event(&pool.conn, event_id)
}
