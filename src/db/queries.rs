use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::admission_window::AdmissionWindow;
use crate::models::attendance::AttendanceEntry;
use crate::models::event::Event;
use crate::models::event_status::EventStatus;
use crate::models::provenance::Provenance;
use crate::utils::time::parse_time;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conv_err(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_instant_col(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conv_err(AppError::InvalidDate(s.to_string())))
}

// ---------------------------------------------------------------
// Row mappers — the single storage-boundary adapters. Every read
// goes through these; no call site branches on record shape.
// ---------------------------------------------------------------

pub fn map_event_row(row: &Row) -> Result<Event> {
    let start_str: String = row.get("scheduled_start")?;
    let scheduled_start = parse_instant_col(&start_str)?;

    let status_str: String = row.get("status")?;
    let status = EventStatus::from_db_str(&status_str)
        .ok_or_else(|| conv_err(AppError::InvalidStatus(status_str.clone())))?;

    Ok(Event {
        id: row.get("id")?,
        name: row.get("name")?,
        department_id: row.get("department_id")?,
        scheduled_start,
        duration_secs: row.get("duration_secs")?,
        status,
        venue: row.get("venue")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_attendance_row(row: &Row) -> Result<AttendanceEntry> {
    let time_in: Option<String> = row.get("time_in")?;
    let time_out: Option<String> = row.get("time_out")?;

    let time_in = match time_in {
        Some(s) => Some(parse_instant_col(&s)?),
        None => None,
    };
    let time_out = match time_out {
        Some(s) => Some(parse_instant_col(&s)?),
        None => None,
    };

    let prov_str: String = row.get("provenance")?;
    let provenance = Provenance::from_db_str(&prov_str)
        .ok_or_else(|| conv_err(AppError::InvalidProvenance(prov_str.clone())))?;

    Ok(AttendanceEntry {
        event_id: row.get("event_id")?,
        user_id: row.get("user_id")?,
        time_in,
        time_out,
        has_timed_out: row.get::<_, i32>("has_timed_out")? == 1,
        provenance,
        certificate_dispatched: row.get::<_, i32>("certificate_dispatched")? == 1,
        created_at: row.get("created_at")?,
    })
}

// ---------------------------------------------------------------
// Events
// ---------------------------------------------------------------

/// Insert a new event and return its assigned id.
pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (name, department_id, scheduled_start, duration_secs, status, venue, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            ev.name,
            ev.department_id,
            ev.scheduled_start.to_rfc3339(),
            ev.duration_secs,
            ev.status.to_db_str(),
            ev.venue,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Event> {
    let mut stmt = conn.prepare("SELECT * FROM events WHERE id = ?1")?;
    stmt.query_row([id], map_event_row)
        .optional()?
        .ok_or(AppError::EventNotFound(id))
}

/// All events the scheduler still has to look at. Terminal events
/// (ended, cancelled) are retired from the active set permanently.
pub fn load_active_events(pool: &mut DbPool) -> AppResult<Vec<Event>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM events
         WHERE status NOT IN ('ended','cancelled')
         ORDER BY scheduled_start ASC",
    )?;

    let rows = stmt.query_map([], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_events(pool: &mut DbPool, status: Option<EventStatus>) -> AppResult<Vec<Event>> {
    let mut out = Vec::new();

    match status {
        Some(st) => {
            let mut stmt = pool.conn.prepare(
                "SELECT * FROM events WHERE status = ?1 ORDER BY scheduled_start ASC",
            )?;
            let rows = stmt.query_map([st.to_db_str()], map_event_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = pool
                .conn
                .prepare("SELECT * FROM events ORDER BY scheduled_start ASC")?;
            let rows = stmt.query_map([], map_event_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Persist a status transition computed by the scheduler.
pub fn update_event_status(conn: &Connection, id: i64, status: EventStatus) -> AppResult<()> {
    conn.execute(
        "UPDATE events SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )?;
    Ok(())
}

/// Terminal manual override: unconditional, bypasses reconciliation.
/// Returns false if the event was already cancelled.
pub fn mark_event_cancelled(conn: &Connection, id: i64) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE events SET status = 'cancelled' WHERE id = ?1 AND status != 'cancelled'",
        [id],
    )?;
    Ok(changed == 1)
}

// ---------------------------------------------------------------
// Attendance — conditional writes
//
// Per-(event_id,user_id) exclusion is enforced by the store, not by an
// in-process lock: "set time_in only if currently null". Exactly one of
// two racing writers observes a changed row.
// ---------------------------------------------------------------

/// Conditionally record a first time-in. Returns true when this call
/// created the attendance fact (and therefore owns the dispatch signal).
pub fn try_insert_time_in(
    conn: &Connection,
    event_id: i64,
    user_id: &str,
    provenance: Provenance,
    now: DateTime<Utc>,
) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT INTO attendance
             (event_id, user_id, time_in, time_out, has_timed_out,
              provenance, certificate_dispatched, created_at)
         VALUES (?1, ?2, ?3, NULL, 0, ?4, 1, ?3)
         ON CONFLICT(event_id, user_id) DO UPDATE SET
             time_in = excluded.time_in,
             provenance = excluded.provenance,
             certificate_dispatched = 1
         WHERE attendance.time_in IS NULL",
        params![event_id, user_id, now.to_rfc3339(), provenance.to_db_str()],
    )?;
    Ok(changed == 1)
}

/// Conditionally record a time-out: requires a prior time-in and no
/// earlier time-out. Returns true when the row was updated.
pub fn try_set_time_out(
    conn: &Connection,
    event_id: i64,
    user_id: &str,
    now: DateTime<Utc>,
) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE attendance
         SET time_out = ?3, has_timed_out = 1
         WHERE event_id = ?1 AND user_id = ?2
           AND time_in IS NOT NULL AND has_timed_out = 0",
        params![event_id, user_id, now.to_rfc3339()],
    )?;
    Ok(changed == 1)
}

/// One page of attendance entries for an event, in stable user order.
/// Read-only: no locking.
pub fn load_attendees(
    pool: &mut DbPool,
    event_id: i64,
    limit: usize,
    offset: usize,
) -> AppResult<Vec<AttendanceEntry>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM attendance
         WHERE event_id = ?1
         ORDER BY user_id ASC
         LIMIT ?2 OFFSET ?3",
    )?;

    let rows = stmt.query_map(
        params![event_id, limit as i64, offset as i64],
        map_attendance_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_attendees(pool: &mut DbPool, event_id: i64) -> AppResult<Vec<AttendanceEntry>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM attendance WHERE event_id = ?1 ORDER BY user_id ASC",
    )?;

    let rows = stmt.query_map([event_id], map_attendance_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// Admission window (singleton row, id = 1)
// ---------------------------------------------------------------

fn map_window_row(row: &Row) -> Result<AdmissionWindow> {
    let get_time = |col: &str| -> Result<chrono::NaiveTime> {
        let s: String = row.get(col)?;
        parse_time(&s).ok_or_else(|| conv_err(AppError::InvalidTime(s.clone())))
    };

    Ok(AdmissionWindow {
        daily_start: get_time("daily_start")?,
        daily_end: get_time("daily_end")?,
        late_threshold: get_time("late_threshold")?,
        break_start: get_time("break_start")?,
        break_end: get_time("break_end")?,
    })
}

/// Read the latest admission window. Every admission check calls this:
/// there is no cached snapshot, last write wins.
pub fn load_admission_window(conn: &Connection) -> AppResult<AdmissionWindow> {
    let mut stmt = conn.prepare_cached("SELECT * FROM admission_window WHERE id = 1")?;
    stmt.query_row([], map_window_row)
        .optional()?
        .ok_or_else(|| AppError::Config("admission window not initialized (run init)".into()))
}

pub fn save_admission_window(conn: &Connection, w: &AdmissionWindow) -> AppResult<()> {
    conn.execute(
        "INSERT INTO admission_window
             (id, daily_start, daily_end, late_threshold, break_start, break_end, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
             daily_start = excluded.daily_start,
             daily_end = excluded.daily_end,
             late_threshold = excluded.late_threshold,
             break_start = excluded.break_start,
             break_end = excluded.break_end,
             updated_at = excluded.updated_at",
        params![
            w.daily_start.format("%H:%M").to_string(),
            w.daily_end.format("%H:%M").to_string(),
            w.late_threshold.format("%H:%M").to_string(),
            w.break_start.format("%H:%M").to_string(),
            w.break_end.format("%H:%M").to_string(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Seed the singleton on first init; never overwrites an admin's values.
pub fn seed_admission_window(conn: &Connection, w: &AdmissionWindow) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO admission_window
             (id, daily_start, daily_end, late_threshold, break_start, break_end, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            w.daily_start.format("%H:%M").to_string(),
            w.daily_end.format("%H:%M").to_string(),
            w.late_threshold.format("%H:%M").to_string(),
            w.break_start.format("%H:%M").to_string(),
            w.break_end.format("%H:%M").to_string(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

// ---------------------------------------------------------------
// Certificate outbox + internal log
// ---------------------------------------------------------------

pub fn insert_outbox_row(conn: &Connection, event_id: i64, user_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO certificate_outbox (event_id, user_id, queued_at)
         VALUES (?1, ?2, ?3)",
        params![event_id, user_id, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn load_log(pool: &mut DbPool) -> Result<Vec<(String, String, String)>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT date, operation, message FROM log ORDER BY date DESC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}
