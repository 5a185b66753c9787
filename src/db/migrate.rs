//! Schema creation and upgrades.
//!
//! All checks are structural (table/column existence), so running the
//! migrations twice is a no-op. The one real upgrade normalizes the legacy
//! attendance shape (`timestamp` / `time_out_timestamp` columns) into the
//! canonical `time_in` / `time_out` schema, so no read site ever has to
//! branch on record shape.

use crate::ui::messages::warning;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the internal `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `events` table with the modern schema.
fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            department_id   TEXT NOT NULL DEFAULT '',
            scheduled_start TEXT NOT NULL,
            duration_secs   INTEGER NOT NULL DEFAULT 0 CHECK(duration_secs >= 0),
            status          TEXT NOT NULL DEFAULT 'upcoming'
                            CHECK(status IN ('upcoming','ongoing','ended','cancelled')),
            venue           TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_status ON events(status);
        "#,
    )?;
    Ok(())
}

/// Create the `attendance` table keyed by the composite `(event_id, user_id)`.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            event_id               INTEGER NOT NULL,
            user_id                TEXT NOT NULL,
            time_in                TEXT,
            time_out               TEXT,
            has_timed_out          INTEGER NOT NULL DEFAULT 0,
            provenance             TEXT NOT NULL DEFAULT 'qr'
                                   CHECK(provenance IN ('qr','manual')),
            certificate_dispatched INTEGER NOT NULL DEFAULT 0,
            created_at             TEXT NOT NULL,
            PRIMARY KEY (event_id, user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_event ON attendance(event_id);
        "#,
    )?;
    Ok(())
}

/// Create the singleton `admission_window` table (row id fixed at 1).
fn create_admission_window_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS admission_window (
            id             INTEGER PRIMARY KEY CHECK(id = 1),
            daily_start    TEXT NOT NULL,
            daily_end      TEXT NOT NULL,
            late_threshold TEXT NOT NULL,
            break_start    TEXT NOT NULL,
            break_end      TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `certificate_outbox` table: one row per fired dispatch signal,
/// consumed by the external certificate/notification service.
fn create_outbox_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS certificate_outbox (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id  INTEGER NOT NULL,
            user_id   TEXT NOT NULL,
            queued_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Migrate a legacy `attendance` table that still carries the old
/// `timestamp` / `time_out_timestamp` columns. The table is rebuilt once
/// into the canonical shape; afterwards only `time_in` / `time_out` exist.
fn migrate_legacy_attendance_shape(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "attendance")? {
        return Ok(());
    }

    if !table_has_column(conn, "attendance", "timestamp")? {
        return Ok(()); // already canonical
    }

    warning("Normalizing legacy attendance records...");

    // The legacy table came in more than one shape; pick source expressions
    // from the columns that actually exist.
    let time_in_expr = if table_has_column(conn, "attendance", "time_in")? {
        "COALESCE(time_in, timestamp)"
    } else {
        "timestamp"
    };
    let time_out_expr = if table_has_column(conn, "attendance", "time_out_timestamp")? {
        "time_out_timestamp"
    } else if table_has_column(conn, "attendance", "time_out")? {
        "time_out"
    } else {
        "NULL"
    };
    let provenance_expr = if table_has_column(conn, "attendance", "provenance")? {
        "COALESCE(provenance, 'qr')"
    } else {
        "'qr'"
    };
    let dispatched_expr = if table_has_column(conn, "attendance", "certificate_dispatched")? {
        "COALESCE(certificate_dispatched, 1)"
    } else {
        "1"
    };
    let created_at_expr = if table_has_column(conn, "attendance", "created_at")? {
        "COALESCE(created_at, timestamp, '')"
    } else {
        "COALESCE(timestamp, '')"
    };

    conn.execute_batch(&format!(
        r#"
        PRAGMA foreign_keys=OFF;
        BEGIN;

        ALTER TABLE attendance RENAME TO attendance_old;

        CREATE TABLE attendance (
            event_id               INTEGER NOT NULL,
            user_id                TEXT NOT NULL,
            time_in                TEXT,
            time_out               TEXT,
            has_timed_out          INTEGER NOT NULL DEFAULT 0,
            provenance             TEXT NOT NULL DEFAULT 'qr'
                                   CHECK(provenance IN ('qr','manual')),
            certificate_dispatched INTEGER NOT NULL DEFAULT 0,
            created_at             TEXT NOT NULL,
            PRIMARY KEY (event_id, user_id)
        );

        INSERT INTO attendance (event_id, user_id, time_in, time_out,
                                has_timed_out, provenance,
                                certificate_dispatched, created_at)
        SELECT event_id,
               user_id,
               {time_in_expr},
               {time_out_expr},
               CASE WHEN {time_out_expr} IS NULL THEN 0 ELSE 1 END,
               {provenance_expr},
               {dispatched_expr},
               {created_at_expr}
        FROM attendance_old;

        DROP TABLE attendance_old;

        CREATE INDEX IF NOT EXISTS idx_attendance_event ON attendance(event_id);

        COMMIT;
        PRAGMA foreign_keys=ON;
        "#
    ))?;

    Ok(())
}

/// Run every pending migration in order.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    migrate_legacy_attendance_shape(conn)?;
    create_events_table(conn)?;
    create_attendance_table(conn)?;
    create_admission_window_table(conn)?;
    create_outbox_table(conn)?;
    Ok(())
}
