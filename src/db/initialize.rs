use crate::db::migrate::run_pending_migrations;
use crate::db::queries::seed_admission_window;
use crate::errors::AppResult;
use crate::models::admission_window::AdmissionWindow;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine, then
/// seeds the admission window singleton if no admin has configured one yet.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    seed_admission_window(conn, &AdmissionWindow::default())?;
    Ok(())
}
