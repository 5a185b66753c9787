use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::insert_event;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::ui::messages::success;
use crate::utils::time::{format_duration_secs, parse_duration_hms, parse_instant};

/// Handle `add`: schedule a new event.
///
/// The duration arrives as an "H:MM:SS"-shaped string from the scheduling
/// UI; malformed values are a validation failure, not a silent default.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        department,
        start,
        duration,
        venue,
    } = cmd
    {
        let scheduled_start = parse_instant(start)?;
        let duration_secs = parse_duration_hms(duration)?;

        let ev = Event::new(
            name.clone(),
            department.clone().unwrap_or_default(),
            scheduled_start,
            duration_secs,
            venue.clone().unwrap_or_default(),
        );

        let pool = DbPool::open(cfg)?;
        let id = insert_event(&pool.conn, &ev)?;

        oplog(
            &pool.conn,
            "add",
            &id.to_string(),
            &format!("event '{}' scheduled", name),
        )?;

        success(format!(
            "Event {} '{}' scheduled at {} for {} (status Upcoming).",
            id,
            name,
            start.trim(),
            format_duration_secs(duration_secs),
        ));
    }

    Ok(())
}
