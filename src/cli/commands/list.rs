use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::list_events;
use crate::errors::{AppError, AppResult};
use crate::models::event_status::EventStatus;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;
use crate::utils::time::{format_duration_secs, format_instant};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { status } = cmd {
        let filter = match status {
            Some(s) => Some(
                EventStatus::from_db_str(&s.to_lowercase())
                    .ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
            ),
            None => None,
        };

        let tz = cfg.tz()?;
        let mut pool = DbPool::open(cfg)?;
        let events = list_events(&mut pool, filter)?;

        if events.is_empty() {
            info("No events found.");
            return Ok(());
        }

        header("Events");

        let mut table = Table::new(&["ID", "NAME", "START", "DURATION", "STATUS", "VENUE"]);
        for ev in &events {
            table.add_row(vec![
                ev.id.to_string(),
                ev.name.clone(),
                format_instant(ev.scheduled_start, tz),
                format_duration_secs(ev.duration_secs),
                ev.status.as_display().to_string(),
                ev.venue.clone(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
