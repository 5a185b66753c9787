use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;
use crate::utils::time::format_instant;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attendees { event, page } = cmd {
        let tz = cfg.tz()?;
        let page = page.unwrap_or(1).max(1);

        let mut pool = DbPool::open(cfg)?;
        let entries = ledger::get_attendees(&mut pool, *event, page, cfg.page_size)?;

        if entries.is_empty() {
            info(format!("No attendance entries on page {} for event {}.", page, event));
            return Ok(());
        }

        header(format!("Attendees of event {} (page {})", event, page));

        let mut table = Table::new(&["USER", "TIME IN", "TIME OUT", "OUT?", "VIA"]);
        for entry in &entries {
            table.add_row(vec![
                entry.user_id.clone(),
                entry
                    .time_in
                    .map(|t| format_instant(t, tz))
                    .unwrap_or_default(),
                entry
                    .time_out
                    .map(|t| format_instant(t, tz))
                    .unwrap_or_default(),
                if entry.has_timed_out { "yes" } else { "no" }.to_string(),
                entry.provenance.as_display().to_string(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
