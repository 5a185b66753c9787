use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scheduler;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle `cancel`: terminal manual override of an event's status.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Cancel { event } = cmd {
        let mut pool = DbPool::open(cfg)?;
        let ev = scheduler::cancel(&mut pool, *event)?;

        success(format!(
            "Event {} '{}' is now {} (terminal).",
            ev.id,
            ev.name,
            ev.status.as_display()
        ));
    }

    Ok(())
}
