use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::scheduler::Scheduler;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, success};
use std::thread;
use std::time::Duration;

/// Handle `tick`: one reconciliation pass, or a watch loop on an interval.
/// A failed pass in watch mode is reported and retried on the next tick.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Tick { watch, interval } = cmd {
        let mut pool = DbPool::open(cfg)?;
        let scheduler = Scheduler::new();

        if !*watch {
            match scheduler.tick(&mut pool, clock.now_utc())? {
                Some(applied) => success(format!("Tick completed: {} transition(s).", applied)),
                None => success("Tick skipped: another pass in flight."),
            }
            return Ok(());
        }

        println!("▶ Watching events every {}s (Ctrl-C to stop)…", interval);
        loop {
            match scheduler.tick(&mut pool, clock.now_utc()) {
                Ok(Some(applied)) if applied > 0 => {
                    success(format!("Applied {} transition(s).", applied));
                }
                Ok(_) => {}
                Err(e) => error(format!("Tick failed (will retry): {}", e)),
            }
            thread::sleep(Duration::from_secs(*interval));
        }
    }

    Ok(())
}
