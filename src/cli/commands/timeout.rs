use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::ledger::{self, TimeOutOutcome};
use crate::core::policy::DbPolicy;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::provenance::Provenance;
use crate::ui::messages::{success, warning};

/// Handle `timeout`: record a time-out, gated by the daily end-of-day rule.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Timeout {
        event,
        user,
        manual,
        actor,
    } = cmd
    {
        let provenance = if *manual {
            Provenance::Manual
        } else {
            Provenance::Qr
        };

        let mut pool = DbPool::open(cfg)?;
        let policy = DbPolicy::open(&cfg.database)?;

        let outcome = ledger::record_time_out(
            &mut pool,
            &policy,
            cfg.tz()?,
            *event,
            user,
            provenance,
            clock.now_utc(),
        )?;

        match outcome {
            TimeOutOutcome::Updated => {
                if let Some(actor) = actor {
                    oplog(
                        &pool.conn,
                        "timeout",
                        &format!("{}/{}", event, user),
                        &format!("manual action by {}", actor),
                    )?;
                }
                success(format!("Timed out user {} at event {}.", user, event));
            }
            TimeOutOutcome::NotTimedIn => {
                warning(format!(
                    "User {} has no open time-in at event {}; time-out rejected.",
                    user, event
                ));
            }
            TimeOutOutcome::AdmissionDenied(reason) => {
                warning(format!("Time-out denied: {}.", reason.describe()));
            }
        }
    }

    Ok(())
}
