use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::dispatch::{DispatchQueue, OutboxSink};
use crate::core::ledger::{self, TimeInOutcome};
use crate::core::policy::DbPolicy;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::provenance::Provenance;
use crate::ui::messages::{info, success, warning};

/// Handle `timein`: QR self-scan by default, admin manual action with
/// `--manual`. The outcome is a message, never a process failure.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Timein {
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
        let dispatch = DispatchQueue::start(OutboxSink::new(&cfg.database));

        let outcome = ledger::record_time_in(
            &mut pool,
            &policy,
            cfg.tz()?,
            &dispatch,
            *event,
            user,
            provenance,
            clock.now_utc(),
        )?;

        // Flush the certificate signal before the process exits.
        dispatch.drain();

        match outcome {
            TimeInOutcome::Created { late } => {
                if let Some(actor) = actor {
                    oplog(
                        &pool.conn,
                        "timein",
                        &format!("{}/{}", event, user),
                        &format!("manual action by {}", actor),
                    )?;
                }
                if late {
                    success(format!("Timed in user {} at event {} (late arrival).", user, event));
                } else {
                    success(format!("Timed in user {} at event {}.", user, event));
                }
            }
            TimeInOutcome::AlreadyPresent => {
                info(format!(
                    "User {} is already timed in at event {}; nothing changed.",
                    user, event
                ));
            }
            TimeInOutcome::AdmissionDenied(reason) => {
                warning(format!("Time-in denied: {}.", reason.describe()));
            }
        }
    }

    Ok(())
}
