//! Certificate dispatch: the fire-exactly-once signal raised on a user's
//! first successful time-in for an event.
//!
//! The ledger guarantees at-most-once by flipping `certificate_dispatched`
//! inside the same conditional write that records the time-in; this module
//! only carries the signal out. Delivery is best-effort and asynchronous:
//! a failure is logged and never rolls back the attendance record.

use crate::db::queries::insert_outbox_row;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

/// Destination of a dispatch signal. The production sink appends to the
/// `certificate_outbox` table, which the external certificate/notification
/// service consumes; tests substitute their own.
pub trait CertificateSink: Send + 'static {
    fn deliver(&self, event_id: i64, user_id: &str) -> AppResult<()>;
}

/// Writes one outbox row per signal, on its own connection (the worker
/// thread must not share the caller's).
pub struct OutboxSink {
    db_path: String,
}

impl OutboxSink {
    pub fn new(db_path: &str) -> Self {
        Self {
            db_path: db_path.to_string(),
        }
    }
}

impl CertificateSink for OutboxSink {
    fn deliver(&self, event_id: i64, user_id: &str) -> AppResult<()> {
        let conn = Connection::open(&self.db_path)?;
        insert_outbox_row(&conn, event_id, user_id)
    }
}

struct Job {
    event_id: i64,
    user_id: String,
}

/// Synchronously-scheduled, asynchronously-executed dispatch queue.
/// `fire` enqueues and returns immediately; a worker thread delivers.
pub struct DispatchQueue {
    tx: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl DispatchQueue {
    pub fn start<S: CertificateSink>(sink: S) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();

        let worker = thread::spawn(move || {
            for job in rx {
                if let Err(e) = sink.deliver(job.event_id, &job.user_id) {
                    // Best-effort: the attendance fact stands either way;
                    // redelivery is the external collaborator's problem.
                    warning(format!(
                        "Certificate dispatch failed for event {} / user {}: {}",
                        job.event_id, job.user_id, e
                    ));
                }
            }
        });

        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Schedule a dispatch signal. Never fails: a closed queue is reported
    /// as a warning, not an error.
    pub fn fire(&self, event_id: i64, user_id: &str) {
        if let Some(tx) = &self.tx {
            let job = Job {
                event_id,
                user_id: user_id.to_string(),
            };
            if tx.send(job).is_err() {
                warning(format!(
                    "Certificate dispatch queue closed; signal for event {} / user {} dropped",
                    event_id, user_id
                ));
            }
        }
    }

    /// Flush pending signals and stop the worker. Short-lived CLI
    /// processes call this before exit.
    pub fn drain(mut self) {
        self.tx.take(); // close the channel so the worker loop ends
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warning("Certificate dispatch worker panicked");
        }
    }
}

impl Drop for DispatchQueue {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
