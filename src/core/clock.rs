//! The authoritative clock.
//!
//! Status reconciliation and admission checks must never trust a
//! caller-submitted "now": every code path reads the clock through this
//! trait. Production uses the process clock; tests inject a fixed instant.

use chrono::{DateTime, Utc};

pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for deterministic tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}
