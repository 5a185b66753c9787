//! SQLite connection wrapper (lightweight for CLI usage).

use crate::config::Config;
use crate::errors::AppResult;
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Two writers can race on the same attendance key (QR scan vs
        // admin action); let the second one wait instead of failing fast.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(Self { conn })
    }

    /// Open the database configured for this installation.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        Ok(Self::new(&cfg.database)?)
    }
}
