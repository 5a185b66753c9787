//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Expected business outcomes (already present, not timed in, admission
//! denied) are NOT errors: they are typed results returned by the ledger
//! and mapped to messages by the CLI. Only real failures live here.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related (transient)
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date/time format: {0}")]
    InvalidDate(String),

    #[error("Invalid time-of-day format: {0}")]
    InvalidTime(String),

    #[error("Invalid duration (expected H:MM:SS): {0}")]
    InvalidDuration(String),

    #[error("Invalid event status: {0}")]
    InvalidStatus(String),

    #[error("Invalid provenance: {0}")]
    InvalidProvenance(String),

    #[error("Invalid timezone offset: {0}")]
    InvalidTimezone(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Event not found: {0}")]
    EventNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
