use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for attlog:
/// event lifecycle, admission gating and attendance ledger over SQLite.
#[derive(Parser)]
#[command(
    name = "attlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event attendance core: schedule events, gate time-in/time-out, keep the attendance ledger",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Pin the clock to a fixed RFC3339 instant (testing only)
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for invalid fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Schedule a new event
    Add {
        /// Event name
        name: String,

        #[arg(long = "department", help = "Owning department id")]
        department: Option<String>,

        /// Scheduled start as an RFC3339 instant (e.g. 2026-03-05T09:00:00+08:00)
        #[arg(long = "start", help = "Scheduled start (RFC3339)")]
        start: String,

        /// Event duration shaped as H:MM:SS
        #[arg(long = "duration", help = "Event duration (H:MM:SS)")]
        duration: String,

        #[arg(long = "venue", help = "Event venue")]
        venue: Option<String>,
    },

    /// Cancel an event (terminal: the scheduler never reconsiders it)
    Cancel {
        /// Event id
        event: i64,
    },

    /// List events
    List {
        #[arg(long = "status", help = "Filter by status (upcoming|ongoing|ended|cancelled)")]
        status: Option<String>,
    },

    /// Record a time-in for a user at an event
    Timein {
        /// Event id
        event: i64,

        /// User id
        user: String,

        /// Record as an admin manual action instead of a QR self-scan
        #[arg(long = "manual")]
        manual: bool,

        #[arg(long = "actor", requires = "manual", help = "Admin performing the manual action")]
        actor: Option<String>,
    },

    /// Record a time-out for a user at an event
    Timeout {
        /// Event id
        event: i64,

        /// User id
        user: String,

        /// Record as an admin manual action instead of a QR self-scan
        #[arg(long = "manual")]
        manual: bool,

        #[arg(long = "actor", requires = "manual", help = "Admin performing the manual action")]
        actor: Option<String>,
    },

    /// List attendance entries for an event
    Attendees {
        /// Event id
        event: i64,

        #[arg(long = "page", help = "Page number (1-based)")]
        page: Option<usize>,
    },

    /// Run the status reconciliation tick
    Tick {
        #[arg(long = "watch", help = "Keep ticking on an interval instead of once")]
        watch: bool,

        #[arg(
            long = "interval",
            default_value = "30",
            help = "Seconds between ticks (with --watch)"
        )]
        interval: u64,
    },

    /// Show or update the admission window policy
    Policy {
        #[arg(long = "show", help = "Print the current admission window")]
        show: bool,

        #[arg(long = "daily-start", help = "Daily start time (HH:MM)")]
        daily_start: Option<String>,

        #[arg(long = "daily-end", help = "Daily end time (HH:MM)")]
        daily_end: Option<String>,

        #[arg(long = "late-threshold", help = "Late arrival threshold (HH:MM)")]
        late_threshold: Option<String>,

        #[arg(long = "break-start", help = "Break start time (HH:MM)")]
        break_start: Option<String>,

        #[arg(long = "break-end", help = "Break end time (HH:MM)")]
        break_end: Option<String>,
    },

    /// Export an event's attendance entries
    Export {
        /// Event id
        #[arg(long = "event")]
        event: i64,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,
    },
}
