//! attlog library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::errors::AppResult;
use crate::utils::time::parse_instant;
use clap::Parser;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Cancel { .. } => cli::commands::cancel::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Timein { .. } => cli::commands::timein::handle(&cli.command, cfg, clock),
        Commands::Timeout { .. } => cli::commands::timeout::handle(&cli.command, cfg, clock),
        Commands::Attendees { .. } => cli::commands::attendees::handle(&cli.command, cfg),
        Commands::Tick { .. } => cli::commands::tick::handle(&cli.command, cfg, clock),
        Commands::Policy { .. } => cli::commands::policy::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once; the --db flag overrides the configured database.
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // One authoritative clock for the whole invocation. The hidden --at
    // flag pins it for tests; nothing else ever supplies a timestamp.
    let clock: Box<dyn Clock> = match &cli.at {
        Some(instant) => Box::new(FixedClock(parse_instant(instant)?)),
        None => Box::new(SystemClock),
    };

    dispatch(&cli, &cfg, clock.as_ref())
}
