use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                println!("{}", fs::read_to_string(&path)?);
            } else {
                println!("No config file found at {}", path.display());
            }
        }

        if *check {
            // The one field that can silently break everything is the
            // timezone offset; validate it explicitly.
            match cfg.tz() {
                Ok(_) => success(format!(
                    "Configuration OK (timezone {})",
                    cfg.timezone_offset
                )),
                Err(e) => error(format!("Configuration invalid: {}", e)),
            }
        }
    }

    Ok(())
}
