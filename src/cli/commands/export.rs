use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        event,
        format,
        file,
    } = cmd
    {
        let mut pool = DbPool::open(cfg)?;
        ExportLogic::apply(&mut pool, cfg.tz()?, *event, format, file)?;
    }

    Ok(())
}
