use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_admission_window, save_admission_window};
use crate::errors::AppResult;
use crate::models::admission_window::AdmissionWindow;
use crate::ui::messages::{header, success};
use crate::utils::time::parse_time_arg;
use chrono::NaiveTime;

fn print_window(w: &AdmissionWindow) {
    header("Admission window");
    let fmt = |t: NaiveTime| t.format("%H:%M").to_string();
    println!("Daily start    : {}", fmt(w.daily_start));
    println!("Daily end      : {}", fmt(w.daily_end));
    println!("Late threshold : {}", fmt(w.late_threshold));
    println!("Break          : {} – {}", fmt(w.break_start), fmt(w.break_end));
}

/// Handle `policy`: show or update the live admission window.
/// Updates are last-write-wins; in-flight attendance actions that already
/// read the old window are allowed to complete against it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Policy {
        show,
        daily_start,
        daily_end,
        late_threshold,
        break_start,
        break_end,
    } = cmd
    {
        let pool = DbPool::open(cfg)?;
        let mut window = load_admission_window(&pool.conn)?;

        let mut changed = false;
        if let Some(t) = daily_start {
            window.daily_start = parse_time_arg(t)?;
            changed = true;
        }
        if let Some(t) = daily_end {
            window.daily_end = parse_time_arg(t)?;
            changed = true;
        }
        if let Some(t) = late_threshold {
            window.late_threshold = parse_time_arg(t)?;
            changed = true;
        }
        if let Some(t) = break_start {
            window.break_start = parse_time_arg(t)?;
            changed = true;
        }
        if let Some(t) = break_end {
            window.break_end = parse_time_arg(t)?;
            changed = true;
        }

        if changed {
            save_admission_window(&pool.conn, &window)?;
            oplog(&pool.conn, "policy", "admission_window", "admission window updated")?;
            success("Admission window updated.");
        }

        if *show || !changed {
            print_window(&window);
        }
    }

    Ok(())
}
