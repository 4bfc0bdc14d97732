use std::path::Path;

use anyhow::Result;
use chrono::Local;
use tracing::info;

use takt_core::{schedule_and_export, TicketOptions, WaitPolicy};
use takt_export::open_sheet;

use crate::schedule::load_defs;

pub fn run(
    defs_path: &Path,
    cars: u32,
    grid_step: f64,
    wait_policy: &str,
    project: &str,
    out: Option<&str>,
) -> Result<()> {
    let defs = load_defs(defs_path)?;
    let dest = match out {
        Some(d) => d.to_string(),
        None => format!("ticket_{}.csv", Local::now().format("%Y%m%d_%H%M%S")),
    };

    let opts = TicketOptions::new(grid_step, WaitPolicy::parse(wait_policy), project);
    let mut sheet = open_sheet(&dest)?;
    let schedule = schedule_and_export(&defs, cars, &opts, sheet.as_mut())?;

    info!(
        records = schedule.records.len(),
        max_time = schedule.max_time,
        dest = %dest,
        "ticket exported"
    );
    if dest != "-" {
        println!("wrote {dest} ({} records, makespan {}s)", schedule.records.len(), schedule.max_time);
    }

    Ok(())
}
