use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use takt_core::{fmt_num, schedule, vehicle_waits, RawStepDef};

/// Load step definitions from a JSON file: an array of step objects.
pub fn load_defs(path: &Path) -> Result<Vec<RawStepDef>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading step definitions from {}", path.display()))?;
    let defs: Vec<RawStepDef> = serde_json::from_str(&content)
        .with_context(|| format!("parsing step definitions from {}", path.display()))?;
    Ok(defs)
}

pub fn run(defs_path: &Path, cars: u32, json: bool) -> Result<()> {
    let defs = load_defs(defs_path)?;
    let result = schedule(&defs, cars)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{:>3} {:>4}  {:<18} {:>8} {:>8} {:>8} {:>8}",
        "car".bold(),
        "seq".bold(),
        "step".bold(),
        "start".bold(),
        "finish".bold(),
        "depart".bold(),
        "block".bold(),
    );
    for r in &result.records {
        let block = if r.block_wait > 1e-9 {
            fmt_num(r.block_wait).yellow().to_string()
        } else {
            fmt_num(r.block_wait)
        };
        println!(
            "{:>3} {:>4}  {:<18} {:>8} {:>8} {:>8} {:>8}",
            r.vehicle,
            r.seq,
            r.display,
            fmt_num(r.start),
            fmt_num(r.svc_finish),
            fmt_num(r.depart),
            block,
        );
    }

    println!();
    for w in vehicle_waits(&result.records) {
        let line = format!(
            "car {}: entry wait {}s, total wait {}s",
            w.vehicle,
            fmt_num(w.entry_wait),
            fmt_num(w.total_wait)
        );
        if w.total_wait > 1e-9 {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
    println!("makespan: {}s", fmt_num(result.max_time));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defs_parses_full_schema() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r##"[
                {{"seq": 1, "display": "prep", "durations": [5]}},
                {{"seq": 2, "display": "EC1", "group": "elec", "durations": ["4.5"],
                  "zone_id": "Z", "zone_capacity": 2, "color": "#123456"}},
                {{"seq": 3, "display": "EC2", "durations": [6], "zone_id": "Z"}}
            ]"##
        )
        .expect("write json");

        let defs = load_defs(file.path()).expect("valid json");
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[1].display, "EC1");
        assert_eq!(defs[1].zone_capacity, Some(2));
        assert_eq!(defs[1].color.as_deref(), Some("#123456"));
    }

    #[test]
    fn test_load_defs_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "not json").expect("write");
        assert!(load_defs(file.path()).is_err());
    }
}
