/// Ticket grid layout.
///
/// One header row, then per vehicle: a wait-summary row, one row per step
/// with its service bar, and a wait row wherever the vehicle sat blocked
/// between two steps. Bars live on a time grid starting at column 4, one
/// column per `grid_step` seconds.
use std::collections::HashMap;

use crate::domain::{Schedule, TimelineRecord, WaitPolicy};
use crate::ports::SheetWriter;
use crate::render::palette::{
    bar_color, group_palette, CAR_FILL, HEADER_FILL, WAIT_BAR_FILL, WAIT_LABEL_FILL,
};
use crate::scheduler::types::LinePlan;
use crate::scheduler::waits::vehicle_waits;

/// First grid column; columns 0..=3 hold labels, vehicle no., item, time.
const FIRST_GRID_COL: u32 = 4;

/// Waits below this render as zero.
const WAIT_EPS: f64 = 1e-9;

/// Rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketOptions {
    /// Seconds per grid column. Non-positive or non-finite values are
    /// coerced to 1.0.
    pub grid_step: f64,
    pub wait_policy: WaitPolicy,
    /// Project name shown in the title cell.
    pub project: String,
}

impl TicketOptions {
    pub fn new(grid_step: f64, wait_policy: WaitPolicy, project: impl Into<String>) -> Self {
        Self {
            grid_step,
            wait_policy,
            project: project.into(),
        }
    }

    /// Grid step with the coercion rule applied.
    pub fn effective_grid_step(&self) -> f64 {
        if self.grid_step.is_finite() && self.grid_step > 0.0 {
            self.grid_step
        } else {
            1.0
        }
    }
}

impl Default for TicketOptions {
    fn default() -> Self {
        Self::new(1.0, WaitPolicy::Before, "")
    }
}

/// Compact number formatting: integers without a decimal point, everything
/// else with one decimal place.
pub fn fmt_num(x: f64) -> String {
    if (x - x.round()).abs() < 1e-9 {
        format!("{}", x.round() as i64)
    } else {
        format!("{:.1}", x)
    }
}

/// Render the full ticket onto `sink` and flush it.
pub fn render_ticket(
    plan: &LinePlan,
    schedule: &Schedule,
    opts: &TicketOptions,
    sink: &mut dyn SheetWriter,
) -> anyhow::Result<()> {
    let grid = opts.effective_grid_step();
    let n_grid_cols = ((schedule.max_time / grid).ceil() as u32).max(1);

    let waits = vehicle_waits(&schedule.records);
    let groups = group_palette(&plan.steps);
    let step_colors: HashMap<String, String> = plan
        .steps
        .iter()
        .filter_map(|s| s.color.clone().map(|c| (s.display.clone(), c)))
        .collect();

    write_header(sink, opts, n_grid_cols, grid)?;

    let mut row = 1u32;
    for (slice, wait) in vehicle_slices(&schedule.records).into_iter().zip(&waits) {
        let ewait = wait.entry_wait;

        // Summary row: waits, vehicle number, and (under the Before policy)
        // the entry-wait bar leading up to the first start.
        let summary = format!(
            "entry wait {}s, total wait {}s",
            fmt_num(ewait),
            fmt_num(wait.total_wait)
        );
        sink.write_cell(row, 0, &summary)?;
        if ewait > WAIT_EPS {
            sink.set_cell_fill(row, 0, WAIT_LABEL_FILL)?;
            sink.write_cell(row, 3, &fmt_num(ewait))?;
        }
        sink.write_cell(row, 1, &wait.vehicle.to_string())?;
        sink.set_cell_fill(row, 1, CAR_FILL)?;

        if ewait > WAIT_EPS {
            let first_start = slice[0].start;
            let last_depart = slice[slice.len() - 1].depart;
            let (c0, c1) = match opts.wait_policy {
                WaitPolicy::Before => entry_bar_before(first_start, grid),
                WaitPolicy::After => entry_bar_after(last_depart, ewait, grid, n_grid_cols),
            };
            for c in c0..=c1 {
                sink.set_cell_fill(row, c, WAIT_BAR_FILL)?;
            }
        }
        row += 1;

        for (idx, rec) in slice.iter().enumerate() {
            // Service bar.
            sink.write_cell(row, 2, &rec.display)?;
            sink.write_cell(row, 3, &fmt_num(rec.duration))?;
            let c_start = FIRST_GRID_COL + (rec.start / grid).floor() as u32;
            let c_end =
                (FIRST_GRID_COL + ((rec.svc_finish / grid).ceil() as u32).max(1) - 1).max(c_start);
            let color = bar_color(&step_colors, &groups, &rec.display, &rec.group);
            for c in c_start..=c_end {
                sink.set_cell_fill(row, c, color)?;
            }
            row += 1;

            // Wait bar between this step and the next.
            if rec.block_wait > WAIT_EPS && idx < slice.len() - 1 {
                let next = &slice[idx + 1];
                let label = format!(
                    "wait {}s ({} -> {})",
                    fmt_num(rec.block_wait),
                    rec.display,
                    next.display
                );
                sink.write_cell(row, 0, &label)?;
                sink.set_cell_fill(row, 0, WAIT_LABEL_FILL)?;
                sink.write_cell(row, 3, &fmt_num(rec.block_wait))?;
                let w0 = FIRST_GRID_COL + (rec.svc_finish / grid).floor() as u32;
                let w1 = (FIRST_GRID_COL + ((rec.depart / grid).ceil() as u32).max(1) - 1).max(w0);
                for c in w0..=w1 {
                    sink.set_cell_fill(row, c, WAIT_BAR_FILL)?;
                }
                row += 1;
            }
        }

        // Blank separator row between vehicles.
        row += 1;
    }

    sink.finish()
}

fn write_header(
    sink: &mut dyn SheetWriter,
    opts: &TicketOptions,
    n_grid_cols: u32,
    grid: f64,
) -> anyhow::Result<()> {
    let title = if opts.project.is_empty() {
        "Continuous-feed wait times".to_string()
    } else {
        format!("Continuous-feed wait times ({})", opts.project)
    };
    sink.write_cell(0, 0, &title)?;
    sink.write_cell(0, 1, "Vehicle")?;
    sink.write_cell(0, 2, "Item")?;
    sink.write_cell(0, 3, "Time")?;
    for c in 0..FIRST_GRID_COL + n_grid_cols {
        sink.set_cell_fill(0, c, HEADER_FILL)?;
    }
    for i in 0..n_grid_cols {
        sink.write_cell(0, FIRST_GRID_COL + i, &format!("{:.1}", grid))?;
    }
    Ok(())
}

/// Entry-wait bar columns ahead of the first service bar: from the grid
/// origin up to the column holding the first start. A positive entry wait
/// implies a positive first start, so the span is never empty.
fn entry_bar_before(first_start: f64, grid: f64) -> (u32, u32) {
    let c0 = FIRST_GRID_COL;
    let span = (first_start / grid).ceil() as u32;
    (c0, (c0 + span.max(1)) - 1)
}

/// Entry-wait bar columns appended after the vehicle's last depart,
/// clamped to the grid width.
fn entry_bar_after(last_depart: f64, ewait: f64, grid: f64, n_grid_cols: u32) -> (u32, u32) {
    let c0 = FIRST_GRID_COL + (last_depart / grid).floor() as u32;
    let c1 = FIRST_GRID_COL + (((last_depart + ewait) / grid).ceil() as u32).max(1) - 1;
    let c_max = FIRST_GRID_COL + n_grid_cols - 1;
    (c0.min(c_max), c1.min(c_max).max(c0.min(c_max)))
}

fn vehicle_slices(records: &[TimelineRecord]) -> Vec<&[TimelineRecord]> {
    let mut slices = Vec::new();
    let mut begin = 0;
    for i in 0..records.len() {
        if records[i].vehicle != records[begin].vehicle {
            slices.push(&records[begin..i]);
            begin = i;
        }
    }
    if begin < records.len() {
        slices.push(&records[begin..]);
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{normalize, run_plan};
    use crate::testing::fixtures::{plain_step, zone_step};
    use crate::testing::MemorySheet;

    fn render(defs: &[crate::domain::RawStepDef], cars: u32, opts: &TicketOptions) -> MemorySheet {
        let plan = normalize(defs).expect("valid plan");
        let schedule = run_plan(&plan, cars).expect("valid cars");
        let mut sheet = MemorySheet::new();
        render_ticket(&plan, &schedule, opts, &mut sheet).expect("render succeeds");
        sheet
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(5.0), "5");
        assert_eq!(fmt_num(5.0000000001), "5");
        assert_eq!(fmt_num(5.25), "5.2");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn test_header_and_title() {
        let opts = TicketOptions::new(1.0, WaitPolicy::Before, "L3");
        let sheet = render(&[plain_step(1, "EC1", 3.0)], 1, &opts);
        assert_eq!(
            sheet.cell(0, 0),
            Some("Continuous-feed wait times (L3)")
        );
        assert_eq!(sheet.cell(0, 1), Some("Vehicle"));
        // 3 seconds on a 1-second grid: columns 4..=6 headed "1.0".
        assert_eq!(sheet.cell(0, 4), Some("1.0"));
        assert_eq!(sheet.cell(0, 6), Some("1.0"));
        assert_eq!(sheet.cell(0, 7), None);
        assert!(sheet.finished());
    }

    #[test]
    fn test_service_bar_cells() {
        let opts = TicketOptions::default();
        let sheet = render(&[plain_step(1, "EC1", 3.0)], 1, &opts);
        // Vehicle summary on row 1, the step row on row 2.
        assert_eq!(sheet.cell(1, 1), Some("1"));
        assert_eq!(sheet.cell(2, 2), Some("EC1"));
        assert_eq!(sheet.cell(2, 3), Some("3"));
        for c in 4..=6 {
            assert!(sheet.fill(2, c).is_some(), "bar cell {c} should be filled");
        }
        assert!(sheet.fill(2, 7).is_none());
    }

    #[test]
    fn test_wait_row_between_steps() {
        let defs = vec![plain_step(1, "A", 5.0), plain_step(2, "B", 7.0)];
        let opts = TicketOptions::default();
        let sheet = render(&defs, 2, &opts);
        // Vehicle 2 blocks 2s between A and B; its wait row carries the
        // label and an amber bar over t=10..12.
        let label_cell = sheet
            .rows()
            .into_iter()
            .find_map(|r| sheet.cell(r, 0).filter(|v| v.starts_with("wait 2s")));
        assert_eq!(label_cell, Some("wait 2s (A -> B)"));
    }

    #[test]
    fn test_grid_step_coercion() {
        let opts = TicketOptions::new(0.0, WaitPolicy::Before, "");
        assert_eq!(opts.effective_grid_step(), 1.0);
        let opts = TicketOptions::new(f64::NAN, WaitPolicy::Before, "");
        assert_eq!(opts.effective_grid_step(), 1.0);
        let opts = TicketOptions::new(0.5, WaitPolicy::Before, "");
        assert_eq!(opts.effective_grid_step(), 0.5);
    }

    #[test]
    fn test_entry_bar_policy_placement() {
        // Capacity-1 zone across both steps: vehicle 2 cannot enter until
        // vehicle 1 leaves at t=10, so it carries a 6s entry wait.
        let defs = vec![
            zone_step(1, "EC1", 4.0, "Z", None),
            zone_step(2, "EC2", 6.0, "Z", None),
        ];

        let before = render(&defs, 2, &TicketOptions::new(1.0, WaitPolicy::Before, ""));
        // Vehicle 2's summary sits on row 5, after vehicle 1's three rows
        // and the separator. Bar ahead of the first start covers t=0..10.
        assert!(before.fill(5, 4).is_some());
        assert!(before.fill(5, 13).is_some());
        assert!(before.fill(5, 14).is_none());

        let after = render(&defs, 2, &TicketOptions::new(1.0, WaitPolicy::After, ""));
        // Appended after vehicle 2's depart at t=20, clamped to the grid.
        assert!(after.fill(5, 4).is_none());
        assert!(after.fill(5, 23).is_some());
    }
}
