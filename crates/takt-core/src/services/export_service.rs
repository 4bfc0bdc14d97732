/// Export orchestration: simulate the line, then hand the timeline to a
/// bound sheet backend.
///
/// This is the only layer that touches both the scheduler and the renderer
/// port; everything below it is pure.
use tracing::{debug, instrument};

use crate::domain::{RawStepDef, Schedule, ScheduleError};
use crate::ports::SheetWriter;
use crate::render::{render_ticket, TicketOptions};
use crate::scheduler::{normalize, run_plan};

/// Run the full pipeline: normalise, simulate `cars` vehicles, render the
/// ticket onto `sink`, and return the schedule that was drawn.
///
/// Scheduling failures surface as their own variants; sink failures are
/// passed through verbatim as [`ScheduleError::Renderer`].
#[instrument(skip(step_defs, sink), fields(cars, project = %opts.project))]
pub fn schedule_and_export(
    step_defs: &[RawStepDef],
    cars: u32,
    opts: &TicketOptions,
    sink: &mut dyn SheetWriter,
) -> Result<Schedule, ScheduleError> {
    let plan = normalize(step_defs)?;
    let schedule = run_plan(&plan, cars)?;
    debug!(
        records = schedule.records.len(),
        max_time = schedule.max_time,
        "timeline simulated, rendering ticket"
    );
    render_ticket(&plan, &schedule, opts, sink)?;
    Ok(schedule)
}
