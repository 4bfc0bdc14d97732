pub mod domain;
pub mod ports;
pub mod render;
pub mod scheduler;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use domain::{
    DurationField, RawStepDef, Schedule, ScheduleError, TimelineRecord, VehicleWaits, WaitPolicy,
};

pub use ports::SheetWriter;

pub use render::{fmt_num, render_ticket, TicketOptions};

pub use scheduler::{
    normalize, run_plan, schedule, vehicle_waits, LinePlan, Step, Zone, ZoneMembership, ZoneRole,
    DEFAULT_GATE_BUFFER, DEFAULT_ZONE_CAPACITY,
};

pub use services::schedule_and_export;
