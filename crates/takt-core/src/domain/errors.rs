use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("No valid step definitions after filtering")]
    EmptySchedule,

    #[error("Invalid vehicle count: {0} (must be >= 1)")]
    InvalidCount(u32),

    #[error("Step {seq}: gate references undeclared zone: {zone_id}")]
    DanglingGate { seq: u32, zone_id: String },

    #[error("Step {seq}: duration is not a positive number: {value}")]
    DurationParse { seq: u32, value: String },

    #[error(transparent)]
    Renderer(#[from] anyhow::Error),
}
