use serde::{Deserialize, Serialize};

// ===== Input model =====

/// One entry of a step's `durations` list.
///
/// Upstream editors historically hand these over either as numbers or as
/// numeric text, so both shapes are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Number(f64),
    Text(String),
}

/// Raw step definition as supplied by the caller.
///
/// Only `display` and a non-empty `durations` list are required for a step to
/// survive normalisation; every other field has a documented default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStepDef {
    /// Position of the step in the route; missing values fall back to the
    /// step's position among the surviving definitions.
    #[serde(default)]
    pub seq: Option<u32>,

    /// Workstation label shown on the ticket. Steps with an empty display
    /// are dropped.
    #[serde(default)]
    pub display: String,

    /// Group label used for colour assignment; defaults to `display`.
    #[serde(default)]
    pub group: String,

    /// Service durations in seconds. Only the first entry feeds the
    /// simulation; the rest are carried but unused.
    #[serde(default)]
    pub durations: Vec<DurationField>,

    /// Blocking-zone membership.
    #[serde(default)]
    pub zone_id: Option<String>,

    /// Concurrent occupancy cap of the member zone; non-positive values are
    /// ignored.
    #[serde(default)]
    pub zone_capacity: Option<i32>,

    /// Zone guarded by this step acting as a gate.
    #[serde(default)]
    pub gate_zone_id: Option<String>,

    /// Vehicles allowed between this gate and the zone entry; invalid or
    /// non-positive values coerce to the default of 2.
    #[serde(default)]
    pub gate_buffer: Option<i32>,

    /// Explicit `#RRGGBB` bar colour overriding the group palette.
    #[serde(default)]
    pub color: Option<String>,
}

// ===== Output model =====

/// One vehicle-step event of the simulated timeline.
///
/// For a fixed vehicle, records come out in seq order and satisfy
/// `start <= svc_finish <= depart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRecord {
    /// 1-based vehicle index.
    pub vehicle: u32,
    pub seq: u32,
    pub display: String,
    pub group: String,
    /// Service duration in seconds.
    pub duration: f64,
    /// Moment the vehicle occupies the step's server.
    pub start: f64,
    /// `start + duration`.
    pub svc_finish: f64,
    /// Moment the vehicle physically leaves the step.
    pub depart: f64,
    /// `max(0, depart - svc_finish)`.
    pub block_wait: f64,
}

/// Full result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Records ordered by (vehicle, seq).
    pub records: Vec<TimelineRecord>,
    /// Greatest `depart` across all records.
    pub max_time: f64,
}

/// Per-vehicle wait aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleWaits {
    pub vehicle: u32,
    /// Wait before the vehicle's first step, measured against the previous
    /// vehicle's first-step depart.
    pub entry_wait: f64,
    /// `entry_wait` plus the sum of the vehicle's block waits.
    pub total_wait: f64,
}

// ===== Rendering parameters =====

/// Where a vehicle's entry-wait bar is drawn on the ticket. Purely visual;
/// the simulated times are identical under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitPolicy {
    /// Bar ahead of the vehicle's first service bar.
    #[default]
    Before,
    /// Bar appended after the vehicle's last depart.
    After,
}

impl WaitPolicy {
    /// Lenient parse: anything other than "after" is `Before`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "after" => WaitPolicy::After,
            _ => WaitPolicy::Before,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaitPolicy::Before => "before",
            WaitPolicy::After => "after",
        }
    }
}

impl std::fmt::Display for WaitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
