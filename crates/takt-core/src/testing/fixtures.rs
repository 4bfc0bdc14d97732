//! Step-definition builders used across unit and integration tests.

use crate::domain::{DurationField, RawStepDef};

/// A plain step: no zone, no gate, group defaulting to the display.
pub fn plain_step(seq: u32, display: &str, duration: f64) -> RawStepDef {
    RawStepDef {
        seq: Some(seq),
        display: display.to_string(),
        durations: vec![DurationField::Number(duration)],
        ..Default::default()
    }
}

/// A step belonging to `zone_id`, optionally raising the zone capacity.
pub fn zone_step(
    seq: u32,
    display: &str,
    duration: f64,
    zone_id: &str,
    capacity: Option<i32>,
) -> RawStepDef {
    RawStepDef {
        zone_id: Some(zone_id.to_string()),
        zone_capacity: capacity,
        ..plain_step(seq, display, duration)
    }
}

/// A step gating `gate_zone_id` with the default buffer.
pub fn gate_step(seq: u32, display: &str, duration: f64, gate_zone_id: &str) -> RawStepDef {
    RawStepDef {
        gate_zone_id: Some(gate_zone_id.to_string()),
        ..plain_step(seq, display, duration)
    }
}
