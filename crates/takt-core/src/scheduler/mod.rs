/// Combination-ticket line scheduler.
///
/// A deterministic discrete-event simulator for a linear assembly line:
/// every vehicle visits every step in one fixed seq order, and three layered
/// constraints shape the timeline:
///
/// 1. **Servers**: a step accepts its next vehicle only after the current
///    one has physically departed.
/// 2. **Zones**: a contiguous step range with a shared occupancy cap; a
///    vehicle holds a slot from the zone's entry step until it departs the
///    exit step.
/// 3. **Gates**: an upstream step throttled so that at most `buffer`
///    vehicles are in flight between the gate and the target zone's entry.
///
/// The pipeline is normalise -> simulate -> aggregate:
///
/// ```rust,ignore
/// use takt_core::scheduler::{schedule, vehicle_waits};
///
/// let result = schedule(&step_defs, 8)?;
/// let waits = vehicle_waits(&result.records);
/// ```
pub mod normalize;
pub mod pools;
pub mod simulate;
pub mod types;
pub mod waits;

pub use normalize::normalize;
pub use pools::{GateBufferPool, ZoneSlotPool};
pub use simulate::{run_plan, schedule, Simulator};
pub use types::{
    LinePlan, Step, Zone, ZoneMembership, ZoneRole, DEFAULT_GATE_BUFFER, DEFAULT_ZONE_CAPACITY,
};
pub use waits::vehicle_waits;
