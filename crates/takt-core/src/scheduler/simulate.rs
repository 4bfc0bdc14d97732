/// Simulator loop: advances vehicles one at a time through the canonical
/// route, computing start/service/depart times under server, zone, and
/// gate-buffer constraints.
use std::collections::HashSet;

use tracing::debug;

use crate::domain::{RawStepDef, Schedule, ScheduleError, TimelineRecord};
use crate::scheduler::normalize::normalize;
use crate::scheduler::pools::{GateBufferPool, ZoneSlotPool};
use crate::scheduler::types::{LinePlan, DEFAULT_GATE_BUFFER};

/// Normalise `step_defs` and simulate `cars` vehicles through the line.
///
/// Pure and deterministic: identical inputs always yield identical records.
pub fn schedule(step_defs: &[RawStepDef], cars: u32) -> Result<Schedule, ScheduleError> {
    let plan = normalize(step_defs)?;
    run_plan(&plan, cars)
}

/// Simulate `cars` vehicles through an already-normalised plan.
pub fn run_plan(plan: &LinePlan, cars: u32) -> Result<Schedule, ScheduleError> {
    if cars < 1 {
        return Err(ScheduleError::InvalidCount(cars));
    }
    debug!(
        steps = plan.steps.len(),
        zones = plan.zones.len(),
        cars,
        "running line simulation"
    );
    Ok(Simulator::new(plan).run(cars))
}

/// Owns every piece of mutable scheduling state for one invocation, so
/// independent invocations are re-entrant by construction.
pub struct Simulator<'a> {
    plan: &'a LinePlan,
    /// Earliest time each step's server is free again; equals the depart of
    /// the last vehicle through it, so blocking propagates backwards.
    server_free: Vec<f64>,
    zone_slots: ZoneSlotPool,
    gate_buffers: GateBufferPool,
}

impl<'a> Simulator<'a> {
    pub fn new(plan: &'a LinePlan) -> Self {
        Self {
            plan,
            server_free: vec![0.0; plan.steps.len()],
            zone_slots: ZoneSlotPool::new(&plan.zones),
            gate_buffers: GateBufferPool::new(),
        }
    }

    /// Run vehicles 1..=cars in order, steps in seq order within a vehicle.
    pub fn run(mut self, cars: u32) -> Schedule {
        let plan = self.plan;
        if plan.steps.is_empty() {
            return Schedule {
                records: Vec::new(),
                max_time: 0.0,
            };
        }
        let last = plan.steps.len() - 1;
        let mut records = Vec::with_capacity(plan.steps.len() * cars as usize);
        let mut max_time = 0.0f64;

        for vehicle in 1..=cars {
            let mut prev_depart = 0.0f64;
            // Gates this vehicle has passed; decides whether its zone entry
            // is charged against a gate buffer.
            let mut passed_gates: HashSet<&str> = HashSet::new();

            for (j, step) in plan.steps.iter().enumerate() {
                let mut start = self.server_free[j].max(prev_depart);

                if let Some(zone) = step.zone.as_ref().filter(|z| z.role.enters()) {
                    // Entering the zone takes a slot, so the start itself
                    // waits for one. For any step but the first this is a
                    // no-op: the previous depart already waited.
                    start = start.max(self.zone_slots.earliest_free(&zone.zone_id));
                }

                if let Some(gz) = step.gate.as_deref() {
                    passed_gates.insert(gz);
                    start = self.hold_at_gate(gz, start);
                }

                let svc_finish = start + step.duration;

                let depart = if j < last {
                    // The vehicle moves on only when the next server is free
                    // and, for a zone entry, a slot is available.
                    let mut next_ready = self.server_free[j + 1];
                    if let Some(zone) = plan.steps[j + 1].zone.as_ref().filter(|z| z.role.enters())
                    {
                        next_ready = next_ready.max(self.zone_slots.earliest_free(&zone.zone_id));
                    }
                    svc_finish.max(next_ready)
                } else {
                    svc_finish
                };

                records.push(TimelineRecord {
                    vehicle,
                    seq: step.seq,
                    display: step.display.clone(),
                    group: step.group.clone(),
                    duration: step.duration,
                    start,
                    svc_finish,
                    depart,
                    block_wait: (depart - svc_finish).max(0.0),
                });

                if let Some(zone) = &step.zone {
                    if zone.role.enters() {
                        if passed_gates.contains(zone.zone_id.as_str()) {
                            // Later vehicles at the gate are held against
                            // this entry time.
                            self.gate_buffers.admit(&zone.zone_id, start);
                        }
                        self.zone_slots.acquire(&zone.zone_id);
                    }
                    if zone.role.exits() {
                        self.zone_slots.release(&zone.zone_id, depart);
                    }
                }

                self.server_free[j] = depart;
                prev_depart = depart;
                max_time = max_time.max(depart);
            }
        }

        Schedule { records, max_time }
    }

    /// Gate admission: drain entries already inside the zone, then while the
    /// buffer is full push `start` to the earliest forecast entry time and
    /// drain again until a slot in the gate segment opens.
    fn hold_at_gate(&mut self, zone_id: &str, mut start: f64) -> f64 {
        let buffer = self
            .plan
            .gate_buffers
            .get(zone_id)
            .copied()
            .unwrap_or(DEFAULT_GATE_BUFFER)
            .max(1) as usize;

        self.gate_buffers.drain_before_or_at(zone_id, start);
        while self.gate_buffers.in_flight(zone_id) >= buffer {
            match self.gate_buffers.earliest_entry(zone_id) {
                Some(entry) => start = start.max(entry),
                None => break,
            }
            self.gate_buffers.drain_before_or_at(zone_id, start);
        }
        start
    }
}
