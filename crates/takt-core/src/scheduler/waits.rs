/// Per-vehicle wait aggregation over a simulated timeline.
use crate::domain::{TimelineRecord, VehicleWaits};

/// Aggregate entry and total waits per vehicle.
///
/// `records` must be ordered by (vehicle, seq), which is what the simulator
/// emits. Entry wait is the gap between a vehicle's first start and the
/// previous vehicle's first-step depart (zero for the first vehicle when it
/// starts at time zero); total wait adds every block wait on top.
pub fn vehicle_waits(records: &[TimelineRecord]) -> Vec<VehicleWaits> {
    let mut waits = Vec::new();
    let mut prev_first_depart = 0.0f64;
    let mut i = 0;

    while i < records.len() {
        let vehicle = records[i].vehicle;
        let first = &records[i];
        let entry_wait = (first.start - prev_first_depart).max(0.0);
        prev_first_depart = first.depart;

        let mut block_sum = 0.0f64;
        while i < records.len() && records[i].vehicle == vehicle {
            block_sum += records[i].block_wait.max(0.0);
            i += 1;
        }

        waits.push(VehicleWaits {
            vehicle,
            entry_wait,
            total_wait: entry_wait + block_sum,
        });
    }

    waits
}
