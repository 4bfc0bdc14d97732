/// Zone-slot and gate-buffer pools: per-zone min-heaps of real-valued times.
///
/// Both pools are owned by one simulator invocation and mutated in place
/// while the loop advances; nothing is shared across invocations.
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;

use crate::scheduler::types::Zone;

type MinTimeHeap = BinaryHeap<Reverse<OrderedFloat<f64>>>;

fn push(heap: &mut MinTimeHeap, t: f64) {
    heap.push(Reverse(OrderedFloat(t)));
}

fn peek(heap: &MinTimeHeap) -> Option<f64> {
    heap.peek().map(|Reverse(t)| t.into_inner())
}

// ============================================================================
// ZONE SLOT POOL
// ============================================================================

/// Per zone, one heap entry per slot holding the time that slot frees up.
///
/// At rest the heap length equals the zone capacity; it transiently drops by
/// one between a vehicle's entry and exit.
#[derive(Debug)]
pub struct ZoneSlotPool {
    heaps: HashMap<String, MinTimeHeap>,
}

impl ZoneSlotPool {
    /// One heap per zone, `capacity` slots each, all free at time zero.
    pub fn new(zones: &HashMap<String, Zone>) -> Self {
        let heaps = zones
            .iter()
            .map(|(zid, zone)| {
                let mut heap = MinTimeHeap::new();
                for _ in 0..zone.capacity.max(1) {
                    push(&mut heap, 0.0);
                }
                (zid.clone(), heap)
            })
            .collect();
        Self { heaps }
    }

    /// Earliest time the next slot of `zone_id` frees up. Zero for a zone
    /// that was never occupied (or never declared).
    pub fn earliest_free(&self, zone_id: &str) -> f64 {
        self.heaps
            .get(zone_id)
            .and_then(peek)
            .unwrap_or(0.0)
    }

    /// Occupy one slot. The caller guarantees the acquisition happens at or
    /// after [`Self::earliest_free`]; nothing is pushed back until release.
    pub fn acquire(&mut self, zone_id: &str) {
        if let Some(heap) = self.heaps.get_mut(zone_id) {
            heap.pop();
        }
    }

    /// Return a slot, free from `depart` (the vehicle's depart at the
    /// zone's exit step).
    pub fn release(&mut self, zone_id: &str, depart: f64) {
        if let Some(heap) = self.heaps.get_mut(zone_id) {
            push(heap, depart);
        }
    }
}

// ============================================================================
// GATE BUFFER POOL
// ============================================================================

/// Per gated zone, the forecast zone-entry times of vehicles that have
/// passed the gate but not yet entered the zone.
#[derive(Debug, Default)]
pub struct GateBufferPool {
    heaps: HashMap<String, MinTimeHeap>,
}

impl GateBufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every in-flight entry whose zone-entry time is at or before
    /// `t`: those vehicles are inside the zone by then and no longer occupy
    /// the gate segment.
    pub fn drain_before_or_at(&mut self, zone_id: &str, t: f64) {
        if let Some(heap) = self.heaps.get_mut(zone_id) {
            while peek(heap).is_some_and(|entry| entry <= t) {
                heap.pop();
            }
        }
    }

    /// Vehicles currently in flight between the gate and the zone entry.
    pub fn in_flight(&self, zone_id: &str) -> usize {
        self.heaps.get(zone_id).map_or(0, BinaryHeap::len)
    }

    /// Earliest forecast zone-entry time among in-flight vehicles.
    pub fn earliest_entry(&self, zone_id: &str) -> Option<f64> {
        self.heaps.get(zone_id).and_then(peek)
    }

    /// Record that a vehicle past the gate enters the zone at `entry_time`.
    pub fn admit(&mut self, zone_id: &str, entry_time: f64) {
        push(
            self.heaps.entry(zone_id.to_string()).or_default(),
            entry_time,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::types::Zone;

    fn one_zone(capacity: u32) -> HashMap<String, Zone> {
        let mut zones = HashMap::new();
        zones.insert(
            "Z".to_string(),
            Zone {
                id: "Z".to_string(),
                capacity,
                first_seq: 1,
                last_seq: 2,
            },
        );
        zones
    }

    #[test]
    fn test_zone_pool_starts_free() {
        let pool = ZoneSlotPool::new(&one_zone(2));
        assert_eq!(pool.earliest_free("Z"), 0.0);
        assert_eq!(pool.earliest_free("unknown"), 0.0);
    }

    #[test]
    fn test_zone_pool_acquire_release_cycle() {
        let mut pool = ZoneSlotPool::new(&one_zone(1));
        pool.acquire("Z");
        pool.release("Z", 10.0);
        assert_eq!(pool.earliest_free("Z"), 10.0);
        pool.acquire("Z");
        pool.release("Z", 4.0);
        // Min-heap: the earliest release is always on top.
        assert_eq!(pool.earliest_free("Z"), 4.0);
    }

    #[test]
    fn test_zone_pool_capacity_two_keeps_earliest_on_top() {
        let mut pool = ZoneSlotPool::new(&one_zone(2));
        pool.acquire("Z");
        pool.acquire("Z");
        pool.release("Z", 8.0);
        pool.release("Z", 5.0);
        assert_eq!(pool.earliest_free("Z"), 5.0);
    }

    #[test]
    fn test_gate_pool_drain_and_count() {
        let mut pool = GateBufferPool::new();
        pool.admit("Z", 10.0);
        pool.admit("Z", 20.0);
        pool.admit("Z", 30.0);
        assert_eq!(pool.in_flight("Z"), 3);

        pool.drain_before_or_at("Z", 20.0);
        assert_eq!(pool.in_flight("Z"), 1);
        assert_eq!(pool.earliest_entry("Z"), Some(30.0));

        pool.drain_before_or_at("Z", 29.999);
        assert_eq!(pool.in_flight("Z"), 1);
    }

    #[test]
    fn test_gate_pool_unknown_zone_is_empty() {
        let mut pool = GateBufferPool::new();
        pool.drain_before_or_at("Z", 100.0);
        assert_eq!(pool.in_flight("Z"), 0);
        assert_eq!(pool.earliest_entry("Z"), None);
    }
}
