/// Input normaliser: validates raw step definitions and derives the line
/// plan (ordered route, zone table, gate-buffer table).
use std::collections::HashMap;

use crate::domain::{DurationField, RawStepDef, ScheduleError};
use crate::scheduler::types::{
    LinePlan, Step, Zone, ZoneMembership, ZoneRole, DEFAULT_GATE_BUFFER, DEFAULT_ZONE_CAPACITY,
};

/// Canonicalise `step_defs` into a [`LinePlan`].
///
/// Rules:
/// - Steps with an empty display or an empty durations list are dropped.
/// - Only the first duration of a surviving step is used; it must parse as a
///   positive real or the whole input is rejected with `DurationParse`.
/// - Surviving steps are sorted by ascending seq; a missing seq falls back
///   to the step's position among the survivors.
/// - Zones get `first_seq`/`last_seq` from their member steps and a capacity
///   raised to the maximum explicit `zone_capacity` found in the raw input.
/// - Gate buffers aggregate per target zone, maximum wins, default 2.
/// - A gate naming a zone with no member step is a hard error.
pub fn normalize(step_defs: &[RawStepDef]) -> Result<LinePlan, ScheduleError> {
    let mut steps: Vec<Step> = Vec::new();
    let mut gate_buffers: HashMap<String, u32> = HashMap::new();

    for def in step_defs {
        let display = def.display.trim().to_string();
        if display.is_empty() || def.durations.is_empty() {
            continue;
        }
        let group = match def.group.trim() {
            "" => display.clone(),
            g => g.to_string(),
        };
        let seq = def.seq.unwrap_or(steps.len() as u32 + 1);
        let duration = parse_duration(&def.durations[0], seq)?;

        let zone_id = trimmed(def.zone_id.as_deref());
        let gate_zone_id = trimmed(def.gate_zone_id.as_deref());

        if let Some(gz) = &gate_zone_id {
            let buffer = def
                .gate_buffer
                .filter(|b| *b >= 1)
                .map(|b| b as u32)
                .unwrap_or(DEFAULT_GATE_BUFFER);
            gate_buffers
                .entry(gz.clone())
                .and_modify(|b| *b = (*b).max(buffer))
                .or_insert(buffer);
        }

        steps.push(Step {
            seq,
            display,
            group,
            duration,
            // Role resolved below once the zone bounds are known.
            zone: zone_id.map(|zid| ZoneMembership {
                zone_id: zid,
                role: ZoneRole::Middle,
            }),
            gate: gate_zone_id,
            color: def.color.clone(),
        });
    }

    steps.sort_by_key(|s| s.seq);
    if steps.is_empty() {
        return Err(ScheduleError::EmptySchedule);
    }

    // Zone bounds from member steps.
    let mut zones: HashMap<String, Zone> = HashMap::new();
    for step in &steps {
        if let Some(membership) = &step.zone {
            let zone = zones
                .entry(membership.zone_id.clone())
                .or_insert_with(|| Zone {
                    id: membership.zone_id.clone(),
                    capacity: DEFAULT_ZONE_CAPACITY,
                    first_seq: step.seq,
                    last_seq: step.seq,
                });
            zone.first_seq = zone.first_seq.min(step.seq);
            zone.last_seq = zone.last_seq.max(step.seq);
        }
    }

    // Capacities come from the raw input so a later-dropped row can still
    // raise the cap of a registered zone.
    for def in step_defs {
        let Some(zid) = trimmed(def.zone_id.as_deref()) else {
            continue;
        };
        let Some(zone) = zones.get_mut(&zid) else {
            continue;
        };
        if let Some(cap) = def.zone_capacity.filter(|c| *c >= 1) {
            zone.capacity = zone.capacity.max(cap as u32);
        }
    }

    // Resolve member roles against the zone bounds.
    for step in &mut steps {
        if let Some(membership) = &mut step.zone {
            let zone = &zones[&membership.zone_id];
            membership.role = match (step.seq == zone.first_seq, step.seq == zone.last_seq) {
                (true, true) => ZoneRole::Solo,
                (true, false) => ZoneRole::Entry,
                (false, true) => ZoneRole::Exit,
                (false, false) => ZoneRole::Middle,
            };
        }
    }

    // Every gate must point at a declared zone.
    for step in &steps {
        if let Some(gz) = &step.gate {
            if !zones.contains_key(gz) {
                return Err(ScheduleError::DanglingGate {
                    seq: step.seq,
                    zone_id: gz.clone(),
                });
            }
        }
    }

    Ok(LinePlan {
        steps,
        zones,
        gate_buffers,
    })
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_duration(field: &DurationField, seq: u32) -> Result<f64, ScheduleError> {
    let (value, shown) = match field {
        DurationField::Number(n) => (Some(*n), n.to_string()),
        DurationField::Text(t) => (t.trim().parse::<f64>().ok(), t.clone()),
    };
    match value {
        Some(d) if d.is_finite() && d > 0.0 => Ok(d),
        _ => Err(ScheduleError::DurationParse { seq, value: shown }),
    }
}
