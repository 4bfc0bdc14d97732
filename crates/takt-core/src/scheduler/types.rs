/// Normalised line-plan types produced by the input normaliser and consumed
/// by the simulator loop.
use std::collections::HashMap;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Vehicles allowed between a gate and its zone entry when the gate step
/// supplies no explicit buffer.
pub const DEFAULT_GATE_BUFFER: u32 = 2;

/// Concurrent occupants of a zone that declares no explicit capacity.
pub const DEFAULT_ZONE_CAPACITY: u32 = 1;

// ============================================================================
// ZONE MEMBERSHIP
// ============================================================================

/// Position of a member step within its zone's seq range.
///
/// Derived from the zone's first/last seq at normalisation time so the
/// simulator loop never probes raw string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRole {
    /// First step of the range: entering it takes a zone slot.
    Entry,
    /// Strictly inside the range: neither takes nor returns a slot.
    Middle,
    /// Last step of the range: departing it returns the slot.
    Exit,
    /// Single-step zone: entry and exit at once.
    Solo,
}

impl ZoneRole {
    /// Whether starting this step occupies a zone slot.
    pub fn enters(self) -> bool {
        matches!(self, ZoneRole::Entry | ZoneRole::Solo)
    }

    /// Whether departing this step frees a zone slot.
    pub fn exits(self) -> bool {
        matches!(self, ZoneRole::Exit | ZoneRole::Solo)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMembership {
    pub zone_id: String,
    pub role: ZoneRole,
}

// ============================================================================
// STEP
// ============================================================================

/// One workstation operation of the canonical route, after filtering,
/// duration selection, and zone/gate resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub seq: u32,
    pub display: String,
    pub group: String,
    /// Service duration in seconds (first entry of the raw list).
    pub duration: f64,
    pub zone: Option<ZoneMembership>,
    /// Zone id this step gates, if any.
    pub gate: Option<String>,
    /// Explicit bar colour carried through to rendering.
    pub color: Option<String>,
}

// ============================================================================
// ZONE
// ============================================================================

/// A blocking zone: the seq range of its member steps and its occupancy cap.
///
/// Member steps are not validated to be contiguous; `first_seq..=last_seq`
/// bounds the zone and any step in between is physically inside it while a
/// vehicle transits the range.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: String,
    pub capacity: u32,
    pub first_seq: u32,
    pub last_seq: u32,
}

// ============================================================================
// LINE PLAN
// ============================================================================

/// Canonicalised input to the simulator: the ordered route plus zone and
/// gate tables. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlan {
    /// Steps in ascending seq order; the per-vehicle route.
    pub steps: Vec<Step>,
    pub zones: HashMap<String, Zone>,
    /// Effective buffer per gated zone (maximum across declaring steps).
    pub gate_buffers: HashMap<String, u32>,
}
