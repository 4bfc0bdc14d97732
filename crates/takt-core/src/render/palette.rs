/// Fixed ticket colours.
use std::collections::HashMap;

use crate::scheduler::types::Step;

/// Rotating bar palette, one colour per step group.
pub const GROUP_PALETTE: [&str; 10] = [
    "#4CAF50", "#2196F3", "#9C27B0", "#FF9800", "#009688",
    "#795548", "#3F51B5", "#E91E63", "#00BCD4", "#8BC34A",
];

pub const HEADER_FILL: &str = "#EEEEEE";
pub const CAR_FILL: &str = "#F5F5F5";
pub const WAIT_LABEL_FILL: &str = "#FFF9C4";
pub const WAIT_BAR_FILL: &str = "#FFE082";

/// Assign palette slots to groups by first appearance along the route, so
/// colour assignment is as deterministic as the timeline itself.
pub fn group_palette(steps: &[Step]) -> HashMap<String, &'static str> {
    let mut assigned = HashMap::new();
    for step in steps {
        let next = assigned.len() % GROUP_PALETTE.len();
        assigned
            .entry(step.group.clone())
            .or_insert(GROUP_PALETTE[next]);
    }
    assigned
}

/// Colour for one step's service bar: explicit step colour wins over the
/// group palette.
pub fn bar_color<'a>(
    step_colors: &'a HashMap<String, String>,
    groups: &'a HashMap<String, &'static str>,
    display: &str,
    group: &str,
) -> &'a str {
    if let Some(custom) = step_colors.get(display) {
        return custom;
    }
    groups.get(group).copied().unwrap_or(GROUP_PALETTE[0])
}
