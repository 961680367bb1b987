//! Disengage (tackle) cost for leaving a cell next to enemies.

use crate::core::{CombatState, EntityId, GridRules};
use crate::grid::neighbors;
use crate::units::TacticalEntity;

/// AP needed to disengage, given the mover's agility and the summed agility
/// of adjacent opponents.
///
/// Free when `agility * agility_mitigation_divisor >= threat`; otherwise
/// `max(base_disengage_cost, floor(threat * threat_scaling / max(1, agility)))`.
#[must_use]
pub fn tackle_cost(agility: u32, threat: u32, rules: &GridRules) -> u32 {
    if f64::from(agility) * rules.agility_mitigation_divisor >= f64::from(threat) {
        return 0;
    }
    let scaled = (f64::from(threat) * rules.threat_scaling / f64::from(agility.max(1))).floor() as u32;
    scaled.max(rules.base_disengage_cost)
}

/// Summed agility of living opponents orthogonally adjacent to `mover`.
#[must_use]
pub fn adjacent_threat(state: &CombatState, mover: &TacticalEntity) -> u32 {
    let Some(pos) = mover.grid_pos() else {
        return 0;
    };
    neighbors(state.grid(), pos)
        .into_iter()
        .filter_map(|p| state.living_at(p))
        .filter(|other| other.is_opponent_of(mover))
        .map(|other| other.attributes.agility)
        .sum()
}

/// AP `mover` must pay to leave its current cell.
#[must_use]
pub fn disengage_cost(state: &CombatState, mover: EntityId) -> u32 {
    state.entity(mover).map_or(0, |entity| {
        tackle_cost(entity.attributes.agility, adjacent_threat(state, entity), &state.rules().grid)
    })
}
