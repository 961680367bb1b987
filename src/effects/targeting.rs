//! Skill target validation.
//!
//! Checks run in a fixed order so the first failing one names the problem:
//! bounds, range bracket, walkability, then (single-cell skills only) the
//! occupant against the skill's `TargetType`. Area skills may be centered on
//! any walkable cell in range.

use std::collections::BTreeSet;

use crate::core::CombatState;
use crate::error::{ActionError, ActionResult};
use crate::grid::{attackable_cells, AreaType, GridPos};
use crate::units::{Skill, TacticalEntity, TargetType};

/// Resolve the cell a skill will be centered on.
///
/// Self-targeting skills ignore `requested` and use the caster's cell.
pub fn resolve_target(
    state: &CombatState,
    caster: &TacticalEntity,
    skill: &Skill,
    requested: GridPos,
) -> ActionResult<GridPos> {
    let origin = caster.grid_pos().ok_or(ActionError::Defeated(caster.id))?;
    if skill.target_type == TargetType::Self_ {
        return Ok(origin);
    }

    let grid = state.grid();
    if !grid.in_bounds(requested) {
        return Err(ActionError::OutOfBounds(requested));
    }
    let distance = origin.distance(requested);
    if !skill.covers(distance) {
        return Err(ActionError::OutOfRange {
            distance,
            min: skill.min_range,
            max: skill.max_range,
        });
    }
    if !grid.is_walkable(requested) {
        return Err(ActionError::NotWalkable(requested));
    }

    if skill.area_type == AreaType::Single {
        let occupant = state.living_at(requested);
        let valid = match skill.target_type {
            TargetType::Enemy => occupant.is_some_and(|t| t.is_opponent_of(caster)),
            TargetType::Ally => occupant.is_some_and(|t| !t.is_opponent_of(caster)),
            TargetType::Cell | TargetType::Self_ => true,
        };
        if !valid {
            return Err(ActionError::InvalidTarget(requested));
        }
    }
    Ok(requested)
}

/// Cells a skill could be aimed at from the caster's position.
#[must_use]
pub fn skill_range_cells(state: &CombatState, caster: &TacticalEntity, skill: &Skill) -> BTreeSet<GridPos> {
    match caster.grid_pos() {
        Some(origin) if skill.target_type == TargetType::Self_ => BTreeSet::from([origin]),
        Some(origin) => attackable_cells(state.grid(), origin, skill.min_range, skill.max_range),
        None => BTreeSet::new(),
    }
}
