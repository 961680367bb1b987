//! Intent dispatch for the active entity.
//!
//! `apply_intent` is the single entry point for both the player-facing
//! collaborator and the AI. Every intent either succeeds, returning its
//! events and appending an `IntentRecord` to the history, or is rejected
//! with an `ActionError` and exactly one `Info` log line, leaving the rest
//! of the state untouched.
//!
//! ## Skill targeting
//!
//! ```text
//! Idle --SelectSkill--> Targeting --ConfirmSkillTarget--> Idle (skill cast)
//!                          |  \--CancelSkill----------> Idle
//!                          \---EndTurn / Move---------> Idle
//! ```
//!
//! Self-targeting skills skip `Targeting` and are cast on selection. A
//! rejected confirmation keeps the selection so another cell can be tried.

use std::collections::BTreeSet;

use tracing::debug;

use super::tackle::disengage_cost;
use super::turns::end_turn;
use crate::core::{CombatEvent, CombatState, EntityId, Intent, Phase};
use crate::effects::{skill_range_cells, SkillResolver};
use crate::error::{ActionError, ActionResult};
use crate::grid::{aoe_cells, movement_costs, reachable_cells, shortest_path, Direction, GridPos, Highlight};
use crate::units::{Skill, SkillId, TacticalEntity, TargetType};

/// Apply an intent on behalf of `actor`, who must be the active entity.
pub fn apply_intent(state: &mut CombatState, actor: EntityId, intent: Intent) -> ActionResult<Vec<CombatEvent>> {
    let turn = state.turn_number();
    let result = match intent {
        Intent::Move { to } => move_to(state, actor, to),
        Intent::BasicAttack { target } => {
            check_turn(state, actor).and_then(|()| SkillResolver::attack(state, actor, target))
        }
        Intent::SelectSkill { skill } => select_skill(state, actor, skill),
        Intent::CancelSkill => cancel_skill(state, actor),
        Intent::ConfirmSkillTarget { target } => confirm_skill_target(state, actor, target),
        Intent::UseSkill { skill, target } => use_skill(state, actor, skill, target),
        Intent::EndTurn => check_turn(state, actor).map(|()| end_turn(state)),
    };

    match result {
        Ok(mut events) => {
            state.record(actor, intent, turn);
            if state.phase() == Phase::Combat && state.active_entity().is_some_and(|e| !e.is_alive()) {
                debug!(entity = %actor, "active entity fell on its own turn");
                events.extend(end_turn(state));
            }
            Ok(events)
        }
        Err(err) => Err(state.reject(actor, err)),
    }
}

/// Highlight where the active entity can walk this turn.
pub fn highlight_moves(state: &mut CombatState) -> BTreeSet<GridPos> {
    let cells = state
        .active_entity()
        .and_then(|e| e.grid_pos().map(|pos| reachable_cells(state.grid(), pos, e.mp())))
        .unwrap_or_default();
    state.set_grid(state.grid().clear_highlights().highlight_cells(cells.iter().copied(), Highlight::Move));
    cells
}

/// Preview the area the selected skill would cover if aimed at `target`.
///
/// Range highlights stay; area cells are layered on top. Returns an empty
/// set when nothing is selected or `target` is out of range.
pub fn highlight_area(state: &mut CombatState, target: GridPos) -> BTreeSet<GridPos> {
    let Some((origin, skill)) = selected(state) else {
        return BTreeSet::new();
    };
    let Some(entity) = state.active_entity() else {
        return BTreeSet::new();
    };
    let range = skill_range_cells(state, entity, &skill);
    let center = if skill.target_type == TargetType::Self_ { origin } else { target };
    if !range.contains(&center) {
        return BTreeSet::new();
    }

    let cells = aoe_cells(
        state.grid(),
        center,
        skill.area_type,
        skill.area_size,
        Direction::between(origin, center),
    );
    let grid = state
        .grid()
        .clear_highlights()
        .highlight_cells(range, Highlight::Attack)
        .highlight_cells(cells.iter().copied(), Highlight::Area);
    state.set_grid(grid);
    cells
}

fn check_turn(state: &CombatState, actor: EntityId) -> ActionResult<()> {
    active(state, actor).map(|_| ())
}

/// The active entity, checked to be `actor` and able to act.
fn active(state: &CombatState, actor: EntityId) -> ActionResult<&TacticalEntity> {
    if state.phase() != Phase::Combat {
        return Err(ActionError::CombatOver);
    }
    let entity = state.entity(actor).ok_or(ActionError::UnknownEntity(actor))?;
    if !entity.is_alive() {
        return Err(ActionError::Defeated(actor));
    }
    if state.active_id() != Some(actor) {
        return Err(ActionError::NotActive(actor));
    }
    Ok(entity)
}

fn known_skill(entity: &TacticalEntity, skill: SkillId) -> ActionResult<Skill> {
    entity.skill(skill).cloned().ok_or(ActionError::UnknownSkill(skill))
}

fn selected(state: &CombatState) -> Option<(GridPos, Skill)> {
    let entity = state.active_entity()?;
    let skill = entity.skill(state.selected_skill()?)?.clone();
    Some((entity.grid_pos()?, skill))
}

fn clear_selection(state: &mut CombatState) {
    state.set_selected_skill(None);
    state.set_grid(state.grid().clear_highlights());
}

fn move_to(state: &mut CombatState, actor: EntityId, to: GridPos) -> ActionResult<Vec<CombatEvent>> {
    let entity = active(state, actor)?;
    let from = entity.grid_pos().ok_or(ActionError::Defeated(actor))?;
    let grid = state.grid();

    if !grid.in_bounds(to) {
        return Err(ActionError::OutOfBounds(to));
    }
    if !grid.is_walkable(to) {
        return Err(ActionError::NotWalkable(to));
    }
    if to == from {
        return Err(ActionError::Unreachable(to));
    }
    if grid.occupant(to).is_some() {
        return Err(ActionError::Occupied(to));
    }

    let mp = entity.mp();
    let Some(&mp_cost) = movement_costs(grid, from, mp).get(&to) else {
        return Err(match shortest_path(grid, from, to) {
            Some(path) => ActionError::NotEnoughMp {
                required: path.len() as u32,
                available: mp,
            },
            None => ActionError::Unreachable(to),
        });
    };

    let tackle_ap = disengage_cost(state, actor);
    if tackle_ap > entity.ap() {
        return Err(ActionError::Tackled {
            cost: tackle_ap,
            available: entity.ap(),
        });
    }

    if let Some(entity) = state.entity_mut(actor) {
        entity.spend_mp(mp_cost);
        entity.spend_ap(tackle_ap);
    }
    clear_selection(state);
    state.relocate(actor, to);
    debug!(entity = %actor, %from, %to, mp_cost, tackle_ap, "moved");

    let mut events = Vec::new();
    state.emit(
        &mut events,
        CombatEvent::Moved {
            entity: actor,
            from,
            to,
            mp_spent: mp_cost,
            tackle_ap,
        },
    );
    Ok(events)
}

fn select_skill(state: &mut CombatState, actor: EntityId, skill_id: SkillId) -> ActionResult<Vec<CombatEvent>> {
    let entity = active(state, actor)?;
    let skill = known_skill(entity, skill_id)?;
    SkillResolver::check_castable(state, actor, &skill)?;

    if skill.target_type == TargetType::Self_ {
        let origin = entity.grid_pos().ok_or(ActionError::Defeated(actor))?;
        let events = SkillResolver::cast(state, actor, origin, &skill)?;
        clear_selection(state);
        return Ok(events);
    }

    let range = skill_range_cells(state, entity, &skill);
    state.set_selected_skill(Some(skill_id));
    state.set_grid(state.grid().clear_highlights().highlight_cells(range, Highlight::Attack));

    let mut events = Vec::new();
    state.emit(&mut events, CombatEvent::SkillSelected { entity: actor, skill: skill_id });
    Ok(events)
}

fn cancel_skill(state: &mut CombatState, actor: EntityId) -> ActionResult<Vec<CombatEvent>> {
    check_turn(state, actor)?;
    if state.selected_skill().is_none() {
        return Err(ActionError::NoSkillSelected);
    }
    clear_selection(state);

    let mut events = Vec::new();
    state.emit(&mut events, CombatEvent::SelectionCancelled { entity: actor });
    Ok(events)
}

fn confirm_skill_target(state: &mut CombatState, actor: EntityId, target: GridPos) -> ActionResult<Vec<CombatEvent>> {
    let entity = active(state, actor)?;
    let skill_id = state.selected_skill().ok_or(ActionError::NoSkillSelected)?;
    let skill = known_skill(entity, skill_id)?;

    let events = SkillResolver::cast(state, actor, target, &skill)?;
    clear_selection(state);
    Ok(events)
}

fn use_skill(
    state: &mut CombatState,
    actor: EntityId,
    skill_id: SkillId,
    target: GridPos,
) -> ActionResult<Vec<CombatEvent>> {
    let entity = active(state, actor)?;
    let skill = known_skill(entity, skill_id)?;

    let events = SkillResolver::cast(state, actor, target, &skill)?;
    clear_selection(state);
    Ok(events)
}
