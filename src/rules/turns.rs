//! Initiative, turn advance and the win/loss check.

use tracing::{debug, info};

use crate::core::{CombatEvent, CombatState, EntityId, Phase};
use crate::units::TacticalEntity;

/// Turn order by agility, highest first. Ties keep the input order.
pub fn initiative_order<'a>(entities: impl Iterator<Item = &'a TacticalEntity>) -> Vec<EntityId> {
    let mut order: Vec<(EntityId, u32)> = entities.map(|e| (e.id, e.attributes.agility)).collect();
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().map(|(id, _)| id).collect()
}

/// Hand the turn to the next living entity.
///
/// Clears highlights and any pending skill selection, wraps around the turn
/// order (a wrap starts a new round), then refills the new active entity's
/// AP and MP and ticks its cooldowns.
///
/// Does nothing once combat is over or fewer than two entities still live.
pub fn end_turn(state: &mut CombatState) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if state.phase() != Phase::Combat || state.living().count() < 2 {
        return events;
    }

    state.set_grid(state.grid().clear_highlights());
    state.set_selected_skill(None);

    let len = state.turn_order().len();
    let previous = state.active_index();
    let Some(next) = (1..=len)
        .map(|step| (previous + step) % len)
        .find(|&i| state.entity(state.turn_order()[i]).is_some_and(TacticalEntity::is_alive))
    else {
        return events;
    };

    if next <= previous {
        state.advance_round();
    }
    state.set_active_index(next);

    let id = state.turn_order()[next];
    if let Some(entity) = state.entity_mut(id) {
        entity.refresh_turn_resources();
        entity.tick_cooldowns();
    }

    let turn = state.turn_number();
    debug!(entity = %id, turn, "turn started");
    state.emit(&mut events, CombatEvent::TurnStarted { entity: id, turn });
    events
}

/// Settle the combat after `defeated` fell.
///
/// Victory when no enemy other than `defeated` is alive, Defeat when no
/// player unit is. Victory is checked first.
pub fn check_win_loss(state: &mut CombatState, defeated: EntityId, events: &mut Vec<CombatEvent>) -> Phase {
    let side_alive = |is_player: bool| {
        state
            .living()
            .any(|e| e.id != defeated && e.is_player == is_player)
    };

    let phase = if !side_alive(false) {
        Phase::Victory
    } else if !side_alive(true) {
        Phase::Defeat
    } else {
        return state.phase();
    };

    state.set_phase(phase);
    state.set_grid(state.grid().clear_highlights());
    state.set_selected_skill(None);
    info!(?phase, turn = state.turn_number(), "combat finished");
    state.emit(events, CombatEvent::PhaseChanged { phase });
    phase
}
