//! Turn controllers and the AI turn driver.

use std::collections::VecDeque;

use tracing::debug;

use super::config::DEFAULT_MAX_STEPS;
use crate::core::{CombatEvent, CombatState, EntityId, Intent, Phase};
use crate::rules::apply_intent;

/// Something that chooses intents for an entity's turn.
///
/// Controllers are asked one intent at a time; returning `None` (or
/// `Intent::EndTurn`) hands the turn on.
pub trait TurnController {
    /// Next intent for `actor`, or `None` to end the turn.
    fn next_intent(&mut self, state: &CombatState, actor: EntityId) -> Option<Intent>;

    /// Upper bound on intents issued in one turn.
    fn max_steps(&self) -> usize {
        DEFAULT_MAX_STEPS
    }
}

/// Replays a fixed list of intents, regardless of state.
#[derive(Clone, Debug, Default)]
pub struct ScriptedController {
    intents: VecDeque<Intent>,
}

impl ScriptedController {
    #[must_use]
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }

    /// Intents not yet issued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.intents.len()
    }
}

impl TurnController for ScriptedController {
    fn next_intent(&mut self, _state: &CombatState, _actor: EntityId) -> Option<Intent> {
        self.intents.pop_front()
    }
}

/// Play the active entity's turn with `controller`, then end it.
///
/// Stops early at the first rejected intent, when the controller runs dry,
/// after `max_steps` intents, or when combat ends. Returns every event
/// produced, including the next entity's `TurnStarted`.
pub fn run_ai_turn<C: TurnController + ?Sized>(state: &mut CombatState, controller: &mut C) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let Some(actor) = state.active_id() else {
        return events;
    };

    for _ in 0..controller.max_steps() {
        if state.phase() != Phase::Combat {
            return events;
        }
        let Some(intent) = controller.next_intent(state, actor) else {
            break;
        };
        if intent == Intent::EndTurn {
            break;
        }
        debug!(entity = %actor, ?intent, "ai intent");
        match apply_intent(state, actor, intent) {
            Ok(produced) => events.extend(produced),
            Err(err) => {
                debug!(entity = %actor, %err, "ai intent rejected, ending turn");
                break;
            }
        }
    }

    if state.phase() == Phase::Combat {
        if let Ok(produced) = apply_intent(state, actor, Intent::EndTurn) {
            events.extend(produced);
        }
    }
    events
}
