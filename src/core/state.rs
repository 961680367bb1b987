//! Combat state: grid, entities, turn order, phase and log.
//!
//! `CombatState` exclusively owns the grid and the entity map. Outside code
//! only gets shared references or copies; every mutation goes through the
//! rules (`rules`, `effects`) which keep the grid and each entity's
//! `grid_pos` in agreement.
//!
//! Grid, entity map, log and history are persistent `im` structures, so
//! cloning a whole state is cheap. Callers that want a speculative branch
//! clone, mutate the clone, and drop or keep it.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::{Intent, IntentRecord};
use super::config::RulesConfig;
use super::entity::EntityId;
use super::event::{CombatEvent, CombatLog, LogKind};
use super::rng::{CombatRng, CombatRngState};
use crate::error::ActionError;
use crate::grid::{Grid, GridPos};
use crate::units::{SkillId, TacticalEntity};

/// Combat phase. `Victory` and `Defeat` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Turns are being played.
    #[default]
    Combat,
    /// Every enemy fell.
    Victory,
    /// Every player unit fell.
    Defeat,
}

impl Phase {
    /// Victory or Defeat?
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Phase::Combat
    }
}

/// One combat instance.
#[derive(Clone, Debug)]
pub struct CombatState {
    rules: RulesConfig,
    grid: Grid,
    entities: OrdMap<EntityId, TacticalEntity>,
    turn_order: Vec<EntityId>,
    active_index: usize,
    phase: Phase,
    turn_number: u32,
    log: CombatLog,
    history: Vector<IntentRecord>,
    selected_skill: Option<SkillId>,
    sequence: u32,
    rng: CombatRng,
}

impl CombatState {
    /// Assemble a state from already placed entities.
    ///
    /// `entities` must already stand on `grid`. Initiative is computed here.
    pub(crate) fn assemble(
        rules: RulesConfig,
        grid: Grid,
        entities: OrdMap<EntityId, TacticalEntity>,
        rng: CombatRng,
    ) -> Self {
        let turn_order = crate::rules::initiative_order(entities.values());
        let mut state = Self {
            rules,
            grid,
            entities,
            turn_order,
            active_index: 0,
            phase: Phase::Combat,
            turn_number: 1,
            log: CombatLog::new(),
            history: Vector::new(),
            selected_skill: None,
            sequence: 0,
            rng,
        };
        state.debug_check_positions();

        let mut events = Vec::new();
        state.emit(&mut events, CombatEvent::CombatStarted);
        if let Some(first) = state.active_id() {
            state.emit(&mut events, CombatEvent::TurnStarted { entity: first, turn: 1 });
        }
        state
    }

    // === Queries ===

    /// Balance constants for this combat.
    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// The battle map.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Look up an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&TacticalEntity> {
        self.entities.get(&id)
    }

    /// All entities in ID order, dead ones included.
    pub fn entities(&self) -> impl Iterator<Item = &TacticalEntity> {
        self.entities.values()
    }

    /// Living entities in ID order.
    pub fn living(&self) -> impl Iterator<Item = &TacticalEntity> {
        self.entities.values().filter(|e| e.is_alive())
    }

    /// Initiative order, fixed at combat start.
    #[must_use]
    pub fn turn_order(&self) -> &[EntityId] {
        &self.turn_order
    }

    /// Index into `turn_order` of the active entity.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The entity whose turn it is.
    #[must_use]
    pub fn active_id(&self) -> Option<EntityId> {
        self.turn_order.get(self.active_index).copied()
    }

    /// The active entity.
    #[must_use]
    pub fn active_entity(&self) -> Option<&TacticalEntity> {
        self.active_id().and_then(|id| self.entity(id))
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Round number (starts at 1).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Seed the combat's rolls were drawn from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Checkpoint of the roll stream.
    #[must_use]
    pub fn rng_state(&self) -> CombatRngState {
        self.rng.state()
    }

    /// The combat log.
    #[must_use]
    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Accepted intents in order.
    #[must_use]
    pub fn history(&self) -> &Vector<IntentRecord> {
        &self.history
    }

    /// Skill currently being targeted.
    #[must_use]
    pub fn selected_skill(&self) -> Option<SkillId> {
        self.selected_skill
    }

    /// Entity standing on a cell, if alive.
    #[must_use]
    pub fn living_at(&self, pos: GridPos) -> Option<&TacticalEntity> {
        self.grid
            .occupant(pos)
            .and_then(|id| self.entity(id))
            .filter(|e| e.is_alive())
    }

    /// Display name of an entity, or its id.
    #[must_use]
    pub fn name_of(&self, id: EntityId) -> String {
        self.entity(id).map_or_else(|| id.to_string(), |e| e.name.clone())
    }

    // === Crate-internal mutation ===

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut TacticalEntity> {
        self.entities.get_mut(&id)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut CombatRng {
        &mut self.rng
    }

    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_active_index(&mut self, index: usize) {
        self.active_index = index;
    }

    pub(crate) fn advance_round(&mut self) {
        self.turn_number += 1;
    }

    pub(crate) fn set_selected_skill(&mut self, skill: Option<SkillId>) {
        self.selected_skill = skill;
    }

    /// Move an entity on the grid and mirror it into `grid_pos`.
    pub(crate) fn relocate(&mut self, id: EntityId, to: GridPos) {
        let Some(from) = self.entity(id).and_then(TacticalEntity::grid_pos) else {
            return;
        };
        self.grid = self.grid.move_occupant(from, to);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_grid_pos(Some(to));
        }
        self.debug_check_positions();
    }

    /// Take an entity off the grid.
    pub(crate) fn remove_from_grid(&mut self, id: EntityId) {
        if let Some(pos) = self.entity(id).and_then(TacticalEntity::grid_pos) {
            self.grid = self.grid.remove_occupant(pos);
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_grid_pos(None);
        }
    }

    /// Append an event to `events` and its description to the log.
    pub(crate) fn emit(&mut self, events: &mut Vec<CombatEvent>, event: CombatEvent) {
        let text = self.describe(&event);
        debug!(?event, "{text}");
        self.log.push(event.kind(), text);
        events.push(event);
    }

    /// Log a rejected intent and hand the error back.
    pub(crate) fn reject(&mut self, actor: EntityId, err: ActionError) -> ActionError {
        debug!(%actor, %err, "intent rejected");
        let text = format!("{}: {err}", self.name_of(actor));
        self.log.push(LogKind::Info, text);
        err
    }

    /// Append an accepted intent, issued during round `turn`, to the history.
    pub(crate) fn record(&mut self, entity: EntityId, intent: Intent, turn: u32) {
        let record = IntentRecord::new(entity, intent, turn, self.sequence);
        self.sequence += 1;
        self.history.push_back(record);
    }

    fn describe(&self, event: &CombatEvent) -> String {
        match event {
            CombatEvent::CombatStarted => "Combat started".to_string(),
            CombatEvent::TurnStarted { entity, turn } => {
                format!("Turn {turn}: {} acts", self.name_of(*entity))
            }
            CombatEvent::Moved { entity, to, tackle_ap, .. } => {
                if *tackle_ap > 0 {
                    format!("{} breaks away for {tackle_ap} AP and moves to {to}", self.name_of(*entity))
                } else {
                    format!("{} moves to {to}", self.name_of(*entity))
                }
            }
            CombatEvent::SkillSelected { entity, skill } => {
                format!("{} prepares {}", self.name_of(*entity), self.skill_name(*entity, *skill))
            }
            CombatEvent::SelectionCancelled { entity } => format!("{} lowers their guard", self.name_of(*entity)),
            CombatEvent::SkillUsed { caster, skill, target } => {
                format!("{} uses {} on {target}", self.name_of(*caster), self.skill_name(*caster, *skill))
            }
            CombatEvent::BasicAttack { attacker, target } => {
                format!("{} attacks {}", self.name_of(*attacker), self.name_of(*target))
            }
            CombatEvent::Missed { source, target } => {
                format!("{} misses {}", self.name_of(*source), self.name_of(*target))
            }
            CombatEvent::Damaged { source, target, amount, crit } => {
                let crit = if *crit { " (critical)" } else { "" };
                format!("{} hits {} for {amount}{crit}", self.name_of(*source), self.name_of(*target))
            }
            CombatEvent::Healed { source, target, amount } => {
                format!("{} heals {} for {amount}", self.name_of(*source), self.name_of(*target))
            }
            CombatEvent::Pushed { target, to, .. } => format!("{} is pushed to {to}", self.name_of(*target)),
            CombatEvent::Defeated { entity } => format!("{} is defeated", self.name_of(*entity)),
            CombatEvent::PhaseChanged { phase } => match phase {
                Phase::Victory => "Victory!".to_string(),
                Phase::Defeat => "Defeat...".to_string(),
                Phase::Combat => "Combat resumes".to_string(),
            },
        }
    }

    fn skill_name(&self, entity: EntityId, skill: SkillId) -> String {
        self.entity(entity)
            .and_then(|e| e.skill(skill))
            .map_or_else(|| skill.to_string(), |s| s.name.clone())
    }

    fn debug_check_positions(&self) {
        if cfg!(debug_assertions) {
            for entity in self.entities.values() {
                if let Some(pos) = entity.grid_pos() {
                    assert_eq!(
                        self.grid.occupant(pos),
                        Some(entity.id),
                        "{} records {pos} but the grid disagrees",
                        entity.id
                    );
                }
            }
        }
    }
}
