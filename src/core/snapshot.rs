//! Read-only view of a combat for renderers and tools.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::rng::CombatRngState;
use super::event::CombatLogMessage;
use super::state::{CombatState, Phase};
use crate::grid::GridCell;
use crate::units::{SkillId, TacticalEntity};

/// Owned copy of everything a renderer needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Cells in row-major order.
    pub cells: Vec<GridCell>,
    /// Entities in ID order, dead ones included.
    pub entities: Vec<TacticalEntity>,
    pub turn_order: Vec<EntityId>,
    pub active: Option<EntityId>,
    pub selected_skill: Option<SkillId>,
    pub phase: Phase,
    pub turn_number: u32,
    pub seed: u64,
    /// Roll stream position, for resuming with `CombatRng::from_state`.
    pub rng: CombatRngState,
    pub log: Vec<CombatLogMessage>,
}

impl CombatSnapshot {
    /// Cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }
}

impl CombatState {
    /// Copy out the grid, entities, turn order, phase and log.
    #[must_use]
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            rows: self.grid().rows(),
            cols: self.grid().cols(),
            cells: self.grid().cells().cloned().collect(),
            entities: self.entities().cloned().collect(),
            turn_order: self.turn_order().to_vec(),
            active: self.active_id(),
            selected_skill: self.selected_skill(),
            phase: self.phase(),
            turn_number: self.turn_number(),
            seed: self.seed(),
            rng: self.rng_state(),
            log: self.log().iter().cloned().collect(),
        }
    }
}
