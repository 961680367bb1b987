//! Intents: what a controller asks the active entity to do.
//!
//! The player-facing collaborator and the AI speak the same vocabulary. A
//! skill can be used in two steps (`SelectSkill` then `ConfirmSkillTarget`)
//! the way a UI drives targeting, or in one step (`UseSkill`) the way the AI
//! does.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use crate::grid::GridPos;
use crate::units::SkillId;

/// A request on behalf of the active entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Walk to a cell.
    Move {
        /// Destination.
        to: GridPos,
    },
    /// Skill-less melee attack on an adjacent cell.
    BasicAttack {
        /// Attacked cell.
        target: GridPos,
    },
    /// Start targeting a skill.
    SelectSkill {
        /// Skill to target.
        skill: SkillId,
    },
    /// Abandon the current selection.
    CancelSkill,
    /// Fire the selected skill at a cell.
    ConfirmSkillTarget {
        /// Target cell.
        target: GridPos,
    },
    /// Select and fire in one step.
    UseSkill {
        /// Skill to use.
        skill: SkillId,
        /// Target cell (ignored for self-targeting skills).
        target: GridPos,
    },
    /// Hand the turn to the next entity.
    EndTurn,
}

/// An accepted intent with metadata for replay and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Who acted.
    pub entity: EntityId,
    /// What they did.
    pub intent: Intent,
    /// Round number when it happened.
    pub turn: u32,
    /// Position in the combat's global intent sequence.
    pub sequence: u32,
}

impl IntentRecord {
    /// Create a record.
    #[must_use]
    pub fn new(entity: EntityId, intent: Intent, turn: u32, sequence: u32) -> Self {
        Self {
            entity,
            intent,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::UseSkill {
            skill: SkillId::new(2),
            target: GridPos::new(3, 4),
        };
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
    }

    #[test]
    fn test_record() {
        let record = IntentRecord::new(EntityId(1), Intent::EndTurn, 3, 7);
        assert_eq!(record.entity, EntityId(1));
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 7);
    }
}
