//! Error types for combat setup and player/AI intents.
//!
//! Two failure classes exist at runtime:
//! - [`ActionError`]: an intent the rules reject. The combat is left
//!   untouched apart from a log line, and the caller may try something else.
//! - [`SetupError`] / [`GridError`]: bad input at the boundary (malformed
//!   tile matrix, unusable roster, invalid rules).
//!
//! Broken invariants (two occupants in a cell, negative resources) are
//! programming errors and panic instead.

use thiserror::Error;

use crate::core::EntityId;
use crate::grid::GridPos;
use crate::units::SkillId;

/// Result type alias for intent handling.
pub type ActionResult<T> = std::result::Result<T, ActionError>;

/// An intent rejected by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Combat already reached Victory or Defeat.
    #[error("combat is over")]
    CombatOver,

    /// The entity is not the one whose turn it is.
    #[error("it is not {0}'s turn")]
    NotActive(EntityId),

    /// No entity with this id exists.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    /// The entity is dead.
    #[error("{0} is defeated")]
    Defeated(EntityId),

    /// The entity does not know this skill.
    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    /// Not enough action points.
    #[error("not enough AP: need {required}, have {available}")]
    NotEnoughAp {
        /// AP the action costs.
        required: u32,
        /// AP the entity has left.
        available: u32,
    },

    /// Not enough movement points.
    #[error("not enough MP: need {required}, have {available}")]
    NotEnoughMp {
        /// MP the move costs.
        required: u32,
        /// MP the entity has left.
        available: u32,
    },

    /// The skill is still cooling down.
    #[error("skill {skill} is on cooldown ({remaining} turns)")]
    OnCooldown {
        /// Skill that was attempted.
        skill: SkillId,
        /// Turns left before it can be used.
        remaining: u32,
    },

    /// Target lies outside the allowed range bracket.
    #[error("target at distance {distance} is outside range {min}-{max}")]
    OutOfRange {
        /// Manhattan distance to the target.
        distance: u32,
        /// Minimum range.
        min: u32,
        /// Maximum range.
        max: u32,
    },

    /// The cell is outside the grid.
    #[error("{0} is outside the grid")]
    OutOfBounds(GridPos),

    /// The cell is an obstacle.
    #[error("{0} is not walkable")]
    NotWalkable(GridPos),

    /// The destination is occupied.
    #[error("{0} is occupied")]
    Occupied(GridPos),

    /// No path within the MP budget reaches the cell.
    #[error("{0} is not reachable")]
    Unreachable(GridPos),

    /// The target does not match what the skill may target.
    #[error("invalid target at {0}")]
    InvalidTarget(GridPos),

    /// Disengaging would cost more AP than the entity has.
    #[error("tackled: disengaging costs {cost} AP, have {available}")]
    Tackled {
        /// AP needed to leave the cell.
        cost: u32,
        /// AP the entity has left.
        available: u32,
    },

    /// A target was confirmed with no skill selected.
    #[error("no skill selected")]
    NoSkillSelected,
}

/// Malformed grid input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Rows or columns are zero.
    #[error("grid must have at least one row and one column")]
    Empty,

    /// The tile matrix does not match the requested size.
    #[error("tile matrix is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        /// Requested rows.
        expected_rows: usize,
        /// Requested columns.
        expected_cols: usize,
        /// Rows supplied.
        rows: usize,
        /// Columns of the first mismatching row.
        cols: usize,
    },
}

/// Failure while building a combat.
#[derive(Debug, Error)]
pub enum SetupError {
    /// No player-controlled or no enemy units were supplied.
    #[error("combat needs at least one player unit and one enemy unit")]
    MissingSide,

    /// Explicit placement onto a cell that cannot hold a unit.
    #[error("cannot place unit at {0}")]
    Placement(GridPos),

    /// Automatic placement ran out of spawn cells.
    #[error("not enough free spawn cells for {0} units")]
    NotEnoughSpawnCells(usize),

    /// Rules failed validation.
    #[error("invalid rules: {0}")]
    InvalidRules(String),

    /// Grid input was malformed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Rules JSON did not parse.
    #[error("failed to parse rules: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::NotEnoughAp { required: 4, available: 1 };
        assert_eq!(err.to_string(), "not enough AP: need 4, have 1");

        let err = ActionError::Tackled { cost: 3, available: 2 };
        assert_eq!(err.to_string(), "tackled: disengaging costs 3 AP, have 2");
    }

    #[test]
    fn test_grid_error_into_setup_error() {
        let err: SetupError = GridError::Empty.into();
        assert!(matches!(err, SetupError::Grid(GridError::Empty)));
    }
}
