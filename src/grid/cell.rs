//! Grid cells.

use serde::{Deserialize, Serialize};

use super::GridPos;
use crate::core::EntityId;

/// Which side may deploy on a cell at combat start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnZone {
    /// Player-controlled side.
    Player,
    /// Enemy side.
    Enemy,
}

/// Presentation hint for renderers. Never read by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// Reachable with the remaining MP.
    Move,
    /// Inside the selected skill's range.
    Attack,
    /// Inside the selected skill's area.
    Area,
}

/// A single grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Where this cell sits.
    pub pos: GridPos,
    /// Obstacles are not walkable.
    pub walkable: bool,
    /// Entity standing here.
    pub occupant: Option<EntityId>,
    /// Deployment side, if any.
    pub spawn_zone: Option<SpawnZone>,
    /// Renderer hint.
    pub highlight: Option<Highlight>,
}

impl GridCell {
    /// Create an empty walkable cell.
    #[must_use]
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos,
            walkable: true,
            occupant: None,
            spawn_zone: None,
            highlight: None,
        }
    }

    /// Walkable and unoccupied.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.walkable && self.occupant.is_none()
    }
}
