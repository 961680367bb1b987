//! Combat construction from a roster and a map.

use im::OrdMap;
use tracing::debug;

use super::config::RulesConfig;
use super::entity::EntityId;
use super::rng::CombatRng;
use super::state::CombatState;
use crate::error::SetupError;
use crate::grid::{Grid, GridPos, SpawnZone};
use crate::units::{TacticalEntity, UnitDefinition};

/// Builder for a `CombatState`.
///
/// Units get sequential IDs in the order they are added. Units added without
/// a position are placed on the free cells of their side's spawn zone in
/// row-major order, after every explicitly placed unit.
///
/// ```
/// use grid_tactics::core::CombatBuilder;
/// use grid_tactics::units::{BaseAttributes, UnitDefinition};
///
/// let state = CombatBuilder::new()
///     .grid_size(6, 6)
///     .add_unit(UnitDefinition::player("Ayla", BaseAttributes::uniform(10)), None)
///     .add_unit(UnitDefinition::enemy("Grub", BaseAttributes::uniform(5)), None)
///     .build()
///     .unwrap();
///
/// assert_eq!(state.turn_order().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct CombatBuilder {
    rules: RulesConfig,
    grid: Option<Grid>,
    rows: usize,
    cols: usize,
    obstacle_ratio: f64,
    seed: u64,
    units: Vec<(UnitDefinition, Option<GridPos>)>,
}

impl Default for CombatBuilder {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            grid: None,
            rows: 8,
            cols: 8,
            obstacle_ratio: 0.0,
            seed: 0,
            units: Vec::new(),
        }
    }
}

impl CombatBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance constants for the combat.
    #[must_use]
    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Use a prepared map instead of generating one.
    #[must_use]
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Size of the generated map.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn grid_size(mut self, rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one row and one column");
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Obstacle probability for the generated map.
    #[must_use]
    pub fn obstacle_ratio(mut self, ratio: f64) -> Self {
        self.obstacle_ratio = ratio;
        self
    }

    /// Seed for every roll in the combat.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a unit, optionally at a fixed cell.
    #[must_use]
    pub fn add_unit(mut self, def: UnitDefinition, pos: Option<GridPos>) -> Self {
        self.units.push((def, pos));
        self
    }

    /// Build the combat.
    pub fn build(self) -> Result<CombatState, SetupError> {
        self.rules.validate()?;

        let has_player = self.units.iter().any(|(d, _)| d.is_player);
        let has_enemy = self.units.iter().any(|(d, _)| !d.is_player);
        if !has_player || !has_enemy {
            return Err(SetupError::MissingSide);
        }

        let mut rng = CombatRng::new(self.seed);
        // Obstacle draws come from a fork; the combat stream starts fresh.
        let mut grid = match self.grid {
            Some(grid) => grid,
            None => Grid::generate(self.rows, self.cols, self.obstacle_ratio, &mut rng.fork()),
        };

        let mut entities = OrdMap::new();
        let mut deferred = Vec::new();
        let mut next_id = EntityId::new(0);

        for (def, pos) in &self.units {
            let id = next_id;
            next_id = next_id.next();
            let mut entity = TacticalEntity::from_definition(id, def, &self.rules);

            match pos {
                Some(pos) => {
                    if !grid.is_free(*pos) {
                        return Err(SetupError::Placement(*pos));
                    }
                    grid = grid.place_occupant(*pos, id);
                    entity.set_grid_pos(Some(*pos));
                }
                None => deferred.push(id),
            }
            entities.insert(id, entity);
        }

        for zone in [SpawnZone::Player, SpawnZone::Enemy] {
            let wanted: Vec<EntityId> = deferred
                .iter()
                .copied()
                .filter(|id| entities.get(id).is_some_and(|e| e.is_player == (zone == SpawnZone::Player)))
                .collect();
            let cells = grid.spawn_cells(zone);
            if cells.len() < wanted.len() {
                return Err(SetupError::NotEnoughSpawnCells(wanted.len()));
            }
            for (id, pos) in wanted.into_iter().zip(cells) {
                grid = grid.place_occupant(pos, id);
                if let Some(entity) = entities.get_mut(&id) {
                    entity.set_grid_pos(Some(pos));
                }
            }
        }

        debug!(units = entities.len(), seed = self.seed, "combat built");
        Ok(CombatState::assemble(self.rules, grid, entities, rng))
    }
}
