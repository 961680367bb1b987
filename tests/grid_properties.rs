//! Property tests for grid queries and the pure combat formulas.
//!
//! Run with: cargo test --release grid_properties

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use grid_tactics::core::{CombatRules, GridRules};
use grid_tactics::effects::damage::{connects, mitigate, scaled_power};
use grid_tactics::grid::{aoe_cells, movement_costs, neighbors, reachable_cells, shortest_path};
use grid_tactics::rules::{end_turn, tackle_cost};
use grid_tactics::units::{Attribute, BaseAttributes, EffectType, UnitDefinition};
use grid_tactics::{AreaType, CombatBuilder, Direction, EntityId, Grid, GridPos};

// =============================================================================
// Strategies
// =============================================================================

/// A small grid with random obstacles and random occupants.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..9, 1usize..9).prop_flat_map(|(rows, cols)| {
        let cells = rows * cols;
        (
            proptest::collection::vec(proptest::bool::weighted(0.75), cells),
            proptest::collection::vec(proptest::bool::weighted(0.15), cells),
        )
            .prop_map(move |(walkable, occupied)| {
                let mut grid = Grid::new(rows, cols);
                let mut next_id = 0;
                for (i, (&walk, &occ)) in walkable.iter().zip(&occupied).enumerate() {
                    let pos = GridPos::new(i / cols, i % cols);
                    if !walk {
                        grid = grid.with_walkable(pos, false);
                    } else if occ {
                        grid = grid.place_occupant(pos, EntityId(next_id));
                        next_id += 1;
                    }
                }
                grid
            })
    })
}

/// A grid together with two in-bounds cells on it.
fn arb_grid_with_points() -> impl Strategy<Value = (Grid, GridPos, GridPos)> {
    arb_grid().prop_flat_map(|grid| {
        let (rows, cols) = (grid.rows(), grid.cols());
        (Just(grid), 0..rows, 0..cols, 0..rows, 0..cols)
            .prop_map(|(grid, r1, c1, r2, c2)| (grid, GridPos::new(r1, c1), GridPos::new(r2, c2)))
    })
}

fn arb_area() -> impl Strategy<Value = AreaType> {
    prop_oneof![
        Just(AreaType::Single),
        Just(AreaType::Cross),
        Just(AreaType::Circle),
        Just(AreaType::Line),
    ]
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

// =============================================================================
// Pathfinding
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Reachable cells are free and within budget by true path length.
    #[test]
    fn prop_reachable_cells_free_and_in_budget((grid, origin, _) in arb_grid_with_points(), mp in 0u32..8) {
        for cell in reachable_cells(&grid, origin, mp) {
            prop_assert!(grid.is_free(cell), "{cell} is not free");
            prop_assert_ne!(cell, origin);
            let path = shortest_path(&grid, origin, cell);
            prop_assert!(path.is_some(), "no path to reachable {cell}");
            prop_assert!(path.unwrap().len() as u32 <= mp);
        }
    }

    /// A path exists exactly when the target is walkable and one of its
    /// neighbors can be reached through free cells.
    #[test]
    fn prop_shortest_path_none_iff_unreachable((grid, from, to) in arb_grid_with_points()) {
        let budget = (grid.rows() * grid.cols()) as u32;
        let costs = movement_costs(&grid, from, budget);
        let routable = grid.is_walkable(to)
            && (from == to || neighbors(&grid, to).iter().any(|n| costs.contains_key(n)));

        let path = shortest_path(&grid, from, to);
        prop_assert_eq!(path.is_some(), routable);
    }

    /// Paths are contiguous, end on the target and never pass through an
    /// occupied or blocked cell.
    #[test]
    fn prop_shortest_path_is_well_formed((grid, from, to) in arb_grid_with_points()) {
        if let Some(path) = shortest_path(&grid, from, to) {
            let mut previous = from;
            for (i, &step) in path.iter().enumerate() {
                prop_assert_eq!(previous.distance(step), 1);
                if i + 1 < path.len() {
                    prop_assert!(grid.is_free(step));
                }
                previous = step;
            }
            prop_assert_eq!(previous, to);
            prop_assert!(path.len() as u32 >= from.distance(to));
        }
    }

    /// Movement costs agree with shortest path lengths for free cells.
    #[test]
    fn prop_movement_costs_match_paths((grid, origin, _) in arb_grid_with_points(), mp in 0u32..8) {
        for (cell, cost) in movement_costs(&grid, origin, mp) {
            if cost == 0 {
                continue;
            }
            let path = shortest_path(&grid, origin, cell).unwrap();
            prop_assert_eq!(path.len() as u32, cost);
        }
    }
}

// =============================================================================
// Area of effect
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Size zero collapses every shape to its center.
    #[test]
    fn prop_zero_size_area_is_center(
        (grid, center, _) in arb_grid_with_points(),
        area in arb_area(),
        dir in arb_direction(),
    ) {
        let cells = aoe_cells(&grid, center, area, 0, Some(dir));
        prop_assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![center]);
    }

    /// Area cells are in bounds, contain the center and stay within size.
    #[test]
    fn prop_area_bounded(
        (grid, center, _) in arb_grid_with_points(),
        area in arb_area(),
        size in 0u32..5,
        dir in arb_direction(),
    ) {
        let cells = aoe_cells(&grid, center, area, size, Some(dir));
        prop_assert!(cells.contains(&center));
        for cell in cells {
            prop_assert!(grid.in_bounds(cell));
            prop_assert!(center.distance(cell) <= size);
        }
    }
}

// =============================================================================
// Formulas
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A connecting hit always deals at least one damage.
    #[test]
    fn prop_damage_at_least_one(
        base in 0u32..200,
        strength in 0u32..200,
        variance in 0.0f64..2.0,
        defense in 0u32..1000,
        resistance in 0.0f64..1.0,
        magical in any::<bool>(),
    ) {
        let scaled = scaled_power(base, strength, &CombatRules::default(), variance);
        let effect = if magical { EffectType::Magical } else { EffectType::Physical };
        prop_assert!(mitigate(scaled, effect, defense, resistance) >= 1);
    }

    /// Zero evasion never dodges a roll from the uniform range.
    #[test]
    fn prop_no_evasion_always_connects(roll in 0.0f64..=100.0) {
        prop_assert!(connects(0.0, roll));
    }

    /// Tackling is free while agility outweighs the threat.
    #[test]
    fn prop_tackle_free_when_agile(agility in 0u32..500, threat in 0u32..800) {
        let rules = GridRules::default();
        let cost = tackle_cost(agility, threat, &rules);
        if f64::from(agility) * 1.5 >= f64::from(threat) {
            prop_assert_eq!(cost, 0);
        } else {
            prop_assert!(cost >= rules.base_disengage_cost);
        }
    }
}

// =============================================================================
// Turn order
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Initiative is sorted by agility and never changes during a combat.
    #[test]
    fn prop_turn_order_sorted_and_fixed(agilities in proptest::collection::vec(0u32..60, 2..6), seed in any::<u64>()) {
        let mut builder = CombatBuilder::new().grid_size(8, 8).seed(seed);
        for (i, &agility) in agilities.iter().enumerate() {
            let attrs = BaseAttributes::uniform(5).with(Attribute::Agility, agility);
            let def = if i % 2 == 0 {
                UnitDefinition::player(format!("P{i}"), attrs)
            } else {
                UnitDefinition::enemy(format!("E{i}"), attrs)
            };
            builder = builder.add_unit(def, None);
        }
        let mut state = builder.build().unwrap();

        let order = state.turn_order().to_vec();
        let agility_of = |id: EntityId| agilities[id.raw() as usize];
        for pair in order.windows(2) {
            prop_assert!(agility_of(pair[0]) >= agility_of(pair[1]));
        }

        for _ in 0..(agilities.len() * 3) {
            end_turn(&mut state);
            prop_assert_eq!(state.turn_order(), order.as_slice());
        }
    }
}
