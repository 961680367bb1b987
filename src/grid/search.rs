//! Spatial queries: neighbors, movement range, paths and attack range.
//!
//! All searches are 4-directional breadth-first expansions with unit step
//! cost. Only free cells (walkable, unoccupied) may be entered; a path may
//! end on an occupied cell so attacks can target it, but never passes
//! through one. Attack range is pure Manhattan distance with no
//! line-of-sight check.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{Direction, Grid, GridPos};

/// In-bounds orthogonal neighbors, in `Direction::ALL` order.
#[must_use]
pub fn neighbors(grid: &Grid, pos: GridPos) -> SmallVec<[GridPos; 4]> {
    Direction::ALL
        .iter()
        .filter_map(|&dir| pos.step(dir))
        .filter(|&p| grid.in_bounds(p))
        .collect()
}

/// BFS step counts to every free cell within `mp_budget` steps.
///
/// The origin is included with cost 0 so callers can price a move.
#[must_use]
pub fn movement_costs(grid: &Grid, origin: GridPos, mp_budget: u32) -> FxHashMap<GridPos, u32> {
    let mut costs = FxHashMap::default();
    if !grid.in_bounds(origin) {
        return costs;
    }

    let mut queue = VecDeque::new();
    costs.insert(origin, 0);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let cost = costs[&current];
        if cost >= mp_budget {
            continue;
        }
        for next in neighbors(grid, current) {
            if !costs.contains_key(&next) && grid.is_free(next) {
                costs.insert(next, cost + 1);
                queue.push_back(next);
            }
        }
    }

    costs
}

/// Cells reachable with cost `1..=mp_budget`. The origin is excluded.
#[must_use]
pub fn reachable_cells(grid: &Grid, origin: GridPos, mp_budget: u32) -> BTreeSet<GridPos> {
    movement_costs(grid, origin, mp_budget)
        .into_iter()
        .filter(|&(_, cost)| cost > 0)
        .map(|(pos, _)| pos)
        .collect()
}

/// Shortest 4-directional route from `from` to `to`.
///
/// The returned path excludes `from` and ends with `to`; its length is the
/// MP cost. Intermediate cells must be free; `to` only has to be walkable.
/// Returns `Some(vec![])` when both points coincide.
#[must_use]
pub fn shortest_path(grid: &Grid, from: GridPos, to: GridPos) -> Option<Vec<GridPos>> {
    if !grid.in_bounds(from) || !grid.is_walkable(to) {
        return None;
    }
    if from == to {
        return Some(Vec::new());
    }

    let mut came_from: FxHashMap<GridPos, GridPos> = FxHashMap::default();
    let mut queue = VecDeque::new();
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(grid, current) {
            if next == from || came_from.contains_key(&next) {
                continue;
            }
            if next == to {
                came_from.insert(next, current);
                return Some(rebuild_path(&came_from, from, to));
            }
            if grid.is_free(next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

fn rebuild_path(came_from: &FxHashMap<GridPos, GridPos>, from: GridPos, to: GridPos) -> Vec<GridPos> {
    let mut path = vec![to];
    let mut current = to;
    while let Some(&prev) = came_from.get(&current) {
        if prev == from {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Walkable cells whose Manhattan distance to `origin` lies in
/// `[min_range, max_range]`.
#[must_use]
pub fn attackable_cells(grid: &Grid, origin: GridPos, min_range: u32, max_range: u32) -> BTreeSet<GridPos> {
    grid.cells()
        .filter(|c| c.walkable)
        .filter(|c| {
            let d = origin.distance(c.pos);
            d >= min_range && d <= max_range
        })
        .map(|c| c.pos)
        .collect()
}
