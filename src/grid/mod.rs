//! Grid model: cell storage and spatial queries.
//!
//! - `Grid`: fixed-size cell matrix with copy-on-write mutation
//! - `search`: neighbors, movement range, shortest paths, attack range
//! - `area`: area-of-effect shapes
//! - `generate`: procedural maps and tile-matrix import

mod area;
mod cell;
mod generate;
mod map;
mod position;
mod search;

pub use area::{aoe_cells, AreaType};
pub use cell::{GridCell, Highlight, SpawnZone};
pub use generate::SPAWN_CORNER;
pub use map::Grid;
pub use position::{Direction, GridPos};
pub use search::{attackable_cells, movement_costs, neighbors, reachable_cells, shortest_path};
