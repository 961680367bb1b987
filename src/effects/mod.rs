//! Skill resolution: targeting, damage math, knockback.
//!
//! - `resolve_target`: validate a target cell for a skill
//! - `damage`: pure heal/damage arithmetic
//! - `push_destination`: knockback landing cell
//! - `SkillResolver`: applies skills and basic attacks to a `CombatState`

pub mod damage;
mod push;
mod resolver;
mod targeting;

pub use push::push_destination;
pub use resolver::SkillResolver;
pub use targeting::{resolve_target, skill_range_cells};
