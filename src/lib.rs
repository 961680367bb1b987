//! # grid-tactics
//!
//! A turn-based tactical combat simulator on a 2-D grid.
//!
//! Entities spend Action Points (AP) and Movement Points (MP) to move,
//! attack and cast skills with range and area semantics. Turns follow a
//! fixed initiative order until one side is wiped out.
//!
//! ## Design Principles
//!
//! 1. **Explicit Rules**: every balance constant lives in a `RulesConfig`
//!    value passed to the combat at construction. There is no global state.
//!
//! 2. **Single Owner**: a `CombatState` owns its grid and entities. Callers
//!    read through shared references or snapshots and change things only by
//!    submitting intents.
//!
//! 3. **Deterministic**: all rolls come from a seeded `CombatRng`, entity
//!    maps iterate in ID order, and ties break on lowest ID or row-major
//!    cell order.
//!
//! ## Architecture
//!
//! - **Copy-on-write grid**: grid mutations return a new `Grid` backed by
//!   `im-rs`, so a whole combat clones in O(1) for what-if evaluation.
//!
//! - **Intents in, events out**: `rules::apply_intent` validates one intent
//!   and returns typed `CombatEvent`s, appending human-readable lines to the
//!   `CombatLog`. A rejected intent changes nothing except the log.
//!
//! ## Modules
//!
//! - `core`: IDs, RNG, rules config, intents, events, state, builder
//! - `grid`: cells, map, pathfinding, area-of-effect geometry, map generation
//! - `units`: attributes, traits, skills, stat derivation, runtime entities
//! - `effects`: targeting, damage math, knockback, skill resolution
//! - `rules`: turn scheduler, tackle cost, intent dispatch
//! - `ai`: turn controllers and the tactical heuristic
//! - `error`: intent and setup errors
//!
//! ## Example
//!
//! ```
//! use grid_tactics::{apply_intent, CombatBuilder, GridPos, Intent};
//! use grid_tactics::units::{BaseAttributes, Skill, SkillId, UnitDefinition};
//!
//! let slash = Skill::new(SkillId::new(1), "Slash", 3).with_damage(8);
//! let mut state = CombatBuilder::new()
//!     .grid_size(6, 6)
//!     .seed(7)
//!     .add_unit(UnitDefinition::player("Ayla", BaseAttributes::uniform(10)).with_skill(slash), None)
//!     .add_unit(UnitDefinition::enemy("Grub", BaseAttributes::uniform(5)), None)
//!     .build()
//!     .unwrap();
//!
//! let ayla = state.active_id().unwrap();
//! apply_intent(&mut state, ayla, Intent::Move { to: GridPos::new(2, 1) }).unwrap();
//! apply_intent(&mut state, ayla, Intent::EndTurn).unwrap();
//! assert_ne!(state.active_id(), Some(ayla));
//! ```

pub mod ai;
pub mod core;
pub mod effects;
pub mod error;
pub mod grid;
pub mod rules;
pub mod units;

// Re-export commonly used types
pub use crate::core::{
    CombatBuilder, CombatEvent, CombatLog, CombatLogMessage, CombatRng, CombatSnapshot, CombatState, EntityId,
    Intent, IntentRecord, LogKind, Phase, RulesConfig,
};

pub use crate::error::{ActionError, ActionResult, GridError, SetupError};

pub use crate::grid::{AreaType, Direction, Grid, GridCell, GridPos};

pub use crate::units::{BaseAttributes, Skill, SkillId, TacticalEntity, UnitDefinition};

pub use crate::effects::SkillResolver;

pub use crate::rules::{apply_intent, end_turn};

pub use crate::ai::{run_ai_turn, AiConfig, TacticalAi, TurnController};
