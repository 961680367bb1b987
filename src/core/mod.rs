//! Core combat types: IDs, RNG, rules, intents, events and state.
//!
//! Everything here is independent of how a turn is resolved; the `rules`,
//! `effects` and `ai` modules build on these types.

pub mod entity;
pub mod rng;
pub mod config;
pub mod action;
pub mod event;
pub mod state;
pub mod builder;
pub mod snapshot;

pub use entity::EntityId;
pub use rng::{CombatRng, CombatRngState};
pub use config::{CombatRules, CoreRules, GridRules, RulesConfig};
pub use action::{Intent, IntentRecord};
pub use event::{CombatEvent, CombatLog, CombatLogMessage, LogKind};
pub use state::{CombatState, Phase};
pub use builder::CombatBuilder;
pub use snapshot::CombatSnapshot;
