//! Units: attributes, traits, skills and runtime combatant state.
//!
//! - `UnitDefinition`: roster input supplied by the caller
//! - `derive_stats`: attributes + passive traits + rules -> `DerivedStats`
//! - `TacticalEntity`: per-combat mutable state (pools, cooldowns, position)
//! - `Skill`: what an entity can cast

mod attributes;
mod definition;
mod instance;
mod skill;
mod stats;
mod traits;

pub use attributes::{Attribute, BaseAttributes};
pub use definition::UnitDefinition;
pub use instance::TacticalEntity;
pub use skill::{EffectType, Skill, SkillId, TargetType};
pub use stats::{derive_stats, DerivedStats};
pub use traits::{EffectTrigger, StatTarget, Trait, TraitEffect, TraitEffectKind};
