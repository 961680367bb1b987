//! Skill definitions.
//!
//! A skill costs AP, reaches cells within a Manhattan range bracket, covers an
//! area around the chosen cell, and may damage, heal and push whatever
//! stands there.
//!
//! ```
//! use grid_tactics::grid::AreaType;
//! use grid_tactics::units::{EffectType, Skill, SkillId, TargetType};
//!
//! let fireball = Skill::new(SkillId::new(3), "Fireball", 4)
//!     .with_range(2, 5)
//!     .with_area(AreaType::Circle, 1)
//!     .with_damage(12)
//!     .with_effect_type(EffectType::Magical)
//!     .with_cooldown(2);
//!
//! assert!(fireball.is_damaging());
//! assert_eq!(fireball.target_type, TargetType::Enemy);
//! ```

use serde::{Deserialize, Serialize};

use crate::grid::AreaType;

/// Skill identifier, unique within one entity's skill list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub u32);

impl SkillId {
    /// Create a skill ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skill({})", self.0)
    }
}

/// What the chosen cell must hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// A living opponent.
    #[default]
    Enemy,
    /// A living teammate (the caster included).
    Ally,
    /// The caster; no cell selection.
    Self_,
    /// Any walkable cell.
    Cell,
}

/// How damage is mitigated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Evadable; reduced by flat defense.
    #[default]
    Physical,
    /// Always hits; reduced by resistance.
    Magical,
    /// No damage mitigation path.
    Support,
}

/// A usable skill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Identifier.
    pub id: SkillId,
    /// Display name.
    pub name: String,
    /// AP spent on use.
    pub ap_cost: u32,
    /// Minimum Manhattan range.
    pub min_range: u32,
    /// Maximum Manhattan range.
    pub max_range: u32,
    /// Area shape around the target cell.
    pub area_type: AreaType,
    /// Area radius/arm length.
    pub area_size: u32,
    /// Valid target.
    pub target_type: TargetType,
    /// Base damage.
    pub damage: Option<u32>,
    /// Base healing.
    pub healing: Option<u32>,
    /// Turns before reuse (0 = none).
    pub cooldown: u32,
    /// Mitigation class.
    pub effect_type: EffectType,
    /// Cells the target is knocked back.
    pub push_distance: Option<u32>,
}

impl Skill {
    /// Create a single-target, range-1 enemy skill with no payload.
    pub fn new(id: SkillId, name: impl Into<String>, ap_cost: u32) -> Self {
        Self {
            id,
            name: name.into(),
            ap_cost,
            min_range: 1,
            max_range: 1,
            area_type: AreaType::Single,
            area_size: 0,
            target_type: TargetType::Enemy,
            damage: None,
            healing: None,
            cooldown: 0,
            effect_type: EffectType::Physical,
            push_distance: None,
        }
    }

    /// Set the range bracket.
    #[must_use]
    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.min_range = min;
        self.max_range = max;
        self
    }

    /// Set the area shape.
    #[must_use]
    pub fn with_area(mut self, area_type: AreaType, size: u32) -> Self {
        self.area_type = area_type;
        self.area_size = size;
        self
    }

    /// Set the target type.
    #[must_use]
    pub fn with_target(mut self, target_type: TargetType) -> Self {
        self.target_type = target_type;
        self
    }

    /// Set base damage.
    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    /// Set base healing.
    #[must_use]
    pub fn with_healing(mut self, healing: u32) -> Self {
        self.healing = Some(healing);
        self
    }

    /// Set the cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    /// Set the mitigation class.
    #[must_use]
    pub fn with_effect_type(mut self, effect_type: EffectType) -> Self {
        self.effect_type = effect_type;
        self
    }

    /// Set the knockback distance.
    #[must_use]
    pub fn with_push(mut self, cells: u32) -> Self {
        self.push_distance = Some(cells);
        self
    }

    /// Deals damage.
    #[must_use]
    pub fn is_damaging(&self) -> bool {
        self.damage.is_some()
    }

    /// Heals.
    #[must_use]
    pub fn is_healing(&self) -> bool {
        self.healing.is_some()
    }

    /// Reaches past melee range.
    #[must_use]
    pub fn is_ranged(&self) -> bool {
        self.max_range > 1
    }

    /// Check whether a distance falls inside the range bracket.
    #[must_use]
    pub fn covers(&self, distance: u32) -> bool {
        distance >= self.min_range && distance <= self.max_range
    }
}
