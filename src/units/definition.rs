//! Roster input: what the caller supplies per unit.

use serde::{Deserialize, Serialize};

use super::{BaseAttributes, Skill, Trait};

/// Everything needed to field a unit. Derived stats are computed from this
/// when the combat is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Display name.
    pub name: String,
    /// Controlled by the player side?
    pub is_player: bool,
    /// Primary attributes.
    pub attributes: BaseAttributes,
    /// Chance (0..100) to dodge physical attacks.
    #[serde(default)]
    pub evasion: f64,
    /// Flat physical damage reduction.
    #[serde(default)]
    pub defense: u32,
    /// Passive and triggered traits.
    #[serde(default)]
    pub traits: Vec<Trait>,
    /// Skills available in combat.
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl UnitDefinition {
    /// A player-side unit.
    pub fn player(name: impl Into<String>, attributes: BaseAttributes) -> Self {
        Self::new(name, true, attributes)
    }

    /// An enemy-side unit.
    pub fn enemy(name: impl Into<String>, attributes: BaseAttributes) -> Self {
        Self::new(name, false, attributes)
    }

    fn new(name: impl Into<String>, is_player: bool, attributes: BaseAttributes) -> Self {
        Self {
            name: name.into(),
            is_player,
            attributes,
            evasion: 0.0,
            defense: 0,
            traits: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Override evasion.
    #[must_use]
    pub fn with_evasion(mut self, evasion: f64) -> Self {
        self.evasion = evasion;
        self
    }

    /// Override defense.
    #[must_use]
    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    /// Add a trait.
    #[must_use]
    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.push(t);
        self
    }

    /// Add a skill.
    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}
