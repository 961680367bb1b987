//! Base attributes.
//!
//! Six primary attributes feed every derived stat:
//!
//! | Attribute     | Drives                          |
//! |---------------|---------------------------------|
//! | strength      | skill and basic attack power    |
//! | agility       | max AP, initiative, tackle      |
//! | intelligence  | crit chance                     |
//! | wisdom        | magical resistance              |
//! | endurance     | max HP                          |
//! | charisma      | healing bonus                   |

use serde::{Deserialize, Serialize};

/// Names one primary attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Physical power.
    Strength,
    /// Speed and reflexes.
    Agility,
    /// Precision.
    Intelligence,
    /// Willpower.
    Wisdom,
    /// Toughness.
    Endurance,
    /// Presence.
    Charisma,
}

/// Primary attribute values of one entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseAttributes {
    /// Physical power.
    pub strength: u32,
    /// Speed and reflexes.
    pub agility: u32,
    /// Precision.
    pub intelligence: u32,
    /// Willpower.
    pub wisdom: u32,
    /// Toughness.
    pub endurance: u32,
    /// Presence.
    pub charisma: u32,
}

impl BaseAttributes {
    /// Set every attribute to the same value.
    #[must_use]
    pub const fn uniform(value: u32) -> Self {
        Self {
            strength: value,
            agility: value,
            intelligence: value,
            wisdom: value,
            endurance: value,
            charisma: value,
        }
    }

    /// Read one attribute.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Endurance => self.endurance,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Mutable access to one attribute.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Endurance => &mut self.endurance,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Add a signed delta, flooring at zero.
    pub fn modify(&mut self, attribute: Attribute, delta: i32) {
        let slot = self.get_mut(attribute);
        *slot = slot.saturating_add_signed(delta);
    }

    /// Builder: set one attribute.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: u32) -> Self {
        *self.get_mut(attribute) = value;
        self
    }
}
