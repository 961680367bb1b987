//! Character traits and their effects.
//!
//! A trait carries a list of effects, each tagged with the trigger that
//! activates it. Only `Passive` effects are folded into derived stats; effects
//! under other triggers are kept on the entity as data.

use serde::{Deserialize, Serialize};

use super::Attribute;

/// What a stat-changing effect targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatTarget {
    /// Maximum hit points.
    MaxHp,
    /// A primary attribute.
    Attribute(Attribute),
}

/// When an effect applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// Always on; folded into derived stats.
    #[default]
    Passive,
    /// When the owner lands a hit.
    OnHit,
    /// When the owner is hit.
    OnDamaged,
    /// At the start of the owner's turn.
    TurnStart,
}

/// Effect payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitEffectKind {
    /// Flat change to a stat.
    StatModifier {
        /// Stat changed.
        target: StatTarget,
        /// Signed amount.
        value: i32,
    },
    /// Combat-oriented flat bonus.
    CombatBonus {
        /// Stat changed.
        target: StatTarget,
        /// Signed amount.
        value: i32,
    },
}

impl TraitEffectKind {
    /// Target and value of the modification.
    #[must_use]
    pub fn modification(&self) -> (StatTarget, i32) {
        match *self {
            TraitEffectKind::StatModifier { target, value } | TraitEffectKind::CombatBonus { target, value } => {
                (target, value)
            }
        }
    }
}

/// One effect of a trait.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitEffect {
    /// Activation condition.
    pub trigger: EffectTrigger,
    /// What it does.
    pub kind: TraitEffectKind,
}

impl TraitEffect {
    /// Passive stat modifier.
    #[must_use]
    pub const fn stat(target: StatTarget, value: i32) -> Self {
        Self {
            trigger: EffectTrigger::Passive,
            kind: TraitEffectKind::StatModifier { target, value },
        }
    }

    /// Passive combat bonus.
    #[must_use]
    pub const fn combat_bonus(target: StatTarget, value: i32) -> Self {
        Self {
            trigger: EffectTrigger::Passive,
            kind: TraitEffectKind::CombatBonus { target, value },
        }
    }

    /// Same effect under a different trigger.
    #[must_use]
    pub const fn on(mut self, trigger: EffectTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Folded into derived stats?
    #[must_use]
    pub fn is_passive(&self) -> bool {
        self.trigger == EffectTrigger::Passive
    }
}

/// A named bundle of effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    /// Display name.
    pub name: String,
    /// Effects granted.
    pub effects: Vec<TraitEffect>,
}

impl Trait {
    /// Create a trait with no effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
        }
    }

    /// Add an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: TraitEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Passive effects only.
    pub fn passive_effects(&self) -> impl Iterator<Item = &TraitEffect> {
        self.effects.iter().filter(|e| e.is_passive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_filter() {
        let t = Trait::new("Brute")
            .with_effect(TraitEffect::stat(StatTarget::MaxHp, 10))
            .with_effect(TraitEffect::stat(StatTarget::Attribute(Attribute::Strength), 2).on(EffectTrigger::OnHit));

        let passive: Vec<_> = t.passive_effects().collect();
        assert_eq!(passive.len(), 1);
        assert_eq!(passive[0].kind.modification(), (StatTarget::MaxHp, 10));
    }

    #[test]
    fn test_serialization() {
        let t = Trait::new("Tough").with_effect(TraitEffect::combat_bonus(StatTarget::MaxHp, 5));
        let json = serde_json::to_string(&t).unwrap();
        let back: Trait = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
