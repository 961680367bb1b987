//! Stat derivation from attributes, traits and rules.

use serde::{Deserialize, Serialize};

use super::{BaseAttributes, StatTarget, Trait};
use crate::core::RulesConfig;

/// Stats computed once when a unit enters combat.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Attributes after passive trait modifiers.
    pub attributes: BaseAttributes,
    /// Maximum hit points (at least 1).
    pub max_hp: u32,
    /// Action points per turn.
    pub max_ap: u32,
    /// Movement points per turn.
    pub max_mp: u32,
    /// Probability (0..1) of a critical hit.
    pub crit_chance: f64,
    /// Fraction of magical damage ignored.
    pub resistance: f64,
    /// Healing multiplier bonus.
    pub social_bonus: f64,
}

/// Derive combat stats.
///
/// HP and AP pools come from the unmodified endurance and agility; passive
/// trait effects are then added to their targets, and the secondary stats
/// (crit, resistance, social bonus) read the modified attributes.
#[must_use]
pub fn derive_stats(base: &BaseAttributes, traits: &[Trait], rules: &RulesConfig) -> DerivedStats {
    let core = &rules.core;

    let mut max_hp = core.hp_base + base.endurance * core.hp_per_endurance;
    let max_ap = core.ap_base + base.agility / core.ap_agility_divisor.max(1);
    let max_mp = core.mp_base;
    let mut attributes = *base;

    for effect in traits.iter().flat_map(Trait::passive_effects) {
        match effect.kind.modification() {
            (StatTarget::MaxHp, value) => max_hp = max_hp.saturating_add_signed(value),
            (StatTarget::Attribute(attribute), value) => attributes.modify(attribute, value),
        }
    }

    DerivedStats {
        attributes,
        max_hp: max_hp.max(1),
        max_ap,
        max_mp,
        crit_chance: f64::from(attributes.intelligence) * core.crit_per_intelligence,
        resistance: f64::from(attributes.wisdom) * core.resist_per_wisdom,
        social_bonus: f64::from(attributes.charisma) * core.charisma_bonus_per_charisma,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Attribute, EffectTrigger, TraitEffect};

    fn attrs() -> BaseAttributes {
        BaseAttributes {
            strength: 10,
            agility: 12,
            intelligence: 20,
            wisdom: 30,
            endurance: 4,
            charisma: 50,
        }
    }

    #[test]
    fn test_base_derivation() {
        let rules = RulesConfig::default();
        let stats = derive_stats(&attrs(), &[], &rules);

        assert_eq!(stats.max_hp, 20 + 4 * 5);
        assert_eq!(stats.max_ap, 6 + 12 / 5);
        assert_eq!(stats.max_mp, 3);
        assert!((stats.crit_chance - 0.20).abs() < 1e-9);
        assert!((stats.resistance - 0.30).abs() < 1e-9);
        assert!((stats.social_bonus - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_passive_modifiers_apply() {
        let rules = RulesConfig::default();
        let traits = vec![Trait::new("Hardy")
            .with_effect(TraitEffect::stat(StatTarget::MaxHp, 15))
            .with_effect(TraitEffect::combat_bonus(StatTarget::Attribute(Attribute::Intelligence), 10))];

        let stats = derive_stats(&attrs(), &traits, &rules);

        assert_eq!(stats.max_hp, 40 + 15);
        assert_eq!(stats.attributes.intelligence, 30);
        assert!((stats.crit_chance - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_triggered_effects_ignored() {
        let rules = RulesConfig::default();
        let traits = vec![Trait::new("Vampiric")
            .with_effect(TraitEffect::stat(StatTarget::MaxHp, 100).on(EffectTrigger::OnHit))];

        let stats = derive_stats(&attrs(), &traits, &rules);
        assert_eq!(stats.max_hp, 40);
    }

    #[test]
    fn test_negative_modifier_keeps_one_hp() {
        let rules = RulesConfig::default();
        let traits = vec![Trait::new("Frail").with_effect(TraitEffect::stat(StatTarget::MaxHp, -1000))];

        assert_eq!(derive_stats(&attrs(), &traits, &rules).max_hp, 1);
    }

    #[test]
    fn test_agility_modifier_does_not_change_ap() {
        let rules = RulesConfig::default();
        let traits = vec![Trait::new("Quick")
            .with_effect(TraitEffect::stat(StatTarget::Attribute(Attribute::Agility), 20))];

        let stats = derive_stats(&attrs(), &traits, &rules);
        assert_eq!(stats.max_ap, 8);
        assert_eq!(stats.attributes.agility, 32);
    }
}
