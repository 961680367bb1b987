//! Damage and healing arithmetic.
//!
//! All functions are pure; the resolver supplies the rolled variance, hit
//! and crit values. Amounts are floored at each step.

use crate::core::CombatRules;
use crate::units::EffectType;

/// HP restored before the target's max-HP cap.
#[must_use]
pub fn heal_amount(healing: u32, social_bonus: f64, variance: f64) -> u32 {
    (f64::from(healing) * (1.0 + social_bonus) * variance).floor().max(0.0) as u32
}

/// Base power scaled by strength and variance.
#[must_use]
pub fn scaled_power(base: u32, strength: u32, rules: &CombatRules, variance: f64) -> u32 {
    let power = f64::from(base) + f64::from(strength) * rules.strength_to_power_ratio;
    (power * variance).floor().max(0.0) as u32
}

/// Apply the critical multiplier.
#[must_use]
pub fn critical(scaled: u32, multiplier: f64) -> u32 {
    (f64::from(scaled) * multiplier).floor().max(0.0) as u32
}

/// Damage after the target's mitigation. A connecting hit deals at least 1.
///
/// Magical damage loses `floor(scaled * resistance)`, physical damage loses
/// flat `defense`. Support damage is unmitigated.
#[must_use]
pub fn mitigate(scaled: u32, effect_type: EffectType, defense: u32, resistance: f64) -> u32 {
    let reduced = match effect_type {
        EffectType::Magical => {
            let resisted = (f64::from(scaled) * resistance).floor().max(0.0) as u32;
            scaled.saturating_sub(resisted)
        }
        EffectType::Physical => scaled.saturating_sub(defense),
        EffectType::Support => scaled,
    };
    reduced.max(1)
}

/// Does a physical attack connect? `roll` is uniform in `[0, 100)`.
#[must_use]
pub fn connects(evasion: f64, roll: f64) -> bool {
    roll <= 100.0 - evasion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_power() {
        let rules = CombatRules::default();
        assert_eq!(scaled_power(10, 10, &rules, 1.0), 13);
        assert_eq!(scaled_power(10, 0, &rules, 0.85), 8);
        assert_eq!(scaled_power(10, 0, &rules, 1.15), 11);
    }

    #[test]
    fn test_physical_mitigation() {
        assert_eq!(mitigate(13, EffectType::Physical, 2, 0.9), 11);
        assert_eq!(mitigate(3, EffectType::Physical, 50, 0.0), 1);
    }

    #[test]
    fn test_magical_mitigation() {
        // floor(13 * 0.25) = 3
        assert_eq!(mitigate(13, EffectType::Magical, 100, 0.25), 10);
        assert_eq!(mitigate(13, EffectType::Magical, 0, 5.0), 1);
        assert_eq!(mitigate(0, EffectType::Magical, 0, 0.0), 1);
    }

    #[test]
    fn test_support_unmitigated() {
        assert_eq!(mitigate(7, EffectType::Support, 10, 1.0), 7);
    }

    #[test]
    fn test_critical() {
        assert_eq!(critical(13, 1.5), 19);
        assert_eq!(critical(0, 1.5), 0);
    }

    #[test]
    fn test_heal_amount() {
        assert_eq!(heal_amount(20, 0.0, 1.0), 20);
        assert_eq!(heal_amount(20, 0.5, 1.0), 30);
        assert_eq!(heal_amount(10, 0.0, 0.85), 8);
    }

    #[test]
    fn test_connects() {
        assert!(connects(0.0, 99.9));
        assert!(!connects(30.0, 70.5));
        assert!(connects(30.0, 70.0));
        assert!(!connects(100.0, 0.5));
    }
}
