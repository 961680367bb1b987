//! Balance configuration.
//!
//! `RulesConfig` bundles every numeric balance constant the simulation reads:
//! - `CoreRules`: how base attributes turn into HP/AP/MP and secondary stats
//! - `CombatRules`: damage variance, strength scaling, crits, basic attack
//! - `GridRules`: disengage (tackle) cost
//!
//! The config is supplied by the caller and stays read-only for the lifetime
//! of one combat. Tuning tools rebuild it between combats.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Attribute-to-stat derivation constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreRules {
    /// Max HP before endurance.
    pub hp_base: u32,
    /// Max HP gained per endurance point.
    pub hp_per_endurance: u32,
    /// Max AP before agility.
    pub ap_base: u32,
    /// One extra AP per this many agility points.
    pub ap_agility_divisor: u32,
    /// Max MP for every entity.
    pub mp_base: u32,
    /// Crit chance (0..1) per intelligence point.
    pub crit_per_intelligence: f64,
    /// Magical resistance (0..1) per wisdom point.
    pub resist_per_wisdom: f64,
    /// Healing bonus per charisma point.
    pub charisma_bonus_per_charisma: f64,
}

impl Default for CoreRules {
    fn default() -> Self {
        Self {
            hp_base: 20,
            hp_per_endurance: 5,
            ap_base: 6,
            ap_agility_divisor: 5,
            mp_base: 3,
            crit_per_intelligence: 0.01,
            resist_per_wisdom: 0.01,
            charisma_bonus_per_charisma: 0.01,
        }
    }
}

/// Damage and healing constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Lower bound of the variance multiplier.
    pub damage_variance_min: f64,
    /// Upper bound of the variance multiplier.
    pub damage_variance_max: f64,
    /// Power added per strength point.
    pub strength_to_power_ratio: f64,
    /// Damage multiplier on a critical hit.
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    /// Base damage of the skill-less melee attack.
    #[serde(default = "default_basic_attack_damage")]
    pub basic_attack_damage: u32,
    /// AP cost of the skill-less melee attack.
    #[serde(default = "default_basic_attack_ap_cost")]
    pub basic_attack_ap_cost: u32,
}

fn default_crit_multiplier() -> f64 {
    1.5
}

fn default_basic_attack_damage() -> u32 {
    5
}

fn default_basic_attack_ap_cost() -> u32 {
    3
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            damage_variance_min: 0.85,
            damage_variance_max: 1.15,
            strength_to_power_ratio: 0.3,
            crit_multiplier: default_crit_multiplier(),
            basic_attack_damage: default_basic_attack_damage(),
            basic_attack_ap_cost: default_basic_attack_ap_cost(),
        }
    }
}

/// Disengage (tackle) constants.
///
/// Leaving a cell is free when `agility * agility_mitigation_divisor` covers
/// the summed agility of adjacent enemies. Otherwise it costs
/// `max(base_disengage_cost, floor(threat * threat_scaling / agility))` AP.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridRules {
    /// Minimum AP charged when tackled.
    pub base_disengage_cost: u32,
    /// Multiplier on the summed enemy agility.
    pub threat_scaling: f64,
    /// Mover agility multiplier for the free-disengage check.
    pub agility_mitigation_divisor: f64,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            base_disengage_cost: 1,
            threat_scaling: 1.0,
            agility_mitigation_divisor: 1.5,
        }
    }
}

/// Complete balance configuration for one combat.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Stat derivation.
    #[serde(default)]
    pub core: CoreRules,
    /// Damage and healing.
    #[serde(default)]
    pub combat: CombatRules,
    /// Tackle cost.
    #[serde(default)]
    pub grid: GridRules,
}

impl RulesConfig {
    /// Parse and validate rules from JSON.
    ///
    /// Missing sections fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Check the constants for values the formulas cannot use.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.core.ap_agility_divisor == 0 {
            return Err(SetupError::InvalidRules("ap_agility_divisor must be positive".into()));
        }
        let combat = &self.combat;
        if combat.damage_variance_min < 0.0 || combat.damage_variance_max < combat.damage_variance_min {
            return Err(SetupError::InvalidRules(format!(
                "variance range [{}, {}] is invalid",
                combat.damage_variance_min, combat.damage_variance_max
            )));
        }
        if combat.crit_multiplier < 1.0 {
            return Err(SetupError::InvalidRules("crit_multiplier must be at least 1".into()));
        }
        if self.grid.agility_mitigation_divisor < 0.0 || self.grid.threat_scaling < 0.0 {
            return Err(SetupError::InvalidRules("tackle constants must be non-negative".into()));
        }
        Ok(())
    }

    /// Fix the variance multiplier range.
    #[must_use]
    pub fn with_variance(mut self, min: f64, max: f64) -> Self {
        self.combat.damage_variance_min = min;
        self.combat.damage_variance_max = max;
        self
    }

    /// Set the power gained per strength point.
    #[must_use]
    pub fn with_strength_ratio(mut self, ratio: f64) -> Self {
        self.combat.strength_to_power_ratio = ratio;
        self
    }

    /// Replace the stat derivation constants.
    #[must_use]
    pub fn with_core(mut self, core: CoreRules) -> Self {
        self.core = core;
        self
    }

    /// Replace the tackle constants.
    #[must_use]
    pub fn with_grid(mut self, grid: GridRules) -> Self {
        self.grid = grid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_validate() {
        assert!(RulesConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let rules = RulesConfig::default()
            .with_variance(1.0, 1.0)
            .with_strength_ratio(0.5);

        assert_eq!(rules.combat.damage_variance_min, 1.0);
        assert_eq!(rules.combat.damage_variance_max, 1.0);
        assert_eq!(rules.combat.strength_to_power_ratio, 0.5);
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "combat": {
                "damage_variance_min": 1.0,
                "damage_variance_max": 1.0,
                "strength_to_power_ratio": 0.3
            }
        }"#;

        let rules = RulesConfig::from_json(json).unwrap();
        assert_eq!(rules.combat.damage_variance_max, 1.0);
        assert_eq!(rules.combat.crit_multiplier, 1.5);
        assert_eq!(rules.core, CoreRules::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(RulesConfig::from_json("{ nope"), Err(SetupError::Json(_))));
    }

    #[test]
    fn test_validate_inverted_variance() {
        let rules = RulesConfig::default().with_variance(1.2, 0.8);
        assert!(matches!(rules.validate(), Err(SetupError::InvalidRules(_))));
    }

    #[test]
    fn test_validate_zero_divisor() {
        let mut rules = RulesConfig::default();
        rules.core.ap_agility_divisor = 0;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let rules = RulesConfig::default().with_variance(0.9, 1.1);
        let json = serde_json::to_string(&rules).unwrap();
        let back: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
