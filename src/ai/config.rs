//! AI tuning.

use serde::{Deserialize, Serialize};

/// Default cap on intents per AI turn.
pub const DEFAULT_MAX_STEPS: usize = 16;

/// Thresholds for `TacticalAi`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Self-heal when `hp < max_hp * low_hp_ratio`.
    pub low_hp_ratio: f64,

    /// Distance at which the AI stops closing in and fights.
    pub melee_range: u32,

    /// Upper bound on intents issued in one turn.
    pub max_steps: usize,

    /// Approach by walking distance around obstacles instead of Manhattan
    /// distance.
    #[serde(default)]
    pub walk_distance: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            low_hp_ratio: 0.4,
            melee_range: 1,
            max_steps: DEFAULT_MAX_STEPS,
            walk_distance: false,
        }
    }
}

impl AiConfig {
    /// Set the self-heal threshold.
    #[must_use]
    pub fn with_low_hp_ratio(mut self, ratio: f64) -> Self {
        self.low_hp_ratio = ratio;
        self
    }

    /// Set the melee range.
    #[must_use]
    pub fn with_melee_range(mut self, range: u32) -> Self {
        self.melee_range = range;
        self
    }

    /// Rank approach cells by walking distance to the target.
    #[must_use]
    pub fn with_walk_distance(mut self, enabled: bool) -> Self {
        self.walk_distance = enabled;
        self
    }

    /// Set the per-turn intent cap.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is zero.
    #[must_use]
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        assert!(steps > 0, "AI needs at least one step per turn");
        self.max_steps = steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AiConfig::default();
        assert!((config.low_hp_ratio - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.melee_range, 1);
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert!(!config.walk_distance);
    }

    #[test]
    fn test_walk_distance_optional_in_json() {
        let config: AiConfig = serde_json::from_str(r#"{ "low_hp_ratio": 0.5, "melee_range": 1, "max_steps": 8 }"#).unwrap();
        assert!(!config.walk_distance);
        assert_eq!(config.max_steps, 8);
    }

    #[test]
    fn test_builder() {
        let config = AiConfig::default().with_low_hp_ratio(0.25).with_melee_range(2).with_max_steps(4);
        assert_eq!(config.melee_range, 2);
        assert_eq!(config.max_steps, 4);
    }

    #[test]
    #[should_panic(expected = "at least one step")]
    fn test_zero_steps_panics() {
        let _ = AiConfig::default().with_max_steps(0);
    }
}
