//! Runtime combatant state.
//!
//! `TacticalEntity` is a value owned by the combat's entity map. It never
//! points back at the grid or at other entities; the grid stores who stands
//! where and `grid_pos` mirrors it. Resource pools are private so the
//! `0 <= current <= max` invariant can only be changed through the setters
//! below.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{derive_stats, BaseAttributes, DerivedStats, Skill, SkillId, Trait, UnitDefinition};
use crate::core::{EntityId, RulesConfig};
use crate::grid::GridPos;

/// A combatant on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TacticalEntity {
    /// Unique ID.
    pub id: EntityId,
    /// Player side?
    pub is_player: bool,
    /// Display name.
    pub name: String,
    /// Attributes after passive traits.
    pub attributes: BaseAttributes,
    /// Physical dodge chance (0..100).
    pub evasion: f64,
    /// Flat physical reduction.
    pub defense: u32,
    /// Crit probability (0..1).
    pub crit_chance: f64,
    /// Magical reduction fraction.
    pub resistance: f64,
    /// Healing bonus.
    pub social_bonus: f64,
    /// Known skills.
    pub skills: Vec<Skill>,
    /// Traits the entity was built with.
    pub traits: Vec<Trait>,

    hp: u32,
    max_hp: u32,
    ap: u32,
    max_ap: u32,
    mp: u32,
    max_mp: u32,
    skill_cooldowns: FxHashMap<SkillId, u32>,
    grid_pos: Option<GridPos>,
}

impl TacticalEntity {
    /// Build a full-health entity from a roster definition.
    #[must_use]
    pub fn from_definition(id: EntityId, def: &UnitDefinition, rules: &RulesConfig) -> Self {
        let stats = derive_stats(&def.attributes, &def.traits, rules);
        let mut entity = Self {
            id,
            is_player: def.is_player,
            name: def.name.clone(),
            attributes: stats.attributes,
            evasion: def.evasion,
            defense: def.defense,
            crit_chance: 0.0,
            resistance: 0.0,
            social_bonus: 0.0,
            skills: def.skills.clone(),
            traits: def.traits.clone(),
            hp: stats.max_hp,
            max_hp: 0,
            ap: 0,
            max_ap: 0,
            mp: 0,
            max_mp: 0,
            skill_cooldowns: FxHashMap::default(),
            grid_pos: None,
        };
        entity.apply_stats(&stats);
        entity.refresh_turn_resources();
        entity
    }

    /// Install derived stats, clamping current pools to the new maxima.
    pub fn apply_stats(&mut self, stats: &DerivedStats) {
        self.attributes = stats.attributes;
        self.max_hp = stats.max_hp;
        self.max_ap = stats.max_ap;
        self.max_mp = stats.max_mp;
        self.crit_chance = stats.crit_chance;
        self.resistance = stats.resistance;
        self.social_bonus = stats.social_bonus;
        self.hp = self.hp.min(self.max_hp);
        self.ap = self.ap.min(self.max_ap);
        self.mp = self.mp.min(self.max_mp);
    }

    // === Queries ===

    /// Current hit points.
    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Current action points.
    #[must_use]
    pub fn ap(&self) -> u32 {
        self.ap
    }

    /// Action points per turn.
    #[must_use]
    pub fn max_ap(&self) -> u32 {
        self.max_ap
    }

    /// Current movement points.
    #[must_use]
    pub fn mp(&self) -> u32 {
        self.mp
    }

    /// Movement points per turn.
    #[must_use]
    pub fn max_mp(&self) -> u32 {
        self.max_mp
    }

    /// Where the entity stands; `None` once removed from the grid.
    #[must_use]
    pub fn grid_pos(&self) -> Option<GridPos> {
        self.grid_pos
    }

    /// Still in the fight?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// On opposite sides?
    #[must_use]
    pub fn is_opponent_of(&self, other: &TacticalEntity) -> bool {
        self.is_player != other.is_player
    }

    /// Look up a known skill.
    #[must_use]
    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// Remaining cooldown turns for a skill (0 = ready).
    #[must_use]
    pub fn cooldown(&self, id: SkillId) -> u32 {
        self.skill_cooldowns.get(&id).copied().unwrap_or(0)
    }

    /// Enough AP and off cooldown.
    #[must_use]
    pub fn can_use(&self, skill: &Skill) -> bool {
        self.ap >= skill.ap_cost && self.cooldown(skill.id) == 0
    }

    /// Current hp as a fraction of max.
    #[must_use]
    pub fn hp_ratio(&self) -> f64 {
        f64::from(self.hp) / f64::from(self.max_hp.max(1))
    }

    // === Setters ===

    /// Set hit points, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Lose hit points; returns the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Gain hit points up to max; returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Spend action points.
    ///
    /// # Panics
    ///
    /// Panics if the entity cannot afford the cost; callers validate first.
    pub fn spend_ap(&mut self, cost: u32) {
        assert!(cost <= self.ap, "{} spent {cost} AP with only {}", self.id, self.ap);
        self.ap -= cost;
    }

    /// Spend movement points.
    ///
    /// # Panics
    ///
    /// Panics if the entity cannot afford the cost; callers validate first.
    pub fn spend_mp(&mut self, cost: u32) {
        assert!(cost <= self.mp, "{} spent {cost} MP with only {}", self.id, self.mp);
        self.mp -= cost;
    }

    /// Refill AP and MP to their maxima.
    pub fn refresh_turn_resources(&mut self) {
        self.ap = self.max_ap;
        self.mp = self.max_mp;
    }

    /// Put a skill on cooldown.
    pub fn set_cooldown(&mut self, id: SkillId, turns: u32) {
        if turns == 0 {
            self.skill_cooldowns.remove(&id);
        } else {
            self.skill_cooldowns.insert(id, turns);
        }
    }

    /// Tick every cooldown down by one, dropping finished ones.
    pub fn tick_cooldowns(&mut self) {
        self.skill_cooldowns.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    /// Record the grid cell the entity occupies.
    pub fn set_grid_pos(&mut self, pos: Option<GridPos>) {
        self.grid_pos = pos;
    }
}
