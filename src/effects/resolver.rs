//! Skill and basic-attack resolution.
//!
//! `SkillResolver` validates an attack up front and then commits it in one
//! go: once AP is spent nothing can fail, so a rejected attack never leaves
//! a half-applied state behind. Per affected target the order is heal, then
//! hit roll, crit roll, variance roll, mitigation, death check and push.

use tracing::debug;

use super::damage::{connects, critical, heal_amount, mitigate, scaled_power};
use super::push::push_destination;
use super::targeting::resolve_target;
use crate::core::{CombatEvent, CombatState, EntityId, Phase};
use crate::error::{ActionError, ActionResult};
use crate::grid::{aoe_cells, AreaType, Direction, GridPos};
use crate::rules::check_win_loss;
use crate::units::{EffectType, Skill, TacticalEntity};

/// Attacker stats captured when the attack starts.
#[derive(Clone, Copy, Debug)]
struct Striker {
    id: EntityId,
    strength: u32,
    crit_chance: f64,
}

impl Striker {
    fn of(entity: &TacticalEntity) -> Self {
        Self {
            id: entity.id,
            strength: entity.attributes.strength,
            crit_chance: entity.crit_chance,
        }
    }
}

/// Resolves skills and basic attacks against a `CombatState`.
pub struct SkillResolver;

impl SkillResolver {
    /// Cast `skill` from `caster` at `target`.
    ///
    /// A rejected cast leaves the state untouched apart from one log line.
    pub fn execute_skill(
        state: &mut CombatState,
        caster: EntityId,
        target: GridPos,
        skill: &Skill,
    ) -> ActionResult<Vec<CombatEvent>> {
        Self::cast(state, caster, target, skill).map_err(|err| state.reject(caster, err))
    }

    /// Flat melee attack on an adjacent opponent.
    ///
    /// A rejected attack leaves the state untouched apart from one log line.
    pub fn basic_attack(
        state: &mut CombatState,
        attacker: EntityId,
        target: GridPos,
    ) -> ActionResult<Vec<CombatEvent>> {
        Self::attack(state, attacker, target).map_err(|err| state.reject(attacker, err))
    }

    /// Check that `caster` can pay for `skill` right now.
    pub(crate) fn check_castable(state: &CombatState, caster: EntityId, skill: &Skill) -> ActionResult<()> {
        let entity = acting_entity(state, caster)?;
        if entity.ap() < skill.ap_cost {
            return Err(ActionError::NotEnoughAp {
                required: skill.ap_cost,
                available: entity.ap(),
            });
        }
        let remaining = entity.cooldown(skill.id);
        if remaining > 0 {
            return Err(ActionError::OnCooldown { skill: skill.id, remaining });
        }
        Ok(())
    }

    pub(crate) fn cast(
        state: &mut CombatState,
        caster: EntityId,
        target: GridPos,
        skill: &Skill,
    ) -> ActionResult<Vec<CombatEvent>> {
        Self::check_castable(state, caster, skill)?;
        let entity = acting_entity(state, caster)?;
        let center = resolve_target(state, entity, skill, target)?;
        let origin = entity.grid_pos().ok_or(ActionError::Defeated(caster))?;
        let striker = Striker::of(entity);
        let social_bonus = entity.social_bonus;

        if let Some(entity) = state.entity_mut(caster) {
            entity.spend_ap(skill.ap_cost);
            if skill.cooldown > 0 {
                entity.set_cooldown(skill.id, skill.cooldown + 1);
            }
        }

        let mut events = Vec::new();
        state.emit(
            &mut events,
            CombatEvent::SkillUsed {
                caster,
                skill: skill.id,
                target: center,
            },
        );

        let dir = Direction::between(origin, center);
        let cells = aoe_cells(state.grid(), center, skill.area_type, skill.area_size, dir);
        debug!(%caster, skill = %skill.id, target = %center, cells = cells.len(), "resolving skill");

        for cell in cells {
            let Some(victim) = state.living_at(cell).map(|e| e.id) else {
                continue;
            };

            if let Some(healing) = skill.healing {
                let variance = roll_variance(state);
                let amount = heal_amount(healing, social_bonus, variance);
                let gained = state.entity_mut(victim).map_or(0, |e| e.heal(amount));
                state.emit(
                    &mut events,
                    CombatEvent::Healed {
                        source: caster,
                        target: victim,
                        amount: gained,
                    },
                );
            }

            if let Some(damage) = skill.damage {
                let survived = strike(state, &striker, victim, damage, skill.effect_type, &mut events);
                if survived && skill.area_type == AreaType::Single {
                    if let Some(distance) = skill.push_distance.filter(|d| *d > 0) {
                        push(state, origin, victim, distance, &mut events);
                    }
                }
            }
        }

        Ok(events)
    }

    pub(crate) fn attack(state: &mut CombatState, attacker: EntityId, target: GridPos) -> ActionResult<Vec<CombatEvent>> {
        let entity = acting_entity(state, attacker)?;
        let origin = entity.grid_pos().ok_or(ActionError::Defeated(attacker))?;
        if !state.grid().in_bounds(target) {
            return Err(ActionError::OutOfBounds(target));
        }
        let distance = origin.distance(target);
        if distance != 1 {
            return Err(ActionError::OutOfRange { distance, min: 1, max: 1 });
        }
        let victim = state
            .living_at(target)
            .filter(|t| t.is_opponent_of(entity))
            .map(|t| t.id)
            .ok_or(ActionError::InvalidTarget(target))?;
        let cost = state.rules().combat.basic_attack_ap_cost;
        if entity.ap() < cost {
            return Err(ActionError::NotEnoughAp {
                required: cost,
                available: entity.ap(),
            });
        }

        let striker = Striker::of(entity);
        let damage = state.rules().combat.basic_attack_damage;
        if let Some(entity) = state.entity_mut(attacker) {
            entity.spend_ap(cost);
        }

        let mut events = Vec::new();
        state.emit(&mut events, CombatEvent::BasicAttack { attacker, target: victim });
        debug!(%attacker, %victim, "basic attack");
        strike(state, &striker, victim, damage, EffectType::Physical, &mut events);
        Ok(events)
    }
}

/// The entity may act: combat running, entity known and alive.
fn acting_entity(state: &CombatState, id: EntityId) -> ActionResult<&TacticalEntity> {
    if state.phase() != Phase::Combat {
        return Err(ActionError::CombatOver);
    }
    let entity = state.entity(id).ok_or(ActionError::UnknownEntity(id))?;
    if !entity.is_alive() {
        return Err(ActionError::Defeated(id));
    }
    Ok(entity)
}

fn roll_variance(state: &mut CombatState) -> f64 {
    let (min, max) = {
        let combat = &state.rules().combat;
        (combat.damage_variance_min, combat.damage_variance_max)
    };
    state.rng_mut().uniform(min, max)
}

/// Roll and apply one damage instance. Returns whether the victim survived.
fn strike(
    state: &mut CombatState,
    striker: &Striker,
    victim: EntityId,
    base: u32,
    effect_type: EffectType,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let Some(target) = state.entity(victim) else {
        return false;
    };
    let (evasion, defense, resistance) = (target.evasion, target.defense, target.resistance);

    if effect_type == EffectType::Physical {
        let roll = state.rng_mut().uniform(0.0, 100.0);
        if !connects(evasion, roll) {
            state.emit(
                events,
                CombatEvent::Missed {
                    source: striker.id,
                    target: victim,
                },
            );
            return true;
        }
    }

    let crit = state.rng_mut().uniform(0.0, 1.0) < striker.crit_chance;
    let variance = roll_variance(state);
    let mut scaled = scaled_power(base, striker.strength, &state.rules().combat, variance);
    if crit {
        scaled = critical(scaled, state.rules().combat.crit_multiplier);
    }
    let amount = mitigate(scaled, effect_type, defense, resistance);

    let (lost, alive) = state
        .entity_mut(victim)
        .map_or((0, false), |v| (v.take_damage(amount), v.is_alive()));
    debug!(source = %striker.id, target = %victim, damage = lost, crit, "damage dealt");
    state.emit(
        events,
        CombatEvent::Damaged {
            source: striker.id,
            target: victim,
            amount: lost,
            crit,
        },
    );

    if !alive {
        state.remove_from_grid(victim);
        state.emit(events, CombatEvent::Defeated { entity: victim });
        if state.phase() == Phase::Combat {
            check_win_loss(state, victim, events);
        }
    }
    alive
}

/// Knock `victim` away from `origin`.
fn push(state: &mut CombatState, origin: GridPos, victim: EntityId, distance: u32, events: &mut Vec<CombatEvent>) {
    let Some(from) = state.entity(victim).and_then(TacticalEntity::grid_pos) else {
        return;
    };
    let Some(dir) = Direction::between(origin, from) else {
        return;
    };
    let to = push_destination(state.grid(), from, dir, distance);
    if to != from {
        state.relocate(victim, to);
        state.emit(events, CombatEvent::Pushed { target: victim, from, to });
    }
}
