//! Heuristic AI for non-player entities.
//!
//! One intent per call, chosen by a fixed priority list:
//!
//! 1. Low on HP: cast a usable self-targeting heal.
//! 2. Nearest opponent out of melee range: fire a usable ranged damaging
//!    skill whose range bracket covers the distance.
//! 3. Still out of melee range: walk to the reachable cell nearest that
//!    opponent by Manhattan distance, if it gets closer and the tackle cost
//!    is affordable. `AiConfig::walk_distance` ranks by walking distance
//!    instead.
//! 4. In melee range: the highest-damage usable skill that reaches, else a
//!    basic attack.
//!
//! Nothing applicable ends the turn. Ties go to the lowest entity id for
//! targets, the first listed skill for skills, and the row-major first cell
//! for movement.

use tracing::debug;

use super::config::AiConfig;
use super::controller::TurnController;
use crate::core::{CombatState, EntityId, Intent};
use crate::effects::resolve_target;
use crate::grid::{movement_costs, reachable_cells, shortest_path, GridPos};
use crate::rules::disengage_cost;
use crate::units::{Skill, TacticalEntity, TargetType};

/// Priority-list controller.
#[derive(Clone, Debug, Default)]
pub struct TacticalAi {
    config: AiConfig,
}

impl TacticalAi {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Choose the next intent for `actor`.
    #[must_use]
    pub fn decide(&self, state: &CombatState, actor: EntityId) -> Option<Intent> {
        let me = state.entity(actor).filter(|e| e.is_alive())?;
        let origin = me.grid_pos()?;

        if let Some(intent) = self.self_heal(me, origin) {
            return Some(intent);
        }

        let (target, distance) = nearest_opponent(state, me, origin)?;
        if distance > self.config.melee_range {
            if let Some(skill) = usable_skills(state, me, target).find(|s| s.is_ranged() && s.covers(distance)) {
                return Some(Intent::UseSkill { skill: skill.id, target });
            }
            if let Some(to) = self.approach(state, me, origin, target, distance) {
                return Some(Intent::Move { to });
            }
            return None;
        }

        let best = usable_skills(state, me, target)
            .filter(|s| s.covers(distance))
            .fold(None::<&Skill>, |best, s| match best {
                Some(b) if b.damage >= s.damage => Some(b),
                _ => Some(s),
            });
        if let Some(skill) = best {
            return Some(Intent::UseSkill { skill: skill.id, target });
        }

        let cost = state.rules().combat.basic_attack_ap_cost;
        (distance == 1 && me.ap() >= cost).then_some(Intent::BasicAttack { target })
    }

    fn self_heal(&self, me: &TacticalEntity, origin: GridPos) -> Option<Intent> {
        if f64::from(me.hp()) >= f64::from(me.max_hp()) * self.config.low_hp_ratio {
            return None;
        }
        me.skills
            .iter()
            .find(|s| s.target_type == TargetType::Self_ && s.is_healing() && me.can_use(s))
            .map(|s| Intent::UseSkill { skill: s.id, target: origin })
    }

    fn approach(
        &self,
        state: &CombatState,
        me: &TacticalEntity,
        origin: GridPos,
        target: GridPos,
        distance: u32,
    ) -> Option<GridPos> {
        if me.mp() == 0 || disengage_cost(state, me.id) > me.ap() {
            return None;
        }
        let grid = state.grid();
        let reachable = reachable_cells(grid, origin, me.mp());

        if self.config.walk_distance {
            if let Some(current) = shortest_path(grid, target, origin).map(|path| path.len() as u32) {
                let field = movement_costs(grid, target, u32::MAX);
                return reachable
                    .into_iter()
                    .filter_map(|cell| field.get(&cell).map(|&steps| (cell, steps)))
                    .min_by_key(|&(_, steps)| steps)
                    .filter(|&(_, steps)| steps < current)
                    .map(|(cell, _)| cell);
            }
        }

        reachable
            .into_iter()
            .min_by_key(|cell| cell.distance(target))
            .filter(|cell| cell.distance(target) < distance)
    }
}

impl TurnController for TacticalAi {
    fn next_intent(&mut self, state: &CombatState, actor: EntityId) -> Option<Intent> {
        let intent = self.decide(state, actor);
        debug!(entity = %actor, ?intent, "tactical ai decision");
        intent
    }

    fn max_steps(&self) -> usize {
        self.config.max_steps
    }
}

/// Closest living opponent's cell and distance; lowest id on ties.
fn nearest_opponent(state: &CombatState, me: &TacticalEntity, origin: GridPos) -> Option<(GridPos, u32)> {
    state
        .living()
        .filter(|other| other.is_opponent_of(me))
        .filter_map(|other| other.grid_pos())
        .map(|pos| (pos, origin.distance(pos)))
        .min_by_key(|&(_, distance)| distance)
}

/// Damaging skills `me` can cast at `target` right now.
fn usable_skills<'a>(
    state: &'a CombatState,
    me: &'a TacticalEntity,
    target: GridPos,
) -> impl Iterator<Item = &'a Skill> + 'a {
    me.skills.iter().filter(move |s| {
        s.is_damaging()
            && s.target_type != TargetType::Self_
            && me.can_use(s)
            && resolve_target(state, me, s, target).is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CombatBuilder, RulesConfig};
    use crate::grid::Grid;
    use crate::units::{Attribute, BaseAttributes, SkillId, UnitDefinition};

    const BITE: SkillId = SkillId::new(1);
    const MAUL: SkillId = SkillId::new(2);
    const SPIT: SkillId = SkillId::new(3);
    const LICK: SkillId = SkillId::new(4);

    fn beast() -> UnitDefinition {
        UnitDefinition::enemy("Beast", BaseAttributes::uniform(5).with(Attribute::Agility, 20))
            .with_skill(Skill::new(BITE, "Bite", 2).with_damage(4))
            .with_skill(Skill::new(MAUL, "Maul", 4).with_damage(9))
            .with_skill(Skill::new(SPIT, "Spit", 3).with_range(2, 4).with_damage(3))
            .with_skill(
                Skill::new(LICK, "Lick", 2)
                    .with_target(TargetType::Self_)
                    .with_healing(10),
            )
    }

    fn hero() -> UnitDefinition {
        UnitDefinition::player("Hero", BaseAttributes::uniform(5))
    }

    fn setup(beast: UnitDefinition, beast_at: GridPos, hero_at: GridPos) -> CombatState {
        CombatBuilder::new()
            .rules(RulesConfig::default().with_variance(1.0, 1.0))
            .grid(Grid::new(7, 7))
            .add_unit(beast, Some(beast_at))
            .add_unit(hero(), Some(hero_at))
            .build()
            .unwrap()
    }

    #[test]
    fn test_heals_when_low() {
        let mut state = setup(beast(), GridPos::new(0, 0), GridPos::new(0, 1));
        let max = state.entity(EntityId(0)).unwrap().max_hp();
        state.entity_mut(EntityId(0)).unwrap().set_hp(max / 3);

        let ai = TacticalAi::default();
        assert_eq!(
            ai.decide(&state, EntityId(0)),
            Some(Intent::UseSkill { skill: LICK, target: GridPos::new(0, 0) })
        );
    }

    #[test]
    fn test_ranged_when_far() {
        let state = setup(beast(), GridPos::new(0, 0), GridPos::new(0, 3));
        let ai = TacticalAi::default();
        assert_eq!(
            ai.decide(&state, EntityId(0)),
            Some(Intent::UseSkill { skill: SPIT, target: GridPos::new(0, 3) })
        );
    }

    #[test]
    fn test_moves_toward_target() {
        let beast = UnitDefinition::enemy("Beast", BaseAttributes::uniform(5).with(Attribute::Agility, 20))
            .with_skill(Skill::new(BITE, "Bite", 2).with_damage(4));
        let state = setup(beast, GridPos::new(0, 0), GridPos::new(6, 6));

        let ai = TacticalAi::default();
        // MP 3 from the corner: (0,3), (1,2), (2,1), (3,0) all end at distance 9.
        assert_eq!(ai.decide(&state, EntityId(0)), Some(Intent::Move { to: GridPos::new(0, 3) }));
    }

    /// Column 2 of a 7x5 map is walled off except for the bottom row.
    fn walled(beast_at: GridPos, hero_at: GridPos) -> CombatState {
        let beast = UnitDefinition::enemy("Beast", BaseAttributes::uniform(5).with(Attribute::Agility, 20))
            .with_skill(Skill::new(BITE, "Bite", 2).with_damage(4));
        let grid = (0..6).fold(Grid::new(7, 5), |g, row| g.with_walkable(GridPos::new(row, 2), false));
        CombatBuilder::new()
            .grid(grid)
            .add_unit(beast, Some(beast_at))
            .add_unit(hero(), Some(hero_at))
            .build()
            .unwrap()
    }

    #[test]
    fn test_approach_ranks_by_manhattan_distance() {
        let state = walled(GridPos::new(0, 0), GridPos::new(0, 4));
        assert_eq!(state.entity(EntityId(0)).unwrap().mp(), 3);

        // (0,1) is 3 away in a straight line, though the walk from it is long.
        let ai = TacticalAi::default();
        assert_eq!(ai.decide(&state, EntityId(0)), Some(Intent::Move { to: GridPos::new(0, 1) }));
    }

    #[test]
    fn test_no_closer_cell_means_no_move() {
        let state = walled(GridPos::new(4, 1), GridPos::new(4, 3));
        assert_eq!(TacticalAi::default().decide(&state, EntityId(0)), None);
    }

    #[test]
    fn test_walk_distance_routes_around_walls() {
        let ai = TacticalAi::new(AiConfig::default().with_walk_distance(true));

        let state = walled(GridPos::new(0, 0), GridPos::new(0, 4));
        assert_eq!(ai.decide(&state, EntityId(0)), Some(Intent::Move { to: GridPos::new(2, 1) }));

        let state = walled(GridPos::new(4, 1), GridPos::new(4, 3));
        assert_eq!(ai.decide(&state, EntityId(0)), Some(Intent::Move { to: GridPos::new(6, 2) }));
    }

    #[test]
    fn test_melee_prefers_highest_damage() {
        let state = setup(beast(), GridPos::new(3, 3), GridPos::new(3, 4));
        let ai = TacticalAi::default();
        assert_eq!(
            ai.decide(&state, EntityId(0)),
            Some(Intent::UseSkill { skill: MAUL, target: GridPos::new(3, 4) })
        );
    }

    #[test]
    fn test_basic_attack_fallback() {
        let beast = UnitDefinition::enemy("Beast", BaseAttributes::uniform(5).with(Attribute::Agility, 20));
        let state = setup(beast, GridPos::new(3, 3), GridPos::new(2, 3));
        let ai = TacticalAi::default();
        assert_eq!(
            ai.decide(&state, EntityId(0)),
            Some(Intent::BasicAttack { target: GridPos::new(2, 3) })
        );
    }

    #[test]
    fn test_nothing_to_do_without_ap() {
        let mut state = setup(beast(), GridPos::new(3, 3), GridPos::new(2, 3));
        let ap = state.entity(EntityId(0)).unwrap().ap();
        state.entity_mut(EntityId(0)).unwrap().spend_ap(ap);

        assert_eq!(TacticalAi::default().decide(&state, EntityId(0)), None);
    }

    #[test]
    fn test_nearest_target_ties_lowest_id() {
        let state = CombatBuilder::new()
            .grid(Grid::new(5, 5))
            .add_unit(UnitDefinition::player("North", BaseAttributes::uniform(5)), Some(GridPos::new(1, 2)))
            .add_unit(UnitDefinition::player("South", BaseAttributes::uniform(5)), Some(GridPos::new(3, 2)))
            .add_unit(beast(), Some(GridPos::new(2, 2)))
            .build()
            .unwrap();

        let me = state.entity(EntityId(2)).unwrap();
        assert_eq!(
            nearest_opponent(&state, me, GridPos::new(2, 2)),
            Some((GridPos::new(1, 2), 1))
        );
    }
}
