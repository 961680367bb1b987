//! AI-driven battles: termination, invariants and determinism.

use grid_tactics::ai::ScriptedController;
use grid_tactics::units::{Attribute, TargetType, UnitDefinition};
use grid_tactics::{
    run_ai_turn, AiConfig, AreaType, BaseAttributes, CombatBuilder, CombatState, Intent, Phase, Skill, SkillId,
    TacticalAi,
};

/// Rounds after which a battle is considered stuck.
const MAX_ROUNDS: u32 = 200;

fn fighter(name: &str, player: bool, agility: u32) -> UnitDefinition {
    let attrs = BaseAttributes::uniform(8).with(Attribute::Agility, agility);
    let def = if player {
        UnitDefinition::player(name, attrs)
    } else {
        UnitDefinition::enemy(name, attrs)
    };
    def.with_skill(Skill::new(SkillId::new(1), "Strike", 3).with_damage(6))
        .with_skill(Skill::new(SkillId::new(2), "Bolt", 4).with_range(2, 4).with_damage(4).with_cooldown(1))
        .with_skill(
            Skill::new(SkillId::new(3), "Quake", 5)
                .with_area(AreaType::Cross, 1)
                .with_damage(5)
                .with_cooldown(2),
        )
        .with_skill(
            Skill::new(SkillId::new(4), "Mend", 3)
                .with_target(TargetType::Self_)
                .with_healing(12)
                .with_cooldown(3),
        )
}

fn battle(seed: u64) -> CombatState {
    CombatBuilder::new()
        .grid_size(8, 8)
        .obstacle_ratio(0.15)
        .seed(seed)
        .add_unit(fighter("Ayla", true, 14), None)
        .add_unit(fighter("Bram", true, 9), None)
        .add_unit(fighter("Grub", false, 12), None)
        .add_unit(fighter("Ooze", false, 6), None)
        .build()
        .unwrap()
}

fn check_invariants(state: &CombatState, order: &[grid_tactics::EntityId]) {
    assert_eq!(state.turn_order(), order, "turn order changed");
    for entity in state.entities() {
        assert!(entity.hp() <= entity.max_hp(), "{} over max HP", entity.name);
        match entity.grid_pos() {
            Some(pos) => {
                assert!(entity.is_alive(), "{} is dead but on the grid", entity.name);
                assert_eq!(state.grid().occupant(pos), Some(entity.id));
                assert!(state.grid().is_walkable(pos));
            }
            None => assert!(!entity.is_alive(), "{} is alive but off the grid", entity.name),
        }
    }
    if state.phase() == Phase::Combat {
        assert!(state.active_entity().is_some_and(|e| e.is_alive()));
    }
}

/// Play until the combat ends or gets stuck. Returns the final round.
fn play_out(state: &mut CombatState, config: AiConfig) -> u32 {
    let order = state.turn_order().to_vec();
    let mut ai = TacticalAi::new(config);
    while state.phase() == Phase::Combat && state.turn_number() <= MAX_ROUNDS {
        run_ai_turn(state, &mut ai);
        check_invariants(state, &order);
    }
    state.turn_number()
}

// =============================================================================
// Full Battles
// =============================================================================

#[test]
fn test_ai_battles_terminate() {
    // Straight-line approach can stall behind obstacles; walking does not.
    let config = AiConfig::default().with_walk_distance(true);
    for seed in 0..20 {
        let mut state = battle(seed);
        let rounds = play_out(&mut state, config.clone());

        assert!(state.phase().is_terminal(), "seed {seed} stuck after {rounds} rounds");
        let winners_are_players = state.phase() == Phase::Victory;
        assert!(state.living().all(|e| e.is_player == winners_are_players));
    }
}

#[test]
fn test_same_seed_same_battle() {
    let mut first = battle(42);
    let mut second = battle(42);

    play_out(&mut first, AiConfig::default());
    play_out(&mut second, AiConfig::default());

    let texts = |s: &CombatState| s.log().iter().map(|m| m.text.clone()).collect::<Vec<_>>();
    assert_eq!(texts(&first), texts(&second));
    assert_eq!(first.history(), second.history());
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn test_history_is_sequenced() {
    let mut state = battle(7);
    play_out(&mut state, AiConfig::default());

    let history = state.history();
    assert!(!history.is_empty());
    for (i, record) in history.iter().enumerate() {
        assert_eq!(record.sequence as usize, i);
    }
    assert!(history.iter().zip(history.iter().skip(1)).all(|(a, b)| a.turn <= b.turn));
}

// =============================================================================
// Mixed Controllers
// =============================================================================

#[test]
fn test_scripted_and_ai_share_a_combat() {
    let mut state = battle(3);
    let first = state.active_id().unwrap();

    let mut idle = ScriptedController::new([Intent::EndTurn]);
    run_ai_turn(&mut state, &mut idle);
    assert_ne!(state.active_id(), Some(first));
    assert_eq!(idle.remaining(), 0);

    let mut ai = TacticalAi::default();
    let before = state.history().len();
    run_ai_turn(&mut state, &mut ai);
    assert!(state.history().len() > before);
}
