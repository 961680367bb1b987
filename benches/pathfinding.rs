//! Benchmarks for the grid queries the AI runs every step, plus a full AI
//! battle.
//!
//! Run with: `cargo bench --bench pathfinding`

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use grid_tactics::core::CombatRng;
use grid_tactics::grid::{aoe_cells, reachable_cells, shortest_path};
use grid_tactics::units::UnitDefinition;
use grid_tactics::{run_ai_turn, AreaType, BaseAttributes, CombatBuilder, Grid, GridPos, Phase, Skill, SkillId, TacticalAi};

fn battlefield(size: usize) -> Grid {
    Grid::generate(size, size, 0.2, &mut CombatRng::new(42))
}

fn bench_reachable_cells(c: &mut Criterion) {
    let grid = battlefield(16);
    let origin = GridPos::new(15, 0);

    c.bench_function("reachable_cells_16x16_mp6", |b| {
        b.iter(|| black_box(reachable_cells(black_box(&grid), black_box(origin), 6)));
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    let grid = battlefield(32);
    let from = GridPos::new(31, 0);
    let to = GridPos::new(0, 31);

    c.bench_function("shortest_path_32x32_corner_to_corner", |b| {
        b.iter(|| black_box(shortest_path(black_box(&grid), black_box(from), black_box(to))));
    });
}

fn bench_aoe(c: &mut Criterion) {
    let grid = battlefield(16);
    let center = GridPos::new(8, 8);

    c.bench_function("aoe_circle_r4", |b| {
        b.iter(|| black_box(aoe_cells(black_box(&grid), center, AreaType::Circle, 4, None)));
    });
}

fn bench_ai_battle(c: &mut Criterion) {
    let unit = |name: &str, player: bool| {
        let attrs = BaseAttributes::uniform(8);
        let def = if player {
            UnitDefinition::player(name, attrs)
        } else {
            UnitDefinition::enemy(name, attrs)
        };
        def.with_skill(Skill::new(SkillId::new(1), "Strike", 3).with_damage(6))
            .with_skill(Skill::new(SkillId::new(2), "Bolt", 4).with_range(2, 4).with_damage(4))
    };

    c.bench_function("ai_battle_2v2_12x12", |b| {
        b.iter(|| {
            let mut state = CombatBuilder::new()
                .grid_size(12, 12)
                .obstacle_ratio(0.15)
                .seed(black_box(7))
                .add_unit(unit("A", true), None)
                .add_unit(unit("B", true), None)
                .add_unit(unit("X", false), None)
                .add_unit(unit("Y", false), None)
                .build()
                .unwrap();
            let mut ai = TacticalAi::default();
            while state.phase() == Phase::Combat && state.turn_number() <= 200 {
                run_ai_turn(&mut state, &mut ai);
            }
            black_box(state.turn_number())
        });
    });
}

criterion_group!(benches, bench_reachable_cells, bench_shortest_path, bench_aoe, bench_ai_battle);
criterion_main!(benches);
