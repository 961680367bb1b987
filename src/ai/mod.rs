//! AI control for non-player entities.
//!
//! - `TurnController`: one-intent-at-a-time decision seam
//! - `TacticalAi`: the priority-list heuristic
//! - `ScriptedController`: fixed intent list, for replays and tests
//! - `run_ai_turn`: drive a controller through a whole turn
//!
//! Decisions are synchronous and read only the `CombatState`; pacing and
//! animation belong to whoever calls `run_ai_turn`.

mod config;
mod controller;
mod tactical;

pub use config::AiConfig;
pub use controller::{run_ai_turn, ScriptedController, TurnController};
pub use tactical::TacticalAi;
