//! Turn flow and intent handling.
//!
//! - `apply_intent`: validate and execute an intent for the active entity
//! - `end_turn` / `check_win_loss`: the turn scheduler and phase machine
//! - `disengage_cost`: tackle AP for leaving a cell next to enemies
//!
//! Turn order is fixed once at combat start (agility descending, roster
//! order on ties). Dead entities stay in the order and are skipped.

mod intents;
mod tackle;
mod turns;

pub use intents::{apply_intent, highlight_area, highlight_moves};
pub use tackle::{adjacent_threat, disengage_cost, tackle_cost};
pub use turns::{check_win_loss, end_turn, initiative_order};
