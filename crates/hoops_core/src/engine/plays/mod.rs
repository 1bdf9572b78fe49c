//! # Scripted Plays
//!
//! A fixed library of named multi-step plays. Each step gives every
//! offensive role one action and says when the offense moves on.
//!
//! - `types`: action/trigger/step/play definitions
//! - `library`: the plays themselves
//! - `selection`: tactic-weighted calls with a recent-play exclusion window
//! - `executor`: per-tick step execution and role continuity

pub mod executor;
pub mod library;
pub mod selection;
pub mod types;

pub use executor::{run_active_play, step_should_advance, PlayTick};
pub use library::{library, play_by_id, play_id_by_name};
pub use selection::{call_play, category_weights, select_play};
pub use types::{Play, PlayAction, PlayCategory, PlayStep, PositionCondition, StepTrigger};

/// Display name of a play id.
pub fn play_name(id: usize) -> &'static str {
    play_by_id(id).map_or("", |p| p.name)
}
