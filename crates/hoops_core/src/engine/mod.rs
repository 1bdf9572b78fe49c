//! # Possession Engine
//!
//! Fixed-step (1/60 s) simulation of a basketball game. `phase_machine::tick`
//! is the only entry point that mutates a running game; everything else is
//! a stage, a resolver, or a read-only view.

pub mod ball_flight;
pub mod config;
pub mod court;
pub mod debug_log;
pub mod decision;
pub mod defense;
pub mod events;
pub mod geometry;
pub mod movement;
pub mod outcomes;
pub mod phase_machine;
pub mod plays;
pub mod rng;
pub mod snapshot;
pub mod spacing;
pub mod state;
pub mod timestep;

#[cfg(test)]
mod contract_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use config::EngineConfig;
pub use debug_log::{TickLog, TickRecord};
pub use events::{EventKind, GameEvent};
pub use phase_machine::{tick, TickStage, TICK_PIPELINE};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use snapshot::TickSnapshot;
pub use state::GameState;
