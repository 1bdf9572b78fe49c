//! # hoops_core - Deterministic Basketball Possession Engine
//!
//! Tick-based (60 Hz) five-on-five simulation: a possession phase machine,
//! a library of scripted plays, a read-and-react fallback for the ball
//! handler, man and zone defense, and probabilistic resolvers for shots,
//! passes, rebounds and free throws.
//!
//! ## Features
//! - Same seed, same game: every random decision pulls from one ordered stream
//! - Calibratable tuning (`EngineConfig`, YAML or JSON)
//! - Per-tick snapshots and an optional bounded tick history
//! - JSON API for embedding

// Resolvers and handlers take state, config and rng together.
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod simulation;

pub use api::{simulate_game, simulate_game_json, GameRequest, GameResponse};
pub use engine::{EngineConfig, GameState, RandomSource, SeededRng, TickLog, TickSnapshot};
pub use error::{Result, SimError};
pub use models::{BoxScore, PlayerBoxScore, PlayerProfile, TeamRoster, TeamTactics};
pub use simulation::{GameResult, Simulation};
