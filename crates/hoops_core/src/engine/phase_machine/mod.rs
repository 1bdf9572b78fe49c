//! # Possession Phase Machine
//!
//! One call to [`tick`] advances the whole game by `DT`. Stages run in a
//! fixed order; a stage may skip ahead (a ball in the air freezes decision
//! making but bodies keep moving) or halt the tick (final horn).
//!
//! ```text
//! ApplyPending -> ClockAndViolations -> SyncCarrier -> BallFlight
//!   -> PhaseDispatch -> Defense -> OffenseSpacing -> Movement
//!   -> FrameReset -> BallFollowCarrier
//! ```
//!
//! Resolvers never swap possession mid-tick: they queue a
//! `PendingChange` which `ApplyPending` installs at the top of the next
//! tick. While a change is queued, phase dispatch is skipped.

pub mod clock;
pub mod handlers;
pub mod transitions;

use serde::Serialize;

use super::ball_flight::{self, FlightProgress};
use super::config::EngineConfig;
use super::debug_log::TickLog;
use super::rng::RandomSource;
use super::state::GameState;
use super::timestep::DT;
use super::{defense, movement, spacing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickStage {
    ApplyPending,
    ClockAndViolations,
    SyncCarrier,
    BallFlight,
    PhaseDispatch,
    Defense,
    OffenseSpacing,
    Movement,
    FrameReset,
    BallFollowCarrier,
}

pub const TICK_PIPELINE: [TickStage; 10] = [
    TickStage::ApplyPending,
    TickStage::ClockAndViolations,
    TickStage::SyncCarrier,
    TickStage::BallFlight,
    TickStage::PhaseDispatch,
    TickStage::Defense,
    TickStage::OffenseSpacing,
    TickStage::Movement,
    TickStage::FrameReset,
    TickStage::BallFollowCarrier,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StageFlow {
    Continue,
    SkipTo(TickStage),
    Halt,
}

/// Advance the game by one tick. Infallible; a finished game is a no-op.
pub fn tick(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource, log: Option<&mut TickLog>) {
    if !state.running {
        return;
    }
    let mut skip_to: Option<TickStage> = None;
    for stage in TICK_PIPELINE {
        if let Some(target) = skip_to {
            if stage != target {
                continue;
            }
            skip_to = None;
        }
        match run_stage(stage, state, config, rng) {
            StageFlow::Continue => {}
            StageFlow::SkipTo(target) => skip_to = Some(target),
            StageFlow::Halt => break,
        }
    }
    if let Some(log) = log {
        log.record(state);
    }
}

fn run_stage(stage: TickStage, state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> StageFlow {
    match stage {
        TickStage::ApplyPending => {
            transitions::apply_pending(state, config);
            StageFlow::Continue
        }
        TickStage::ClockAndViolations => clock::update(state, config, rng),
        TickStage::SyncCarrier => {
            if state.sync_carrier() {
                log::warn!("tick {}: carrier flags out of step with the ball, repaired", state.tick_count);
            }
            StageFlow::Continue
        }
        TickStage::BallFlight => match ball_flight::advance(&mut state.ball, DT) {
            FlightProgress::Airborne => StageFlow::SkipTo(TickStage::Movement),
            FlightProgress::Landed(flight) => {
                handlers::on_landing(state, flight, config, rng);
                StageFlow::Continue
            }
            FlightProgress::Idle | FlightProgress::Bouncing | FlightProgress::Loose(_) => StageFlow::Continue,
        },
        TickStage::PhaseDispatch => {
            if state.pending.is_none() && state.running {
                handlers::dispatch(state, config, rng);
            }
            StageFlow::Continue
        }
        TickStage::Defense => {
            defense::update(state, &config.defense, rng);
            StageFlow::Continue
        }
        TickStage::OffenseSpacing => {
            spacing::update(state, config);
            StageFlow::Continue
        }
        TickStage::Movement => {
            movement::integrate(state, &config.movement, DT);
            StageFlow::Continue
        }
        TickStage::FrameReset => {
            movement::reset_frame_flags(state);
            StageFlow::Continue
        }
        TickStage::BallFollowCarrier => {
            if let Some(c) = state.carrier() {
                state.ball.pos = state.players[c].pos;
                state.ball.height = 4.0;
            }
            StageFlow::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ball_flight::pass_flight;
    use crate::engine::events::EventKind;
    use crate::engine::rng::{ScriptedRng, SeededRng};
    use crate::engine::state::{ChangeReason, PassType, Phase, Restart};
    use crate::engine::test_fixtures::{demo_config, demo_state, half_court_state};

    #[test]
    fn test_pipeline_order() {
        assert_eq!(TICK_PIPELINE.len(), 10);
        assert_eq!(TICK_PIPELINE[0], TickStage::ApplyPending);
        assert_eq!(TICK_PIPELINE[3], TickStage::BallFlight);
        assert_eq!(TICK_PIPELINE[9], TickStage::BallFollowCarrier);
    }

    #[test]
    fn test_opening_tip_starts_game() {
        let config = demo_config();
        let mut state = demo_state();
        let mut rng = SeededRng::new(21);
        for _ in 0..240 {
            tick(&mut state, &config, &mut rng, None);
            if state.game_started {
                break;
            }
        }
        assert!(state.game_started);
        assert!(state.jump_ball_winner.is_some());
        assert!(state.events.iter().any(|e| e.kind == EventKind::JumpBall));
    }

    #[test]
    fn test_pending_change_applied_next_tick() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.request_change(1, Restart::Inbound, ChangeReason::Violation);
        let mut rng = ScriptedRng::constant(0.5);
        tick(&mut state, &config, &mut rng, None);
        assert_eq!(state.possession, 1);
        assert!(state.pending.is_none());
        assert_eq!(state.poss.phase, Phase::Inbound);
    }

    #[test]
    fn test_ball_in_air_skips_dispatch_but_moves_players() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.launch(pass_flight(state.pos(0), state.pos(2), PassType::Chest, 0, 2, false));
        state.players[3].target = (state.players[3].pos.0 - 10.0, state.players[3].pos.1);
        let before = state.players[3].pos;
        let mut rng = ScriptedRng::constant(0.5);
        tick(&mut state, &config, &mut rng, None);
        assert!(state.ball.in_flight());
        assert_eq!(state.poss.phase, Phase::Action);
        assert_ne!(state.players[3].pos, before);
        assert_eq!(rng.draws_taken(), 0);
    }

    #[test]
    fn test_ball_follows_carrier() {
        let config = demo_config();
        let mut state = half_court_state(0);
        let mut rng = SeededRng::new(2);
        tick(&mut state, &config, &mut rng, None);
        if let Some(c) = state.carrier() {
            assert_eq!(state.ball.pos, state.players[c].pos);
        }
    }

    #[test]
    fn test_finished_game_is_inert() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.running = false;
        let ticks = state.tick_count;
        let mut rng = ScriptedRng::constant(0.5);
        tick(&mut state, &config, &mut rng, None);
        assert_eq!(state.tick_count, ticks);
        assert_eq!(rng.draws_taken(), 0);
    }
}
