//! Possession changes
//!
//! The only place `possession` flips and `poss` is rebuilt.

use crate::engine::config::EngineConfig;
use crate::engine::court::inbound_spot;
use crate::engine::geometry::distance;
use crate::engine::outcomes::passing::throw_uncontested;
use crate::engine::state::{
    team_range, ChangeReason, GameState, PendingChange, Phase, PossessionState, Restart,
};

/// Install the queued change, if any.
pub fn apply_pending(state: &mut GameState, config: &EngineConfig) {
    if let Some(change) = state.pending.take() {
        start_possession(state, change, config);
    }
}

/// Hand the ball to `change.team` with a clean possession.
pub fn start_possession(state: &mut GameState, change: PendingChange, config: &EngineConfig) {
    let team = change.team.min(1);
    let prev_shot_clock = state.poss.shot_clock;
    let phase = match change.restart {
        Restart::Inbound => Phase::Inbound,
        Restart::Live { .. } => Phase::Advance,
    };

    state.possession = team;
    state.poss = PossessionState::fresh(phase, config.clock.shot_clock);
    if change.reason == ChangeReason::Foul {
        state.poss.shot_clock = prev_shot_clock.max(config.clock.foul_reset_shot_clock).min(config.clock.shot_clock);
    }
    state.ball.clear_transient();
    for p in state.players.iter_mut() {
        p.reset_possession_fields();
    }

    match change.restart {
        Restart::Inbound => setup_inbound(state),
        Restart::Live { carrier } => {
            let carrier = if team_range(team).contains(&carrier) {
                carrier
            } else {
                state.nearest_of_team(team, state.ball.pos).map_or(team_range(team).start, |(id, _)| id)
            };
            state.give_ball(carrier);
            state.poss.live_start = matches!(change.reason, ChangeReason::Steal | ChangeReason::DefensiveRebound);
            if change.reason == ChangeReason::DefensiveRebound && !state.players[carrier].is_guard() {
                if let Some(guard) = outlet_target(state, carrier) {
                    throw_uncontested(state, carrier, guard);
                }
            }
        }
    }
    log::debug!(
        "possession to {} ({:?}), shot clock {:.1}",
        state.team_names[team],
        change.reason,
        state.poss.shot_clock
    );
}

/// Best ball handler on `team`.
pub fn primary_handler(state: &GameState, team: usize) -> Option<usize> {
    team_range(team).filter(|id| *id < state.players.len()).max_by(|a, b| {
        let ra = state.players[*a].ratings.playmaking.ball_handling;
        let rb = state.players[*b].ratings.playmaking.ball_handling;
        ra.total_cmp(&rb).then(b.cmp(a))
    })
}

/// Nearest guard to the rebounder.
fn outlet_target(state: &GameState, rebounder: usize) -> Option<usize> {
    let from = state.pos(rebounder);
    team_range(state.possession)
        .filter(|id| *id != rebounder && state.players[*id].is_guard())
        .min_by(|a, b| distance(state.pos(*a), from).total_cmp(&distance(state.pos(*b), from)))
}

/// Put the inbounder on the baseline with the ball. The primary handler is
/// kept free to receive.
fn setup_inbound(state: &mut GameState) {
    let team = state.possession;
    let spot = inbound_spot(team);
    let handler = primary_handler(state, team);
    let inbounder = team_range(team)
        .filter(|id| Some(*id) != handler)
        .min_by(|a, b| distance(state.pos(*a), spot).total_cmp(&distance(state.pos(*b), spot)));
    let Some(inbounder) = inbounder else {
        return;
    };
    let p = &mut state.players[inbounder];
    p.pos = spot;
    p.target = spot;
    p.vel = (0.0, 0.0);
    state.poss.inbounder = Some(inbounder);
    state.give_ball(inbounder);
}
