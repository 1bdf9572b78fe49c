//! Clocks, rule violations and the freeze guard
//!
//! Runs first after pending changes are applied. At most one violation is
//! called per tick.

use super::transitions::start_possession;
use super::StageFlow;
use crate::engine::config::EngineConfig;
use crate::engine::court::{in_paint, is_frontcourt};
use crate::engine::events::EventKind;
use crate::engine::outcomes::record_turnover;
use crate::engine::rng::RandomSource;
use crate::engine::state::{team_of, ChangeReason, GameState, PendingChange, Phase, Restart};
use crate::engine::timestep::DT;

fn live_ball(phase: Phase) -> bool {
    matches!(phase, Phase::Advance | Phase::Setup | Phase::Action)
}

/// Clock stage.
pub(crate) fn update(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> StageFlow {
    state.tick_count += 1;
    state.elapsed += DT as f64;
    state.poss.phase_ticks = state.poss.phase_ticks.saturating_add(1);
    run_clocks(state, config);

    if state.game_started && state.game_clock <= 0.0 && !state.ball.in_flight() && state.poss.phase != Phase::FreeThrow {
        return end_quarter(state, config);
    }
    if state.pending.is_none() {
        let _ = check_violations(state, config, rng) || check_freeze(state, config);
    }
    StageFlow::Continue
}

fn run_clocks(state: &mut GameState, config: &EngineConfig) {
    let phase = state.poss.phase;
    let team = state.possession;

    if state.game_started && phase.clock_runs() {
        state.game_clock = (state.game_clock - DT).max(0.0);
        for id in 0..state.players.len() {
            state.box_score.player_mut(id).seconds_played += DT;
        }
    }
    if state.game_started && phase.shot_clock_runs() {
        state.poss.shot_clock = (state.poss.shot_clock - DT).clamp(0.0, config.clock.shot_clock);
    }

    let carrier = state.carrier().filter(|c| team_of(*c) == team);
    if live_ball(phase) {
        if carrier.is_some() {
            state.poss.dribble_hold += DT;
        }
        if let Some(c) = carrier {
            if is_frontcourt(team, state.players[c].pos) {
                state.poss.crossed_half = true;
            }
        }
        if !state.poss.crossed_half {
            state.poss.advance_clock += DT;
        }
    }

    let counting = matches!(phase, Phase::Setup | Phase::Action);
    for p in state.players.iter_mut() {
        if counting && p.team == team && in_paint(team, p.pos) {
            p.paint_timer += DT;
        } else {
            p.paint_timer = 0.0;
        }
    }
}

/// Returns true when a violation was called.
fn check_violations(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> bool {
    let phase = state.poss.phase;
    if !state.game_started || !live_ball(phase) {
        return false;
    }
    let team = state.possession;
    let carrier = state.carrier().filter(|c| team_of(*c) == team);
    let culprit = carrier.or(state.poss.last_carrier).unwrap_or(state.offense_ids().start);

    if state.poss.shot_clock <= 0.0 {
        let text = format!("Shot clock violation on {}", state.team_names[team]);
        record_turnover(state, culprit, ChangeReason::ShotClock, text);
        return true;
    }
    if !state.poss.crossed_half && state.poss.advance_clock >= config.clock.backcourt_seconds {
        let text = format!("8-second violation on {}", state.player_name(culprit));
        record_turnover(state, culprit, ChangeReason::Violation, text);
        return true;
    }
    if let Some(c) = carrier {
        if state.poss.crossed_half && !is_frontcourt(team, state.players[c].pos) {
            let text = format!("Backcourt violation on {}", state.player_name(c));
            record_turnover(state, c, ChangeReason::Violation, text);
            return true;
        }
    }

    let limit = config.clock.three_second_limit;
    let lingering = state.offense_ids().find(|id| {
        let drive_exempt = carrier == Some(*id) && state.poss.committed_drive;
        state.players[*id].paint_timer >= limit && !drive_exempt
    });
    if let Some(id) = lingering {
        if rng.chance(config.outcomes.three_second_call_chance) {
            let text = format!("Three seconds on {}", state.player_name(id));
            record_turnover(state, id, ChangeReason::Violation, text);
            return true;
        }
        state.players[id].paint_timer = 0.0;
    }
    false
}

/// A phase that outstays its tick budget is torn down and the ball goes to
/// the other team. Returns true when the guard fired.
fn check_freeze(state: &mut GameState, config: &EngineConfig) -> bool {
    let phase = state.poss.phase;
    let limit = config.phase_limits.limit(phase);
    if state.poss.phase_ticks <= limit {
        return false;
    }
    state.ball.clear_transient();
    state.poss.free_throw = None;
    state.poss.rebound = None;
    state.poss.play = None;
    state.poss.committed_drive = false;

    let team = state.defense();
    if phase == Phase::JumpBall {
        state.game_started = true;
        state.jump_ball_winner.get_or_insert(team);
    }
    state.request_change(team, Restart::Inbound, ChangeReason::Stalled);
    log::warn!("{} phase stalled for {} ticks, restarting with an inbound", phase.as_str(), state.poss.phase_ticks);
    let text = format!("Play stalled in {}; {} ball", phase.as_str(), state.team_names[team]);
    state.log_event(EventKind::Stalled, Some(team), None, text);
    true
}

/// Team that opens `quarter`: the tip loser takes the second and third.
pub fn quarter_opening_team(tip_winner: usize, quarter: u8) -> usize {
    let winner = tip_winner.min(1);
    if matches!(quarter, 2 | 3) {
        1 - winner
    } else {
        winner
    }
}

fn end_quarter(state: &mut GameState, config: &EngineConfig) -> StageFlow {
    let [home, away] = state.score;
    let text = format!(
        "End of Q{}: {} {} - {} {}",
        state.quarter, state.team_names[0], home, away, state.team_names[1]
    );
    state.log_event(EventKind::QuarterEnd, None, None, text);

    if state.quarter >= config.clock.quarters {
        state.running = false;
        state.ball.clear_transient();
        state.pending = None;
        let text = format!("Final: {} {} - {} {}", state.team_names[0], home, away, state.team_names[1]);
        state.log_event(EventKind::GameEnd, None, None, text);
        return StageFlow::Halt;
    }

    state.quarter += 1;
    state.quarter_scores.push([0, 0]);
    state.team_fouls = [0, 0];
    state.game_clock = config.clock.quarter_seconds;
    state.pending = None;
    let team = quarter_opening_team(state.jump_ball_winner.unwrap_or(0), state.quarter);
    log::debug!("quarter {} begins, {} ball", state.quarter, state.team_names[team]);
    start_possession(
        state,
        PendingChange { team, restart: Restart::Inbound, reason: ChangeReason::QuarterStart },
        config,
    );
    StageFlow::Continue
}
