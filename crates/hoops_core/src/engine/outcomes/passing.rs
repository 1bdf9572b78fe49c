//! Pass resolution
//!
//! Pass type from distance and lane occlusion; interception rolled per
//! defender near the lane *before* the ball leaves the passer's hands; on
//! arrival the nearest teammate to the landing point makes the catch.

use crate::engine::ball_flight::pass_flight;
use crate::engine::config::{EngineConfig, OutcomeConfig};
use crate::engine::court::distance_to_basket;
use crate::engine::events::EventKind;
use crate::engine::geometry::{distance, norm, point_to_segment_distance, segment_fraction, Point};
use crate::engine::rng::RandomSource;
use crate::engine::state::{team_of, GameState, LastPass, PassType, Phase, PlayerAgent, ShotType};

use super::record_steal;
use super::shooting::attempt_shot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassResult {
    Thrown { pass_type: PassType },
    Intercepted { defender: usize },
    Skipped,
}

/// True when an opponent of `team` sits within the lane-block radius of
/// the straight passing line.
pub fn lane_blocked(state: &GameState, team: usize, from: Point, to: Point, cfg: &OutcomeConfig) -> bool {
    state
        .players
        .iter()
        .filter(|p| p.team != team)
        .any(|p| point_to_segment_distance(p.pos, from, to) < cfg.lane_block_radius)
}

pub fn choose_pass_type(dist: f32, blocked: bool) -> PassType {
    if blocked {
        if dist < 15.0 {
            PassType::Bounce
        } else {
            PassType::Lob
        }
    } else if dist > 28.0 {
        PassType::Overhead
    } else {
        PassType::Chest
    }
}

/// Standing reach plus jump, in feet, from 0-100 ratings.
pub fn defender_reach(p: &PlayerAgent) -> f32 {
    let height_ft = 6.0 + 1.5 * norm(p.height());
    let arm = 1.25 + 0.35 * norm(p.ratings.physical.wingspan);
    height_ft + arm + 3.0 * norm(p.ratings.athletic.vertical)
}

/// Interception probability for one defender at `lane_dist` from the lane,
/// with the ball at `ball_height` where the lane passes the defender. Zero
/// outside steal range; decays with every foot the ball clears the
/// defender's reach.
pub fn interception_chance(
    defender: &PlayerAgent,
    lane_dist: f32,
    pass_type: PassType,
    ball_height: f32,
    cfg: &OutcomeConfig,
) -> f32 {
    if lane_dist > cfg.steal_range {
        return 0.0;
    }
    let proximity = 1.0 - (lane_dist / cfg.steal_range).clamp(0.0, 1.0);
    let base = cfg.interception_base
        * (0.5 + norm(defender.ratings.defense.steal))
        * (0.3 + 0.7 * proximity)
        * pass_type.steal_factor();
    base * reach_factor(ball_height - defender_reach(defender), cfg)
}

fn reach_factor(clearance: f32, cfg: &OutcomeConfig) -> f32 {
    if clearance <= 0.0 {
        1.0
    } else {
        (-clearance / cfg.reach_clearance_falloff.max(0.1)).exp()
    }
}

/// Throw from the carrier to `receiver`. One draw per defender within steal
/// range of the lane (in id order), stopping at the first interception.
pub fn attempt_pass(
    state: &mut GameState,
    passer: usize,
    receiver: usize,
    alley_oop: bool,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> PassResult {
    if passer >= state.players.len() || receiver >= state.players.len() || passer == receiver {
        return PassResult::Skipped;
    }
    let cfg = &config.outcomes;
    let team = team_of(passer);
    let from = state.players[passer].pos;
    let to = lead_point(&state.players[receiver]);
    let dist = distance(from, to);
    let pass_type = if alley_oop { PassType::Lob } else { choose_pass_type(dist, lane_blocked(state, team, from, to, cfg)) };
    let flight = pass_flight(from, to, pass_type, passer, receiver, alley_oop);

    let defenders: Vec<usize> = (0..state.players.len()).filter(|i| team_of(*i) != team).collect();
    for d in defenders {
        let pos = state.players[d].pos;
        let lane_dist = point_to_segment_distance(pos, from, to);
        let (_, height) = flight.sample(segment_fraction(pos, from, to));
        let p = interception_chance(&state.players[d], lane_dist, pass_type, height, cfg);
        if p <= 0.0 {
            continue;
        }
        if rng.chance(p) {
            record_steal(state, d, passer, "picks off a pass from");
            return PassResult::Intercepted { defender: d };
        }
    }

    throw(state, passer, receiver, pass_type, alley_oop);
    PassResult::Thrown { pass_type }
}

/// Uncontested throw (inbounds, outlets).
pub fn throw_uncontested(state: &mut GameState, passer: usize, receiver: usize) {
    if passer >= state.players.len() || receiver >= state.players.len() || passer == receiver {
        return;
    }
    let from = state.players[passer].pos;
    let to = lead_point(&state.players[receiver]);
    let pass_type = if distance(from, to) > 28.0 { PassType::Overhead } else { PassType::Chest };
    throw(state, passer, receiver, pass_type, false);
}

fn throw(state: &mut GameState, passer: usize, receiver: usize, pass_type: PassType, alley_oop: bool) {
    let from = state.players[passer].pos;
    let to = lead_point(&state.players[receiver]);
    let flight = pass_flight(from, to, pass_type, passer, receiver, alley_oop);
    state.launch(flight);
    state.poss.committed_drive = false;
    log::trace!("{} -> {} {:?}", passer, receiver, pass_type);
}

/// Where a moving receiver will be a fraction of a second from now.
fn lead_point(p: &PlayerAgent) -> Point {
    (p.pos.0 + p.vel.0 * 0.25, p.pos.1 + p.vel.1 * 0.25)
}

/// Pass arrived: the nearest teammate of the passer catches it.
pub fn resolve_pass_arrival(
    state: &mut GameState,
    passer: usize,
    target: usize,
    alley_oop: bool,
    landing: Point,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) {
    let team = team_of(passer);
    let catcher = state.nearest_of_team(team, landing).map(|(id, _)| id).unwrap_or(target);

    state.give_ball(catcher);
    state.players[catcher].catch_timer = config.movement.catch_timer_seconds;
    state.poss.pass_count += 1;
    state.poss.last_pass = Some(LastPass { from: passer, to: catcher, at: state.now() });
    state.poss.decision_cooldown = 0;

    if state.poss.phase == Phase::Inbound {
        state.poss.inbounder = None;
        state.set_phase(Phase::Advance);
        let text = format!("{} inbounds to {}", state.player_name(passer), state.player_name(catcher));
        state.log_event(EventKind::Inbound, Some(team), Some(catcher), text);
        return;
    }

    if alley_oop && catcher == target && distance_to_basket(team, state.players[catcher].pos) <= 6.0 {
        attempt_shot(state, catcher, Some(ShotType::Dunk), config, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::midpoint;
    use crate::engine::rng::ScriptedRng;
    use crate::engine::state::BallState;
    use crate::engine::test_fixtures::{clear_defense, demo_config, half_court_state};

    #[test]
    fn test_pass_type_selection() {
        assert_eq!(choose_pass_type(10.0, false), PassType::Chest);
        assert_eq!(choose_pass_type(30.0, false), PassType::Overhead);
        assert_eq!(choose_pass_type(10.0, true), PassType::Bounce);
        assert_eq!(choose_pass_type(20.0, true), PassType::Lob);
    }

    #[test]
    fn test_interception_zero_outside_range() {
        let cfg = OutcomeConfig::default();
        let state = half_court_state(0);
        let d = &state.players[6];
        assert_eq!(interception_chance(d, 5.0, PassType::Chest, 5.0, &cfg), 0.0);
        assert!(interception_chance(d, 0.0, PassType::Chest, 5.0, &cfg) > 0.0);
        assert_eq!(interception_chance(d, 5.0, PassType::Lob, 0.0, &cfg), 0.0);
    }

    #[test]
    fn test_ball_over_reach_reduces_but_never_zeroes() {
        let cfg = OutcomeConfig::default();
        let state = half_court_state(0);
        let d = &state.players[6];
        let reach = defender_reach(d);
        let within = interception_chance(d, 0.0, PassType::Lob, reach - 1.0, &cfg);
        let at_reach = interception_chance(d, 0.0, PassType::Lob, reach, &cfg);
        let over = interception_chance(d, 0.0, PassType::Lob, reach + 1.0, &cfg);
        let far_over = interception_chance(d, 0.0, PassType::Lob, reach + 4.0, &cfg);
        assert_eq!(within, at_reach);
        assert!(over < at_reach);
        assert!(far_over < over);
        assert!(far_over > 0.0);
    }

    #[test]
    fn test_lob_reachable_near_the_passer() {
        let cfg = OutcomeConfig::default();
        let state = half_court_state(0);
        let d = &state.players[6];
        let flight = pass_flight((60.0, 10.0), (60.0, 30.0), PassType::Lob, 0, 1, true);
        let (_, near_passer) = flight.sample(0.1);
        let (_, apex) = flight.sample(0.5);
        assert!(near_passer < defender_reach(d));
        assert!(apex > near_passer);
        let full = interception_chance(d, 0.0, PassType::Lob, 0.0, &cfg);
        assert_eq!(interception_chance(d, 0.0, PassType::Lob, near_passer, &cfg), full);
        assert!(interception_chance(d, 0.0, PassType::Lob, apex, &cfg) <= full);
    }

    #[test]
    fn test_lane_blocked_long_pass_can_be_picked_off() {
        let config = demo_config();
        let mut state = half_court_state(0);
        clear_defense(&mut state);
        let (from, to) = ((60.0, 10.0), (60.0, 30.0));
        state.players[0].pos = from;
        state.players[1].pos = to;
        state.players[1].vel = (0.0, 0.0);
        state.give_ball(0);
        state.players[5].pos = midpoint(from, to);
        assert!(lane_blocked(&state, 0, from, to, &config.outcomes));
        let mut rng = ScriptedRng::constant(0.0);
        let r = attempt_pass(&mut state, 0, 1, false, &config, &mut rng);
        assert_eq!(r, PassResult::Intercepted { defender: 5 });
        assert_eq!(rng.draws_taken(), 1);
    }

    #[test]
    fn test_clean_pass_enters_flight() {
        let config = demo_config();
        let mut state = half_court_state(0);
        clear_defense(&mut state);
        let passer = state.carrier().unwrap();
        let mut rng = ScriptedRng::constant(0.0);
        let r = attempt_pass(&mut state, passer, 2, false, &config, &mut rng);
        assert!(matches!(r, PassResult::Thrown { .. }));
        assert!(state.ball.in_flight());
        assert_eq!(rng.draws_taken(), 0);
    }

    #[test]
    fn test_midpoint_defender_can_intercept() {
        let config = demo_config();
        let mut state = half_court_state(0);
        clear_defense(&mut state);
        let passer = state.carrier().unwrap();
        let mid = midpoint(state.pos(passer), state.pos(2));
        state.players[6].pos = mid;
        let mut rng = ScriptedRng::constant(0.0);
        let r = attempt_pass(&mut state, passer, 2, false, &config, &mut rng);
        assert_eq!(r, PassResult::Intercepted { defender: 6 });
        assert_eq!(state.carrier(), Some(6));
        assert!(rng.draws_taken() >= 1);
    }

    #[test]
    fn test_nearest_teammate_catches() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.launch(pass_flight((60.0, 25.0), (70.0, 25.0), PassType::Chest, 0, 2, false));
        state.players[3].pos = (70.5, 25.0);
        state.players[2].pos = (75.0, 25.0);
        let mut rng = ScriptedRng::constant(0.5);
        resolve_pass_arrival(&mut state, 0, 2, false, (70.0, 25.0), &config, &mut rng);
        assert!(matches!(state.ball.state, BallState::Carried(3)));
        assert_eq!(state.poss.pass_count, 1);
        assert!(state.players[3].catch_timer > 0.0);
        assert_eq!(state.poss.last_pass.map(|p| p.to), Some(3));
    }
}
