//! # Outcome Resolvers
//!
//! Skill-weighted probability rolls for shots, passes, rebounds and free
//! throws. Each resolver may end the possession outright by requesting a
//! change; callers check the returned outcome and bail out early.
//!
//! Shared bookkeeping (steals, turnovers, fouls, on-ball pressure) lives here.

pub mod free_throw;
pub mod passing;
pub mod rebound;
pub mod shooting;

pub use free_throw::{award_free_throws, free_throw_chance};
pub use passing::{attempt_pass, choose_pass_type, interception_chance, lane_blocked, PassResult};
pub use rebound::{rebound_candidates, rebound_score, resolve_rebound};
pub use shooting::{attempt_shot, block_chance, foul_chance, make_probability, ShotAttempt};

use super::config::EngineConfig;
use super::events::EventKind;
use super::geometry::norm;
use super::rng::RandomSource;
use super::state::{team_of, ChangeReason, GameState, Restart};

/// Passer credited for `shooter`'s basket, if the catch came within the
/// assist window.
pub fn assister_for(state: &GameState, shooter: usize, window: f32) -> Option<usize> {
    let pass = state.poss.last_pass?;
    if pass.to != shooter || pass.from == shooter || team_of(pass.from) != team_of(shooter) {
        return None;
    }
    if state.now() - pass.at <= window as f64 {
        Some(pass.from)
    } else {
        None
    }
}

/// Live-ball steal: ball goes straight to the thief, possession flips at the
/// start of the next tick.
pub fn record_steal(state: &mut GameState, thief: usize, victim: usize, how: &str) {
    state.box_score.player_mut(thief).steals += 1;
    state.box_score.player_mut(victim).turnovers += 1;
    state.give_ball(thief);
    let team = team_of(thief);
    state.request_change(team, Restart::Live { carrier: thief }, ChangeReason::Steal);
    let text = format!("{} {} {}", state.player_name(thief), how, state.player_name(victim));
    state.log_event(EventKind::Steal, Some(team), Some(thief), text);
}

/// Dead-ball turnover charged to `player`.
pub fn record_turnover(state: &mut GameState, player: usize, reason: ChangeReason, text: String) {
    state.box_score.player_mut(player).turnovers += 1;
    let team = team_of(player);
    state.ball.clear_transient();
    state.request_change(1 - team, Restart::Inbound, reason);
    state.log_event(EventKind::Turnover, Some(team), Some(player), text);
}

/// Personal foul bookkeeping shared by shooting and reach-in fouls.
pub fn charge_foul(state: &mut GameState, fouler: usize) {
    state.box_score.player_mut(fouler).fouls += 1;
    let team = team_of(fouler);
    state.team_fouls[team] = state.team_fouls[team].saturating_add(1);
}

/// What the on-ball defender did to the handler this decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureOutcome {
    None,
    Strip { defender: usize },
    ReachFoul { defender: usize, bonus: bool },
}

/// Strip attempt, then reach-in foul roll, by the closest defender within
/// arm's length of the handler. Two draws when a defender is close.
pub fn on_ball_pressure(
    state: &mut GameState,
    handler: usize,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> PressureOutcome {
    let Some((defender, gap)) = state.nearest_defender(handler) else {
        return PressureOutcome::None;
    };
    if gap > config.defense.on_ball_gap_max {
        return PressureOutcome::None;
    }
    let oc = &config.outcomes;
    let d = state.players[defender].ratings;
    let h = state.players[handler].ratings;

    let closeness = 1.0 - (gap / config.defense.on_ball_gap_max).clamp(0.0, 1.0);
    let strip = oc.strip_base
        * (0.5 + norm(d.defense.steal))
        * (1.5 - norm(h.playmaking.ball_handling))
        * (0.5 + closeness);
    if rng.chance(strip) {
        record_steal(state, defender, handler, "strips");
        return PressureOutcome::Strip { defender };
    }

    let reach = oc.reach_foul_base * (1.3 - norm(d.defense.perimeter)) * (0.7 + 0.6 * norm(h.finishing.draw_foul));
    if !rng.chance(reach) {
        return PressureOutcome::None;
    }

    charge_foul(state, defender);
    let def_team = team_of(defender);
    let bonus = state.team_fouls[def_team] >= config.clock.bonus_threshold;
    let text = format!("Reach-in foul on {}", state.player_name(defender));
    state.log_event(EventKind::PersonalFoul, Some(def_team), Some(defender), text);
    if bonus {
        award_free_throws(state, handler, 2, false);
    } else {
        state.request_change(team_of(handler), Restart::Inbound, ChangeReason::Foul);
    }
    PressureOutcome::ReachFoul { defender, bonus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::ScriptedRng;
    use crate::engine::state::{LastPass, Phase};
    use crate::engine::test_fixtures::{demo_config, half_court_state};

    #[test]
    fn test_assist_window() {
        let mut state = half_court_state(0);
        state.elapsed = 10.0;
        state.poss.last_pass = Some(LastPass { from: 0, to: 2, at: 8.0 });
        assert_eq!(assister_for(&state, 2, 4.0), Some(0));
        assert_eq!(assister_for(&state, 3, 4.0), None);
        state.elapsed = 13.0;
        assert_eq!(assister_for(&state, 2, 4.0), None);
    }

    #[test]
    fn test_strip_transfers_ball() {
        let config = demo_config();
        let mut state = half_court_state(0);
        let handler = state.carrier().unwrap();
        let hp = state.pos(handler);
        state.players[5].pos = (hp.0 + 1.0, hp.1);
        let mut rng = ScriptedRng::new(vec![0.0], 0.99);
        let out = on_ball_pressure(&mut state, handler, &config, &mut rng);
        assert!(matches!(out, PressureOutcome::Strip { .. }));
        let thief = state.carrier().unwrap();
        assert_eq!(team_of(thief), 1);
        assert_eq!(state.box_score.player(handler).turnovers, 1);
        assert_eq!(state.pending.map(|p| p.team), Some(1));
    }

    #[test]
    fn test_reach_foul_in_bonus_awards_free_throws() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.team_fouls[1] = config.clock.bonus_threshold;
        let handler = state.carrier().unwrap();
        let hp = state.pos(handler);
        state.players[5].pos = (hp.0 + 1.0, hp.1);
        let mut rng = ScriptedRng::new(vec![0.99, 0.0], 0.99);
        let out = on_ball_pressure(&mut state, handler, &config, &mut rng);
        assert!(matches!(out, PressureOutcome::ReachFoul { bonus: true, .. }));
        assert_eq!(state.poss.phase, Phase::FreeThrow);
        assert_eq!(state.poss.free_throw.map(|f| f.total), Some(2));
    }

    #[test]
    fn test_reach_foul_under_bonus_keeps_ball() {
        let config = demo_config();
        let mut state = half_court_state(0);
        let handler = state.carrier().unwrap();
        let hp = state.pos(handler);
        state.players[5].pos = (hp.0 + 1.0, hp.1);
        let mut rng = ScriptedRng::new(vec![0.99, 0.0], 0.99);
        on_ball_pressure(&mut state, handler, &config, &mut rng);
        let pending = state.pending.unwrap();
        assert_eq!(pending.team, 0);
        assert_eq!(pending.reason, ChangeReason::Foul);
    }
}
