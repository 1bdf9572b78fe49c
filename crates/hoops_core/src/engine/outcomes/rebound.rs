//! Rebound resolution
//!
//! Three stages: the rim bounce plays back, players box out and crash for
//! `box_out_seconds`, then everyone near the landing spot contests.

use crate::engine::config::{EngineConfig, OutcomeConfig};
use crate::engine::court::{attack_basket, attack_dir, clamp_to_court, HALF_COURT_X};
use crate::engine::events::EventKind;
use crate::engine::geometry::{add, direction, distance, lerp, midpoint, norm, perpendicular, scale, Point};
use crate::engine::rng::RandomSource;
use crate::engine::state::{
    team_of, BallBounce, ChangeReason, GameState, MissType, Phase, PlayerAgent, ReboundState, Restart,
};

/// Bounce off the rim for a missed shot from `shooter_pos`. Three draws.
pub fn miss_bounce(team: usize, shooter_pos: Point, miss: MissType, rng: &mut dyn RandomSource) -> BallBounce {
    let basket = attack_basket(team);
    let toward_shooter = direction(basket, shooter_pos);
    let side = perpendicular(toward_shooter);
    let a = rng.next_f32();
    let b = rng.range(-1.0, 1.0);
    let duration = 0.8 + 0.4 * rng.next_f32();

    let (to, amplitude) = match miss {
        MissType::Airball => (lerp(basket, shooter_pos, 0.25 + 0.3 * a), 2.0),
        MissType::RimOut => {
            let depth = 2.0 + 4.0 * a;
            let lateral = b.signum() * (4.0 + 5.0 * b.abs());
            (add(add(basket, scale(toward_shooter, depth)), scale(side, lateral)), 4.0)
        }
        MissType::BackIron => {
            // Long off the back: out toward the shooter's side of the floor.
            let depth = 8.0 + 6.0 * a;
            (add(add(basket, scale(toward_shooter, depth)), scale(side, 4.0 * b)), 6.0)
        }
        MissType::FrontRim => {
            let depth = 4.0 + 4.0 * a;
            (add(add(basket, scale(toward_shooter, depth)), scale(side, 3.0 * b)), 5.0)
        }
    };
    BallBounce { from: basket, to: clamp_to_court(to), progress: 0.0, duration, amplitude }
}

/// Ball swatted away from the shooter. Two draws.
pub fn blocked_shot_bounce(state: &GameState, shooter: usize, rng: &mut dyn RandomSource) -> BallBounce {
    let team = team_of(shooter);
    let from = state.players[shooter].pos;
    let away = direction(attack_basket(team), from);
    let reach = rng.range(4.0, 10.0);
    let lateral = rng.range(-5.0, 5.0);
    let to = add(add(from, scale(away, reach)), scale(perpendicular(away), lateral));
    BallBounce { from, to: clamp_to_court(to), progress: 0.0, duration: 0.7, amplitude: 5.0 }
}

/// Enter the rebound phase for a loose ball heading to `landing`.
pub fn start_rebound(state: &mut GameState, landing: Point, shooting_team: usize) {
    state.poss.play = None;
    state.poss.committed_drive = false;
    state.poss.rebound = Some(ReboundState { timer: 0.0, landing, shooting_team });
    state.set_phase(Phase::Rebound);
}

/// Box-out / crash targets while the ball is loose. Defenders seal between
/// their nearest opponent and the landing spot, offensive bigs crash,
/// offensive guards get back.
pub fn position_for_rebound(state: &mut GameState) {
    let Some(reb) = state.poss.rebound else { return };
    let landing = reb.landing;
    let shooting = reb.shooting_team.min(1);

    let targets: Vec<(usize, Point)> = state
        .players
        .iter()
        .map(|p| {
            let target = if p.team != shooting {
                match state.nearest_of_team(shooting, p.pos) {
                    Some((opp, _)) => lerp(landing, state.players[opp].pos, 0.45),
                    None => landing,
                }
            } else if p.is_big() || p.position.rebound_bonus() > 0.0 {
                lerp(p.pos, landing, 0.85)
            } else {
                let back = HALF_COURT_X + attack_dir(shooting) * 8.0;
                (back, p.pos.1)
            };
            (p.id, target)
        })
        .collect();

    for (id, target) in targets {
        state.players[id].target = clamp_to_court(target);
    }
}

/// Players within the contest radius, or the nearest `fallback_count` when
/// nobody is that close. Never empty for a non-empty roster.
pub fn rebound_candidates(players: &[PlayerAgent], landing: Point, cfg: &OutcomeConfig) -> Vec<usize> {
    let mut by_distance: Vec<(usize, f32)> = players.iter().map(|p| (p.id, distance(p.pos, landing))).collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let near: Vec<usize> = by_distance
        .iter()
        .filter(|(_, d)| *d <= cfg.rebound_contest_radius)
        .map(|(id, _)| *id)
        .collect();
    if !near.is_empty() {
        return near;
    }
    by_distance.iter().take(cfg.rebound_fallback_count.max(1)).map(|(id, _)| *id).collect()
}

/// Contest score before the random factor.
pub fn rebound_score(p: &PlayerAgent, landing: Point, defending: bool, cfg: &OutcomeConfig) -> f32 {
    let proximity = (1.0 - distance(p.pos, landing) / cfg.rebound_contest_radius).clamp(0.0, 1.0);
    let box_out = if defending { cfg.box_out_bonus } else { 0.0 };
    0.35 * norm(p.ratings.defense.rebounding)
        + 0.25 * norm(p.height())
        + 0.15 * norm(p.ratings.athletic.vertical)
        + 0.25 * proximity
        + box_out
        + p.position.rebound_bonus()
}

/// Contest for the loose ball. One draw per candidate, in id order. Returns
/// the rebounder.
pub fn resolve_rebound(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> Option<usize> {
    let reb = state.poss.rebound?;
    let cfg = &config.outcomes;
    let mut candidates = rebound_candidates(&state.players, reb.landing, cfg);
    candidates.sort_unstable();

    let mut best: Option<(usize, f32)> = None;
    for id in candidates {
        let defending = team_of(id) != reb.shooting_team;
        let score = rebound_score(&state.players[id], reb.landing, defending, cfg) * (0.7 + 0.6 * rng.next_f32());
        let leap = 8.0 + 6.0 * norm(state.players[id].ratings.athletic.vertical);
        state.players[id].start_jump(leap);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((id, score));
        }
    }
    let (winner, _) = best?;

    state.ball.clear_transient();
    state.players[winner].pos = midpoint(state.players[winner].pos, reb.landing);
    state.give_ball(winner);
    state.poss.rebound = None;

    let team = team_of(winner);
    if team == reb.shooting_team {
        state.box_score.player_mut(winner).offensive_rebounds += 1;
        state.poss.shot_clock = config.clock.offensive_rebound_shot_clock;
        state.poss.pass_count = 0;
        state.poss.play = None;
        state.set_phase(Phase::Action);
        let text = format!("{} grabs the offensive rebound", state.player_name(winner));
        state.log_event(EventKind::OffensiveRebound, Some(team), Some(winner), text);
    } else {
        state.box_score.player_mut(winner).defensive_rebounds += 1;
        state.request_change(team, Restart::Live { carrier: winner }, ChangeReason::DefensiveRebound);
        let text = format!("{} pulls down the rebound", state.player_name(winner));
        state.log_event(EventKind::DefensiveRebound, Some(team), Some(winner), text);
    }
    Some(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::ScriptedRng;
    use crate::engine::test_fixtures::{demo_config, half_court_state};

    #[test]
    fn test_candidates_within_radius() {
        let cfg = OutcomeConfig::default();
        let mut state = half_court_state(0);
        for (i, p) in state.players.iter_mut().enumerate() {
            p.pos = (5.0 + 9.0 * i as f32, 5.0);
        }
        let c = rebound_candidates(&state.players, (6.0, 5.0), &cfg);
        assert!(c.contains(&0) && c.contains(&1));
        assert!(!c.contains(&9));
    }

    #[test]
    fn test_miss_bounce_stays_on_court() {
        for miss in [MissType::Airball, MissType::RimOut, MissType::BackIron, MissType::FrontRim] {
            for v in [0.0, 0.5, 0.99] {
                let mut rng = ScriptedRng::constant(v);
                let b = miss_bounce(0, (70.0, 25.0), miss, &mut rng);
                assert_eq!(clamp_to_court(b.to), b.to);
                assert_eq!(b.from, attack_basket(0));
            }
        }
    }

    #[test]
    fn test_offensive_rebound_resets_to_fourteen() {
        let config = demo_config();
        let mut state = half_court_state(0);
        for p in state.players.iter_mut() {
            p.pos = (10.0, 45.0);
        }
        state.players[4].pos = (80.0, 25.0);
        state.poss.shot_clock = 3.0;
        start_rebound(&mut state, (80.0, 25.0), 0);
        let mut rng = ScriptedRng::constant(0.5);
        // Player 4 is the only one inside the radius.
        assert_eq!(resolve_rebound(&mut state, &config, &mut rng), Some(4));
        assert_eq!(state.poss.shot_clock, 14.0);
        assert_eq!(state.poss.phase, Phase::Action);
        assert_eq!(state.box_score.player(4).offensive_rebounds, 1);
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_defensive_rebound_requests_change() {
        let config = demo_config();
        let mut state = half_court_state(0);
        for p in state.players.iter_mut() {
            p.pos = (10.0, 45.0);
        }
        state.players[9].pos = (82.0, 24.0);
        start_rebound(&mut state, (82.0, 24.0), 0);
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(resolve_rebound(&mut state, &config, &mut rng), Some(9));
        let pending = state.pending.unwrap();
        assert_eq!(pending.team, 1);
        assert_eq!(pending.reason, ChangeReason::DefensiveRebound);
        assert_eq!(state.carrier(), Some(9));
    }
}
