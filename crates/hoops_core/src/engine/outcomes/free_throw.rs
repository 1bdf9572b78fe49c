//! Free-throw sequences

use crate::engine::ball_flight::free_throw_flight;
use crate::engine::config::{EngineConfig, OutcomeConfig};
use crate::engine::court::{attack_basket, free_throw_spot, relative_to_basket};
use crate::engine::events::EventKind;
use crate::engine::geometry::norm;
use crate::engine::rng::RandomSource;
use crate::engine::state::{team_of, ChangeReason, FreeThrowState, GameState, MissType, Phase, Restart};
use crate::engine::timestep::TICKS_PER_SECOND;

use super::rebound::{miss_bounce, start_rebound};

/// Lane spots (depth, lateral): defense gets the blocks, offense the next
/// spots up, everyone else behind the arc.
const DEFENSE_LANE: [(f32, f32); 5] = [(3.0, -8.5), (3.0, 8.5), (10.0, -8.5), (26.0, -6.0), (26.0, 6.0)];
const OFFENSE_LANE: [(f32, f32); 4] = [(6.5, -8.5), (6.5, 8.5), (24.0, -14.0), (24.0, 14.0)];

pub fn free_throw_chance(rating: f32, cfg: &OutcomeConfig) -> f32 {
    (0.45 + 0.5 * norm(rating)).clamp(cfg.free_throw_floor, cfg.free_throw_ceiling)
}

/// Send `shooter` to the line for `total` attempts.
pub fn award_free_throws(state: &mut GameState, shooter: usize, total: u8, and_one: bool) {
    let team = team_of(shooter);
    state.ball.clear_transient();
    state.poss.play = None;
    state.poss.rebound = None;
    state.poss.committed_drive = false;
    state.poss.free_throw = Some(FreeThrowState { shooter, made: 0, total, taken: 0, and_one, wait_ticks: 0 });
    state.set_phase(Phase::FreeThrow);

    let spot = free_throw_spot(team);
    state.players[shooter].pos = spot;
    state.players[shooter].target = spot;
    state.players[shooter].vel = (0.0, 0.0);
    state.give_ball(shooter);

    let mut d = 0;
    let mut o = 0;
    for i in 0..state.players.len() {
        if i == shooter {
            continue;
        }
        let (depth, lateral) = if team_of(i) == team {
            let s = OFFENSE_LANE[o % OFFENSE_LANE.len()];
            o += 1;
            s
        } else {
            let s = DEFENSE_LANE[d % DEFENSE_LANE.len()];
            d += 1;
            s
        };
        state.players[i].target = relative_to_basket(team, depth, lateral);
    }

    let text = format!("{} to the line for {}", state.player_name(shooter), total);
    log::debug!("{}", text);
    state.last_event = text;
}

/// Free-throw phase step: one attempt per second while nothing is in the air.
pub fn step_free_throws(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) {
    let Some(mut ft) = state.poss.free_throw else { return };
    if state.ball.in_flight() {
        return;
    }
    ft.wait_ticks += 1;
    if ft.wait_ticks < TICKS_PER_SECOND {
        state.poss.free_throw = Some(ft);
        return;
    }

    let chance = free_throw_chance(state.players[ft.shooter].ratings.shooting.free_throw, &config.outcomes);
    let made = rng.chance(chance);
    ft.taken += 1;
    ft.wait_ticks = 0;
    state.poss.free_throw = Some(ft);
    state.box_score.player_mut(ft.shooter).fta += 1;

    let team = team_of(ft.shooter);
    let flight = free_throw_flight(state.players[ft.shooter].pos, attack_basket(team), ft.shooter, made);
    state.launch(flight);
}

/// Free throw reached the rim.
pub fn resolve_free_throw_arrival(
    state: &mut GameState,
    shooter: usize,
    made: bool,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) {
    let Some(mut ft) = state.poss.free_throw else { return };
    let team = team_of(shooter);
    let attempt = ft.taken;
    if made {
        ft.made += 1;
        state.add_points(team, 1);
        let line = state.box_score.player_mut(shooter);
        line.ftm += 1;
        line.points += 1;
        let text = format!("{} makes free throw {} of {}", state.player_name(shooter), attempt, ft.total);
        state.log_event(EventKind::FreeThrowMade, Some(team), Some(shooter), text);
    } else {
        let text = format!("{} misses free throw {} of {}", state.player_name(shooter), attempt, ft.total);
        state.log_event(EventKind::FreeThrowMissed, Some(team), Some(shooter), text);
    }

    if ft.taken < ft.total {
        state.poss.free_throw = Some(ft);
        state.give_ball(shooter);
        return;
    }

    state.poss.free_throw = None;
    if made {
        state.request_change(1 - team, Restart::Inbound, ChangeReason::MadeFreeThrow);
    } else {
        let miss = if rng.chance(0.5) { MissType::RimOut } else { MissType::FrontRim };
        let bounce = miss_bounce(team, state.players[shooter].pos, miss, rng);
        state.drop_ball(bounce);
        start_rebound(state, bounce.to, team);
        state.poss.shot_clock = config.clock.shot_clock;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::ScriptedRng;
    use crate::engine::test_fixtures::{demo_config, half_court_state};

    #[test]
    fn test_chance_is_clamped() {
        let cfg = OutcomeConfig::default();
        assert!((free_throw_chance(0.0, &cfg) - 0.45).abs() < 1e-6);
        assert!((free_throw_chance(100.0, &cfg) - 0.95).abs() < 1e-6);
        assert!(free_throw_chance(80.0, &cfg) > free_throw_chance(50.0, &cfg));
    }

    #[test]
    fn test_two_shots_then_inbound() {
        let config = demo_config();
        let mut state = half_court_state(0);
        award_free_throws(&mut state, 1, 2, false);
        assert_eq!(state.carrier(), Some(1));
        let mut rng = ScriptedRng::constant(0.0);

        for _ in 0..2 {
            for _ in 0..TICKS_PER_SECOND {
                step_free_throws(&mut state, &config, &mut rng);
            }
            assert!(state.ball.in_flight());
            resolve_free_throw_arrival(&mut state, 1, true, &config, &mut rng);
        }
        assert_eq!(state.score, [2, 0]);
        assert_eq!(state.box_score.player(1).fta, 2);
        assert_eq!(state.pending.map(|p| p.team), Some(1));
    }

    #[test]
    fn test_missed_last_shot_is_live() {
        let config = demo_config();
        let mut state = half_court_state(0);
        award_free_throws(&mut state, 2, 1, true);
        let mut rng = ScriptedRng::constant(0.9);
        state.poss.free_throw.as_mut().unwrap().taken = 1;
        resolve_free_throw_arrival(&mut state, 2, false, &config, &mut rng);
        assert_eq!(state.poss.phase, Phase::Rebound);
        assert!(state.pending.is_none());
        assert!(state.poss.free_throw.is_none());
    }
}
