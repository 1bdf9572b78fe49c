//! # Defensive Positioning
//!
//! Man-to-man (index matchups, screen switch/fight-through, help and
//! rotation) and a deforming five-spot zone. Writes defender targets and
//! stance flags only; movement integrates them later in the tick.

use super::config::DefenseConfig;
use super::court::{attack_basket, basket_relative, relative_to_basket};
use super::geometry::{add, direction, distance, lerp, midpoint, norm, perpendicular, scale, Point};
use super::rng::RandomSource;
use super::state::{team_range, GameState, Phase};
use crate::models::DefenseTactic;

/// Zone spots as (depth, lateral) from the basket being defended.
pub const ZONE_SPOTS: [(f32, f32); 5] = [(18.0, -8.0), (18.0, 8.0), (6.0, -12.0), (4.0, 0.0), (6.0, 12.0)];

/// Pair defenders with offensive players by court index, once per possession.
pub fn ensure_assignments(state: &mut GameState) {
    if !state.poss.assignments.is_empty() {
        return;
    }
    let off: Vec<usize> = state.offense_ids().collect();
    for (i, d) in state.defense_ids().enumerate() {
        if let Some(&o) = off.get(i) {
            state.poss.assignments.insert(d, o);
        }
    }
}

/// Defender currently guarding `offensive_player`.
pub fn defender_of(state: &GameState, offensive_player: usize) -> Option<usize> {
    state.poss.assignments.iter().find(|(_, o)| **o == offensive_player).map(|(d, _)| *d)
}

/// On-ball cushion: better perimeter defenders play tighter.
pub fn on_ball_gap(perimeter: f32, cfg: &DefenseConfig) -> f32 {
    cfg.on_ball_gap_max - (cfg.on_ball_gap_max - cfg.on_ball_gap_min) * norm(perimeter)
}

/// Switch probability for a defender meeting a screen. Larger post-switch
/// height mismatches and stiffer defenders switch less.
pub fn switch_chance(mismatch_inches: f32, agility: f32, cfg: &DefenseConfig) -> f32 {
    let mismatch = (mismatch_inches / 40.0).clamp(0.0, 1.0);
    (cfg.base_switch_chance * (1.0 - mismatch) * (1.3 - 0.6 * norm(agility))).clamp(0.0, 1.0)
}

/// Defense stage.
pub fn update(state: &mut GameState, cfg: &DefenseConfig, rng: &mut dyn RandomSource) {
    if !matches!(state.poss.phase, Phase::Advance | Phase::Setup | Phase::Action | Phase::Shooting) {
        return;
    }
    ensure_assignments(state);
    let targets = match state.defense_tactics().defense {
        DefenseTactic::Man => man_targets(state, cfg, rng),
        DefenseTactic::Zone => zone_targets(state, cfg),
    };
    for (id, target) in targets {
        let p = &mut state.players[id];
        p.target = target;
        p.flags.defensive_sliding = distance(p.pos, target) < 6.0;
    }
}

fn man_targets(state: &mut GameState, cfg: &DefenseConfig, rng: &mut dyn RandomSource) -> Vec<(usize, Point)> {
    resolve_screens(state, cfg, rng);

    let offense = state.possession;
    let basket = attack_basket(offense);
    let ball = state.ball.pos;
    let carrier = state.carrier().filter(|c| team_range(offense).contains(c));

    let mut targets: Vec<(usize, Point)> = Vec::with_capacity(5);
    for (&d, &o) in state.poss.assignments.iter() {
        let man = state.players[o].pos;
        let to_basket = direction(man, basket);
        let target = if Some(o) == carrier {
            add(man, scale(to_basket, on_ball_gap(state.players[d].ratings.defense.perimeter, cfg)))
        } else if distance(man, ball) <= cfg.deny_radius {
            let lane = direction(man, ball);
            add(add(man, scale(lane, cfg.deny_lean)), scale(to_basket, 1.5))
        } else {
            lerp(man, basket, cfg.sag_factor)
        };
        targets.push((d, route_around_screens(state, d, o, target, cfg)));
    }

    if let Some(handler) = carrier {
        apply_help(state, handler, basket, cfg, &mut targets);
    }
    targets
}

/// Roll switch-or-fight once per (defender, screener) meeting.
fn resolve_screens(state: &mut GameState, cfg: &DefenseConfig, rng: &mut dyn RandomSource) {
    let screeners: Vec<usize> = state.offense_ids().filter(|&s| state.players[s].flags.screening).collect();
    if screeners.is_empty() {
        return;
    }
    let pairs: Vec<(usize, usize)> = state.poss.assignments.iter().map(|(d, o)| (*d, *o)).collect();
    for (d, o) in pairs {
        for &s in &screeners {
            if s == o || state.poss.screen_reads.contains(&(d, s)) {
                continue;
            }
            if distance(state.players[d].pos, state.players[s].pos) >= cfg.screen_react_distance {
                continue;
            }
            state.poss.screen_reads.insert((d, s));
            let Some(d2) = defender_of(state, s) else { continue };
            let h = |i: usize| state.players[i].height();
            let mismatch = 0.5 * ((h(d) - h(s)).abs() + (h(d2) - h(o)).abs());
            let p = switch_chance(mismatch, state.players[d].ratings.athletic.agility, cfg);
            if rng.chance(p) {
                state.poss.assignments.insert(d, s);
                state.poss.assignments.insert(d2, o);
                log::trace!("switch: {} picks up {}, {} takes {}", d, s, d2, o);
            }
        }
    }
}

/// Fight through: step around any screener between the defender and target.
fn route_around_screens(state: &GameState, d: usize, o: usize, target: Point, cfg: &DefenseConfig) -> Point {
    let pos = state.players[d].pos;
    for s in state.offense_ids() {
        if s == o || !state.players[s].flags.screening {
            continue;
        }
        let sp = state.players[s].pos;
        if distance(pos, sp) < cfg.screen_react_distance {
            let side = perpendicular(direction(sp, state.players[o].pos));
            return add(target, scale(side, cfg.screen_route_offset));
        }
    }
    target
}

/// Nearest off-ball defender sinks to the handler-basket midpoint; the next
/// two rotate down onto the abandoned men.
fn apply_help(state: &GameState, handler: usize, basket: Point, cfg: &DefenseConfig, targets: &mut [(usize, Point)]) {
    let hp = state.players[handler].pos;
    if distance(hp, basket) > cfg.help_trigger_distance {
        return;
    }
    let on_ball = defender_of(state, handler);
    let help_spot = midpoint(hp, basket);

    let mut used: Vec<usize> = on_ball.into_iter().collect();
    let Some(helper) = nearest_free_defender(state, help_spot, &used) else { return };
    set_target(targets, helper, help_spot);
    used.push(helper);

    let mut abandoned = state.poss.assignments.get(&helper).copied();
    for _ in 0..2 {
        let Some(man) = abandoned else { break };
        let man_pos = state.players[man].pos;
        let Some(rotator) = nearest_free_defender(state, man_pos, &used) else { break };
        set_target(targets, rotator, lerp(man_pos, basket, cfg.rotation_fraction));
        used.push(rotator);
        abandoned = state.poss.assignments.get(&rotator).copied();
    }
}

fn nearest_free_defender(state: &GameState, point: Point, used: &[usize]) -> Option<usize> {
    state
        .defense_ids()
        .filter(|d| !used.contains(d))
        .min_by(|a, b| distance(state.players[*a].pos, point).total_cmp(&distance(state.players[*b].pos, point)))
}

fn set_target(targets: &mut [(usize, Point)], id: usize, target: Point) {
    if let Some(t) = targets.iter_mut().find(|(d, _)| *d == id) {
        t.1 = target;
    }
}

/// Zone spot for slot `i` given the ball's basket-relative location.
pub fn zone_spot(offense: usize, i: usize, ball: Point, cfg: &DefenseConfig) -> Point {
    let (ball_depth, ball_lat) = basket_relative(offense, ball);
    let (mut depth, mut lateral) = ZONE_SPOTS[i % ZONE_SPOTS.len()];

    lateral += ball_lat * cfg.zone_shift;
    depth += (ball_depth - depth).max(0.0) * 0.1;

    // Corner overload: ball-side spots slide out.
    if ball_depth < 10.0 && ball_lat.abs() > 16.0 && lateral.signum() == ball_lat.signum() {
        lateral += ball_lat.signum() * cfg.zone_corner_pull;
    }

    let ball_dist = (ball_depth * ball_depth + ball_lat * ball_lat).sqrt();
    if ball_dist < cfg.zone_collapse_distance {
        let squeeze = cfg.zone_collapse * (1.0 - ball_dist / cfg.zone_collapse_distance);
        depth *= 1.0 - squeeze;
        lateral *= 1.0 - 0.5 * squeeze;
    }
    relative_to_basket(offense, depth, lateral)
}

fn zone_targets(state: &GameState, cfg: &DefenseConfig) -> Vec<(usize, Point)> {
    let offense = state.possession;
    let ball = state.ball.pos;
    let basket = attack_basket(offense);
    let mut targets: Vec<(usize, Point)> = state
        .defense_ids()
        .enumerate()
        .map(|(i, d)| (d, zone_spot(offense, i, ball, cfg)))
        .collect();

    // Closest zone defender closes out on the handler.
    if let Some(handler) = state.carrier().filter(|c| team_range(offense).contains(c)) {
        let hp = state.players[handler].pos;
        let closer = targets
            .iter()
            .map(|(d, spot)| (*d, distance(*spot, hp)))
            .filter(|(_, gap)| *gap < cfg.zone_closeout_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((d, _)) = closer {
            let gap = on_ball_gap(state.players[d].ratings.defense.perimeter, cfg);
            let spot = add(hp, scale(direction(hp, basket), gap));
            set_target(&mut targets, d, spot);
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::court::CourtSlot;
    use crate::engine::rng::ScriptedRng;
    use crate::engine::test_fixtures::half_court_state;
    use crate::models::{DefenseTactic, TeamTactics};

    #[test]
    fn test_index_assignments() {
        let mut state = half_court_state(0);
        state.poss.assignments.clear();
        ensure_assignments(&mut state);
        for i in 0..5 {
            assert_eq!(state.poss.assignments.get(&(5 + i)), Some(&i));
        }
    }

    #[test]
    fn test_on_ball_gap_tighter_for_better_defenders() {
        let cfg = DefenseConfig::default();
        assert!(on_ball_gap(90.0, &cfg) < on_ball_gap(40.0, &cfg));
        assert!((on_ball_gap(100.0, &cfg) - cfg.on_ball_gap_min).abs() < 1e-4);
    }

    #[test]
    fn test_on_ball_defender_between_handler_and_basket() {
        let cfg = DefenseConfig::default();
        let mut state = half_court_state(0);
        let mut rng = ScriptedRng::constant(0.99);
        update(&mut state, &cfg, &mut rng);
        let handler = state.pos(0);
        let basket = attack_basket(0);
        let t = state.players[5].target;
        assert!(distance(t, basket) < distance(handler, basket));
        assert!(state.players[5].flags.defensive_sliding || distance(state.players[5].pos, t) >= 6.0);
    }

    #[test]
    fn test_switch_chance_falls_with_mismatch() {
        let cfg = DefenseConfig::default();
        assert!(switch_chance(2.0, 60.0, &cfg) > switch_chance(25.0, 60.0, &cfg));
        assert_eq!(switch_chance(60.0, 60.0, &cfg), 0.0);
    }

    #[test]
    fn test_switch_swaps_assignments_once() {
        let cfg = DefenseConfig::default();
        let mut state = half_court_state(0);
        // Wing 1 sets a pick right on defender 5 (guarding the handler).
        let d5 = state.pos(5);
        state.players[1].pos = (d5.0 + 1.0, d5.1);
        state.players[1].flags.screening = true;
        let mut rng = ScriptedRng::new(vec![0.0], 0.99);
        update(&mut state, &cfg, &mut rng);
        assert_eq!(state.poss.assignments.get(&5), Some(&1));
        assert_eq!(state.poss.assignments.get(&6), Some(&0));
        assert!(state.poss.screen_reads.contains(&(5, 1)));
        let taken = rng.draws_taken();
        update(&mut state, &cfg, &mut rng);
        assert_eq!(rng.draws_taken(), taken);
    }

    #[test]
    fn test_help_collapses_on_drive() {
        let cfg = DefenseConfig::default();
        let mut state = half_court_state(0);
        let basket = attack_basket(0);
        state.players[0].pos = relative_to_basket(0, 10.0, 0.0);
        state.ball.pos = state.players[0].pos;
        let mut rng = ScriptedRng::constant(0.99);
        update(&mut state, &cfg, &mut rng);
        let help_spot = midpoint(state.pos(0), basket);
        let helpers = state.defense_ids().filter(|&d| distance(state.players[d].target, help_spot) < 0.01).count();
        assert_eq!(helpers, 1);
    }

    #[test]
    fn test_zone_shifts_toward_ball() {
        let cfg = DefenseConfig::default();
        let left = zone_spot(0, 3, CourtSlot::LeftWing.position(0), &cfg);
        let right = zone_spot(0, 3, CourtSlot::RightWing.position(0), &cfg);
        let (_, l_lat) = basket_relative(0, left);
        let (_, r_lat) = basket_relative(0, right);
        assert!(l_lat < r_lat);
    }

    #[test]
    fn test_zone_collapses_on_penetration() {
        let cfg = DefenseConfig::default();
        let far = zone_spot(0, 0, relative_to_basket(0, 26.0, 0.0), &cfg);
        let near = zone_spot(0, 0, relative_to_basket(0, 5.0, 0.0), &cfg);
        assert!(distance(near, attack_basket(0)) < distance(far, attack_basket(0)));
    }

    #[test]
    fn test_zone_tactic_uses_spots() {
        let cfg = DefenseConfig::default();
        let mut state = half_court_state(0);
        state.tactics[1] = TeamTactics { defense: DefenseTactic::Zone, ..state.tactics[1] };
        let mut rng = ScriptedRng::constant(0.5);
        update(&mut state, &cfg, &mut rng);
        assert_eq!(rng.draws_taken(), 0);
        let t = state.players[8].target;
        assert!(distance(t, attack_basket(0)) < 12.0);
    }
}
