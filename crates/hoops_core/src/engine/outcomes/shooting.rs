//! Shot resolution
//!
//! Band selection -> block check -> make roll -> foul roll -> miss archetype,
//! all decided at release. Points land when the flight reaches the rim.

use crate::engine::ball_flight::shot_flight;
use crate::engine::config::{EngineConfig, OutcomeConfig};
use crate::engine::court::{attack_basket, distance_to_basket, is_three_point};
use crate::engine::events::EventKind;
use crate::engine::geometry::{distance, norm, rating_modifier};
use crate::engine::rng::RandomSource;
use crate::engine::state::{
    team_of, ChangeReason, GameState, MissType, Phase, PlayerAgent, Restart, ShootingFoul, ShotFlight,
    ShotType,
};
use crate::models::{DefenseTactic, OffenseTactic};

use super::free_throw::award_free_throws;
use super::rebound::{blocked_shot_bounce, miss_bounce, start_rebound};
use super::{assister_for, charge_foul};

/// Skill rating at or above which a shooter counts as elite for contest
/// purposes.
const ELITE_SKILL: f32 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotAttempt {
    Released(ShotFlight),
    Blocked { blocker: usize },
    /// Shooter index was invalid; nothing happened.
    Skipped,
}

/// Rating governing each band.
pub fn governing_skill(p: &PlayerAgent, shot_type: ShotType) -> f32 {
    let r = &p.ratings;
    match shot_type {
        ShotType::Dunk => r.finishing.dunk,
        ShotType::Layup => r.finishing.layup,
        ShotType::Close => r.shooting.close,
        ShotType::MidRange => r.shooting.mid_range,
        ShotType::Three => r.shooting.three_point,
    }
}

/// Dunk needs the skill, the bounce, and no elite shot-blocker nearby.
pub fn dunk_eligible(state: &GameState, shooter: usize, cfg: &OutcomeConfig) -> bool {
    let p = &state.players[shooter];
    if p.ratings.finishing.dunk < cfg.dunk_min_rating || p.ratings.athletic.vertical < cfg.dunk_min_vertical {
        return false;
    }
    let opp = 1 - team_of(shooter);
    !state.players.iter().any(|d| {
        d.team == opp
            && d.ratings.defense.block >= cfg.elite_blocker_rating
            && distance(d.pos, p.pos) < cfg.contest_range
    })
}

/// Band from distance and floor position. Consumes one draw only when the
/// shooter is dunk-eligible at the rim.
pub fn classify_shot(state: &GameState, shooter: usize, cfg: &OutcomeConfig, rng: &mut dyn RandomSource) -> ShotType {
    let p = &state.players[shooter];
    let team = team_of(shooter);
    let dist = distance_to_basket(team, p.pos);
    if dist <= cfg.rim_distance {
        if dunk_eligible(state, shooter, cfg)
            && rng.chance(cfg.dunk_tendency_base + 0.5 * norm(p.ratings.finishing.dunk))
        {
            return ShotType::Dunk;
        }
        return ShotType::Layup;
    }
    if dist <= cfg.close_distance {
        return ShotType::Close;
    }
    if is_three_point(team, p.pos) {
        ShotType::Three
    } else {
        ShotType::MidRange
    }
}

fn base_pct(cfg: &OutcomeConfig, shot_type: ShotType) -> f32 {
    match shot_type {
        ShotType::Dunk => cfg.make_pct.dunk,
        ShotType::Layup => cfg.make_pct.layup,
        ShotType::Close => cfg.make_pct.close,
        ShotType::MidRange => cfg.make_pct.mid_range,
        ShotType::Three => cfg.make_pct.three,
    }
}

/// 1.0+ when open, falling toward a floor as the closest defender closes in.
pub fn contest_modifier(gap: f32, skill: f32, superstar: bool, cfg: &OutcomeConfig) -> f32 {
    if gap >= cfg.contest_range {
        return cfg.open_shot_bonus;
    }
    let floor = if superstar {
        cfg.superstar_contest_floor
    } else if skill >= ELITE_SKILL {
        cfg.elite_contest_floor
    } else {
        cfg.contest_floor
    };
    floor + (1.0 - floor) * (gap / cfg.contest_range).clamp(0.0, 1.0)
}

/// Additive tactical matchup term: zones concede threes and protect the rim.
pub fn matchup_term(offense: OffenseTactic, defense: DefenseTactic, shot_type: ShotType, cfg: &OutcomeConfig) -> f32 {
    match (defense, shot_type) {
        (DefenseTactic::Zone, ShotType::Three) => {
            let shooter_bonus = if offense == OffenseTactic::Shoot { 1.5 } else { 1.0 };
            cfg.zone_three_bonus * shooter_bonus
        }
        (DefenseTactic::Zone, ShotType::Dunk | ShotType::Layup | ShotType::Close) => -cfg.zone_rim_penalty,
        _ => 0.0,
    }
}

/// Make probability for `shooter` taking `shot_type` from where they stand.
pub fn make_probability(state: &GameState, shooter: usize, shot_type: ShotType, cfg: &OutcomeConfig) -> f32 {
    let p = &state.players[shooter];
    let mut skill = governing_skill(p, shot_type);
    if matches!(shot_type, ShotType::MidRange | ShotType::Three) {
        if let Some(pass) = state.poss.last_pass {
            if pass.to == shooter && state.now() - pass.at < 1.0 {
                skill = 0.5 * (skill + p.ratings.shooting.catch_and_shoot);
            }
        }
    }
    let gap = state.defender_gap(shooter);
    let team = team_of(shooter);
    let pct = base_pct(cfg, shot_type) * rating_modifier(skill) * contest_modifier(gap, skill, p.superstar, cfg)
        + matchup_term(state.tactics[team].offense, state.tactics[1 - team].defense, shot_type, cfg);
    pct.clamp(0.02, 0.98)
}

/// Block probability for `blocker` contesting `shooter` at `gap` feet.
pub fn block_chance(blocker: &PlayerAgent, shooter: &PlayerAgent, gap: f32, shot_type: ShotType, cfg: &OutcomeConfig) -> f32 {
    if gap >= cfg.block_range {
        return 0.0;
    }
    let band = if gap < 2.0 {
        1.0
    } else if gap < 3.5 {
        0.6
    } else {
        0.3
    };
    let shot_factor = match shot_type {
        ShotType::Three => 0.25,
        ShotType::MidRange => 0.5,
        ShotType::Close | ShotType::Layup => 1.0,
        ShotType::Dunk => 0.6,
    };
    let height = (1.0 + (blocker.height() - shooter.height()) / 100.0).clamp(0.6, 1.4);
    cfg.block_base
        * (0.4 + norm(blocker.ratings.defense.block))
        * (0.6 + 0.4 * norm(blocker.ratings.athletic.vertical))
        * band
        * shot_factor
        * height
}

/// Shooting-foul probability: rises at the rim and with contest proximity.
pub fn foul_chance(shooter: &PlayerAgent, shot_type: ShotType, gap: f32, cfg: &OutcomeConfig) -> f32 {
    let mut p = cfg.shooting_foul_base;
    match shot_type {
        ShotType::Dunk | ShotType::Layup => p += cfg.foul_rim_bonus,
        ShotType::Close => p += cfg.foul_close_bonus,
        _ => {}
    }
    if gap < cfg.contest_range {
        p += cfg.foul_contest_bonus * (1.0 - gap / cfg.contest_range);
    }
    p * (0.7 + 0.6 * norm(shooter.ratings.finishing.draw_foul))
}

/// One draw: which way a miss comes off.
pub fn roll_miss_type(cfg: &OutcomeConfig, rng: &mut dyn RandomSource) -> MissType {
    let r = rng.next_f32();
    if r < cfg.airball_chance {
        MissType::Airball
    } else if r < cfg.airball_chance + cfg.rim_out_chance {
        MissType::RimOut
    } else if r < cfg.airball_chance + cfg.rim_out_chance + cfg.back_iron_chance {
        MissType::BackIron
    } else {
        MissType::FrontRim
    }
}

/// Resolve a shot at release and put it in the air (or on the floor when
/// blocked). `forced` skips band selection (alley-oop finishes).
pub fn attempt_shot(
    state: &mut GameState,
    shooter: usize,
    forced: Option<ShotType>,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> ShotAttempt {
    if shooter >= state.players.len() {
        return ShotAttempt::Skipped;
    }
    let cfg = &config.outcomes;
    let team = team_of(shooter);
    let shot_type = match forced {
        Some(t) => t,
        None => classify_shot(state, shooter, cfg, rng),
    };
    let contest = state.nearest_defender(shooter);
    let gap = contest.map(|(_, d)| d).unwrap_or(f32::MAX);
    let alley_oop = forced == Some(ShotType::Dunk) && state.poss.last_pass.map(|p| p.to) == Some(shooter);

    // Block before anything else.
    if let Some((blocker, d)) = contest {
        let p = block_chance(&state.players[blocker], &state.players[shooter], d, shot_type, cfg);
        if p > 0.0 && rng.chance(p) {
            record_attempt(state, shooter, shot_type);
            state.box_score.player_mut(blocker).blocks += 1;
            state.players[blocker].start_jump(11.0);
            let bounce = blocked_shot_bounce(state, shooter, rng);
            state.drop_ball(bounce);
            start_rebound(state, bounce.to, team);
            let text = format!(
                "{} blocks {}'s {}",
                state.player_name(blocker),
                state.player_name(shooter),
                shot_type.label()
            );
            state.log_event(EventKind::Block, Some(1 - team), Some(blocker), text);
            return ShotAttempt::Blocked { blocker };
        }
    }

    let made = rng.chance(make_probability(state, shooter, shot_type, cfg));

    let mut foul = None;
    if let Some((fouler, d)) = contest {
        if d < cfg.contest_range * 1.5 && rng.chance(foul_chance(&state.players[shooter], shot_type, d, cfg)) {
            let attempts = if made {
                1
            } else if shot_type == ShotType::Three {
                3
            } else {
                2
            };
            foul = Some(ShootingFoul { fouler, and_one: made, attempts });
        }
    }

    let miss = if made || foul.is_some() { None } else { Some(roll_miss_type(cfg, rng)) };

    let shot = ShotFlight {
        shooter,
        shot_type,
        made,
        miss,
        foul,
        assister: if made { assister_for(state, shooter, config.clock.assist_window) } else { None },
        alley_oop,
    };

    // Fouled misses are not field-goal attempts.
    if made || foul.is_none() {
        record_attempt(state, shooter, shot_type);
    }
    if let Some(f) = foul {
        charge_foul(state, f.fouler);
        let text = format!("Shooting foul on {}", state.player_name(f.fouler));
        state.log_event(EventKind::ShootingFoul, Some(1 - team), Some(f.fouler), text);
    }

    let from = state.players[shooter].pos;
    let flight = shot_flight(from, attack_basket(team), shot);
    state.launch(flight);
    state.players[shooter].start_jump(if shot_type == ShotType::Dunk { 12.0 } else { 8.0 });
    state.poss.play = None;
    state.set_phase(Phase::Shooting);

    let verb = if alley_oop { "throws down an alley-oop" } else { "shoots a" };
    let text = if alley_oop {
        format!("{} {}", state.player_name(shooter), verb)
    } else {
        format!("{} {} {}", state.player_name(shooter), verb, shot_type.label())
    };
    log::trace!("{} (made={}, gap={:.1})", text, made, gap);
    state.last_event = text;
    ShotAttempt::Released(shot)
}

fn record_attempt(state: &mut GameState, shooter: usize, shot_type: ShotType) {
    let line = state.box_score.player_mut(shooter);
    line.fga += 1;
    if shot_type == ShotType::Three {
        line.tpa += 1;
    }
}

/// Shot flight reached the rim: score it, go to the line, or play the miss.
pub fn resolve_shot_arrival(state: &mut GameState, shot: ShotFlight, rng: &mut dyn RandomSource) {
    let team = team_of(shot.shooter);
    if shot.made {
        let points = shot.shot_type.points();
        state.add_points(team, points);
        {
            let line = state.box_score.player_mut(shot.shooter);
            line.fgm += 1;
            line.points += points;
            if shot.shot_type == ShotType::Three {
                line.tpm += 1;
            }
        }
        let mut text = format!("{} scores on a {}", state.player_name(shot.shooter), shot.shot_type.label());
        if let Some(a) = shot.assister {
            state.box_score.player_mut(a).assists += 1;
            text.push_str(&format!(" (assist {})", state.player_name(a)));
        }
        state.log_event(EventKind::FieldGoalMade, Some(team), Some(shot.shooter), text);

        match shot.foul {
            Some(f) if f.and_one => award_free_throws(state, shot.shooter, 1, true),
            _ => state.request_change(1 - team, Restart::Inbound, ChangeReason::MadeBasket),
        }
        return;
    }

    if let Some(f) = shot.foul {
        award_free_throws(state, shot.shooter, f.attempts, false);
        return;
    }

    let miss = shot.miss.unwrap_or(MissType::RimOut);
    let text = format!("{} misses the {}", state.player_name(shot.shooter), shot.shot_type.label());
    state.log_event(EventKind::FieldGoalMissed, Some(team), Some(shot.shooter), text);
    let from = state.players[shot.shooter].pos;
    let bounce = miss_bounce(team, from, miss, rng);
    state.drop_ball(bounce);
    start_rebound(state, bounce.to, team);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::court::relative_to_basket;
    use crate::engine::rng::ScriptedRng;
    use crate::engine::state::{BallState, FlightKind};
    use crate::engine::test_fixtures::{clear_defense, demo_config, half_court_state};

    #[test]
    fn test_classify_by_distance() {
        let cfg = OutcomeConfig::default();
        let mut state = half_court_state(0);
        clear_defense(&mut state);
        let mut rng = ScriptedRng::constant(0.99);
        state.players[1].pos = relative_to_basket(0, 8.0, 0.0);
        assert_eq!(classify_shot(&state, 1, &cfg, &mut rng), ShotType::Close);
        state.players[1].pos = relative_to_basket(0, 16.0, 0.0);
        assert_eq!(classify_shot(&state, 1, &cfg, &mut rng), ShotType::MidRange);
        state.players[1].pos = relative_to_basket(0, 25.0, 0.0);
        assert_eq!(classify_shot(&state, 1, &cfg, &mut rng), ShotType::Three);
        state.players[1].pos = relative_to_basket(0, 2.0, 1.0);
        assert_eq!(classify_shot(&state, 1, &cfg, &mut rng), ShotType::Layup);
    }

    #[test]
    fn test_contest_lowers_percentage() {
        let cfg = OutcomeConfig::default();
        assert!(contest_modifier(10.0, 60.0, false, &cfg) > 1.0);
        let tight = contest_modifier(1.0, 60.0, false, &cfg);
        assert!(tight < contest_modifier(4.0, 60.0, false, &cfg));
        assert!(contest_modifier(0.0, 60.0, true, &cfg) > contest_modifier(0.0, 60.0, false, &cfg));
        assert!(contest_modifier(0.0, 90.0, false, &cfg) > contest_modifier(0.0, 60.0, false, &cfg));
    }

    #[test]
    fn test_zone_matchup() {
        let cfg = OutcomeConfig::default();
        assert!(matchup_term(OffenseTactic::Motion, DefenseTactic::Zone, ShotType::Three, &cfg) > 0.0);
        assert!(matchup_term(OffenseTactic::Motion, DefenseTactic::Zone, ShotType::Layup, &cfg) < 0.0);
        assert_eq!(matchup_term(OffenseTactic::Motion, DefenseTactic::Man, ShotType::Three, &cfg), 0.0);
    }

    #[test]
    fn test_block_needs_proximity() {
        let cfg = OutcomeConfig::default();
        let state = half_court_state(0);
        let (s, b) = (&state.players[0], &state.players[9]);
        assert_eq!(block_chance(b, s, 6.0, ShotType::Layup, &cfg), 0.0);
        assert!(block_chance(b, s, 1.0, ShotType::Layup, &cfg) > block_chance(b, s, 4.0, ShotType::Layup, &cfg));
        assert!(block_chance(b, s, 1.0, ShotType::Three, &cfg) < block_chance(b, s, 1.0, ShotType::Layup, &cfg));
    }

    #[test]
    fn test_foul_more_likely_at_rim() {
        let cfg = OutcomeConfig::default();
        let state = half_court_state(0);
        let s = &state.players[0];
        assert!(foul_chance(s, ShotType::Layup, 2.0, &cfg) > foul_chance(s, ShotType::Three, 2.0, &cfg));
        assert!(foul_chance(s, ShotType::Layup, 1.0, &cfg) > foul_chance(s, ShotType::Layup, 10.0, &cfg));
    }

    #[test]
    fn test_open_shot_launches_flight() {
        let config = demo_config();
        let mut state = half_court_state(0);
        clear_defense(&mut state);
        let shooter = state.carrier().unwrap();
        state.players[shooter].pos = relative_to_basket(0, 16.0, 4.0);
        // make roll, foul roll
        let mut rng = ScriptedRng::new(vec![0.0, 0.99], 0.5);
        let out = attempt_shot(&mut state, shooter, None, &config, &mut rng);
        let ShotAttempt::Released(shot) = out else { panic!("expected release, got {:?}", out) };
        assert!(shot.made);
        assert_eq!(shot.shot_type, ShotType::MidRange);
        assert_eq!(state.poss.phase, Phase::Shooting);
        assert!(state.carrier().is_none());
        assert!(matches!(state.ball.state, BallState::Flight(f) if matches!(f.kind, FlightKind::Shot(_))));
        assert_eq!(state.box_score.player(shooter).fga, 1);
    }

    #[test]
    fn test_made_basket_scores_and_flips() {
        let mut state = half_court_state(0);
        let shot = ShotFlight {
            shooter: 1,
            shot_type: ShotType::Three,
            made: true,
            miss: None,
            foul: None,
            assister: Some(0),
            alley_oop: false,
        };
        let mut rng = ScriptedRng::constant(0.5);
        resolve_shot_arrival(&mut state, shot, &mut rng);
        assert_eq!(state.score, [3, 0]);
        assert_eq!(state.box_score.player(1).tpm, 1);
        assert_eq!(state.box_score.player(0).assists, 1);
        assert_eq!(state.pending.map(|p| (p.team, p.reason)), Some((1, ChangeReason::MadeBasket)));
    }

    #[test]
    fn test_fouled_miss_goes_to_line() {
        let mut state = half_court_state(0);
        let shot = ShotFlight {
            shooter: 2,
            shot_type: ShotType::Three,
            made: false,
            miss: None,
            foul: Some(ShootingFoul { fouler: 7, and_one: false, attempts: 3 }),
            assister: None,
            alley_oop: false,
        };
        let mut rng = ScriptedRng::constant(0.5);
        resolve_shot_arrival(&mut state, shot, &mut rng);
        assert_eq!(state.poss.phase, Phase::FreeThrow);
        assert_eq!(state.poss.free_throw.map(|f| f.total), Some(3));
        assert_eq!(state.score, [0, 0]);
    }

    #[test]
    fn test_miss_starts_rebound() {
        let mut state = half_court_state(0);
        let shot = ShotFlight {
            shooter: 2,
            shot_type: ShotType::MidRange,
            made: false,
            miss: Some(MissType::BackIron),
            foul: None,
            assister: None,
            alley_oop: false,
        };
        let mut rng = ScriptedRng::constant(0.5);
        resolve_shot_arrival(&mut state, shot, &mut rng);
        assert_eq!(state.poss.phase, Phase::Rebound);
        assert!(state.ball.is_bouncing());
        assert!(state.poss.rebound.is_some());
    }
}
