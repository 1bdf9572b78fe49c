//! # Read-and-React Decision Engine
//!
//! Heuristic policy for the ball handler when no scripted play is driving
//! the offense (or a play step defers to it). `decide` walks an ordered rule
//! list and the first rule that fires wins; it never mutates the game, only
//! consumes draws. `execute_decision` turns the choice into an outcome
//! resolver call or a movement order.
//!
//! Rule order:
//! 1. excessive passes -> forced shot
//! 2. shot-clock pressure -> forced shot / drive
//! 3. mandatory attack after a long hold
//! 4. fresh catch -> catch-and-shoot roll
//! 5. committed drive -> finish or kick
//! 6. point blank -> shot or kick-out
//! 7. superstar tendencies
//! 8. wide-open jumper roll
//! 9. open mid-range roll
//! 10. close-range finish roll
//! 11. pass-first window
//! 12. usage balance -> forced pass
//! 13. alley-oop look
//! 14. pass hunger (decays with passes made)
//! 15. drive a clear lane
//! 16. shot willingness (rises with passes made)
//! 17. default swing pass
//! 18. fallback shot late in the clock
//! 19. fallback drive, else hold

use super::config::{DecisionConfig, EngineConfig};
use super::court::{attack_basket, basket_relative, distance_to_basket, is_frontcourt, is_three_point, relative_to_basket};
use super::geometry::{norm, point_to_segment_distance, rating_modifier};
use super::outcomes::{attempt_pass, attempt_shot};
use super::rng::RandomSource;
use super::state::{team_of, GameState, OffensiveRole, PlayerAgent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffenseDecision {
    Shoot,
    Pass { target: usize, alley_oop: bool },
    Drive,
    Hold,
}

/// Everything the rules read about the handler's situation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    pub handler: usize,
    pub dist_to_basket: f32,
    pub defender_gap: f32,
    pub open: bool,
    pub wide_open: bool,
    pub three_point: bool,
    pub hold: f32,
    pub shot_clock: f32,
    pub pass_count: u32,
    pub usage: f32,
    pub fresh_catch: bool,
    /// Pass cooldown has elapsed since the catch.
    pub can_pass: bool,
    pub lane_clear: bool,
}

impl DecisionContext {
    pub fn read(state: &GameState, handler: usize, config: &EngineConfig) -> Self {
        let cfg = &config.decision;
        let team = team_of(handler);
        let pos = state.pos(handler);
        let gap = state.defender_gap(handler);
        let since_catch = state
            .poss
            .last_pass
            .filter(|p| p.to == handler)
            .map(|p| (state.now() - p.at) as f32);
        Self {
            handler,
            dist_to_basket: distance_to_basket(team, pos),
            defender_gap: gap,
            open: gap > cfg.open_threshold,
            wide_open: gap > cfg.wide_open_threshold,
            three_point: is_three_point(team, pos),
            hold: state.poss.dribble_hold,
            shot_clock: state.poss.shot_clock,
            pass_count: state.poss.pass_count,
            usage: state.box_score.usage_ratio(handler),
            fresh_catch: since_catch.map_or(false, |t| t <= cfg.fresh_catch_window),
            can_pass: since_catch.map_or(true, |t| t >= config.clock.pass_cooldown),
            lane_clear: lane_clear(state, handler, cfg),
        }
    }

    fn in_range(&self, cfg: &DecisionConfig) -> bool {
        self.dist_to_basket <= cfg.max_shot_distance
    }

    fn jumper(&self, cfg: &DecisionConfig) -> bool {
        self.in_range(cfg) && self.dist_to_basket > cfg.close_range
    }

    /// Shot chances shrink for a player already over their share.
    fn hog_factor(&self, cfg: &DecisionConfig) -> f32 {
        if self.usage >= cfg.usage_soft_cap {
            0.6
        } else {
            1.0
        }
    }
}

/// No defender within `lane_clearance` of the handler-to-rim line.
pub fn lane_clear(state: &GameState, handler: usize, cfg: &DecisionConfig) -> bool {
    let team = team_of(handler);
    let from = state.pos(handler);
    let to = attack_basket(team);
    !state
        .players
        .iter()
        .filter(|p| p.team != team)
        .any(|p| point_to_segment_distance(p.pos, from, to) < cfg.lane_clearance)
}

/// Open classification used by play steps that shoot "if open".
pub fn is_open(state: &GameState, player: usize, cfg: &DecisionConfig) -> bool {
    state.defender_gap(player) > cfg.open_threshold
}

/// Teammates the handler may legally throw to.
fn pass_targets(state: &GameState, handler: usize) -> Vec<usize> {
    let team = team_of(handler);
    state
        .offense_ids()
        .filter(|id| *id != handler && team_of(*id) == team)
        .filter(|id| !state.poss.crossed_half || is_frontcourt(team, state.pos(*id)))
        .collect()
}

/// Teammate with the most room, ties to the lower id.
pub fn most_open_teammate(state: &GameState, handler: usize) -> Option<usize> {
    pass_targets(state, handler)
        .into_iter()
        .max_by(|a, b| state.defender_gap(*a).total_cmp(&state.defender_gap(*b)).then(b.cmp(a)))
}

/// Pass-first preference: a rolling screener near the rim, then an open
/// shooter, then whoever is most open.
fn preferred_target(state: &GameState, handler: usize, cfg: &DecisionConfig) -> Option<usize> {
    let team = team_of(handler);
    let targets = pass_targets(state, handler);
    if let Some(roller) = state.poss.roles.player_for(OffensiveRole::Screener) {
        if targets.contains(&roller)
            && distance_to_basket(team, state.pos(roller)) < 10.0
            && state.defender_gap(roller) > cfg.open_threshold * 0.5
        {
            return Some(roller);
        }
    }
    let shooter = targets
        .iter()
        .copied()
        .filter(|id| state.defender_gap(*id) > cfg.open_threshold && is_three_point(team, state.pos(*id)))
        .max_by(|a, b| {
            let sa = state.players[*a].ratings.shooting.three_point;
            let sb = state.players[*b].ratings.shooting.three_point;
            sa.total_cmp(&sb).then(b.cmp(a))
        });
    shooter.or_else(|| most_open_teammate(state, handler))
}

/// Cutting leaper near the rim for a lob.
fn alley_oop_target(state: &GameState, handler: usize) -> Option<usize> {
    let team = team_of(handler);
    if state.players[handler].ratings.playmaking.passing < 60.0 {
        return None;
    }
    pass_targets(state, handler).into_iter().find(|id| {
        let p: &PlayerAgent = &state.players[*id];
        let cutting = p.flags.cutting || state.poss.roles.role_of(*id) == Some(OffensiveRole::Cutter);
        cutting
            && distance_to_basket(team, p.pos) < 10.0
            && p.ratings.athletic.vertical >= 70.0
            && p.ratings.finishing.dunk >= 60.0
            && state.defender_gap(*id) > 3.0
    })
}

/// Walk the rule list. Pure apart from draws.
pub fn decide(state: &GameState, handler: usize, config: &EngineConfig, rng: &mut dyn RandomSource) -> OffenseDecision {
    let cfg = &config.decision;
    let ctx = DecisionContext::read(state, handler, config);
    let p = &state.players[handler];
    let r = &p.ratings;
    let shot_or_drive = if ctx.in_range(cfg) { OffenseDecision::Shoot } else { OffenseDecision::Drive };
    let pass_to = |target: Option<usize>| target.map(|t| OffenseDecision::Pass { target: t, alley_oop: false });

    // 1-3: forced attacks
    if ctx.pass_count >= cfg.max_passes {
        return shot_or_drive;
    }
    if ctx.shot_clock <= cfg.shot_clock_pressure {
        return shot_or_drive;
    }
    if ctx.hold >= cfg.mandatory_attack_hold {
        return shot_or_drive;
    }

    // 4: catch and shoot
    if ctx.fresh_catch && ctx.open && ctx.jumper(cfg) {
        let wide = if ctx.wide_open { 1.3 } else { 1.0 };
        if rng.chance(cfg.catch_and_shoot_base * (0.5 + norm(r.shooting.catch_and_shoot)) * wide) {
            return OffenseDecision::Shoot;
        }
    }

    // 5: committed drive
    if state.poss.committed_drive {
        if ctx.dist_to_basket > cfg.drive_finish_distance {
            return OffenseDecision::Drive;
        }
        if ctx.defender_gap < 3.0 && ctx.can_pass && rng.chance(cfg.kick_out_chance) {
            if let Some(d) = pass_to(most_open_teammate(state, handler)) {
                return d;
            }
        }
        return OffenseDecision::Shoot;
    }

    // 6: point blank
    if ctx.dist_to_basket <= cfg.point_blank_distance {
        if rng.chance(cfg.point_blank_shot_chance) || !ctx.can_pass {
            return OffenseDecision::Shoot;
        }
        return pass_to(most_open_teammate(state, handler)).unwrap_or(OffenseDecision::Shoot);
    }

    // 7: superstar tendencies
    if p.superstar {
        if ctx.three_point && ctx.in_range(cfg) && r.shooting.three_point >= cfg.superstar_threshold
            && rng.chance(cfg.superstar_three_chance)
        {
            return OffenseDecision::Shoot;
        }
        if ctx.lane_clear && r.finishing.dunk >= cfg.superstar_threshold && rng.chance(cfg.superstar_drive_chance) {
            return OffenseDecision::Drive;
        }
    }

    let hog = ctx.hog_factor(cfg);

    // 8: wide-open jumper
    if ctx.wide_open && ctx.jumper(cfg) {
        let skill = if ctx.three_point { r.shooting.three_point } else { r.shooting.mid_range };
        if rng.chance(cfg.wide_open_shot_base * rating_modifier(skill) * hog) {
            return OffenseDecision::Shoot;
        }
    }

    // 9: open mid-range
    if ctx.open && !ctx.three_point && ctx.jumper(cfg)
        && rng.chance(cfg.open_mid_base * rating_modifier(r.shooting.mid_range) * hog)
    {
        return OffenseDecision::Shoot;
    }

    // 10: close-range finish
    if ctx.dist_to_basket <= cfg.close_range && ctx.defender_gap >= 3.0 {
        let skill = r.shooting.close.max(r.finishing.layup);
        if rng.chance(cfg.close_finish_base * rating_modifier(skill) * hog) {
            return OffenseDecision::Shoot;
        }
    }

    if ctx.can_pass {
        // 11: pass first
        if ctx.hold < cfg.pass_first_hold && ctx.pass_count == 0 {
            let vision = 0.7 + 0.6 * norm(r.playmaking.vision);
            if rng.chance(cfg.pass_first_base * vision) {
                if let Some(d) = pass_to(preferred_target(state, handler, cfg)) {
                    return d;
                }
            }
        }

        // 12: usage balance
        if ctx.usage >= cfg.usage_hard_cap
            || (ctx.usage >= cfg.usage_soft_cap && rng.chance(cfg.soft_cap_pass_chance))
        {
            if let Some(d) = pass_to(most_open_teammate(state, handler)) {
                return d;
            }
        }

        // 13: alley-oop
        if let Some(target) = alley_oop_target(state, handler) {
            if rng.chance(cfg.alley_oop_base * (0.5 + norm(r.playmaking.passing))) {
                return OffenseDecision::Pass { target, alley_oop: true };
            }
        }

        // 14: pass hunger
        let hunger = cfg.pass_hunger_base * cfg.pass_hunger_decay.powi(ctx.pass_count as i32);
        if rng.chance(hunger) {
            if let Some(d) = pass_to(preferred_target(state, handler, cfg)) {
                return d;
            }
        }
    }

    // 15: clear lane
    if ctx.lane_clear && rng.chance(cfg.drive_base * (0.6 + 0.8 * norm(r.playmaking.ball_handling))) {
        return OffenseDecision::Drive;
    }

    // 16: shot willingness
    if ctx.open && ctx.in_range(cfg) {
        let willing = cfg.shot_willingness_base + cfg.shot_willingness_per_pass * ctx.pass_count as f32;
        if rng.chance(willing.min(0.9) * hog) {
            return OffenseDecision::Shoot;
        }
    }

    // 17: swing it
    if ctx.can_pass && rng.chance(cfg.default_pass_chance) {
        if let Some(d) = pass_to(most_open_teammate(state, handler)) {
            return d;
        }
    }

    // 18-19: fallbacks
    if ctx.shot_clock <= cfg.fallback_shot_clock && ctx.in_range(cfg) {
        return OffenseDecision::Shoot;
    }
    if ctx.lane_clear && rng.chance(cfg.fallback_drive_chance) {
        return OffenseDecision::Drive;
    }
    OffenseDecision::Hold
}

/// Carry out a decision for `handler`.
pub fn execute_decision(
    state: &mut GameState,
    handler: usize,
    decision: OffenseDecision,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) {
    log::trace!("{} decides {:?}", handler, decision);
    match decision {
        OffenseDecision::Shoot => {
            attempt_shot(state, handler, None, config, rng);
        }
        OffenseDecision::Pass { target, alley_oop } => {
            attempt_pass(state, handler, target, alley_oop, config, rng);
        }
        OffenseDecision::Drive => start_drive(state, handler),
        OffenseDecision::Hold => {
            state.players[handler].flags.dribbling = true;
        }
    }
}

/// Point the handler at the rim, slightly off the side they attack from.
pub fn start_drive(state: &mut GameState, handler: usize) {
    let team = team_of(handler);
    let (_, lateral) = basket_relative(team, state.pos(handler));
    let side = if lateral < 0.0 { -1.5 } else { 1.5 };
    let p = &mut state.players[handler];
    p.target = relative_to_basket(team, 1.0, side);
    p.flags.driving = true;
    p.flags.dribbling = true;
    state.poss.committed_drive = true;
}

/// Decide and execute in one call.
pub fn read_and_react(state: &mut GameState, handler: usize, config: &EngineConfig, rng: &mut dyn RandomSource) {
    let decision = decide(state, handler, config, rng);
    execute_decision(state, handler, decision, config, rng);
}
