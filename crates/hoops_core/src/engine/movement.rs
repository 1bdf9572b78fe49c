//! Player Motion & Collision
//!
//! Inertia-based movement toward each agent's target:
//! - speed rating -> top speed, attenuated by fatigue and motion mode
//! - acceleration rating -> velocity blend rate
//! - arrival steering near the target
//! - separation between overlapping bodies, and one-sided screen blocking
//!
//! Runs once per tick after every stage that sets targets.

use super::config::MovementConfig;
use super::court::clamp_to_court;
use super::geometry::{add, distance, length, norm, normalize, scale, sub, Point};
use super::state::{team_of, GameState, PlayerAgent};

/// Top speed for the agent's current mode (ft/s).
pub fn max_speed(p: &PlayerAgent, cfg: &MovementConfig) -> f32 {
    let mut speed = cfg.base_speed + cfg.speed_per_rating * p.ratings.athletic.speed;
    speed *= 1.0 - p.fatigue.clamp(0.0, 1.0) * cfg.fatigue_speed_penalty;

    if p.flags.defensive_sliding {
        speed *= cfg.slide_factor;
    }
    if p.flags.dribbling {
        speed *= cfg.dribble_factor;
    }
    if p.flags.cutting {
        speed *= cfg.cut_factor;
    }
    if p.catch_timer > 0.0 {
        speed *= cfg.catch_speed_factor;
    }
    if p.sprint_timer > cfg.sprint_threshold_seconds {
        speed *= cfg.sprint_penalty;
    }
    speed
}

/// Velocity blend rate per second.
#[inline]
pub fn acceleration(p: &PlayerAgent, cfg: &MovementConfig) -> f32 {
    cfg.acceleration_base + cfg.acceleration_per_rating * p.ratings.athletic.acceleration
}

/// Stamina-scaled fatigue gain for `dt` seconds. Always >= 0.
#[inline]
pub fn fatigue_gain(p: &PlayerAgent, cfg: &MovementConfig, dt: f32) -> f32 {
    let stamina_factor = 1.4 - 0.8 * norm(p.ratings.athletic.stamina);
    let effort = 0.5 + 0.5 * (length(p.vel) / cfg.base_speed.max(1.0)).min(1.5);
    cfg.fatigue_rate * stamina_factor * effort * dt
}

/// Integrate one agent toward its target. Returns the new (pos, vel).
pub fn step_agent(p: &PlayerAgent, cfg: &MovementConfig, dt: f32) -> (Point, Point) {
    let to_target = sub(p.target, p.pos);
    let dist = length(to_target);

    let top = max_speed(p, cfg);
    let desired_speed = if dist < cfg.arrive_radius {
        top * (dist / cfg.arrive_radius.max(0.01))
    } else {
        top
    };
    let desired_vel = scale(normalize(to_target), desired_speed);

    let blend = (acceleration(p, cfg) * dt).clamp(0.0, 1.0);
    let vel = add(p.vel, scale(sub(desired_vel, p.vel), blend));

    // Never overshoot the target within one step.
    let step = scale(vel, dt);
    let pos = if length(step) > dist && dist > 0.0 { p.target } else { add(p.pos, step) };
    (pos, vel)
}

/// Movement stage: timers, fatigue, integration, collisions, clamping.
pub fn integrate(state: &mut GameState, cfg: &MovementConfig, dt: f32) {
    for p in state.players.iter_mut() {
        p.catch_timer = (p.catch_timer - dt).max(0.0);

        if distance(p.pos, p.target) > cfg.sprint_distance {
            p.sprint_timer += dt;
        } else {
            p.sprint_timer = (p.sprint_timer - dt).max(0.0);
        }

        p.fatigue = (p.fatigue + fatigue_gain(p, cfg, dt)).min(1.0);

        let (pos, vel) = step_agent(p, cfg, dt);
        p.pos = pos;
        p.vel = vel;

        integrate_jump(p, cfg, dt);
    }

    apply_screen_blocks(state, cfg);
    apply_separation(state, cfg);

    for p in state.players.iter_mut() {
        p.pos = clamp_to_court(p.pos);
    }
}

fn integrate_jump(p: &mut PlayerAgent, cfg: &MovementConfig, dt: f32) {
    if p.jump_height <= 0.0 && p.jump_velocity <= 0.0 {
        return;
    }
    p.jump_height += p.jump_velocity * dt;
    p.jump_velocity -= cfg.gravity * dt;
    if p.jump_height <= 0.0 {
        p.jump_height = 0.0;
        p.jump_velocity = 0.0;
    }
}

/// Push overlapping bodies apart symmetrically.
pub fn apply_separation(state: &mut GameState, cfg: &MovementConfig) {
    let n = state.players.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = state.players[i].pos;
            let b = state.players[j].pos;
            let d = distance(a, b);
            if d >= cfg.separation_radius {
                continue;
            }
            let axis = if d > 1e-4 { normalize(sub(b, a)) } else { (1.0, 0.0) };
            let push = (cfg.separation_radius - d) * cfg.separation_strength * 0.5;
            state.players[i].pos = sub(a, scale(axis, push));
            state.players[j].pos = add(b, scale(axis, push));
        }
    }
}

/// Screeners hold their ground; opposing defenders inside the block radius
/// are pushed off, scaled by the strength matchup.
pub fn apply_screen_blocks(state: &mut GameState, cfg: &MovementConfig) {
    let screeners: Vec<(usize, Point, f32)> = state
        .players
        .iter()
        .filter(|p| p.flags.screening)
        .map(|p| (p.id, p.pos, p.ratings.physical.strength))
        .collect();

    for (screener, spot, strength) in screeners {
        let screen_team = team_of(screener);
        for d in state.players.iter_mut().filter(|p| p.team != screen_team) {
            let gap = distance(d.pos, spot);
            if gap >= cfg.screen_block_radius {
                continue;
            }
            let ratio = (strength.max(1.0) / d.ratings.physical.strength.max(1.0)).clamp(0.5, 1.5);
            let axis = if gap > 1e-4 { normalize(sub(d.pos, spot)) } else { (0.0, 1.0) };
            let push = (cfg.screen_block_radius - gap) * cfg.screen_block_strength * ratio;
            d.pos = add(d.pos, scale(axis, push));
            // Bleed off the component driving into the screener.
            let into = -(d.vel.0 * axis.0 + d.vel.1 * axis.1);
            if into > 0.0 {
                d.vel = add(d.vel, scale(axis, into * (ratio * 0.5).min(1.0)));
            }
        }
    }
}

/// Clear per-frame motion flags (frame reset stage).
pub fn reset_frame_flags(state: &mut GameState) {
    for p in state.players.iter_mut() {
        p.flags.defensive_sliding = false;
        p.flags.screening = false;
        p.flags.cutting = false;
    }
}
