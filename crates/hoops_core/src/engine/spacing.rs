//! # Offensive Spacing
//!
//! Owns the possession's role map: roles are handed out once per possession
//! (ball handler first, then bigs, then wings) and every player is parked on
//! a home court slot. While no scripted play drives the offense, off-ball
//! players drift to their slots; lingering paint players are nudged out
//! before the three-second count runs out.

use super::config::EngineConfig;
use super::court::{basket_relative, in_paint, relative_to_basket, CourtSlot, PAINT_DEPTH, PAINT_HALF_WIDTH};
use super::geometry::{distance, Point};
use super::state::{GameState, OffensiveRole, Phase, PlayerAgent};

/// Preferred slots per role, tried in order.
fn slot_preferences(role: OffensiveRole) -> &'static [CourtSlot] {
    match role {
        OffensiveRole::BallHandler => &[CourtSlot::Top, CourtSlot::LeftWing, CourtSlot::RightWing],
        OffensiveRole::Screener => &[CourtSlot::RightElbow, CourtSlot::LeftElbow, CourtSlot::RightBlock],
        OffensiveRole::Cutter => &[CourtSlot::LeftWing, CourtSlot::RightWing, CourtSlot::LeftCorner],
        OffensiveRole::Spacer => &[CourtSlot::RightCorner, CourtSlot::LeftCorner, CourtSlot::RightWing],
        OffensiveRole::PostUp => &[CourtSlot::LeftBlock, CourtSlot::RightBlock, CourtSlot::LeftElbow],
    }
}

/// Spacing stage.
pub fn update(state: &mut GameState, config: &EngineConfig) {
    if !matches!(state.poss.phase, Phase::Advance | Phase::Setup | Phase::Action) {
        return;
    }
    assign_roles(state);
    assign_slots(state);

    if state.poss.play.is_none() {
        let carrier = state.carrier();
        let team = state.possession;
        for id in state.offense_ids() {
            if Some(id) == carrier {
                continue;
            }
            if let Some(slot) = state.poss.slot_of(id) {
                state.players[id].target = slot.position(team);
            }
        }
    }
    nudge_out_of_paint(state, config);
}

/// Hand out the five roles if this possession has none yet.
pub fn assign_roles(state: &mut GameState) {
    if !state.poss.roles.is_empty() {
        return;
    }
    let mut pool: Vec<usize> = state.offense_ids().collect();
    if pool.is_empty() {
        return;
    }

    let handler = state
        .carrier()
        .filter(|c| pool.contains(c))
        .or_else(|| best_by(&state.players, &pool, |p| p.ratings.playmaking.ball_handling));
    let picks: [(OffensiveRole, fn(&PlayerAgent) -> f32); 3] = [
        (OffensiveRole::PostUp, |p| p.ratings.finishing.post_control + p.height() + if p.is_big() { 40.0 } else { 0.0 }),
        (OffensiveRole::Screener, |p| p.ratings.physical.strength + if p.is_big() { 30.0 } else { 0.0 }),
        (OffensiveRole::Cutter, |p| p.ratings.athletic.speed + p.ratings.finishing.layup),
    ];

    if let Some(h) = handler {
        state.poss.roles.assign(OffensiveRole::BallHandler, h);
        pool.retain(|id| *id != h);
    }
    for (role, score) in picks {
        if let Some(id) = best_by(&state.players, &pool, score) {
            state.poss.roles.assign(role, id);
            pool.retain(|p| *p != id);
        }
    }
    if let Some(&last) = pool.first() {
        state.poss.roles.assign(OffensiveRole::Spacer, last);
    }
    log::trace!("roles assigned for team {}", state.possession);
}

fn best_by(players: &[PlayerAgent], pool: &[usize], score: impl Fn(&PlayerAgent) -> f32) -> Option<usize> {
    pool.iter()
        .copied()
        .filter(|id| *id < players.len())
        .max_by(|a, b| score(&players[*a]).total_cmp(&score(&players[*b])).then(b.cmp(a)))
}

/// Give every offensive player without a slot their first free preference.
pub fn assign_slots(state: &mut GameState) {
    let roles: Vec<(OffensiveRole, usize)> = state.poss.roles.iter().collect();
    for (role, id) in roles {
        if state.poss.slot_of(id).is_some() {
            continue;
        }
        let slot = slot_preferences(role)
            .iter()
            .copied()
            .find(|s| state.poss.slot_holder(*s).is_none())
            .or_else(|| nearest_open_slot(state, id));
        if let Some(slot) = slot {
            state.poss.claim_slot(id, slot);
        }
    }
}

/// Nearest unoccupied slot for `player`. Interior slots pull bigs in and
/// push guards out.
pub fn nearest_open_slot(state: &GameState, player: usize) -> Option<CourtSlot> {
    let p = state.players.get(player)?;
    let team = state.possession;
    CourtSlot::ALL
        .iter()
        .copied()
        .filter(|s| state.poss.slot_holder(*s).map_or(true, |h| h == player))
        .min_by(|a, b| slot_cost(p, *a, team).total_cmp(&slot_cost(p, *b, team)))
}

fn slot_cost(p: &PlayerAgent, slot: CourtSlot, team: usize) -> f32 {
    let mut cost = distance(p.pos, slot.position(team));
    if slot.is_interior() {
        if p.is_big() {
            cost -= 8.0;
        } else if p.is_guard() {
            cost += 10.0;
        }
    }
    cost
}

/// Anyone a second away from a three-second call heads for the nearest
/// spot just outside the lane. The carrier attacking the rim is left alone.
fn nudge_out_of_paint(state: &mut GameState, config: &EngineConfig) {
    let limit = config.clock.three_second_limit - 1.0;
    let team = state.possession;
    let carrier = state.carrier();
    for id in state.offense_ids() {
        let p = &state.players[id];
        if p.paint_timer < limit || !in_paint(team, p.pos) {
            continue;
        }
        if Some(id) == carrier && state.poss.committed_drive {
            continue;
        }
        let exit = paint_exit(team, p.pos);
        state.players[id].target = exit;
    }
}

/// Closest point a step outside the painted area.
pub fn paint_exit(team: usize, pos: Point) -> Point {
    let (depth, lateral) = basket_relative(team, pos);
    let side = if lateral < 0.0 { -1.0 } else { 1.0 };
    let to_side = PAINT_HALF_WIDTH + 1.5 - lateral.abs();
    let to_top = PAINT_DEPTH + 1.5 - depth;
    if to_side <= to_top {
        relative_to_basket(team, depth.max(1.0), side * (PAINT_HALF_WIDTH + 1.5))
    } else {
        relative_to_basket(team, PAINT_DEPTH + 1.5, lateral)
    }
}
