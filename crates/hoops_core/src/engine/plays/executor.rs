//! # Play Executor
//!
//! Runs the active play one tick at a time: keeps the ball handler role on
//! the carrier, executes each role's action for the current step, then
//! checks the step trigger. Ball actions fire at most once per step and
//! only once the carrier has gathered the catch.

use super::library::play_by_id;
use super::types::{PlayAction, PlayStep, PositionCondition, StepTrigger};
use crate::engine::config::{DecisionConfig, EngineConfig};
use crate::engine::court::{basket_relative, distance_to_basket, relative_to_basket, CourtSlot};
use crate::engine::decision::is_open;
use crate::engine::geometry::{distance, Point};
use crate::engine::outcomes::{attempt_pass, attempt_shot, lane_blocked};
use crate::engine::rng::RandomSource;
use crate::engine::spacing::nearest_open_slot;
use crate::engine::state::{GameState, OffensiveRole, Phase};
use crate::engine::timestep::DT;
use crate::models::Position;

/// Screener counts as set within this distance of the ball handler.
const SCREEN_SET_RANGE: f32 = 5.0;
const POST_SEAL_RANGE: f32 = 6.0;
const ARRIVED_RANGE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayTick {
    /// Play is driving the offense this tick.
    Continue,
    /// The carrier's part of this step hands control to read-and-react.
    Deferred,
    /// No play is running any more.
    Ended,
}

enum ActionResult {
    Done,
    Defer,
    /// An outcome resolver took over (shot, steal, possession change).
    Interrupted,
}

/// Advance the active play by one tick.
pub fn run_active_play(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> PlayTick {
    let Some(active) = state.poss.play else {
        return PlayTick::Ended;
    };
    let Some(step) = play_by_id(active.play_id).and_then(|p| p.steps.get(active.step)) else {
        state.poss.play = None;
        return PlayTick::Ended;
    };
    if state.poss.roles.is_empty() {
        return PlayTick::Deferred;
    }

    keep_handler_on_carrier(state);
    if let Some(p) = state.poss.play.as_mut() {
        p.step_timer += DT;
    }

    let mut deferred = false;
    for role in OffensiveRole::ALL {
        let Some(player) = state.poss.roles.player_for(role) else {
            continue;
        };
        match execute_action(state, player, step.action_for(role), config, rng) {
            ActionResult::Done => {}
            ActionResult::Defer => deferred = true,
            ActionResult::Interrupted => return PlayTick::Ended,
        }
        if state.poss.play.is_none() || state.poss.phase != Phase::Action {
            return PlayTick::Ended;
        }
    }

    // A carrier outside the ball handler role (a point guard who kept
    // their role) is left to the heuristic.
    if let Some(c) = state.carrier() {
        if state.role_of(c) != Some(OffensiveRole::BallHandler) {
            deferred = true;
        }
    }

    let timer = state.poss.play.map(|p| p.step_timer).unwrap_or(0.0);
    if step_should_advance(step, timer, state, &config.decision) {
        if advance_step(state) {
            return PlayTick::Ended;
        }
    }
    if deferred {
        PlayTick::Deferred
    } else {
        PlayTick::Continue
    }
}

/// Move to the next step; returns true when the play is over.
fn advance_step(state: &mut GameState) -> bool {
    let Some(mut active) = state.poss.play else {
        return true;
    };
    let len = play_by_id(active.play_id).map_or(0, |p| p.steps.len());
    active.step += 1;
    active.step_timer = 0.0;
    active.acted = false;
    if active.step >= len {
        log::trace!("play {} complete", active.play_id);
        state.poss.play = None;
        return true;
    }
    state.poss.play = Some(active);
    false
}

/// Role continuity: a new carrier who is not a point guard takes over the
/// ball handler role.
fn keep_handler_on_carrier(state: &mut GameState) {
    let Some(carrier) = state.carrier() else {
        return;
    };
    if state.role_of(carrier) == Some(OffensiveRole::BallHandler) {
        return;
    }
    if state.players[carrier].position == Position::PG {
        return;
    }
    if state.poss.roles.hand_ball_handler_to(carrier) {
        log::trace!("ball handler role moves to {}", carrier);
    }
}

/// Does the current step hand over to the next one?
pub fn step_should_advance(step: &PlayStep, timer: f32, state: &GameState, cfg: &DecisionConfig) -> bool {
    if timer >= cfg.play_step_watchdog {
        return true;
    }
    match step.trigger {
        StepTrigger::Time | StepTrigger::Position(None) => timer >= step.duration,
        StepTrigger::Pass => state.poss.last_pass.map_or(false, |p| {
            let since = (state.now() - p.at) as f32;
            since <= cfg.pass_trigger_window && since <= timer
        }),
        StepTrigger::Position(Some(condition)) => condition_holds(state, condition),
    }
}

pub fn condition_holds(state: &GameState, condition: PositionCondition) -> bool {
    let roles = &state.poss.roles;
    let team = state.possession;
    match condition {
        PositionCondition::ScreenSet => {
            match (roles.player_for(OffensiveRole::Screener), roles.player_for(OffensiveRole::BallHandler)) {
                (Some(s), Some(h)) => distance(state.pos(s), state.pos(h)) <= SCREEN_SET_RANGE,
                _ => false,
            }
        }
        PositionCondition::PostSealed => roles
            .player_for(OffensiveRole::PostUp)
            .map_or(false, |p| distance_to_basket(team, state.pos(p)) <= POST_SEAL_RANGE),
        PositionCondition::CutterArrived => roles.player_for(OffensiveRole::Cutter).map_or(false, |c| {
            let p = &state.players[c];
            distance(p.pos, p.target) <= ARRIVED_RANGE
        }),
        PositionCondition::Settled => state
            .offense_ids()
            .all(|id| distance(state.players[id].pos, state.players[id].target) <= ARRIVED_RANGE),
    }
}

fn execute_action(
    state: &mut GameState,
    player: usize,
    action: PlayAction,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> ActionResult {
    let team = state.possession;
    let is_carrier = state.carrier() == Some(player);

    if action.needs_ball() {
        if !is_carrier {
            hold(state, player);
            return ActionResult::Done;
        }
        return ball_action(state, player, action, config, rng);
    }

    match action {
        PlayAction::MoveTo(slot) | PlayAction::Pop(slot) => {
            state.poss.claim_slot(player, slot);
            state.players[player].target = slot.position(team);
        }
        PlayAction::Cut(slot) => {
            state.poss.claim_slot(player, slot);
            let p = &mut state.players[player];
            p.target = slot.position(team);
            p.flags.cutting = true;
        }
        PlayAction::Screen(for_role) => match state.poss.roles.player_for(for_role) {
            Some(mate) if mate != player => {
                let spot = screen_spot(state, player, mate);
                let p = &mut state.players[player];
                p.target = spot;
                p.flags.screening = distance(p.pos, spot) <= ARRIVED_RANGE;
            }
            _ => hold(state, player),
        },
        PlayAction::Drive { side } => {
            let p = &mut state.players[player];
            p.target = relative_to_basket(team, 2.0, side * 4.0);
            if is_carrier {
                p.flags.driving = true;
                p.flags.dribbling = true;
            } else {
                p.flags.cutting = true;
            }
        }
        PlayAction::Roll => {
            let (_, lateral) = basket_relative(team, state.pos(player));
            let p = &mut state.players[player];
            p.target = relative_to_basket(team, 4.0, lateral.signum() * 3.0);
            p.flags.cutting = true;
        }
        PlayAction::Relocate => {
            if let Some(slot) = nearest_open_slot(state, player) {
                state.poss.claim_slot(player, slot);
                state.players[player].target = slot.position(team);
            }
        }
        PlayAction::PostUp => {
            let (_, lateral) = basket_relative(team, state.pos(player));
            let side = if lateral < 0.0 { -1.0 } else { 1.0 };
            state.players[player].target = relative_to_basket(team, 4.0, side * 5.0);
        }
        PlayAction::Hold | PlayAction::CallForBall => hold(state, player),
        PlayAction::PassTo(_) | PlayAction::Shoot | PlayAction::ReadAndReact | PlayAction::EntryPass => {}
    }
    ActionResult::Done
}

fn ball_action(
    state: &mut GameState,
    carrier: usize,
    action: PlayAction,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> ActionResult {
    let acted = state.poss.play.map_or(true, |p| p.acted);
    if acted || state.players[carrier].catch_timer > 0.0 {
        hold(state, carrier);
        return ActionResult::Done;
    }

    match action {
        PlayAction::ReadAndReact => ActionResult::Defer,
        PlayAction::Shoot => {
            if !is_open(state, carrier, &config.decision) {
                return ActionResult::Defer;
            }
            mark_acted(state);
            attempt_shot(state, carrier, None, config, rng);
            ActionResult::Interrupted
        }
        PlayAction::PassTo(role) => match state.poss.roles.player_for(role) {
            Some(target) if target != carrier => {
                mark_acted(state);
                attempt_pass(state, carrier, target, false, config, rng);
                ActionResult::Done
            }
            _ => ActionResult::Defer,
        },
        PlayAction::EntryPass => {
            let Some(post) = state.poss.roles.player_for(OffensiveRole::PostUp).filter(|p| *p != carrier) else {
                return ActionResult::Defer;
            };
            let from = state.pos(carrier);
            let to = state.pos(post);
            if lane_blocked(state, state.possession, from, to, &config.outcomes) {
                hold(state, carrier);
                return ActionResult::Done;
            }
            mark_acted(state);
            attempt_pass(state, carrier, post, false, config, rng);
            ActionResult::Done
        }
        _ => ActionResult::Done,
    }
}

fn mark_acted(state: &mut GameState) {
    if let Some(p) = state.poss.play.as_mut() {
        p.acted = true;
    }
}

/// Screen spot: three feet toward the rim from the teammate, shaded to the
/// screener's side.
pub fn screen_spot(state: &GameState, screener: usize, mate: usize) -> Point {
    let team = state.possession;
    let (depth, lateral) = basket_relative(team, state.pos(mate));
    let (_, own_lateral) = basket_relative(team, state.pos(screener));
    let lean = if own_lateral >= lateral { 1.0 } else { -1.0 };
    relative_to_basket(team, (depth - 3.0).max(1.0), lateral + lean * 1.5)
}

/// Stay put; once settled on a slot, sway a little around it.
fn hold(state: &mut GameState, player: usize) {
    let team = state.possession;
    let anchor = state.poss.slot_of(player).map(|s: CourtSlot| s.position(team));
    let tick = state.tick_count;
    let p = &mut state.players[player];
    if p.has_ball {
        p.flags.dribbling = true;
    }
    let Some(anchor) = anchor else {
        return;
    };
    if distance(p.pos, anchor) > ARRIVED_RANGE * 2.0 {
        p.target = anchor;
        return;
    }
    let t = tick as f32 / 60.0 + player as f32 * 1.7;
    p.target = (anchor.0 + 0.6 * (t * 0.9).sin(), anchor.1 + 0.6 * (t * 0.6).cos());
}
