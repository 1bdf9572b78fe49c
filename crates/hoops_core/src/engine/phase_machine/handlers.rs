//! Per-phase handlers and flight arrivals

use super::transitions::{primary_handler, start_possession};
use crate::engine::ball_flight::jump_ball_flight;
use crate::engine::config::EngineConfig;
use crate::engine::court::{
    attack_dir, basket_relative, distance_to_basket, inbound_spot, is_frontcourt, relative_to_basket,
    CourtSlot, CENTER, HALF_COURT_X,
};
use crate::engine::decision::read_and_react;
use crate::engine::events::EventKind;
use crate::engine::geometry::{distance, norm};
use crate::engine::outcomes::free_throw::{resolve_free_throw_arrival, step_free_throws};
use crate::engine::outcomes::passing::{resolve_pass_arrival, throw_uncontested};
use crate::engine::outcomes::rebound::position_for_rebound;
use crate::engine::outcomes::shooting::resolve_shot_arrival;
use crate::engine::outcomes::{on_ball_pressure, resolve_rebound, PressureOutcome};
use crate::engine::plays::executor::condition_holds;
use crate::engine::plays::{call_play, run_active_play, select_play, PlayTick, PositionCondition};
use crate::engine::rng::RandomSource;
use crate::engine::spacing::{assign_roles, assign_slots};
use crate::engine::state::{
    team_of, team_range, BallFlight, BallState, ChangeReason, FlightKind, GameState, PendingChange, Phase, Restart,
};
use crate::engine::timestep::DT;
use crate::models::OffenseTactic;

/// Ticks into the jump-ball phase before the referee tosses.
const TOSS_TICK: u32 = 30;
/// Ticks the inbounder waits for the receiver to get open.
const INBOUND_THROW_TICK: u32 = 45;
/// Walk-up ends once the handler is this close to the rim in the frontcourt.
const SETUP_RANGE: f32 = 30.0;

/// Run the current phase's handler.
pub fn dispatch(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) {
    match state.poss.phase {
        Phase::JumpBall => jump_ball(state),
        Phase::Inbound => inbound(state),
        Phase::Advance => advance(state, config, rng),
        Phase::Setup => setup(state, config, rng),
        Phase::Action => action(state, config, rng),
        Phase::Shooting => shooting(state),
        Phase::Rebound => rebound(state, config, rng),
        Phase::FreeThrow => step_free_throws(state, config, rng),
    }
}

/// A flight finished this tick.
pub fn on_landing(state: &mut GameState, flight: BallFlight, config: &EngineConfig, rng: &mut dyn RandomSource) {
    match flight.kind {
        FlightKind::Pass { passer, target, alley_oop, .. } => {
            resolve_pass_arrival(state, passer, target, alley_oop, flight.to, config, rng)
        }
        FlightKind::Shot(shot) => resolve_shot_arrival(state, shot, rng),
        FlightKind::FreeThrow { shooter, made } => resolve_free_throw_arrival(state, shooter, made, config, rng),
        FlightKind::JumpBall { jumpers } => resolve_tip(state, jumpers, config, rng),
    }
}

// ========== Jump ball ==========

fn tallest(state: &GameState, team: usize) -> Option<usize> {
    team_range(team).filter(|id| *id < state.players.len()).max_by(|a, b| {
        state.players[*a].height().total_cmp(&state.players[*b].height()).then(b.cmp(a))
    })
}

fn jump_ball(state: &mut GameState) {
    let (Some(home), Some(away)) = (tallest(state, 0), tallest(state, 1)) else {
        return;
    };
    for (id, team) in [(home, 0), (away, 1)] {
        let spot = (HALF_COURT_X - attack_dir(team) * 1.5, CENTER.1);
        state.players[id].target = spot;
    }
    if state.poss.phase_ticks >= TOSS_TICK && matches!(state.ball.state, BallState::Dead) {
        state.launch(jump_ball_flight(CENTER, [home, away]));
        log::trace!("ball tossed between {} and {}", home, away);
    }
}

/// Tip strength of a jumper.
fn tip_score(state: &GameState, id: usize) -> f32 {
    let p = &state.players[id];
    0.6 * norm(p.height()) + 0.4 * norm(p.ratings.athletic.vertical)
}

/// Toss came down: one draw picks the winner, who taps it to the nearest
/// teammate.
fn resolve_tip(state: &mut GameState, jumpers: [usize; 2], config: &EngineConfig, rng: &mut dyn RandomSource) {
    let [a, b] = jumpers;
    if a >= state.players.len() || b >= state.players.len() {
        return;
    }
    let sa = tip_score(state, a);
    let sb = tip_score(state, b);
    let share = if sa + sb > 0.0 { sa / (sa + sb) } else { 0.5 };
    let winner = if rng.chance(share.clamp(0.1, 0.9)) { a } else { b };
    for id in jumpers {
        let leap = 9.0 + 6.0 * norm(state.players[id].ratings.athletic.vertical);
        state.players[id].start_jump(leap);
    }

    let team = team_of(winner);
    let from = state.pos(winner);
    let receiver = team_range(team)
        .filter(|id| *id != winner)
        .min_by(|x, y| distance(state.pos(*x), from).total_cmp(&distance(state.pos(*y), from)));

    state.game_started = true;
    state.jump_ball_winner = Some(team);
    start_possession(
        state,
        PendingChange { team, restart: Restart::Live { carrier: winner }, reason: ChangeReason::JumpBall },
        config,
    );
    if let Some(r) = receiver {
        throw_uncontested(state, winner, r);
    }
    let text = format!("{} wins the tip for {}", state.player_name(winner), state.team_names[team]);
    state.log_event(EventKind::JumpBall, Some(team), Some(winner), text);
}

// ========== Inbound ==========

fn inbound(state: &mut GameState) {
    let team = state.possession;
    let Some(inbounder) = state.poss.inbounder else {
        if state.carrier().is_some() {
            state.set_phase(Phase::Advance);
        }
        return;
    };
    if state.ball.in_flight() {
        return;
    }
    let dir = attack_dir(team);
    let spot = inbound_spot(team);
    let receiver = primary_handler(state, team).filter(|r| *r != inbounder);

    let mut lane = 0;
    for id in team_range(team) {
        if id == inbounder {
            continue;
        }
        let target = if Some(id) == receiver {
            (spot.0 + dir * 12.0, CENTER.1 - 6.0)
        } else {
            lane += 1;
            (HALF_COURT_X - dir * 4.0, 8.0 + 10.0 * lane as f32)
        };
        state.players[id].target = target;
    }
    // Defense gets back and matches up in its own half.
    let defense = state.defense();
    for (i, id) in team_range(defense).enumerate() {
        let retreat = relative_to_basket(team, 12.0 + 4.0 * i as f32, -16.0 + 8.0 * i as f32);
        state.players[id].target = retreat;
    }

    if state.poss.phase_ticks >= INBOUND_THROW_TICK && state.carrier() == Some(inbounder) {
        if let Some(r) = receiver {
            throw_uncontested(state, inbounder, r);
        }
    }
}

// ========== Advance ==========

/// Fast-break probability: base, tactic bonus, plus a bump per defender
/// still farther from the basket than the ball.
pub fn fast_break_chance(state: &GameState, handler: usize, config: &EngineConfig) -> f32 {
    let cfg = &config.decision;
    let team = state.possession;
    let mut chance = cfg.fast_break_base;
    if state.offense_tactics().offense == OffenseTactic::FastBreak {
        chance += cfg.fast_break_tactic_bonus;
    }
    let ball_dist = distance_to_basket(team, state.pos(handler));
    let trailing = state.defense_ids().filter(|d| distance_to_basket(team, state.pos(*d)) > ball_dist).count();
    (chance + 0.05 * trailing as f32).clamp(0.0, 0.95)
}

fn advance(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) {
    let team = state.possession;
    let Some(handler) = state.carrier().filter(|c| team_of(*c) == team) else {
        return;
    };

    if state.poss.live_start && !state.poss.fast_break_checked {
        state.poss.fast_break_checked = true;
        if rng.chance(fast_break_chance(state, handler, config)) {
            assign_roles(state);
            assign_slots(state);
            if let Some(id) = select_play(state, team, true, rng) {
                call_play(state, id, config.decision.recent_play_window);
            }
            state.poss.fast_break = true;
            let text = format!("{} pushes in transition", state.player_name(handler));
            state.log_event(EventKind::FastBreak, Some(team), Some(handler), text);
            state.set_phase(Phase::Action);
            return;
        }
    }

    let pos = state.pos(handler);
    let p = &mut state.players[handler];
    p.target = CourtSlot::Top.position(team);
    p.flags.dribbling = true;
    if is_frontcourt(team, pos) && distance_to_basket(team, pos) <= SETUP_RANGE {
        state.set_phase(Phase::Setup);
    }
}

// ========== Setup ==========

fn setup(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) {
    let cfg = &config.decision;
    let team = state.possession;
    state.poss.setup_timer += DT;

    if !state.poss.play_called {
        state.poss.play_called = true;
        if rng.chance(cfg.play_call_chance.for_tactic(state.offense_tactics().offense)) {
            if let Some(id) = select_play(state, team, false, rng) {
                call_play(state, id, cfg.recent_play_window);
            }
        }
    }

    if let Some(c) = state.carrier().filter(|c| team_of(*c) == team) {
        let home = state.poss.slot_of(c).unwrap_or(CourtSlot::Top).position(team);
        let p = &mut state.players[c];
        p.target = home;
        p.flags.dribbling = true;
    }

    let settled = state.poss.phase_ticks > 1 && condition_holds(state, PositionCondition::Settled);
    if state.poss.setup_timer >= cfg.setup_seconds || settled {
        state.set_phase(Phase::Action);
    }
}

// ========== Action ==========

fn action(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) {
    let cfg = &config.decision;
    if state.poss.play.is_some() && state.poss.shot_clock <= cfg.shot_clock_pressure {
        log::trace!("late clock, play abandoned");
        state.poss.play = None;
    }

    let mut defer = true;
    if state.poss.play.is_some() {
        defer = run_active_play(state, config, rng) != PlayTick::Continue;
    }
    if state.poss.phase != Phase::Action || state.pending.is_some() || !defer {
        return;
    }

    let team = state.possession;
    let Some(handler) = state.carrier().filter(|c| team_of(*c) == team) else {
        return;
    };
    if state.poss.decision_cooldown > 0 {
        state.poss.decision_cooldown -= 1;
        return;
    }
    if state.players[handler].catch_timer > 0.0 {
        return;
    }
    state.poss.decision_cooldown = cfg.decision_interval_ticks;

    if on_ball_pressure(state, handler, config, rng) != PressureOutcome::None {
        return;
    }
    read_and_react(state, handler, config, rng);
}

// ========== Shooting ==========

/// Ball in the air on a shot: bigs crash, everyone else holds.
fn shooting(state: &mut GameState) {
    let team = state.possession;
    for id in state.offense_ids() {
        if !state.players[id].is_big() {
            continue;
        }
        let (_, lateral) = basket_relative(team, state.pos(id));
        state.players[id].target = relative_to_basket(team, 5.0, lateral.clamp(-6.0, 6.0));
    }
}

// ========== Rebound ==========

fn rebound(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) {
    position_for_rebound(state);
    let Some(mut reb) = state.poss.rebound else {
        return;
    };
    let settled = match state.ball.state {
        BallState::Bounce(b) => b.is_complete(),
        BallState::Dead => true,
        BallState::Carried(_) | BallState::Flight(_) => false,
    };
    if !settled {
        return;
    }
    reb.timer += DT;
    state.poss.rebound = Some(reb);
    if reb.timer >= config.outcomes.box_out_seconds {
        resolve_rebound(state, config, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::outcomes::rebound::{miss_bounce, start_rebound};
    use crate::engine::plays::{library, PlayCategory};
    use crate::engine::rng::{ScriptedRng, SeededRng};
    use crate::engine::state::MissType;
    use crate::engine::test_fixtures::{clear_defense, demo_config, demo_state, half_court_state};

    fn tick_n(state: &mut GameState, n: usize, rng: &mut dyn RandomSource) {
        let config = demo_config();
        for _ in 0..n {
            crate::engine::phase_machine::tick(state, &config, rng, None);
        }
    }

    #[test]
    fn test_tip_goes_to_favoured_jumper() {
        let config = demo_config();
        let mut state = demo_state();
        let mut rng = ScriptedRng::constant(0.0);
        resolve_tip(&mut state, [4, 9], &config, &mut rng);
        assert_eq!(state.jump_ball_winner, Some(0));
        assert_eq!(state.possession, 0);
        assert!(state.game_started);
        assert_eq!(state.poss.phase, Phase::Advance);
        assert!(state.ball.in_flight());
    }

    #[test]
    fn test_toss_waits_for_players() {
        let mut state = demo_state();
        jump_ball(&mut state);
        assert!(!state.ball.in_flight());
        state.poss.phase_ticks = TOSS_TICK;
        jump_ball(&mut state);
        assert!(state.ball.in_flight());
    }

    #[test]
    fn test_inbound_reaches_advance() {
        let config = demo_config();
        let mut state = demo_state();
        state.game_started = true;
        start_possession(
            &mut state,
            PendingChange { team: 1, restart: Restart::Inbound, reason: ChangeReason::MadeBasket },
            &config,
        );
        let mut rng = SeededRng::new(4);
        for _ in 0..240 {
            tick_n(&mut state, 1, &mut rng);
            if state.poss.phase != Phase::Inbound {
                break;
            }
        }
        assert_eq!(state.poss.phase, Phase::Advance);
        assert_eq!(state.carrier().map(team_of), Some(1));
        assert!(state.events.iter().any(|e| e.kind == EventKind::Inbound));
    }

    #[test]
    fn test_fast_break_runs_transition_play() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.set_phase(Phase::Advance);
        state.poss.live_start = true;
        state.poss.play = None;
        let mut rng = ScriptedRng::constant(0.0);
        advance(&mut state, &config, &mut rng);
        assert!(state.poss.fast_break);
        assert_eq!(state.poss.phase, Phase::Action);
        let id = state.poss.play.unwrap().play_id;
        assert_eq!(library()[id].category, PlayCategory::Transition);
    }

    #[test]
    fn test_fast_break_rolled_once() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.set_phase(Phase::Advance);
        state.players[0].pos = (30.0, 25.0);
        state.give_ball(0);
        state.poss.live_start = true;
        let mut rng = ScriptedRng::constant(0.99);
        advance(&mut state, &config, &mut rng);
        advance(&mut state, &config, &mut rng);
        assert_eq!(rng.draws_taken(), 1);
        assert!(!state.poss.fast_break);
        assert_eq!(state.poss.phase, Phase::Advance);
    }

    #[test]
    fn test_fast_break_tactic_raises_chance() {
        let config = demo_config();
        let mut state = half_court_state(0);
        let base = fast_break_chance(&state, 0, &config);
        state.tactics[0].offense = OffenseTactic::FastBreak;
        assert!(fast_break_chance(&state, 0, &config) > base);
    }

    #[test]
    fn test_walk_up_reaches_setup() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.set_phase(Phase::Advance);
        let mut rng = ScriptedRng::constant(0.99);
        advance(&mut state, &config, &mut rng);
        assert_eq!(state.poss.phase, Phase::Setup);
    }

    #[test]
    fn test_setup_calls_play_then_acts() {
        let config = demo_config();
        let mut state = half_court_state(0);
        state.set_phase(Phase::Setup);
        let mut rng = ScriptedRng::constant(0.0);
        setup(&mut state, &config, &mut rng);
        assert!(state.poss.play.is_some());
        assert!(state.poss.play_called);
        let draws = rng.draws_taken();
        for _ in 0..80 {
            if state.poss.phase == Phase::Action {
                break;
            }
            setup(&mut state, &config, &mut rng);
        }
        assert_eq!(state.poss.phase, Phase::Action);
        assert_eq!(rng.draws_taken(), draws);
    }

    #[test]
    fn test_action_decides_on_cadence() {
        let config = demo_config();
        let mut state = half_court_state(0);
        clear_defense(&mut state);
        let mut rng = ScriptedRng::constant(0.99);
        action(&mut state, &config, &mut rng);
        let cooldown = state.poss.decision_cooldown;
        let draws = rng.draws_taken();
        if state.poss.phase == Phase::Action && state.carrier() == Some(0) {
            assert_eq!(cooldown, config.decision.decision_interval_ticks);
            action(&mut state, &config, &mut rng);
            assert_eq!(rng.draws_taken(), draws);
            assert_eq!(state.poss.decision_cooldown, cooldown - 1);
        }
    }

    #[test]
    fn test_rebound_resolves_after_box_out() {
        let config = demo_config();
        let mut state = half_court_state(0);
        let mut rng = SeededRng::new(8);
        let bounce = miss_bounce(0, state.pos(0), MissType::FrontRim, &mut rng);
        state.drop_ball(bounce);
        start_rebound(&mut state, bounce.to, 0);
        for _ in 0..240 {
            tick_n(&mut state, 1, &mut rng);
            if state.poss.phase != Phase::Rebound {
                break;
            }
        }
        assert_ne!(state.poss.phase, Phase::Rebound);
        assert!(state.poss.rebound.is_none());
    }
}
