//! Cross-module guarantees of the tick loop, checked over whole games and
//! hand-built scenarios.

use proptest::prelude::*;

use super::config::EngineConfig;
use super::court::{attack_basket, relative_to_basket};
use super::events::EventKind;
use super::geometry::{distance, midpoint};
use super::outcomes::passing::{attempt_pass, interception_chance, PassResult};
use super::outcomes::rebound::{rebound_candidates, start_rebound};
use super::outcomes::shooting::{attempt_shot, ShotAttempt};
use super::outcomes::resolve_rebound;
use super::phase_machine::tick;
use super::plays::{library, step_should_advance, StepTrigger};
use super::rng::{RandomSource, ScriptedRng, SeededRng};
use super::state::{BallState, FlightKind, GameState, PassType, Phase, ShotType};
use super::test_fixtures::{clear_defense, demo_config, demo_rosters, half_court_state};
use super::timestep::DT;

/// Run a fresh game tick by tick, handing each post-tick state to `check`.
fn play_game(seed: u64, config: &EngineConfig, mut check: impl FnMut(&GameState, &GameState)) -> GameState {
    let (home, away) = demo_rosters();
    let mut state = GameState::new(&home, &away, config);
    let mut rng = SeededRng::new(seed);
    let cap = 400_000;
    for _ in 0..cap {
        if state.is_finished() {
            break;
        }
        let before = state.clone();
        tick(&mut state, config, &mut rng, None);
        check(&before, &state);
    }
    state
}

fn assert_single_carrier(state: &GameState) {
    let flagged: Vec<usize> = state.players.iter().filter(|p| p.has_ball).map(|p| p.id).collect();
    assert!(flagged.len() <= 1, "tick {}: several carriers {:?}", state.tick_count, flagged);
    assert_eq!(flagged.first().copied(), state.ball.carrier(), "tick {}", state.tick_count);
}

#[test]
fn test_single_carrier_every_tick() {
    let config = EngineConfig::quick(60.0);
    let end = play_game(17, &config, |_, after| assert_single_carrier(after));
    assert!(end.is_finished());
}

#[test]
fn test_shot_clock_bounds_and_resets() {
    let config = EngineConfig::quick(60.0);
    let full = config.clock.shot_clock;
    let mut flips = 0;
    play_game(23, &config, |before, after| {
        let sc = after.poss.shot_clock;
        assert!((0.0..=full).contains(&sc), "shot clock {} out of range", sc);
        if after.possession != before.possession && after.pending.is_none() {
            flips += 1;
            assert!(sc >= full - 1.5 * DT, "flip left shot clock at {}", sc);
        }
        let new_events = &after.events[before.events.len().min(after.events.len())..];
        if new_events.last().map(|e| e.kind) == Some(EventKind::OffensiveRebound) && after.pending.is_none() {
            assert!((sc - config.clock.offensive_rebound_shot_clock).abs() < 1e-4, "offensive board left {}", sc);
        }
    });
    assert!(flips > 0);
}

#[test]
fn test_no_phase_outlives_its_freeze_guard() {
    let config = EngineConfig::quick(60.0);
    play_game(31, &config, |_, after| {
        let limit = config.phase_limits.limit(after.poss.phase);
        assert!(
            after.poss.phase_ticks <= limit + 1,
            "{} ran {} ticks",
            after.poss.phase.as_str(),
            after.poss.phase_ticks
        );
    });
}

#[test]
fn test_stuck_shooting_phase_is_cleared() {
    let config = demo_config();
    let mut state = half_court_state(0);
    state.set_phase(Phase::Shooting);
    state.ball.state = BallState::Dead;
    state.sync_carrier();
    let mut rng = ScriptedRng::constant(0.99);
    let limit = config.phase_limits.shooting;
    for _ in 0..=limit + 1 {
        tick(&mut state, &config, &mut rng, None);
    }
    assert_eq!(state.possession, 1);
    assert_eq!(state.poss.phase, Phase::Inbound);
    assert!(state.events.iter().any(|e| e.kind == EventKind::Stalled));
}

#[test]
fn test_same_seed_bit_identical() {
    let config = EngineConfig::quick(40.0);
    let mut prints_a = Vec::new();
    let a = play_game(77, &config, |_, s| prints_a.push(s.fingerprint()));
    let mut prints_b = Vec::new();
    let b = play_game(77, &config, |_, s| prints_b.push(s.fingerprint()));
    assert_eq!(prints_a, prints_b);
    assert_eq!(a.score, b.score);
    assert_eq!(a.events, b.events);
    for (pa, pb) in a.players.iter().zip(&b.players) {
        assert_eq!(pa.pos.0.to_bits(), pb.pos.0.to_bits());
        assert_eq!(pa.pos.1.to_bits(), pb.pos.1.to_bits());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let config = EngineConfig::quick(40.0);
    let a = play_game(1, &config, |_, _| {});
    let b = play_game(2, &config, |_, _| {});
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_close_shot_is_dunk_or_layup() {
    let config = demo_config();
    let mut state = half_court_state(0);
    clear_defense(&mut state);
    let spot = relative_to_basket(0, 3.0, 0.0);
    state.players[0].pos = spot;
    state.give_ball(0);
    assert!((distance(spot, attack_basket(0)) - 3.0).abs() < 1e-3);

    let mut rng = SeededRng::new(4);
    let attempt = attempt_shot(&mut state, 0, None, &config, &mut rng);
    let ShotAttempt::Released(shot) = attempt else {
        panic!("expected a release, got {:?}", attempt);
    };
    assert!(matches!(shot.shot_type, ShotType::Dunk | ShotType::Layup));
    let flight = state.ball.flight().copied().unwrap();
    assert!(flight.is_shot());
    assert!(flight.duration > 0.0);
    assert!(matches!(flight.kind, FlightKind::Shot(_)));
}

#[test]
fn test_midpoint_defender_rolled_before_flight() {
    let config = demo_config();
    let mut state = half_court_state(0);
    clear_defense(&mut state);
    let from = (60.0, 25.0);
    let to = (60.0, 37.0);
    state.players[0].pos = from;
    state.players[1].pos = to;
    state.players[1].vel = (0.0, 0.0);
    state.give_ball(0);
    state.players[5].pos = midpoint(from, to);

    let p = interception_chance(&state.players[5], 0.0, PassType::Chest, PassType::Chest.arc().1, &config.outcomes);
    assert!(p > 0.0);

    let mut rng = ScriptedRng::constant(0.0);
    let result = attempt_pass(&mut state, 0, 1, false, &config, &mut rng);
    assert!(matches!(result, PassResult::Intercepted { defender: 5 }));
    assert!(rng.draws_taken() >= 1);
    assert!(!state.ball.in_flight());
    assert_eq!(state.ball.carrier(), Some(5));
}

fn midpoint_pass_setup(from: (f32, f32), to: (f32, f32)) -> GameState {
    let mut state = half_court_state(0);
    clear_defense(&mut state);
    state.players[0].pos = from;
    state.players[1].pos = to;
    state.players[1].vel = (0.0, 0.0);
    state.give_ball(0);
    state.players[5].pos = midpoint(from, to);
    state
}

#[test]
fn test_midpoint_defender_rolled_on_long_lob() {
    let config = demo_config();
    let mut state = midpoint_pass_setup((60.0, 10.0), (60.0, 30.0));
    let apex = PassType::Lob.arc().1;
    assert!(interception_chance(&state.players[5], 0.0, PassType::Lob, apex, &config.outcomes) > 0.0);

    let mut rng = ScriptedRng::constant(0.0);
    let result = attempt_pass(&mut state, 0, 1, false, &config, &mut rng);
    assert!(matches!(result, PassResult::Intercepted { defender: 5 }));
    assert!(rng.draws_taken() >= 1);
    assert_eq!(state.ball.carrier(), Some(5));
}

#[test]
fn test_midpoint_defender_rolled_on_alley_oop() {
    let config = demo_config();
    let mut state = midpoint_pass_setup((60.0, 10.0), (60.0, 30.0));
    assert!(interception_chance(&state.players[5], 0.0, PassType::Lob, 13.5, &config.outcomes) > 0.0);

    let mut rng = ScriptedRng::constant(0.0);
    let result = attempt_pass(&mut state, 0, 1, true, &config, &mut rng);
    assert!(matches!(result, PassResult::Intercepted { defender: 5 }));
    assert!(rng.draws_taken() >= 1);
    assert!(!state.ball.in_flight());
}

#[test]
fn test_shot_clock_expiry_one_turnover() {
    let config = demo_config();
    let mut state = half_court_state(0);
    state.poss.shot_clock = DT * 0.5;
    let mut rng = ScriptedRng::constant(0.99);
    let mut flips = 0;
    for _ in 0..10 {
        let before = state.possession;
        tick(&mut state, &config, &mut rng, None);
        if state.possession != before {
            flips += 1;
        }
    }
    assert_eq!(state.box_score.team_totals(0).turnovers, 1);
    assert_eq!(flips, 1);
    assert_eq!(state.possession, 1);
    assert_eq!(state.poss.shot_clock, config.clock.shot_clock);
}

#[test]
fn test_two_second_time_step() {
    let config = demo_config();
    let state = half_court_state(0);
    let step = library()
        .iter()
        .flat_map(|p| p.steps.iter())
        .find(|s| s.trigger == StepTrigger::Time && (s.duration - 2.0).abs() < 1e-6)
        .expect("library has a two-second timed step");

    let mut timer = 0.0;
    let mut advanced_at = None;
    for t in 1..=200 {
        timer += DT;
        if step_should_advance(step, timer, &state, &config.decision) {
            advanced_at = Some((t, timer));
            break;
        }
        assert!(timer < 2.0);
    }
    let (t, timer) = advanced_at.unwrap();
    assert!(timer >= 2.0 - 1e-4);
    assert!(t <= 121);
}

#[test]
fn test_rebound_with_nobody_near() {
    let config = demo_config();
    let mut state = half_court_state(0);
    let landing = (4.0, 2.0);
    for (i, p) in state.players.iter_mut().enumerate() {
        p.pos = (40.0 + i as f32 * 3.0, 30.0);
    }
    let candidates = rebound_candidates(&state.players, landing, &config.outcomes);
    assert_eq!(candidates.len(), config.outcomes.rebound_fallback_count);

    start_rebound(&mut state, landing, 0);
    let mut rng = ScriptedRng::constant(0.5);
    let winner = resolve_rebound(&mut state, &config, &mut rng);
    assert!(winner.is_some());
    assert!(candidates.contains(&winner.unwrap()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn prop_any_seed_keeps_invariants(seed in any::<u64>()) {
        let config = EngineConfig::quick(20.0);
        let end = play_game(seed, &config, |_, after| {
            assert_single_carrier(after);
            assert!(after.poss.shot_clock >= 0.0 && after.poss.shot_clock <= config.clock.shot_clock);
        });
        prop_assert!(end.is_finished());
        let by_quarter: u32 = end.quarter_scores.iter().map(|q| q[0] + q[1]).sum();
        prop_assert_eq!(by_quarter, end.score[0] + end.score[1]);
    }

    #[test]
    fn prop_seeded_draws_in_unit_range(seed in any::<u64>()) {
        let mut rng = SeededRng::new(seed);
        for _ in 0..64 {
            let v = rng.next_f32();
            prop_assert!((0.0..1.0).contains(&v));
        }
    }
}
