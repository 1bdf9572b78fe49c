//! Shared builders for unit and contract tests.

use super::config::EngineConfig;
use super::court::{CourtSlot, HALF_COURT_X};
use super::state::{team_range, GameState, OffensiveRole, Phase};
use crate::models::TeamRoster;

pub fn demo_rosters() -> (TeamRoster, TeamRoster) {
    (TeamRoster::demo("Harbor", 72.0), TeamRoster::demo("Summit", 70.0))
}

/// Default tuning with two-minute quarters.
pub fn demo_config() -> EngineConfig {
    EngineConfig::quick(120.0)
}

pub fn demo_state() -> GameState {
    let (home, away) = demo_rosters();
    GameState::new(&home, &away, &demo_config())
}

const OFFENSE_SLOTS: [CourtSlot; 5] =
    [CourtSlot::Top, CourtSlot::LeftWing, CourtSlot::RightWing, CourtSlot::LeftCorner, CourtSlot::RightBlock];

/// Half-court set: `offense` in the Action phase, PG holding the ball at the
/// top, everyone on a slot with roles assigned, defenders matched by index
/// and standing a step off their man.
pub fn half_court_state(offense: usize) -> GameState {
    let mut state = demo_state();
    state.possession = offense;
    state.game_started = true;
    state.set_phase(Phase::Action);
    state.poss.crossed_half = true;

    let off: Vec<usize> = team_range(offense).collect();
    let def: Vec<usize> = team_range(1 - offense).collect();
    for (i, &id) in off.iter().enumerate() {
        let spot = OFFENSE_SLOTS[i].position(offense);
        state.players[id].pos = spot;
        state.players[id].target = spot;
        state.poss.claim_slot(id, OFFENSE_SLOTS[i]);
        state.poss.roles.assign(OffensiveRole::ALL[i], id);
    }
    for (i, &id) in def.iter().enumerate() {
        let man = state.players[off[i]].pos;
        let spot = (man.0, (man.1 + 4.0).min(49.0));
        state.players[id].pos = spot;
        state.players[id].target = spot;
        state.poss.assignments.insert(id, off[i]);
    }
    state.give_ball(off[0]);
    state
}

/// Park every defender deep in the backcourt, far from any lane.
pub fn clear_defense(state: &mut GameState) {
    let team = state.defense();
    let dir = if state.possession == 0 { -1.0 } else { 1.0 };
    for (i, id) in team_range(team).enumerate() {
        let spot = (HALF_COURT_X + dir * 40.0, 5.0 + 9.0 * i as f32);
        state.players[id].pos = spot;
        state.players[id].target = spot;
    }
}
