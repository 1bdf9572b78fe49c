//! Tactic-weighted play selection

use super::library::library;
use super::types::PlayCategory;
use crate::engine::events::EventKind;
use crate::engine::rng::RandomSource;
use crate::engine::state::{ActivePlay, GameState};
use crate::models::OffenseTactic;

/// Weight per category, indexed by `PlayCategory::index`.
pub fn category_weights(tactic: OffenseTactic) -> [u32; 6] {
    // [pnr, motion, post, shooting, transition, iso]
    match tactic {
        OffenseTactic::FastBreak => [3, 2, 1, 2, 5, 1],
        OffenseTactic::Iso => [2, 1, 1, 1, 1, 6],
        OffenseTactic::Inside => [2, 2, 6, 1, 1, 2],
        OffenseTactic::Shoot => [3, 2, 1, 6, 1, 1],
        OffenseTactic::Motion => [2, 6, 2, 3, 1, 1],
    }
}

/// Eligible play ids before weighting.
fn candidates(recent: &[usize], transition: bool) -> Vec<usize> {
    let lib = library();
    if transition {
        return (0..lib.len()).filter(|i| lib[*i].category == PlayCategory::Transition).collect();
    }
    let half_court = |i: &usize| lib[*i].category != PlayCategory::Transition;
    let fresh: Vec<usize> = (0..lib.len()).filter(half_court).filter(|i| !recent.contains(i)).collect();
    if fresh.is_empty() {
        (0..lib.len()).filter(half_court).collect()
    } else {
        fresh
    }
}

/// Pick a play for `team`. One draw when the pool is non-empty.
pub fn select_play(state: &GameState, team: usize, transition: bool, rng: &mut dyn RandomSource) -> Option<usize> {
    let t = team.min(1);
    let weights = category_weights(state.tactics[t].offense);
    let recent: Vec<usize> = state.recent_plays[t].iter().copied().collect();
    let lib = library();

    let mut pool = Vec::new();
    for id in candidates(&recent, transition) {
        let w = weights[lib[id].category.index()];
        pool.extend(std::iter::repeat(id).take(w as usize));
    }
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.pick_index(pool.len())])
}

/// Make `play_id` the offense's active play and remember it for the
/// exclusion window.
pub fn call_play(state: &mut GameState, play_id: usize, window: usize) {
    let Some(play) = library().get(play_id) else {
        return;
    };
    let team = state.possession.min(1);
    state.poss.play = Some(ActivePlay::start(play_id));
    state.poss.play_called = true;

    let recent = &mut state.recent_plays[team];
    recent.push_back(play_id);
    while recent.len() > window {
        recent.pop_front();
    }
    let text = format!("{} calls {}", state.team_names[team], play.name);
    state.log_event(EventKind::PlayCall, Some(team), None, text);
}
