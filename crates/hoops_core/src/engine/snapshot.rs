//! # Tick Snapshot
//!
//! Read-only view of one tick for a renderer or an analysis consumer.
//! Built from `GameState` after the tick finished; never fed back in.

use serde::Serialize;

use super::geometry::Point;
use super::plays::play_name;
use super::state::{GameState, MotionFlags, OffensiveRole, Phase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub id: usize,
    pub team: usize,
    pub name: String,
    pub pos: Point,
    pub vel: Point,
    pub has_ball: bool,
    pub flags: MotionFlags,
    pub jump_height: f32,
    pub role: Option<OffensiveRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub pos: Point,
    pub height: f32,
    pub in_flight: bool,
    pub carrier: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    /// Simulated seconds since tip-off.
    pub time: f64,
    pub quarter: u8,
    pub game_clock: f32,
    pub phase: Phase,
    pub possession: usize,
    pub shot_clock: f32,
    pub score: [u32; 2],
    pub players: Vec<PlayerSnapshot>,
    pub ball: BallSnapshot,
    pub last_event: String,
    /// Empty when the offense is freelancing.
    pub active_play: String,
    pub assists: [u32; 2],
}

impl TickSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let players = state
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id,
                team: p.team,
                name: p.name.clone(),
                pos: p.pos,
                vel: p.vel,
                has_ball: p.has_ball,
                flags: p.flags,
                jump_height: p.jump_height,
                role: if p.team == state.possession { state.role_of(p.id) } else { None },
            })
            .collect();

        Self {
            tick: state.tick_count,
            time: state.elapsed,
            quarter: state.quarter,
            game_clock: state.game_clock,
            phase: state.poss.phase,
            possession: state.possession,
            shot_clock: state.poss.shot_clock,
            score: state.score,
            players,
            ball: BallSnapshot {
                pos: state.ball.pos,
                height: state.ball.height,
                in_flight: state.ball.in_flight(),
                carrier: state.ball.carrier(),
            },
            last_event: state.last_event.clone(),
            active_play: state.poss.play.map_or(String::new(), |p| play_name(p.play_id).to_string()),
            assists: [state.box_score.team_totals(0).assists, state.box_score.team_totals(1).assists],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::plays::{call_play, play_id_by_name};
    use crate::engine::test_fixtures::half_court_state;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = half_court_state(0);
        state.box_score.player_mut(1).assists = 2;
        let snap = TickSnapshot::capture(&state);
        assert_eq!(snap.players.len(), 10);
        assert_eq!(snap.ball.carrier, Some(0));
        assert!(snap.players[0].has_ball);
        assert_eq!(snap.players[0].role, Some(OffensiveRole::BallHandler));
        assert_eq!(snap.players[5].role, None);
        assert_eq!(snap.assists, [2, 0]);
        assert_eq!(snap.active_play, "");
    }

    #[test]
    fn test_snapshot_names_active_play() {
        let mut state = half_court_state(0);
        let id = play_id_by_name("Flex").unwrap();
        call_play(&mut state, id, 3);
        let snap = TickSnapshot::capture(&state);
        assert_eq!(snap.active_play, "Flex");
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = half_court_state(1);
        let json = serde_json::to_string(&TickSnapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Action\""));
        assert!(json.contains("\"possession\":1"));
    }
}
