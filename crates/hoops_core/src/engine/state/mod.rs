//! # Shared Game State
//!
//! The single mutable state every tick stage reads and writes. Identity and
//! ratings persist for the whole game, box-score stats accumulate for the
//! whole game, and `poss` is rebuilt on every possession change.
//!
//! Ball ownership is owned by `ball.state`; the per-player `has_ball` flags
//! are a mirror that `give_ball`/`launch` keep in step and `sync_carrier`
//! repairs.

mod ball;
mod player_agent;
mod possession;
mod roles;

pub use ball::{
    Ball, BallBounce, BallFlight, BallState, FlightKind, MissType, PassType, ShootingFoul, ShotFlight,
    ShotType,
};
pub use player_agent::{MotionFlags, PlayerAgent};
pub use possession::{
    ActivePlay, ChangeReason, FreeThrowState, LastPass, PendingChange, Phase, PossessionState,
    ReboundState, Restart,
};
pub use roles::{OffensiveRole, RoleMap};

use fxhash::FxHasher;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::hash::Hasher;
use std::ops::Range;

use super::config::EngineConfig;
use super::court::{attack_dir, CENTER, HALF_COURT_X};
use super::events::{EventKind, GameEvent};
use super::geometry::{distance, Point};
use crate::models::{BoxScore, TeamRoster, TeamTactics, TEAM_SIZE};

pub const PLAYER_COUNT: usize = TEAM_SIZE * 2;

#[inline]
pub fn team_of(player: usize) -> usize {
    (player / TEAM_SIZE).min(1)
}

#[inline]
pub fn team_range(team: usize) -> Range<usize> {
    let t = team.min(1);
    t * TEAM_SIZE..(t + 1) * TEAM_SIZE
}

/// Pre-tip formation: each team on its own side of the centre circle.
fn opening_spot(team: usize, slot: usize) -> Point {
    const LATERAL: [f32; TEAM_SIZE] = [-10.0, 10.0, -18.0, 18.0, 0.0];
    const DEPTH: [f32; TEAM_SIZE] = [8.0, 8.0, 14.0, 14.0, 3.0];
    let i = slot % TEAM_SIZE;
    (HALF_COURT_X - attack_dir(team) * DEPTH[i], CENTER.1 + LATERAL[i])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<PlayerAgent>,
    pub team_names: [String; 2],
    pub ball: Ball,

    /// Team currently on offense.
    pub possession: usize,
    pub poss: PossessionState,
    pub pending: Option<PendingChange>,

    pub score: [u32; 2],
    /// Points per team per completed or running quarter.
    pub quarter_scores: Vec<[u32; 2]>,
    pub quarter: u8,
    pub game_clock: f32,
    /// Simulated seconds since tip-off (every tick, clock running or not).
    pub elapsed: f64,
    pub tick_count: u64,
    pub running: bool,
    pub game_started: bool,
    pub jump_ball_winner: Option<usize>,

    pub tactics: [TeamTactics; 2],
    pub team_fouls: [u8; 2],
    /// Library indices of recently called plays, per team.
    pub recent_plays: [VecDeque<usize>; 2],

    pub box_score: BoxScore,
    pub events: Vec<GameEvent>,
    pub last_event: String,
}

impl GameState {
    /// Build the tip-off state. Rosters are assumed validated.
    pub fn new(home: &TeamRoster, away: &TeamRoster, config: &EngineConfig) -> Self {
        let mut players = Vec::with_capacity(PLAYER_COUNT);
        for (team, roster) in [home, away].iter().enumerate() {
            for (i, profile) in roster.players.iter().take(TEAM_SIZE).enumerate() {
                let id = team * TEAM_SIZE + i;
                players.push(PlayerAgent::from_profile(id, team, profile, opening_spot(team, i)));
            }
        }

        Self {
            players,
            team_names: [home.name.clone(), away.name.clone()],
            ball: Ball::dead_at(CENTER),
            possession: 0,
            poss: PossessionState::fresh(Phase::JumpBall, config.clock.shot_clock),
            pending: None,
            score: [0, 0],
            quarter_scores: vec![[0, 0]],
            quarter: 1,
            game_clock: config.clock.quarter_seconds,
            elapsed: 0.0,
            tick_count: 0,
            running: true,
            game_started: false,
            jump_ball_winner: None,
            tactics: [home.tactics, away.tactics],
            team_fouls: [0, 0],
            recent_plays: [VecDeque::new(), VecDeque::new()],
            box_score: BoxScore::new(PLAYER_COUNT),
            events: Vec::new(),
            last_event: String::new(),
        }
    }

    // ========== Queries ==========

    pub fn now(&self) -> f64 {
        self.elapsed
    }

    pub fn defense(&self) -> usize {
        1 - self.possession.min(1)
    }

    pub fn offense_ids(&self) -> Range<usize> {
        team_range(self.possession)
    }

    pub fn defense_ids(&self) -> Range<usize> {
        team_range(self.defense())
    }

    pub fn carrier(&self) -> Option<usize> {
        self.ball.carrier()
    }

    pub fn pos(&self, player: usize) -> Point {
        self.players.get(player).map(|p| p.pos).unwrap_or(CENTER)
    }

    pub fn role_of(&self, player: usize) -> Option<OffensiveRole> {
        self.poss.roles.role_of(player)
    }

    pub fn offense_tactics(&self) -> TeamTactics {
        self.tactics[self.possession.min(1)]
    }

    pub fn defense_tactics(&self) -> TeamTactics {
        self.tactics[self.defense()]
    }

    /// Nearest member of `team` to `point`.
    pub fn nearest_of_team(&self, team: usize, point: Point) -> Option<(usize, f32)> {
        team_range(team)
            .filter_map(|i| self.players.get(i).map(|p| (i, distance(p.pos, point))))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Nearest opponent of `player` and the distance to them.
    pub fn nearest_defender(&self, player: usize) -> Option<(usize, f32)> {
        self.nearest_of_team(1 - team_of(player), self.pos(player))
    }

    /// Distance to the nearest opponent (large when none).
    pub fn defender_gap(&self, player: usize) -> f32 {
        self.nearest_defender(player).map(|(_, d)| d).unwrap_or(f32::MAX)
    }

    pub fn is_finished(&self) -> bool {
        !self.running
    }

    // ========== Ball ownership ==========

    /// Atomically hand the ball to `player`.
    pub fn give_ball(&mut self, player: usize) {
        if player >= self.players.len() {
            return;
        }
        self.ball.state = BallState::Carried(player);
        self.ball.pos = self.players[player].pos;
        self.ball.height = 4.0;
        for p in self.players.iter_mut() {
            p.has_ball = p.id == player;
        }
        if self.poss.last_carrier != Some(player) {
            self.poss.dribble_hold = 0.0;
            self.poss.committed_drive = false;
        }
        self.poss.last_carrier = Some(player);
    }

    /// Put the ball in the air; nobody carries it while it flies.
    pub fn launch(&mut self, flight: BallFlight) {
        self.ball.pos = flight.from;
        self.ball.height = flight.start_height;
        self.ball.state = BallState::Flight(flight);
        for p in self.players.iter_mut() {
            p.has_ball = false;
            p.flags.dribbling = false;
            p.flags.driving = false;
        }
    }

    /// Knock the ball loose (block, missed shot, tipped pass).
    pub fn drop_ball(&mut self, bounce: BallBounce) {
        self.ball.pos = bounce.from;
        self.ball.height = bounce.height_at(0.0);
        self.ball.state = BallState::Bounce(bounce);
        for p in self.players.iter_mut() {
            p.has_ball = false;
            p.flags.dribbling = false;
            p.flags.driving = false;
        }
    }

    /// Re-derive `has_ball` flags from the ball. Returns true when a desync
    /// had to be repaired.
    pub fn sync_carrier(&mut self) -> bool {
        let carrier = self.ball.carrier().filter(|c| *c < self.players.len());
        if self.ball.carrier().is_some() && carrier.is_none() {
            self.ball.state = BallState::Dead;
        }
        let mut healed = false;
        for p in self.players.iter_mut() {
            let expected = carrier == Some(p.id);
            if p.has_ball != expected {
                p.has_ball = expected;
                healed = true;
            }
        }
        healed
    }

    // ========== Phase / possession bookkeeping ==========

    pub fn set_phase(&mut self, phase: Phase) {
        if self.poss.phase != phase {
            log::trace!("phase {} -> {}", self.poss.phase.as_str(), phase.as_str());
        }
        self.poss.phase = phase;
        self.poss.phase_ticks = 0;
    }

    /// Queue a possession change for the start of the next tick. A later
    /// request in the same tick overrides an earlier one.
    pub fn request_change(&mut self, team: usize, restart: Restart, reason: ChangeReason) {
        self.pending = Some(PendingChange { team: team.min(1), restart, reason });
    }

    pub fn add_points(&mut self, team: usize, points: u32) {
        let t = team.min(1);
        self.score[t] += points;
        if let Some(q) = self.quarter_scores.last_mut() {
            q[t] += points;
        }
    }

    pub fn log_event(&mut self, kind: EventKind, team: Option<usize>, player: Option<usize>, text: String) {
        log::debug!("[Q{} {:>6.1}] {}", self.quarter, self.game_clock, text);
        self.events.push(GameEvent {
            tick: self.tick_count,
            quarter: self.quarter,
            clock: self.game_clock,
            kind,
            team,
            player,
            text: text.clone(),
        });
        self.last_event = text;
    }

    pub fn player_name(&self, player: usize) -> &str {
        self.players.get(player).map(|p| p.name.as_str()).unwrap_or("?")
    }

    /// Digest of positions, ball, score and clocks. Stable across runs of
    /// the same build, so two simulations can be compared cheaply.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FxHasher::default();
        for p in &self.players {
            h.write_u32(p.pos.0.to_bits());
            h.write_u32(p.pos.1.to_bits());
            h.write_u32(p.vel.0.to_bits());
            h.write_u32(p.vel.1.to_bits());
            h.write_u8(p.has_ball as u8);
        }
        h.write_u32(self.ball.pos.0.to_bits());
        h.write_u32(self.ball.pos.1.to_bits());
        h.write_u32(self.ball.height.to_bits());
        h.write_u32(self.score[0]);
        h.write_u32(self.score[1]);
        h.write_u8(self.quarter);
        h.write_u32(self.game_clock.to_bits());
        h.write_u32(self.poss.shot_clock.to_bits());
        h.write_usize(self.possession);
        h.write_u64(self.tick_count);
        h.write_usize(self.events.len());
        h.finish()
    }
}
