//! Possession-scoped state
//!
//! Everything here is wiped on every change of possession and at the start of
//! each quarter (`PossessionState::fresh`). Game-scoped data lives on
//! `GameState` instead.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::roles::RoleMap;
use crate::engine::court::CourtSlot;
use crate::engine::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    JumpBall,
    Inbound,
    Advance,
    Setup,
    Action,
    Shooting,
    Rebound,
    FreeThrow,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::JumpBall => "jumpball",
            Phase::Inbound => "inbound",
            Phase::Advance => "advance",
            Phase::Setup => "setup",
            Phase::Action => "action",
            Phase::Shooting => "shooting",
            Phase::Rebound => "rebound",
            Phase::FreeThrow => "freethrow",
        }
    }

    /// Game clock stops for the toss and at the line.
    pub fn clock_runs(&self) -> bool {
        !matches!(self, Phase::JumpBall | Phase::FreeThrow)
    }

    /// Shot clock only runs while the offense holds a live ball.
    pub fn shot_clock_runs(&self) -> bool {
        matches!(self, Phase::Advance | Phase::Setup | Phase::Action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePlay {
    /// Index into the play library.
    pub play_id: usize,
    pub step: usize,
    pub step_timer: f32,
    /// The carrier's ball action for this step has fired.
    #[serde(default)]
    pub acted: bool,
}

impl ActivePlay {
    pub fn start(play_id: usize) -> Self {
        Self { play_id, step: 0, step_timer: 0.0, acted: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastPass {
    pub from: usize,
    pub to: usize,
    /// Game-elapsed seconds at the catch.
    pub at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeThrowState {
    pub shooter: usize,
    pub made: u8,
    pub total: u8,
    pub taken: u8,
    pub and_one: bool,
    /// Ticks since the last attempt resolved.
    pub wait_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReboundState {
    /// Seconds since the bounce settled.
    pub timer: f32,
    pub landing: Point,
    pub shooting_team: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionState {
    pub phase: Phase,
    pub phase_ticks: u32,
    pub shot_clock: f32,

    pub play: Option<ActivePlay>,
    pub play_called: bool,
    pub slots: BTreeMap<CourtSlot, usize>,
    pub roles: RoleMap,
    /// defender -> offensive player
    pub assignments: BTreeMap<usize, usize>,
    /// (defender, screener) pairs whose switch decision has been rolled.
    pub screen_reads: BTreeSet<(usize, usize)>,

    /// Seconds the current carrier has held the ball.
    pub dribble_hold: f32,
    pub pass_count: u32,
    pub last_pass: Option<LastPass>,
    pub last_carrier: Option<usize>,
    pub committed_drive: bool,
    pub decision_cooldown: u32,

    pub crossed_half: bool,
    pub advance_clock: f32,

    pub free_throw: Option<FreeThrowState>,
    pub rebound: Option<ReboundState>,
    pub inbounder: Option<usize>,

    /// Possession began from a live ball (steal / defensive rebound).
    pub live_start: bool,
    pub fast_break: bool,
    pub fast_break_checked: bool,
    pub setup_timer: f32,
}

impl PossessionState {
    pub fn fresh(phase: Phase, shot_clock: f32) -> Self {
        Self {
            phase,
            phase_ticks: 0,
            shot_clock,
            play: None,
            play_called: false,
            slots: BTreeMap::new(),
            roles: RoleMap::default(),
            assignments: BTreeMap::new(),
            screen_reads: BTreeSet::new(),
            dribble_hold: 0.0,
            pass_count: 0,
            last_pass: None,
            last_carrier: None,
            committed_drive: false,
            decision_cooldown: 0,
            crossed_half: false,
            advance_clock: 0.0,
            free_throw: None,
            rebound: None,
            inbounder: None,
            live_start: false,
            fast_break: false,
            fast_break_checked: false,
            setup_timer: 0.0,
        }
    }

    /// Player sitting in `slot`, if any.
    pub fn slot_holder(&self, slot: CourtSlot) -> Option<usize> {
        self.slots.get(&slot).copied()
    }

    pub fn slot_of(&self, player: usize) -> Option<CourtSlot> {
        self.slots.iter().find(|(_, p)| **p == player).map(|(s, _)| *s)
    }

    /// Put `player` in `slot`, vacating the player's previous slot. An
    /// occupied slot is taken over.
    pub fn claim_slot(&mut self, player: usize, slot: CourtSlot) {
        self.slots.retain(|_, p| *p != player);
        self.slots.insert(slot, player);
    }
}

/// How the next possession restarts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Restart {
    /// Dead ball: baseline inbound.
    Inbound,
    /// Live ball already in `carrier`'s hands.
    Live { carrier: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeReason {
    MadeBasket,
    MadeFreeThrow,
    DefensiveRebound,
    Steal,
    Turnover,
    ShotClock,
    Violation,
    /// Non-shooting foul below the bonus: offense keeps the ball.
    Foul,
    Stalled,
    JumpBall,
    QuarterStart,
}

/// Possession change requested by a resolver; applied at the start of the
/// next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingChange {
    /// Team that gets the ball.
    pub team: usize,
    pub restart: Restart,
    pub reason: ChangeReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_clean() {
        let p = PossessionState::fresh(Phase::Inbound, 24.0);
        assert_eq!(p.shot_clock, 24.0);
        assert_eq!(p.pass_count, 0);
        assert!(p.play.is_none());
        assert!(p.roles.is_empty());
    }

    #[test]
    fn test_claim_slot_moves_player() {
        let mut p = PossessionState::fresh(Phase::Setup, 24.0);
        p.claim_slot(3, CourtSlot::Top);
        p.claim_slot(3, CourtSlot::LeftWing);
        assert_eq!(p.slot_holder(CourtSlot::Top), None);
        assert_eq!(p.slot_of(3), Some(CourtSlot::LeftWing));
        p.claim_slot(4, CourtSlot::LeftWing);
        assert_eq!(p.slot_of(3), None);
    }

    #[test]
    fn test_clock_phases() {
        assert!(!Phase::FreeThrow.clock_runs());
        assert!(!Phase::JumpBall.clock_runs());
        assert!(Phase::Rebound.clock_runs());
        assert!(!Phase::Rebound.shot_clock_runs());
        assert!(Phase::Action.shot_clock_runs());
    }
}
