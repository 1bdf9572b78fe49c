//! Play-by-play event log entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    JumpBall,
    Inbound,
    PlayCall,
    FastBreak,
    FieldGoalMade,
    FieldGoalMissed,
    Block,
    FreeThrowMade,
    FreeThrowMissed,
    OffensiveRebound,
    DefensiveRebound,
    Steal,
    Turnover,
    ShootingFoul,
    PersonalFoul,
    Violation,
    QuarterEnd,
    GameEnd,
    /// Freeze-guard recovery
    Stalled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: u64,
    pub quarter: u8,
    /// Game clock (seconds remaining in the quarter)
    pub clock: f32,
    pub kind: EventKind,
    pub team: Option<usize>,
    pub player: Option<usize>,
    pub text: String,
}

impl GameEvent {
    /// "Q2 07:41"
    pub fn clock_label(&self) -> String {
        let secs = self.clock.max(0.0).ceil() as u32;
        format!("Q{} {:02}:{:02}", self.quarter, secs / 60, secs % 60)
    }
}
