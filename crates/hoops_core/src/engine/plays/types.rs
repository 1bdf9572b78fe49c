//! Play, step and action types
//!
//! Actions are a closed set; the executor matches them exhaustively.

use serde::{Deserialize, Serialize};

use crate::engine::court::CourtSlot;
use crate::engine::state::OffensiveRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayCategory {
    PickAndRoll,
    Motion,
    Post,
    Shooting,
    Transition,
    Isolation,
}

impl PlayCategory {
    pub const ALL: [PlayCategory; 6] = [
        PlayCategory::PickAndRoll,
        PlayCategory::Motion,
        PlayCategory::Post,
        PlayCategory::Shooting,
        PlayCategory::Transition,
        PlayCategory::Isolation,
    ];

    pub fn index(&self) -> usize {
        match self {
            PlayCategory::PickAndRoll => 0,
            PlayCategory::Motion => 1,
            PlayCategory::Post => 2,
            PlayCategory::Shooting => 3,
            PlayCategory::Transition => 4,
            PlayCategory::Isolation => 5,
        }
    }
}

/// What one role does during a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayAction {
    MoveTo(CourtSlot),
    /// Screen for the player holding the role.
    Screen(OffensiveRole),
    Cut(CourtSlot),
    /// Attack the rim; `side` is the lateral lean (-1 left, +1 right).
    Drive { side: f32 },
    Roll,
    Pop(CourtSlot),
    Relocate,
    Hold,
    PostUp,
    PassTo(OffensiveRole),
    /// Shoot only if open, otherwise defer to read-and-react.
    Shoot,
    ReadAndReact,
    /// Placeholder for a future off-ball AI; holds position.
    CallForBall,
    /// Feed the post unless the lane is blocked.
    EntryPass,
}

impl PlayAction {
    /// Actions that only mean something in the carrier's hands.
    pub fn needs_ball(&self) -> bool {
        matches!(
            self,
            PlayAction::PassTo(_) | PlayAction::Shoot | PlayAction::ReadAndReact | PlayAction::EntryPass
        )
    }
}

/// Named spatial conditions for position-triggered steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionCondition {
    /// Screener within a stride of the ball handler.
    ScreenSet,
    /// PostUp player sealed within 6 ft of the rim.
    PostSealed,
    /// Cutter has reached their target.
    CutterArrived,
    /// Every offensive player is on their target.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepTrigger {
    /// Advance once the step timer reaches the duration.
    Time,
    /// Advance once a pass has been caught within the recent window.
    Pass,
    /// Advance once the condition holds; time-based when none is given.
    Position(Option<PositionCondition>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayStep {
    /// Indexed in `OffensiveRole::ALL` order.
    pub actions: [PlayAction; 5],
    pub duration: f32,
    pub trigger: StepTrigger,
}

impl PlayStep {
    pub fn action_for(&self, role: OffensiveRole) -> PlayAction {
        let i = OffensiveRole::ALL.iter().position(|r| *r == role).unwrap_or(0);
        self.actions[i]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    pub name: &'static str,
    pub category: PlayCategory,
    pub steps: Vec<PlayStep>,
}
