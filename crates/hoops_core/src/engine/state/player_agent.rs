use serde::{Deserialize, Serialize};

use crate::engine::geometry::Point;
use crate::models::{PlayerProfile, PlayerRatings, Position};

/// Per-frame movement modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotionFlags {
    pub cutting: bool,
    pub screening: bool,
    pub dribbling: bool,
    pub driving: bool,
    pub defensive_sliding: bool,
}

/// One of the ten simulated agents. Court slot and offensive role are not
/// stored here; they live in the possession's slot and role maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAgent {
    /// Court index 0..10, also the box-score key.
    pub id: usize,
    pub team: usize,
    pub name: String,
    pub position: Position,
    pub superstar: bool,
    pub ratings: PlayerRatings,

    pub pos: Point,
    pub vel: Point,
    pub target: Point,
    pub has_ball: bool,
    /// 0..1, never decreases during a game here.
    pub fatigue: f32,
    pub flags: MotionFlags,

    /// Seconds of post-catch gather left.
    pub catch_timer: f32,
    /// Seconds of sustained long-distance movement.
    pub sprint_timer: f32,
    pub jump_height: f32,
    pub jump_velocity: f32,
    /// Continuous seconds spent in the offensive paint.
    pub paint_timer: f32,
}

impl PlayerAgent {
    pub fn from_profile(id: usize, team: usize, profile: &PlayerProfile, pos: Point) -> Self {
        Self {
            id,
            team,
            name: profile.name.clone(),
            position: profile.position,
            superstar: profile.superstar,
            ratings: profile.ratings,
            pos,
            vel: (0.0, 0.0),
            target: pos,
            has_ball: false,
            fatigue: 0.0,
            flags: MotionFlags::default(),
            catch_timer: 0.0,
            sprint_timer: 0.0,
            jump_height: 0.0,
            jump_velocity: 0.0,
            paint_timer: 0.0,
        }
    }

    pub fn height(&self) -> f32 {
        self.ratings.physical.height
    }

    pub fn is_big(&self) -> bool {
        self.position.is_big()
    }

    pub fn is_guard(&self) -> bool {
        self.position.is_guard()
    }

    /// Clear possession-scoped transient fields.
    pub fn reset_possession_fields(&mut self) {
        self.flags = MotionFlags::default();
        self.catch_timer = 0.0;
        self.paint_timer = 0.0;
    }

    /// Launch a visual jump arc (ft/s upward).
    pub fn start_jump(&mut self, velocity: f32) {
        if self.jump_height <= 0.0 {
            self.jump_velocity = velocity.max(0.0);
        }
    }
}
