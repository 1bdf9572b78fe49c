//! Ball state
//!
//! Carried, in flight, bouncing and dead are mutually exclusive variants of
//! `BallState`, so "at most one owner" and "flight excludes carry" hold by
//! construction. The carrier reference here is the ground truth that the
//! per-player `has_ball` flags are synced from.

use serde::{Deserialize, Serialize};

use crate::engine::geometry::{lerp, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    Dunk,
    Layup,
    Close,
    MidRange,
    Three,
}

impl ShotType {
    pub fn points(&self) -> u32 {
        match self {
            ShotType::Three => 3,
            _ => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShotType::Dunk => "dunk",
            ShotType::Layup => "layup",
            ShotType::Close => "close shot",
            ShotType::MidRange => "mid-range jumper",
            ShotType::Three => "three-pointer",
        }
    }

    /// (release height, peak height) of the shot arc in feet.
    pub fn arc(&self) -> (f32, f32) {
        match self {
            ShotType::Dunk => (9.5, 10.8),
            ShotType::Layup => (8.5, 11.5),
            ShotType::Close => (8.0, 12.5),
            ShotType::MidRange => (8.0, 14.0),
            ShotType::Three => (8.0, 16.0),
        }
    }
}

/// Rebound-bounce archetype of a missed shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissType {
    Airball,
    RimOut,
    BackIron,
    FrontRim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassType {
    Chest,
    Bounce,
    Lob,
    Overhead,
}

impl PassType {
    /// (start, peak, end) heights in feet.
    pub fn arc(&self) -> (f32, f32, f32) {
        match self {
            PassType::Chest => (4.5, 5.0, 4.5),
            PassType::Bounce => (3.5, 3.5, 3.0),
            PassType::Lob => (6.5, 13.0, 9.0),
            PassType::Overhead => (8.0, 9.5, 6.5),
        }
    }

    /// Ball speed in ft/s.
    pub fn speed(&self) -> f32 {
        match self {
            PassType::Chest => 45.0,
            PassType::Bounce => 35.0,
            PassType::Lob => 28.0,
            PassType::Overhead => 40.0,
        }
    }

    /// Interception multiplier for this pass type.
    pub fn steal_factor(&self) -> f32 {
        match self {
            PassType::Chest => 1.0,
            PassType::Bounce => 0.8,
            PassType::Lob => 0.6,
            PassType::Overhead => 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShootingFoul {
    pub fouler: usize,
    pub and_one: bool,
    pub attempts: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotFlight {
    pub shooter: usize,
    pub shot_type: ShotType,
    pub made: bool,
    pub miss: Option<MissType>,
    pub foul: Option<ShootingFoul>,
    pub assister: Option<usize>,
    pub alley_oop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightKind {
    Pass { passer: usize, target: usize, pass_type: PassType, alley_oop: bool },
    Shot(ShotFlight),
    FreeThrow { shooter: usize, made: bool },
    JumpBall { jumpers: [usize; 2] },
}

/// Parametrized projectile from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallFlight {
    pub from: Point,
    pub to: Point,
    pub start_height: f32,
    pub peak_height: f32,
    pub end_height: f32,
    /// 0..1
    pub progress: f32,
    /// Seconds
    pub duration: f32,
    /// Progress at which a bounce pass touches the floor.
    pub floor_touch: Option<f32>,
    pub kind: FlightKind,
}

impl BallFlight {
    pub fn new(from: Point, to: Point, heights: (f32, f32, f32), duration: f32, kind: FlightKind) -> Self {
        Self {
            from,
            to,
            start_height: heights.0,
            peak_height: heights.1,
            end_height: heights.2,
            progress: 0.0,
            duration: duration.max(0.05),
            floor_touch: None,
            kind,
        }
    }

    pub fn is_shot(&self) -> bool {
        matches!(self.kind, FlightKind::Shot(_) | FlightKind::FreeThrow { .. })
    }

    pub fn will_score(&self) -> bool {
        match self.kind {
            FlightKind::Shot(shot) => shot.made,
            FlightKind::FreeThrow { made, .. } => made,
            _ => false,
        }
    }

    pub fn miss_type(&self) -> Option<MissType> {
        match self.kind {
            FlightKind::Shot(shot) => shot.miss,
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Ground position and height at `progress`.
    pub fn sample(&self, progress: f32) -> (Point, f32) {
        let t = progress.clamp(0.0, 1.0);
        let ground = lerp(self.from, self.to, t);
        if let Some(touch) = self.floor_touch {
            let h = if t < touch {
                self.start_height * (1.0 - t / touch)
            } else {
                self.end_height * ((t - touch) / (1.0 - touch).max(0.01))
            };
            return (ground, h.max(0.0));
        }
        let base = self.start_height + (self.end_height - self.start_height) * t;
        let mid_base = (self.start_height + self.end_height) * 0.5;
        let bulge = (self.peak_height - mid_base).max(0.0);
        (ground, base + 4.0 * bulge * t * (1.0 - t))
    }
}

/// Loose ball bouncing off the rim toward `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallBounce {
    pub from: Point,
    pub to: Point,
    pub progress: f32,
    pub duration: f32,
    pub amplitude: f32,
}

impl BallBounce {
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Damped oscillation: three hops shrinking to the floor.
    pub fn height_at(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        let hop = (t * std::f32::consts::PI * 3.0).sin().abs();
        self.amplitude * hop * (1.0 - t) * (1.0 - t)
    }

    pub fn position_at(&self, progress: f32) -> Point {
        lerp(self.from, self.to, progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    Carried(usize),
    Flight(BallFlight),
    Bounce(BallBounce),
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Point,
    pub height: f32,
    pub state: BallState,
}

impl Ball {
    pub fn dead_at(pos: Point) -> Self {
        Self { pos, height: 0.0, state: BallState::Dead }
    }

    pub fn carrier(&self) -> Option<usize> {
        match self.state {
            BallState::Carried(idx) => Some(idx),
            _ => None,
        }
    }

    pub fn flight(&self) -> Option<&BallFlight> {
        match &self.state {
            BallState::Flight(f) => Some(f),
            _ => None,
        }
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.state, BallState::Flight(_))
    }

    pub fn is_bouncing(&self) -> bool {
        matches!(self.state, BallState::Bounce(_))
    }

    /// Drop any flight/bounce sub-state.
    pub fn clear_transient(&mut self) {
        if matches!(self.state, BallState::Flight(_) | BallState::Bounce(_)) {
            self.state = BallState::Dead;
            self.height = 0.0;
        }
    }
}
