//! Player roster data
//!
//! Skill ratings are supplied by the roster collaborator on a 0-100 scale and
//! stay fixed for the whole game. Transient simulation fields live on
//! `engine::state::PlayerAgent`, never here.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Positional role label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Position::PF | Position::C)
    }

    /// Rebound position bonus: centers > forwards > guards.
    pub fn rebound_bonus(&self) -> f32 {
        match self {
            Position::C => 0.06,
            Position::PF | Position::SF => 0.03,
            Position::PG | Position::SG => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShootingRatings {
    pub three_point: f32,
    pub mid_range: f32,
    pub close: f32,
    pub free_throw: f32,
    pub catch_and_shoot: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishingRatings {
    pub layup: f32,
    pub dunk: f32,
    pub post_control: f32,
    pub draw_foul: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenseRatings {
    pub perimeter: f32,
    pub interior: f32,
    pub steal: f32,
    pub block: f32,
    pub rebounding: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaymakingRatings {
    pub passing: f32,
    pub ball_handling: f32,
    pub vision: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AthleticRatings {
    pub speed: f32,
    pub acceleration: f32,
    pub vertical: f32,
    pub stamina: f32,
    pub agility: f32,
}

/// Body attributes, also on the 0-100 scale (50 = league-average size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalRatings {
    pub height: f32,
    pub strength: f32,
    pub wingspan: f32,
}

/// Nested skill categories for one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRatings {
    pub shooting: ShootingRatings,
    pub finishing: FinishingRatings,
    pub defense: DefenseRatings,
    pub playmaking: PlaymakingRatings,
    pub athletic: AthleticRatings,
    pub physical: PhysicalRatings,
}

impl PlayerRatings {
    /// Every rating set to the same value.
    pub fn uniform(value: f32) -> Self {
        Self {
            shooting: ShootingRatings {
                three_point: value,
                mid_range: value,
                close: value,
                free_throw: value,
                catch_and_shoot: value,
            },
            finishing: FinishingRatings {
                layup: value,
                dunk: value,
                post_control: value,
                draw_foul: value,
            },
            defense: DefenseRatings {
                perimeter: value,
                interior: value,
                steal: value,
                block: value,
                rebounding: value,
            },
            playmaking: PlaymakingRatings { passing: value, ball_handling: value, vision: value },
            athletic: AthleticRatings {
                speed: value,
                acceleration: value,
                vertical: value,
                stamina: value,
                agility: value,
            },
            physical: PhysicalRatings { height: value, strength: value, wingspan: value },
        }
    }

    /// Position-flavoured ratings around `base`, used for demo rosters and tests.
    pub fn archetype(position: Position, base: f32) -> Self {
        let mut r = Self::uniform(base);
        let up = |v: f32, d: f32| (v + d).clamp(0.0, 100.0);
        match position {
            Position::PG => {
                r.playmaking.passing = up(base, 15.0);
                r.playmaking.ball_handling = up(base, 15.0);
                r.playmaking.vision = up(base, 12.0);
                r.athletic.speed = up(base, 10.0);
                r.shooting.three_point = up(base, 5.0);
                r.physical.height = up(base, -25.0);
                r.physical.strength = up(base, -15.0);
                r.defense.rebounding = up(base, -20.0);
                r.defense.block = up(base, -25.0);
                r.finishing.dunk = up(base, -25.0);
            }
            Position::SG => {
                r.shooting.three_point = up(base, 12.0);
                r.shooting.catch_and_shoot = up(base, 12.0);
                r.shooting.mid_range = up(base, 8.0);
                r.physical.height = up(base, -15.0);
                r.defense.steal = up(base, 5.0);
                r.defense.block = up(base, -15.0);
                r.defense.rebounding = up(base, -12.0);
            }
            Position::SF => {
                r.athletic.vertical = up(base, 6.0);
                r.finishing.layup = up(base, 6.0);
                r.defense.perimeter = up(base, 6.0);
                r.physical.height = up(base, -2.0);
            }
            Position::PF => {
                r.physical.height = up(base, 12.0);
                r.physical.strength = up(base, 12.0);
                r.defense.rebounding = up(base, 12.0);
                r.defense.interior = up(base, 8.0);
                r.finishing.post_control = up(base, 8.0);
                r.shooting.three_point = up(base, -12.0);
                r.playmaking.ball_handling = up(base, -12.0);
                r.athletic.speed = up(base, -6.0);
            }
            Position::C => {
                r.physical.height = up(base, 22.0);
                r.physical.strength = up(base, 18.0);
                r.physical.wingspan = up(base, 18.0);
                r.defense.rebounding = up(base, 20.0);
                r.defense.block = up(base, 18.0);
                r.defense.interior = up(base, 15.0);
                r.finishing.dunk = up(base, 12.0);
                r.finishing.post_control = up(base, 12.0);
                r.shooting.three_point = up(base, -30.0);
                r.shooting.free_throw = up(base, -15.0);
                r.playmaking.ball_handling = up(base, -25.0);
                r.playmaking.passing = up(base, -10.0);
                r.athletic.speed = up(base, -15.0);
                r.athletic.agility = up(base, -15.0);
            }
        }
        r
    }

    fn named_values(&self) -> [(&'static str, f32); 25] {
        [
            ("shooting.three_point", self.shooting.three_point),
            ("shooting.mid_range", self.shooting.mid_range),
            ("shooting.close", self.shooting.close),
            ("shooting.free_throw", self.shooting.free_throw),
            ("shooting.catch_and_shoot", self.shooting.catch_and_shoot),
            ("finishing.layup", self.finishing.layup),
            ("finishing.dunk", self.finishing.dunk),
            ("finishing.post_control", self.finishing.post_control),
            ("finishing.draw_foul", self.finishing.draw_foul),
            ("defense.perimeter", self.defense.perimeter),
            ("defense.interior", self.defense.interior),
            ("defense.steal", self.defense.steal),
            ("defense.block", self.defense.block),
            ("defense.rebounding", self.defense.rebounding),
            ("playmaking.passing", self.playmaking.passing),
            ("playmaking.ball_handling", self.playmaking.ball_handling),
            ("playmaking.vision", self.playmaking.vision),
            ("athletic.speed", self.athletic.speed),
            ("athletic.acceleration", self.athletic.acceleration),
            ("athletic.vertical", self.athletic.vertical),
            ("athletic.stamina", self.athletic.stamina),
            ("athletic.agility", self.athletic.agility),
            ("physical.height", self.physical.height),
            ("physical.strength", self.physical.strength),
            ("physical.wingspan", self.physical.wingspan),
        ]
    }
}

/// Roster entry for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub superstar: bool,
    pub ratings: PlayerRatings,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, position: Position, ratings: PlayerRatings) -> Self {
        Self { name: name.into(), position, superstar: false, ratings }
    }

    pub fn with_superstar(mut self, superstar: bool) -> Self {
        self.superstar = superstar;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::InvalidPlayer("player name is empty".to_string()));
        }
        for (field, value) in self.ratings.named_values() {
            if !(0.0..=100.0).contains(&value) || value.is_nan() {
                return Err(SimError::RatingOutOfRange {
                    player: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}
