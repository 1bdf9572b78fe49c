//! Clock and rule timing

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Quarter length in seconds (default: 720)
    pub quarter_seconds: f32,
    /// Regulation quarters (default: 4)
    pub quarters: u8,
    /// Full shot clock (default: 24)
    pub shot_clock: f32,
    /// Shot clock after an offensive rebound (default: 14)
    pub offensive_rebound_shot_clock: f32,
    /// Minimum shot clock after a non-shooting foul (default: 14)
    pub foul_reset_shot_clock: f32,
    /// Time allowed to cross half court (default: 8)
    pub backcourt_seconds: f32,
    /// Offensive paint time limit (default: 3)
    pub three_second_limit: f32,
    /// Catch-to-shot window that still credits an assist (default: 4)
    pub assist_window: f32,
    /// Minimum time between a catch and the next pass (default: 0.5)
    pub pass_cooldown: f32,
    /// Team fouls per quarter before the bonus (default: 5)
    pub bonus_threshold: u8,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            quarter_seconds: 720.0,
            quarters: 4,
            shot_clock: 24.0,
            offensive_rebound_shot_clock: 14.0,
            foul_reset_shot_clock: 14.0,
            backcourt_seconds: 8.0,
            three_second_limit: 3.0,
            assist_window: 4.0,
            pass_cooldown: 0.5,
            bonus_threshold: 5,
        }
    }
}
