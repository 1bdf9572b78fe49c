//! Man / zone defense parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    // === On ball ===
    /// Gap to the handler for a 100-rated perimeter defender (default: 3)
    pub on_ball_gap_min: f32,
    /// Gap to the handler for a 0-rated perimeter defender (default: 6)
    pub on_ball_gap_max: f32,

    // === Off ball ===
    pub deny_radius: f32,
    pub deny_lean: f32,
    pub sag_factor: f32,

    // === Screens ===
    pub screen_react_distance: f32,
    pub base_switch_chance: f32,
    pub screen_route_offset: f32,

    // === Help ===
    pub help_trigger_distance: f32,
    pub rotation_fraction: f32,

    // === Zone ===
    pub zone_shift: f32,
    pub zone_corner_pull: f32,
    pub zone_collapse: f32,
    pub zone_collapse_distance: f32,
    pub zone_closeout_distance: f32,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            on_ball_gap_min: 3.0,
            on_ball_gap_max: 6.0,
            deny_radius: 15.0,
            deny_lean: 2.5,
            sag_factor: 0.35,
            screen_react_distance: 4.0,
            base_switch_chance: 0.6,
            screen_route_offset: 3.0,
            help_trigger_distance: 15.0,
            rotation_fraction: 0.5,
            zone_shift: 0.35,
            zone_corner_pull: 4.0,
            zone_collapse: 0.5,
            zone_collapse_distance: 20.0,
            zone_closeout_distance: 7.0,
        }
    }
}
