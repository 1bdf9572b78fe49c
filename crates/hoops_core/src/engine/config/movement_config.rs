//! Movement & collision parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // === Speed model ===
    /// Speed at rating 0 (ft/s) (default: 11)
    pub base_speed: f32,
    /// Extra ft/s per speed rating point (default: 0.09)
    pub speed_per_rating: f32,
    /// Velocity blend rate per second at rating 0 (default: 4)
    pub acceleration_base: f32,
    /// Extra blend rate per acceleration point (default: 0.06)
    pub acceleration_per_rating: f32,
    /// Slow down inside this distance of the target (default: 1.5)
    pub arrive_radius: f32,

    // === Mode factors ===
    pub slide_factor: f32,
    pub dribble_factor: f32,
    pub cut_factor: f32,

    // === Catch ===
    pub catch_timer_seconds: f32,
    pub catch_speed_factor: f32,

    // === Sprint fatigue ===
    /// Sustained long-distance movement before the penalty (default: 4)
    pub sprint_threshold_seconds: f32,
    /// Speed multiplier once sprint-fatigued (default: 0.85)
    pub sprint_penalty: f32,
    /// Target distance that counts as long-distance movement (default: 10)
    pub sprint_distance: f32,

    // === Collisions ===
    pub separation_radius: f32,
    pub separation_strength: f32,
    pub screen_block_radius: f32,
    pub screen_block_strength: f32,

    // === Fatigue ===
    /// Fatigue gained per second at stamina 0 (default: 0.0009)
    pub fatigue_rate: f32,
    /// Speed lost at fatigue 1.0 (default: 0.25)
    pub fatigue_speed_penalty: f32,

    // === Jump arcs ===
    pub gravity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 11.0,
            speed_per_rating: 0.09,
            acceleration_base: 4.0,
            acceleration_per_rating: 0.06,
            arrive_radius: 1.5,
            slide_factor: 0.78,
            dribble_factor: 0.9,
            cut_factor: 1.08,
            catch_timer_seconds: 0.3,
            catch_speed_factor: 0.35,
            sprint_threshold_seconds: 4.0,
            sprint_penalty: 0.85,
            sprint_distance: 10.0,
            separation_radius: 2.5,
            separation_strength: 0.5,
            screen_block_radius: 3.5,
            screen_block_strength: 0.6,
            fatigue_rate: 0.0009,
            fatigue_speed_penalty: 0.25,
            gravity: 32.0,
        }
    }
}
