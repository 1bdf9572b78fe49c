//! Outcome resolver parameters (shot / pass / rebound / fouls)
//!
//! These are calibratable knobs, not ground truth. They interact
//! multiplicatively, so tune aggregate rates with the batch runner.

use serde::{Deserialize, Serialize};

/// Base make percentage per shot band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotBandTable {
    pub dunk: f32,
    pub layup: f32,
    pub close: f32,
    pub mid_range: f32,
    pub three: f32,
}

impl Default for ShotBandTable {
    fn default() -> Self {
        Self { dunk: 0.90, layup: 0.60, close: 0.44, mid_range: 0.41, three: 0.36 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    pub make_pct: ShotBandTable,
    /// Upper bound of the dunk/layup band (ft).
    pub rim_distance: f32,
    /// Upper bound of the close-shot band (ft).
    pub close_distance: f32,
    pub dunk_tendency_base: f32,
    pub zone_three_bonus: f32,
    pub zone_rim_penalty: f32,

    // === Contest ===
    /// Defender distance beyond which a shot is uncontested (default: 6)
    pub contest_range: f32,
    /// Multiplier for an uncontested shot (default: 1.05)
    pub open_shot_bonus: f32,
    /// Lowest contest multiplier (default: 0.55)
    pub contest_floor: f32,
    /// Floor for shooters rated 85+ in the governing skill (default: 0.68)
    pub elite_contest_floor: f32,
    /// Floor for superstars (default: 0.75)
    pub superstar_contest_floor: f32,
    /// Dunk needs at least this dunk rating (default: 50)
    pub dunk_min_rating: f32,
    /// Dunk needs at least this vertical (default: 45)
    pub dunk_min_vertical: f32,
    /// Block rating that deters a dunk when close (default: 80)
    pub elite_blocker_rating: f32,

    // === Block ===
    pub block_base: f32,
    pub block_range: f32,

    // === Shooting foul ===
    pub shooting_foul_base: f32,
    pub foul_rim_bonus: f32,
    pub foul_close_bonus: f32,
    pub foul_contest_bonus: f32,

    // === Miss archetypes ===
    pub airball_chance: f32,
    pub rim_out_chance: f32,
    pub back_iron_chance: f32,

    // === Passing ===
    pub interception_base: f32,
    /// Defender distance to the lane that can still steal (default: 4)
    pub steal_range: f32,
    /// Defender distance to the lane that occludes it (default: 2.5)
    pub lane_block_radius: f32,
    /// Feet of ball clearance over a defender's reach that cut the
    /// interception chance by a factor of e (default: 1.5)
    pub reach_clearance_falloff: f32,

    // === Live-ball turnovers and fouls (per decision) ===
    pub strip_base: f32,
    pub reach_foul_base: f32,
    pub three_second_call_chance: f32,

    // === Free throws ===
    pub free_throw_floor: f32,
    pub free_throw_ceiling: f32,

    // === Rebounding ===
    pub rebound_contest_radius: f32,
    pub rebound_fallback_count: usize,
    pub box_out_seconds: f32,
    pub box_out_bonus: f32,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            make_pct: ShotBandTable::default(),
            rim_distance: 4.0,
            close_distance: 10.0,
            dunk_tendency_base: 0.35,
            zone_three_bonus: 0.03,
            zone_rim_penalty: 0.03,
            contest_range: 6.0,
            open_shot_bonus: 1.05,
            contest_floor: 0.55,
            elite_contest_floor: 0.68,
            superstar_contest_floor: 0.75,
            dunk_min_rating: 50.0,
            dunk_min_vertical: 45.0,
            elite_blocker_rating: 80.0,
            block_base: 0.14,
            block_range: 5.0,
            shooting_foul_base: 0.035,
            foul_rim_bonus: 0.07,
            foul_close_bonus: 0.035,
            foul_contest_bonus: 0.05,
            airball_chance: 0.03,
            rim_out_chance: 0.40,
            back_iron_chance: 0.30,
            interception_base: 0.12,
            steal_range: 4.0,
            lane_block_radius: 2.5,
            reach_clearance_falloff: 1.5,
            strip_base: 0.012,
            reach_foul_base: 0.006,
            three_second_call_chance: 0.35,
            free_throw_floor: 0.30,
            free_throw_ceiling: 0.95,
            rebound_contest_radius: 15.0,
            rebound_fallback_count: 3,
            box_out_seconds: 1.5,
            box_out_bonus: 0.08,
        }
    }
}
