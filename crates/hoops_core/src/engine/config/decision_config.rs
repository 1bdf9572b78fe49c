//! Read-and-react and play-calling parameters

use serde::{Deserialize, Serialize};

use crate::models::OffenseTactic;

/// Chance a half-court possession calls a scripted play, per tactic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayCallChance {
    pub fast_break: f32,
    pub iso: f32,
    pub inside: f32,
    pub shoot: f32,
    pub motion: f32,
}

impl Default for PlayCallChance {
    fn default() -> Self {
        Self { fast_break: 0.5, iso: 0.75, inside: 0.7, shoot: 0.7, motion: 0.8 }
    }
}

impl PlayCallChance {
    pub fn for_tactic(&self, tactic: OffenseTactic) -> f32 {
        match tactic {
            OffenseTactic::FastBreak => self.fast_break,
            OffenseTactic::Iso => self.iso,
            OffenseTactic::Inside => self.inside,
            OffenseTactic::Shoot => self.shoot,
            OffenseTactic::Motion => self.motion,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Ticks between ball-handler decisions (default: 12)
    pub decision_interval_ticks: u32,
    /// Nearest defender farther than this = open (default: 6)
    pub open_threshold: f32,
    /// Nearest defender farther than this = wide open (default: 8)
    pub wide_open_threshold: f32,

    // === Forced rules ===
    pub max_passes: u32,
    pub shot_clock_pressure: f32,
    pub mandatory_attack_hold: f32,

    // === Catch and shoot ===
    pub fresh_catch_window: f32,
    pub catch_and_shoot_base: f32,

    // === Drives ===
    pub drive_finish_distance: f32,
    pub kick_out_chance: f32,
    pub drive_base: f32,
    /// Lane is clear if no defender is this close to handler->rim (default: 4)
    pub lane_clearance: f32,

    // === Shot rolls ===
    pub point_blank_distance: f32,
    pub point_blank_shot_chance: f32,
    pub superstar_threshold: f32,
    pub superstar_three_chance: f32,
    pub superstar_drive_chance: f32,
    pub wide_open_shot_base: f32,
    pub open_mid_base: f32,
    pub close_range: f32,
    pub close_finish_base: f32,
    pub shot_willingness_base: f32,
    pub shot_willingness_per_pass: f32,
    /// Deepest shot the heuristic takes voluntarily (default: 26)
    pub max_shot_distance: f32,

    // === Passing ===
    pub pass_first_hold: f32,
    pub pass_first_base: f32,
    pub usage_hard_cap: f32,
    pub usage_soft_cap: f32,
    pub soft_cap_pass_chance: f32,
    pub alley_oop_base: f32,
    pub pass_hunger_base: f32,
    pub pass_hunger_decay: f32,
    pub default_pass_chance: f32,

    // === Fallbacks ===
    pub fallback_shot_clock: f32,
    pub fallback_drive_chance: f32,

    // === Play calling ===
    pub play_call_chance: PlayCallChance,
    pub recent_play_window: usize,
    pub setup_seconds: f32,
    pub play_step_watchdog: f32,
    pub pass_trigger_window: f32,

    // === Transition ===
    pub fast_break_base: f32,
    pub fast_break_tactic_bonus: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            decision_interval_ticks: 12,
            open_threshold: 6.0,
            wide_open_threshold: 8.0,
            max_passes: 8,
            shot_clock_pressure: 3.5,
            mandatory_attack_hold: 5.0,
            fresh_catch_window: 0.5,
            catch_and_shoot_base: 0.35,
            drive_finish_distance: 6.0,
            kick_out_chance: 0.45,
            drive_base: 0.35,
            lane_clearance: 4.0,
            point_blank_distance: 4.0,
            point_blank_shot_chance: 0.85,
            superstar_threshold: 90.0,
            superstar_three_chance: 0.3,
            superstar_drive_chance: 0.4,
            wide_open_shot_base: 0.40,
            open_mid_base: 0.22,
            close_range: 10.0,
            close_finish_base: 0.45,
            shot_willingness_base: 0.12,
            shot_willingness_per_pass: 0.15,
            max_shot_distance: 26.0,
            pass_first_hold: 1.5,
            pass_first_base: 0.55,
            usage_hard_cap: 1.7,
            usage_soft_cap: 1.3,
            soft_cap_pass_chance: 0.5,
            alley_oop_base: 0.25,
            pass_hunger_base: 0.35,
            pass_hunger_decay: 0.75,
            default_pass_chance: 0.6,
            fallback_shot_clock: 10.0,
            fallback_drive_chance: 0.3,
            play_call_chance: PlayCallChance::default(),
            recent_play_window: 4,
            setup_seconds: 1.2,
            play_step_watchdog: 5.0,
            pass_trigger_window: 0.5,
            fast_break_base: 0.3,
            fast_break_tactic_bonus: 0.35,
        }
    }
}
