//! Freeze-guard bounds per phase (ticks)

use serde::{Deserialize, Serialize};

use crate::engine::state::Phase;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseLimits {
    pub jump_ball: u32,
    pub inbound: u32,
    pub advance: u32,
    pub setup: u32,
    pub action: u32,
    pub shooting: u32,
    pub rebound: u32,
    pub free_throw: u32,
}

impl Default for PhaseLimits {
    fn default() -> Self {
        Self {
            jump_ball: 600,
            inbound: 300,
            advance: 900,
            setup: 600,
            action: 1800,
            shooting: 300,
            rebound: 300,
            free_throw: 400,
        }
    }
}

impl PhaseLimits {
    pub fn limit(&self, phase: Phase) -> u32 {
        match phase {
            Phase::JumpBall => self.jump_ball,
            Phase::Inbound => self.inbound,
            Phase::Advance => self.advance,
            Phase::Setup => self.setup,
            Phase::Action => self.action,
            Phase::Shooting => self.shooting,
            Phase::Rebound => self.rebound,
            Phase::FreeThrow => self.free_throw,
        }
    }
}
