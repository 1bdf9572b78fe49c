//! # Engine Configuration Module
//!
//! Every tuning constant the possession engine reads, grouped by concern.
//! Probability constants interact multiplicatively across many branches, so
//! they are exposed here as calibratable parameters instead of literals.
//!
//! ## Usage
//! ```rust
//! use hoops_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! let short = EngineConfig::quick(60.0);
//! assert!(short.clock.quarter_seconds < config.clock.quarter_seconds);
//! # let _ = arcade;
//! ```

mod clock_config;
mod decision_config;
mod defense_config;
mod movement_config;
mod outcome_config;
mod phase_limits;

pub use clock_config::ClockConfig;
pub use decision_config::{DecisionConfig, PlayCallChance};
pub use defense_config::DefenseConfig;
pub use movement_config::MovementConfig;
pub use outcome_config::{OutcomeConfig, ShotBandTable};
pub use phase_limits::PhaseLimits;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub outcomes: OutcomeConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub defense: DefenseConfig,
    #[serde(default)]
    pub phase_limits: PhaseLimits,
}

impl EngineConfig {
    /// Baseline preset, identical to `default()`. The constants are
    /// starting values and are not fitted to league box-score rates.
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Hotter shooting, fewer live-ball turnovers
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.outcomes.make_pct.three = 0.42;
        cfg.outcomes.make_pct.mid_range = 0.47;
        cfg.outcomes.make_pct.layup = 0.66;
        cfg.outcomes.interception_base = 0.07;
        cfg.outcomes.strip_base = 0.006;
        cfg.decision.wide_open_shot_base = 0.55;
        cfg
    }

    /// Default tuning with shortened quarters (tests, batch runs)
    pub fn quick(quarter_seconds: f32) -> Self {
        let mut cfg = Self::default();
        cfg.clock.quarter_seconds = quarter_seconds.max(1.0);
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ========== Tests ==========
