//! # Game Driver
//!
//! Owns one game: state, tuning, the random stream and an optional tick
//! history. Validation happens here, once, so the tick loop can stay
//! infallible.
//!
//! ```rust
//! use hoops_core::models::TeamRoster;
//! use hoops_core::{EngineConfig, Simulation};
//!
//! let home = TeamRoster::demo("Harbor", 72.0);
//! let away = TeamRoster::demo("Summit", 70.0);
//! let mut sim = Simulation::new(&home, &away, EngineConfig::quick(30.0), 7).unwrap();
//! let result = sim.run_to_completion();
//! assert!(result.finished);
//! ```

use serde::Serialize;

use crate::engine::config::EngineConfig;
use crate::engine::debug_log::TickLog;
use crate::engine::events::GameEvent;
use crate::engine::phase_machine::tick;
use crate::engine::rng::{RandomSource, SeededRng};
use crate::engine::snapshot::TickSnapshot;
use crate::engine::state::GameState;
use crate::engine::timestep::TICKS_PER_SECOND;
use crate::error::{Result, SimError};
use crate::models::{BoxScore, TeamRoster, TeamTactics};

/// Summary handed back once the final horn sounds (or the tick cap hits).
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub team_names: [String; 2],
    pub score: [u32; 2],
    pub quarter_scores: Vec<[u32; 2]>,
    pub box_score: BoxScore,
    pub events: Vec<GameEvent>,
    pub ticks: u64,
    pub finished: bool,
    pub fingerprint: u64,
}

impl GameResult {
    /// 0 or 1; `None` for a tie.
    pub fn winner(&self) -> Option<usize> {
        match self.score[0].cmp(&self.score[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }
}

pub struct Simulation<R: RandomSource = SeededRng> {
    state: GameState,
    config: EngineConfig,
    rng: R,
    debug_log: Option<TickLog>,
}

impl Simulation<SeededRng> {
    pub fn new(home: &TeamRoster, away: &TeamRoster, config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_rng(home, away, config, SeededRng::new(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn with_rng(home: &TeamRoster, away: &TeamRoster, config: EngineConfig, rng: R) -> Result<Self> {
        home.validate()?;
        away.validate()?;
        let state = GameState::new(home, away, &config);
        log::debug!("tip-off: {} vs {}", home.name, away.name);
        Ok(Self { state, config, rng, debug_log: None })
    }

    /// Keep the last `capacity` ticks for offline inspection.
    pub fn with_debug_log(mut self, capacity: usize) -> Self {
        self.debug_log = Some(TickLog::new(capacity));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn debug_log(&self) -> Option<&TickLog> {
        self.debug_log.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Change a team's tactics between ticks.
    pub fn set_tactics(&mut self, team: usize, tactics: TeamTactics) -> Result<()> {
        let slot = self.state.tactics.get_mut(team).ok_or(SimError::InvalidTeam(team))?;
        *slot = tactics;
        Ok(())
    }

    pub fn tick(&mut self) {
        tick(&mut self.state, &self.config, &mut self.rng, self.debug_log.as_mut());
    }

    /// Up to `n` ticks; stops early at the final horn. Returns ticks run.
    pub fn run_ticks(&mut self, n: u64) -> u64 {
        let mut ran = 0;
        while ran < n && !self.state.is_finished() {
            self.tick();
            ran += 1;
        }
        ran
    }

    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot::capture(&self.state)
    }

    /// Generous upper bound: four times regulation, since the clock stops
    /// for tips and free throws.
    pub fn tick_cap(&self) -> u64 {
        let regulation = self.config.clock.quarter_seconds as f64 * f64::from(self.config.clock.quarters);
        (regulation * f64::from(TICKS_PER_SECOND) * 4.0).ceil() as u64 + u64::from(TICKS_PER_SECOND) * 60
    }

    pub fn run_to_completion(&mut self) -> GameResult {
        let cap = self.tick_cap();
        self.run_ticks(cap.saturating_sub(self.state.tick_count));
        if !self.state.is_finished() {
            log::warn!("tick cap {} reached before the final horn", cap);
        }
        self.result()
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            team_names: self.state.team_names.clone(),
            score: self.state.score,
            quarter_scores: self.state.quarter_scores.clone(),
            box_score: self.state.box_score.clone(),
            events: self.state.events.clone(),
            ticks: self.state.tick_count,
            finished: self.state.is_finished(),
            fingerprint: self.state.fingerprint(),
        }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
