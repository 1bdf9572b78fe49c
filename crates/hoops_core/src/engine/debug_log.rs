//! # Tick History
//!
//! Bounded ring buffer of per-tick records for offline analysis. The engine
//! only writes to it when a caller hands one to `tick`; there is no global
//! instance.
//!
//! ```rust,ignore
//! let mut log = TickLog::new(600);
//! tick(&mut state, &config, &mut rng, Some(&mut log));
//! println!("{}", log.to_json()?);
//! ```

use serde::Serialize;
use std::collections::VecDeque;

use super::geometry::Point;
use super::state::{GameState, Phase};

/// One tick, condensed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    pub quarter: u8,
    pub game_clock: f32,
    pub phase: Phase,
    pub possession: usize,
    pub shot_clock: f32,
    pub score: [u32; 2],
    pub carrier: Option<usize>,
    pub ball: Point,
    pub ball_in_flight: bool,
    pub play: Option<(usize, usize)>,
    pub positions: Vec<Point>,
    pub last_event: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TickLog {
    capacity: usize,
    records: VecDeque<TickRecord>,
    /// Records pushed out of the buffer.
    dropped: u64,
}

impl TickLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, records: VecDeque::with_capacity(capacity), dropped: 0 }
    }

    pub fn record(&mut self, state: &GameState) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(TickRecord {
            tick: state.tick_count,
            quarter: state.quarter,
            game_clock: state.game_clock,
            phase: state.poss.phase,
            possession: state.possession,
            shot_clock: state.poss.shot_clock,
            score: state.score,
            carrier: state.ball.carrier(),
            ball: state.ball.pos,
            ball_in_flight: state.ball.in_flight(),
            play: state.poss.play.map(|p| (p.play_id, p.step)),
            positions: state.players.iter().map(|p| p.pos).collect(),
            last_event: state.last_event.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TickRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&TickRecord> {
        self.records.back()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.dropped = 0;
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }
}
