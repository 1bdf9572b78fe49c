//! Random source consumed by every probabilistic decision.
//!
//! The engine never seeds anything itself: it pulls `[0, 1)` draws from a
//! single ordered stream, so a fixed seed plus a fixed tick sequence
//! reproduces a game exactly. Each helper documents how many draws it takes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// One draw: `true` with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// One draw: uniform in `[lo, hi)`.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// One draw: index in `0..len` (0 for an empty range).
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

/// ChaCha8-backed production source.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRng {
    fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }
}

/// Replays a fixed list of draws, then repeats `fallback`. Used to pin
/// outcomes in scenario tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(values: Vec<f32>, fallback: f32) -> Self {
        Self { values, cursor: 0, fallback }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(Vec::new(), value)
    }

    pub fn draws_taken(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        let v = self.values.get(self.cursor).copied().unwrap_or(self.fallback);
        self.cursor += 1;
        v.clamp(0.0, 0.999_999)
    }
}
