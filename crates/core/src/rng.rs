//! RNG module - uniform random piece generation
//!
//! Every spawn picks one of the seven canonical kinds with equal probability (no bag),
//! and records per-kind usage statistics for the current stage.
//!
//! Randomness comes from a simple LCG so that a seed fully determines a game.

use serde::Serialize;

use crate::pieces::ActivePiece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (usable as a seed to replay from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Per-kind spawn counters for one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PieceStats {
    counts: [u32; 7],
    total: u32,
}

impl PieceStats {
    pub fn record(&mut self, kind: PieceKind) {
        self.counts[kind.index()] += 1;
        self.total += 1;
    }

    pub fn count(&self, kind: PieceKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn counts(&self) -> [u32; 7] {
        self.counts
    }

    /// Share of all spawns that were `kind`, in percent
    pub fn share_percent(&self, kind: PieceKind) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(kind) as f32 * 100.0 / self.total as f32
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Uniform piece generator with usage statistics
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: u32,
    rng: SimpleRng,
    stats: PieceStats,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
            stats: PieceStats::default(),
        }
    }

    /// Pick a kind uniformly at random and record it
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        let kind = PieceKind::ALL[idx];
        self.stats.record(kind);
        kind
    }

    /// Draw a kind and build a fresh piece at its spawn position
    pub fn spawn(&mut self) -> ActivePiece {
        ActivePiece::spawn(self.draw())
    }

    pub fn stats(&self) -> &PieceStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Seed the generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current LCG state (usable as a seed to replay from here)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
