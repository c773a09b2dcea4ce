//! Seeded random stream for the generator
//!
//! Every round re-seeds from `base + round * multiplier`, so replaying a
//! round with the same inputs reproduces the same obstacle layout.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seed for a given round (wrapping arithmetic, never overflows)
#[inline]
pub fn round_seed(base: u32, multiplier: u32, round: u32) -> u32 {
    base.wrapping_add(round.wrapping_mul(multiplier))
}

/// Deterministic random stream
#[derive(Debug, Clone)]
pub struct TrenchRng {
    seed: u32,
    rng: Pcg32,
}

impl TrenchRng {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed as u64),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Restart the stream from a new seed
    pub fn reseed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    /// Next value in [0, 1)
    pub fn next(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Next value in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Next value in [-1, 1)
    pub fn signed(&mut self) -> f32 {
        self.next() * 2.0 - 1.0
    }

    /// Either -1 or +1
    pub fn sign(&mut self) -> i8 {
        if self.next() < 0.5 { -1 } else { 1 }
    }
}
