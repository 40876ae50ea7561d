//! Deterministic per-train RNG.
//!
//! # Determinism strategy
//!
//! Each train gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (train_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive train IDs uniformly across the seed space.
//! Junction choices made by one train therefore never perturb another, and
//! trains can be stepped in any order (or in parallel) with identical
//! results.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::TrainId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── TrainRng ─────────────────────────────────────────────────────────────────

/// Per-train deterministic RNG, used for junction piece choices.
pub struct TrainRng(SmallRng);

impl TrainRng {
    /// Seed deterministically from the run's global seed and a train ID.
    pub fn new(global_seed: u64, train: TrainId) -> Self {
        let seed = global_seed ^ (train.0 as u64).wrapping_mul(MIXING_CONSTANT);
        TrainRng(SmallRng::seed_from_u64(seed))
    }
}

impl RngCore for TrainRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}
