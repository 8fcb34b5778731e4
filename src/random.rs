//! Simulation random stream.
//!
//! Policies that randomize (random admission) draw from a [`RandomEngine`]
//! handed in by the kernel, so one seeded stream drives the whole run and
//! the same seed with the same admission sequence reproduces the same trace.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random source shared by the simulation.
pub trait RandomEngine {
    /// Next uniform sample in `[0, 1)`.
    fn raw(&mut self) -> f64;
}

/// Seeded ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct SimRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SimRandom {
    /// Creates a stream from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomEngine for SimRandom {
    fn raw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Maps a uniform sample onto an index in `0..=len`.
pub(crate) fn index_inclusive<R>(engine: &mut R, len: usize) -> usize
where
    R: RandomEngine + ?Sized,
{
    let slot = (engine.raw() * (len as f64 + 1.0)).floor() as usize;
    slot.min(len)
}
