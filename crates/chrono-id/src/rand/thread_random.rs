use ::rand::{Rng, rng};

use super::RandSource;

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// The type stores nothing; it reaches the calling thread's generator on each
/// call, so it is `Send + Sync` and free to copy.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

impl ThreadRandom {
    /// Returns `bits` uniformly random low bits (`0` when `bits == 0`).
    #[must_use]
    pub fn bits(self, bits: u32) -> u64 {
        match bits {
            0 => 0,
            64.. => RandSource::<u64>::rand(&self),
            _ => RandSource::<u64>::rand(&self) & ((1 << bits) - 1),
        }
    }
}
