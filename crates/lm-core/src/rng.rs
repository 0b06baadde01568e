//! Seeded RNG for generating demonstration and test stop sets.
//!
//! The sequencer itself is fully deterministic and never draws random
//! numbers.  Randomness only enters when a caller asks for a sample of
//! delivery stops, and even then the same seed always yields the same
//! sample, so a "random" run can be replayed exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic sampling RNG.
///
/// Single-threaded by construction.  If several workers need their own
/// stream, derive one per worker with [`child`](Self::child).
pub struct SampleRng(SmallRng);

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        SampleRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SampleRng` with a different seed offset, for seeding
    /// independent samples from one root seed.
    pub fn child(&mut self, offset: u64) -> SampleRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SampleRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Draw `amount` distinct indices uniformly from `0..length`, in the
    /// order they were drawn.
    ///
    /// `amount` is clamped to `length`, so asking for more indices than
    /// exist returns a permutation of all of them.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount.min(length)).into_vec()
    }
}
