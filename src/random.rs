use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// feeds Cxnn. seeded once; no promise that a run can be replayed unless
/// the seed is pinned with `with_seed`
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// seed from the wall clock
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_byte(&mut self) -> u8 {
        (self.rng.next_u32() & 0xff) as u8
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}
