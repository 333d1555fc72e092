//! Random sources for TTL jitter.

use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks a duration in `[min, max]`.
///
/// Injected into the caches so tests can pin TTLs. When `max <= min`
/// every implementation returns `min`.
pub trait Jitter: Send + Sync + fmt::Debug {
    fn ttl_between(&self, min: Duration, max: Duration) -> Duration;
}

/// Millisecond resolution is enough for TTLs measured in seconds.
fn pick<R: Rng + ?Sized>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let low = min.as_millis() as u64;
    let high = max.as_millis() as u64;
    Duration::from_millis(rng.gen_range(low..=high))
}

/// Uniform jitter from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn ttl_between(&self, min: Duration, max: Duration) -> Duration {
        pick(&mut rand::thread_rng(), min, max)
    }
}

/// Deterministic jitter: the same seed yields the same sequence.
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Debug for SeededJitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededJitter").finish_non_exhaustive()
    }
}

impl Jitter for SeededJitter {
    fn ttl_between(&self, min: Duration, max: Duration) -> Duration {
        pick(&mut *self.rng.lock(), min, max)
    }
}

/// Always the lower bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter;

impl Jitter for FixedJitter {
    fn ttl_between(&self, min: Duration, _max: Duration) -> Duration {
        min
    }
}
