//! Randomness capability.
//!
//! The engine owns a single-operation RNG so that combat is deterministic
//! under test: production uses a seeded [`DefaultRng`], tests inject a
//! [`FixedRng`] returning a configured value.

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};

/// A source of uniform random draws in `[0, 1)`.
pub trait Rng: Send {
    fn uniform01(&mut self) -> f64;
}

/// Production RNG backed by a seeded [`StdRng`].
pub struct DefaultRng {
    rng: StdRng,
}

impl DefaultRng {
    /// Create an RNG from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Rng for DefaultRng {
    fn uniform01(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Deterministic RNG for tests: always returns the configured value.
pub struct FixedRng {
    pub value: f64,
}

impl FixedRng {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Rng for FixedRng {
    fn uniform01(&mut self) -> f64 {
        self.value
    }
}
