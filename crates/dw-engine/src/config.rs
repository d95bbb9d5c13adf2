//! Engine configuration.

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible combat rounds.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
