//! Simulation configuration and its builder (§B: "mirroring the
//! teacher's `radiate-engines::builder` / `GeneticEngineBuilder`
//! pattern"): a fluent, consuming builder that accumulates validation
//! errors rather than failing on the first bad parameter, surfacing
//! them all at once from `build()`.

use bugs_error::BugsError;

/// Chain count, iteration budget, RNG seeding, and the adaptive
/// phase's length and convergence tolerance (§5, §9 "Adaptation").
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub chains: usize,
    pub adapt_iterations: usize,
    pub seed: u64,
    /// §9 Open Question, resolved: `checkAdaptation`'s tolerance
    /// against `|empirical_acceptance - target_acceptance|`.
    pub adapt_tolerance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { chains: 1, adapt_iterations: 1000, seed: 0, adapt_tolerance: 0.05 }
    }
}

/// Builds a [`SimulationConfig`], collecting invalid values into
/// `errors` instead of panicking immediately, so `build()` can report
/// every problem in one diagnostic (`BugsError::Multiple`).
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    params: SimulationConfig,
    errors: Vec<BugsError>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of independent Markov chains to run. Default 1.
    pub fn chains(mut self, chains: usize) -> Self {
        if chains < 1 {
            self.errors.push(bugs_error::bugs_err!(InvalidParameter, "SimulationConfig", "chains must be at least 1"));
        }
        self.params.chains = chains;
        self
    }

    /// Length of the adaptive (tuning) phase, in iterations. Default 1000.
    pub fn adapt_iterations(mut self, adapt_iterations: usize) -> Self {
        self.params.adapt_iterations = adapt_iterations;
        self
    }

    /// Base RNG seed; chain `c` is seeded deterministically from
    /// `seed + c` (§B "RNG"). Default 0.
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Tolerance passed to `checkAdaptation` (§9 Open Question). Default 0.05.
    pub fn adapt_tolerance(mut self, tolerance: f64) -> Self {
        if !(0.0..1.0).contains(&tolerance) {
            self.errors.push(bugs_error::bugs_err!(
                InvalidParameter,
                "SimulationConfig",
                "adapt_tolerance must be in [0, 1)"
            ));
        }
        self.params.adapt_tolerance = tolerance;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, BugsError> {
        if !self.errors.is_empty() {
            return Err(BugsError::from(self.errors));
        }
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_configuration() {
        let config = SimulationConfigBuilder::new().build().unwrap();
        assert_eq!(config.chains, 1);
        assert!((config.adapt_tolerance - 0.05).abs() < 1e-12);
    }

    #[test]
    fn invalid_chain_count_is_reported_at_build() {
        let err = SimulationConfigBuilder::new().chains(0).build().unwrap_err();
        assert_eq!(err.code(), bugs_error::ErrorCode::Multiple);
    }
}
