//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Result, TspError};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 3);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_generations(500)
///     .with_mutants_per_generation(10)
///     .with_children_per_generation(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of members that survive each generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Adjacent-swap mutants added per generation.
    pub mutants_per_generation: usize,

    /// PMX children added per generation.
    pub children_per_generation: usize,

    /// Whether to evaluate new members in parallel using rayon.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 3,
            generations: 100,
            mutants_per_generation: 3,
            children_per_generation: 3,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the number of mutants per generation.
    pub fn with_mutants_per_generation(mut self, n: usize) -> Self {
        self.mutants_per_generation = n;
        self
    }

    /// Sets the number of crossover children per generation.
    pub fn with_children_per_generation(mut self, n: usize) -> Self {
        self.children_per_generation = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::invalid_config("population_size must be at least 1"));
        }
        if self.children_per_generation > 0 && self.population_size < 2 {
            return Err(TspError::invalid_config(
                "crossover needs population_size of at least 2",
            ));
        }
        Ok(())
    }
}
