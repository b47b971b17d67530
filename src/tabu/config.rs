//! Tabu Search configuration.

use crate::error::{Result, TspError};

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_iterations(5000)
///     .with_neighbors_per_iteration(4)
///     .with_tabu_list_max_size(20);
/// assert_eq!(config.iterations, 5000);
/// assert_eq!(config.tabu_list_max_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Number of iterations.
    pub iterations: usize,
    /// Adjacent-swap candidates sampled per iteration, at distinct positions.
    ///
    /// Must not exceed the city count. Instances of at most three cities
    /// return before the search starts, so the bound is not checked for
    /// them.
    pub neighbors_per_iteration: usize,
    /// Maximum number of tours kept on the tabu list.
    pub tabu_list_max_size: usize,
    /// Random seed (None for entropy).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            neighbors_per_iteration: 3,
            tabu_list_max_size: 10,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets how many neighbors are sampled per iteration.
    pub fn with_neighbors_per_iteration(mut self, n: usize) -> Self {
        self.neighbors_per_iteration = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_list_max_size(mut self, n: usize) -> Self {
        self.tabu_list_max_size = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.neighbors_per_iteration == 0 {
            return Err(TspError::invalid_config(
                "neighbors_per_iteration must be at least 1",
            ));
        }
        if self.tabu_list_max_size == 0 {
            return Err(TspError::invalid_config(
                "tabu_list_max_size must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.neighbors_per_iteration, 3);
        assert_eq!(config.tabu_list_max_size, 10);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_iterations(10)
            .with_neighbors_per_iteration(5)
            .with_tabu_list_max_size(2)
            .with_seed(123);

        assert_eq!(config.iterations, 10);
        assert_eq!(config.neighbors_per_iteration, 5);
        assert_eq!(config.tabu_list_max_size, 2);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(TabuConfig::default()
            .with_neighbors_per_iteration(0)
            .validate()
            .is_err());
        assert!(TabuConfig::default()
            .with_tabu_list_max_size(0)
            .validate()
            .is_err());
    }
}
