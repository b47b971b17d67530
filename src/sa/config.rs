//! SA configuration.

use crate::error::{Result, TspError};

/// Configuration for the Simulated Annealing solver.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(50.0)
///     .with_iterations(20_000)
///     .with_cooling_rate(0.999)
///     .with_random_swap()
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more uphill moves early on.
    pub initial_temperature: f64,

    /// Number of annealing steps.
    pub iterations: usize,

    /// Geometric cooling factor in (0, 1), applied after every step.
    pub cooling_rate: f64,

    /// Rejected steps without a new best after which the search jumps back
    /// to the best tour.
    pub restart_after_iterations: usize,

    /// Jump back to the best tour when the current one is more than this
    /// much longer. `None` disables the distance trigger.
    pub restart_distance_threshold: Option<f64>,

    /// Swap two adjacent positions (`true`) or two random positions.
    pub use_adjacent_swap: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            iterations: 1000,
            cooling_rate: 0.995,
            restart_after_iterations: 50,
            restart_distance_threshold: None,
            use_adjacent_swap: true,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_restart_after_iterations(mut self, n: usize) -> Self {
        self.restart_after_iterations = n;
        self
    }

    pub fn with_restart_distance_threshold(mut self, threshold: f64) -> Self {
        self.restart_distance_threshold = Some(threshold);
        self
    }

    /// Draw both swap positions uniformly instead of swapping neighbors.
    pub fn with_random_swap(mut self) -> Self {
        self.use_adjacent_swap = false;
        self
    }

    pub fn with_adjacent_swap(mut self, adjacent: bool) -> Self {
        self.use_adjacent_swap = adjacent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(TspError::invalid_config(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(TspError::invalid_config(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if let Some(threshold) = self.restart_distance_threshold {
            if threshold.is_nan() || threshold < 0.0 {
                return Err(TspError::invalid_config(format!(
                    "restart_distance_threshold must be non-negative, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}
