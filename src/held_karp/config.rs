//! Held-Karp configuration.

use crate::error::{Result, TspError};

/// Configuration for [`HeldKarpRunner`](super::HeldKarpRunner).
///
/// # Examples
///
/// ```
/// use u_tsp::held_karp::HeldKarpConfig;
///
/// let config = HeldKarpConfig::default().with_memory_limit_bytes(64 << 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldKarpConfig {
    /// Upper bound on the DP table size. Larger instances fail with
    /// [`TspError::Capacity`] instead of allocating.
    pub memory_limit_bytes: u64,

    /// Compute each subset-size layer on the rayon pool.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    /// The result is identical either way.
    pub parallel: bool,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            memory_limit_bytes: 1 << 30,
            parallel: false,
        }
    }
}

impl HeldKarpConfig {
    pub fn with_memory_limit_bytes(mut self, bytes: u64) -> Self {
        self.memory_limit_bytes = bytes;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.memory_limit_bytes == 0 {
            return Err(TspError::invalid_config(
                "memory_limit_bytes must be positive",
            ));
        }
        Ok(())
    }
}
