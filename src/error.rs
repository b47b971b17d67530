//! Error type shared by every solver.

use thiserror::Error;

/// Errors reported by instance construction and the solvers.
///
/// Every failure is returned from the `run` call itself; a solver never
/// hands back a tour alongside an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TspError {
    /// The caller supplied data the solver cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The Held-Karp table would not fit. Raised before allocating.
    #[error(
        "instance of {cities} cities needs {required_bytes} bytes of DP table, limit is {limit_bytes}"
    )]
    Capacity {
        cities: usize,
        /// Saturates at `u128::MAX` for absurdly large instances.
        required_bytes: u128,
        limit_bytes: u64,
    },

    /// An exact solver was stopped by its cancellation flag.
    #[error("search cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
