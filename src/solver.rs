//! Name-based dispatch over the five solvers.
//!
//! ```
//! use u_tsp::geometry::TspInstance;
//! use u_tsp::solver::{solve, Algorithm};
//!
//! let instance = TspInstance::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]).unwrap();
//! let algorithm: Algorithm = "held_karp".parse().unwrap();
//! let tour = solve(algorithm, &instance).unwrap();
//! assert!((tour.length() - 12.0).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::bnb::{BnbConfig, BnbRunner};
use crate::error::{Result, TspError};
use crate::ga::{GaConfig, GaRunner};
use crate::geometry::{Tour, TspInstance};
use crate::held_karp::{HeldKarpConfig, HeldKarpRunner};
use crate::sa::{SaConfig, SaRunner};
use crate::tabu::{TabuConfig, TabuRunner};

/// One of the available solving strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    /// Exact branch-and-bound.
    BruteForce,
    /// Exact Held-Karp dynamic programming.
    HeldKarp,
    /// Simulated annealing.
    SimulatedAnnealing,
    /// Tabu search.
    Tabu,
    /// Genetic algorithm with PMX.
    Genetic,
}

impl Algorithm {
    /// Every strategy, exact ones first.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BruteForce,
        Algorithm::HeldKarp,
        Algorithm::SimulatedAnnealing,
        Algorithm::Tabu,
        Algorithm::Genetic,
    ];

    /// The name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "brute_force",
            Algorithm::HeldKarp => "held_karp",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::Tabu => "tabu",
            Algorithm::Genetic => "genetic",
        }
    }

    /// Whether the strategy always returns an optimal tour.
    pub fn is_exact(self) -> bool {
        matches!(self, Algorithm::BruteForce | Algorithm::HeldKarp)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| TspError::invalid_input(format!("unknown algorithm '{s}'")))
    }
}

/// Runs `algorithm` on `instance` with its default configuration.
///
/// The heuristics draw a fresh seed on every call.
pub fn solve(algorithm: Algorithm, instance: &TspInstance) -> Result<Tour> {
    let tour = match algorithm {
        Algorithm::BruteForce => BnbRunner::run(instance, &BnbConfig::default())?.tour,
        Algorithm::HeldKarp => HeldKarpRunner::run(instance, &HeldKarpConfig::default())?.tour,
        Algorithm::SimulatedAnnealing => SaRunner::run(instance, &SaConfig::default())?.tour,
        Algorithm::Tabu => TabuRunner::run(instance, &TabuConfig::default())?.tour,
        Algorithm::Genetic => GaRunner::run(instance, &GaConfig::default())?.tour,
    };
    Ok(tour)
}
