//! Solvers for the symmetric Euclidean Travelling Salesman Problem.
//!
//! Two exact algorithms and three metaheuristics over one shared geometry
//! kernel:
//!
//! - **Branch-and-Bound (`bnb`)**: Exhaustive depth-first search that
//!   abandons partial routes as soon as they reach the best known length.
//! - **Held-Karp (`held_karp`)**: Bitmask dynamic programming, O(n²·2ⁿ),
//!   with a memory guard checked before allocation.
//! - **Simulated Annealing (SA)**: Swap-neighborhood annealing with
//!   geometric cooling and restarts to the best tour.
//! - **Tabu Search (TS)**: Greedy adjacent-swap search with a bounded FIFO
//!   of recently visited tours.
//! - **Genetic Algorithm (GA)**: Adjacent-swap mutants and partially-mapped
//!   crossover (PMX) children under elitist truncation.
//!
//! # Architecture
//!
//! Every solver takes a validated [`geometry::TspInstance`] and returns a
//! [`geometry::Tour`]: a permutation of city indices with its closed-cycle
//! length. Cities are identified by index, so duplicate coordinates are
//! distinct cities. The [`solver`] module dispatches over the five
//! strategies by name.
//!
//! # Example
//!
//! ```
//! use u_tsp::geometry::TspInstance;
//! use u_tsp::held_karp::{HeldKarpConfig, HeldKarpRunner};
//!
//! let instance = TspInstance::from_coords(&[
//!     (0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (5.0, 15.0), (15.0, 5.0), (25.0, -5.0),
//! ]).unwrap();
//! let result = HeldKarpRunner::run(&instance, &HeldKarpConfig::default()).unwrap();
//! assert!((result.tour.length() - 92.4732132289751).abs() < 1e-9);
//! ```

pub mod bnb;
mod cancel;
pub mod error;
pub mod ga;
pub mod geometry;
pub mod held_karp;
mod random;
pub mod sa;
pub mod solver;
pub mod tabu;

pub use error::{Result, TspError};
