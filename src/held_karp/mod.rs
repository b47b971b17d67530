//! Held-Karp exact dynamic programming.
//!
//! Computes a provably optimal tour in O(n²·2ⁿ) time and O(n·2ⁿ) memory
//! by tabulating, for every subset of cities and every possible last city,
//! the shortest path from city 0 through exactly that subset. Subsets are
//! processed by increasing size, and each size only reads the previous
//! one.
//!
//! Tractable for a few tens of cities at most. The table size is checked
//! against [`HeldKarpConfig::memory_limit_bytes`] before anything is
//! allocated.
//!
//! # References
//!
//! - Bellman (1962), "Dynamic Programming Treatment of the Travelling
//!   Salesman Problem"
//! - Held & Karp (1962), "A Dynamic Programming Approach to Sequencing
//!   Problems"

mod config;
mod runner;

pub use config::HeldKarpConfig;
pub use runner::{required_table_bytes, HeldKarpResult, HeldKarpRunner, MAX_CITIES};
