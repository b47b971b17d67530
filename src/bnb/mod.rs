//! Exact branch-and-bound search.
//!
//! Depth-first enumeration of tours starting at city 0, abandoning any
//! partial route whose accumulated length already reaches the best
//! complete tour. Edge weights are non-negative, so extending a route can
//! only make it longer and the pruning never discards an optimum.
//!
//! Worst case O(n!), usually far less. The search runs on an explicit
//! stack, so call depth does not grow with the city count.
//!
//! # References
//!
//! - Little, Murty, Sweeney & Karel (1963), "An Algorithm for the
//!   Traveling Salesman Problem"

mod config;
mod runner;

pub use config::BnbConfig;
pub use runner::{BnbResult, BnbRunner};
