//! Tabu Search (TS).
//!
//! Greedy adjacent-swap search that always moves to the best sampled
//! neighbor not on the tabu list, even when it is longer than the current
//! tour. The list remembers the most recently accepted tours and forgets
//! the oldest first, so the search cannot immediately cycle back.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search, Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod list;
mod runner;

pub use config::TabuConfig;
pub use list::TabuList;
pub use runner::{TabuResult, TabuRunner};
