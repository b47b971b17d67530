//! Simulated Annealing (SA).
//!
//! Swap-neighborhood annealing over tours. Shorter neighbors are always
//! taken; longer ones with probability `exp((current - candidate) / T)`,
//! which shrinks as the temperature cools geometrically. A stagnating or
//! drifting search is pulled back to the best tour seen so far.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
