//! Genetic Algorithm with partially-mapped crossover.
//!
//! Each generation adds adjacent-swap mutants and PMX children to the
//! population, sorts everything by tour length and keeps the best
//! `population_size` members. Survival is strictly elitist, so the best
//! member never gets worse from one generation to the next.
//!
//! # Submodules
//!
//! - [`operators`]: PMX crossover, cut-point sampling and swap mutation on
//!   index permutations
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

mod config;
pub mod operators;
mod runner;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
