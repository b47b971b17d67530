//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → mutation → crossover → evaluation → truncation → repeat.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info, trace};
use rand::seq::index;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GaConfig;
use super::operators::{adjacent_swap_mutation, pmx_crossover, random_cut_points};
use crate::cancel::is_cancelled;
use crate::error::Result;
use crate::geometry::{Tour, TspInstance};
use crate::random::create_rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour of the final population.
    pub tour: Tour,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best length of the initial population and after each generation.
    pub length_history: Vec<f64>,
}

/// A population member. Each member owns its order outright.
#[derive(Debug, Clone)]
struct Member {
    order: Vec<usize>,
    length: f64,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, GaRunner};
/// use u_tsp::geometry::TspInstance;
///
/// let instance = TspInstance::from_coords(&[
///     (0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (5.0, 15.0), (15.0, 5.0), (25.0, -5.0),
/// ]).unwrap();
/// let result = GaRunner::run(&instance, &GaConfig::default().with_seed(42)).unwrap();
/// assert!(result.tour.is_permutation_of(6));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run(instance: &TspInstance, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best member so far.
    pub fn run_with_cancel(
        instance: &TspInstance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate()?;

        let n = instance.len();
        info!(
            "genetic: {n} cities, population {}, {} generations, {} mutants + {} children",
            config.population_size,
            config.generations,
            config.mutants_per_generation,
            config.children_per_generation
        );

        // Every ordering of at most three cities is the same cycle.
        if n <= 3 {
            let tour = Tour::from_order(instance, instance.identity_order());
            return Ok(GaResult {
                length_history: vec![tour.length()],
                tour,
                generations: 0,
                cancelled: false,
            });
        }

        let mut rng = create_rng(config.seed);

        // 1. Initialize and evaluate the population
        let initial: Vec<Vec<usize>> = (0..config.population_size)
            .map(|_| instance.random_order(&mut rng))
            .collect();
        let mut population = evaluate(instance, initial, config.parallel);
        sort_population(&mut population);

        let mut length_history = Vec::with_capacity(config.generations + 1);
        length_history.push(population[0].length);

        let mut generations = 0;
        let mut cancelled = false;

        // 2. Evolutionary loop
        for generation in 0..config.generations {
            if is_cancelled(&cancel) {
                debug!("genetic: cancelled after {generation} generations");
                cancelled = true;
                break;
            }

            let mut offspring =
                Vec::with_capacity(config.mutants_per_generation + config.children_per_generation);

            // Mutants: copy a random member, swap two neighbors
            for _ in 0..config.mutants_per_generation {
                let parent = &population[rng.random_range(0..population.len())];
                let mut mutant = parent.order.clone();
                adjacent_swap_mutation(&mut mutant, &mut rng);
                offspring.push(mutant);
            }

            // Children: PMX of two distinct members
            for _ in 0..config.children_per_generation {
                let picks = index::sample(&mut rng, population.len(), 2);
                let (start, end) = random_cut_points(n, &mut rng);
                let child = pmx_crossover(
                    &population[picks.index(0)].order,
                    &population[picks.index(1)].order,
                    start,
                    end,
                )?;
                offspring.push(child);
            }

            // Survival of the fittest
            let previous_best = population[0].length;
            population.extend(evaluate(instance, offspring, config.parallel));
            sort_population(&mut population);
            population.truncate(config.population_size);

            if population[0].length < previous_best {
                trace!(
                    "genetic: new best {:.6} in generation {generation}",
                    population[0].length
                );
            }
            length_history.push(population[0].length);
            generations += 1;
        }

        let best = population.swap_remove(0);
        let tour = Tour::from_order(instance, best.order);
        info!(
            "genetic: length {:.6} after {generations} generations",
            tour.length()
        );

        Ok(GaResult {
            tour,
            generations,
            cancelled,
            length_history,
        })
    }
}

/// Stable ascending sort by length; equal lengths keep insertion order.
fn sort_population(population: &mut [Member]) {
    population.sort_by(|a, b| a.length.total_cmp(&b.length));
}

/// Computes the length of every order.
fn evaluate(instance: &TspInstance, orders: Vec<Vec<usize>>, parallel: bool) -> Vec<Member> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return orders
                .into_par_iter()
                .map(|order| Member {
                    length: instance.tour_length(&order),
                    order,
                })
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    orders
        .into_iter()
        .map(|order| Member {
            length: instance.tour_length(&order),
            order,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
