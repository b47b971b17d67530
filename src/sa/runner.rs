//! SA execution loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info, trace};
use rand::Rng;

use super::config::SaConfig;
use crate::cancel::is_cancelled;
use crate::error::Result;
use crate::geometry::{Tour, TspInstance};
use crate::random::create_rng;

/// Steps between two samples of the best-length history.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best tour found.
    pub tour: Tour,

    /// Steps actually executed.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Times the search was reset to the best tour.
    pub restarts: usize,

    /// Temperature after the last step.
    pub final_temperature: f64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best length sampled every 100 steps, plus the final value.
    pub length_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::geometry::TspInstance;
    /// use u_tsp::sa::{SaConfig, SaRunner};
    ///
    /// let instance = TspInstance::from_coords(&[
    ///     (0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (5.0, 15.0), (15.0, 5.0), (25.0, -5.0),
    /// ]).unwrap();
    /// let result = SaRunner::run(&instance, &SaConfig::default().with_seed(42)).unwrap();
    /// assert!(result.tour.is_permutation_of(6));
    /// ```
    pub fn run(instance: &TspInstance, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs SA with an optional cancellation token.
    ///
    /// A cancelled run still returns the best tour seen, with
    /// `cancelled` set.
    pub fn run_with_cancel(
        instance: &TspInstance,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        config.validate()?;

        let n = instance.len();
        info!(
            "simulated annealing: {n} cities, {} iterations, T0 {}, cooling {}",
            config.iterations, config.initial_temperature, config.cooling_rate
        );

        // Every ordering of at most three cities is the same cycle.
        if n <= 3 {
            let tour = Tour::from_order(instance, instance.identity_order());
            return Ok(SaResult {
                length_history: vec![tour.length()],
                tour,
                iterations: 0,
                accepted_moves: 0,
                improving_moves: 0,
                restarts: 0,
                final_temperature: config.initial_temperature,
                cancelled: false,
            });
        }

        let mut rng = create_rng(config.seed);

        let mut current = instance.random_order(&mut rng);
        let mut current_length = instance.tour_length(&current);
        let mut best = current.clone();
        let mut best_length = current_length;

        let mut temperature = config.initial_temperature;
        let mut since_best = 0usize;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut restarts = 0usize;
        let mut cancelled = false;

        let mut length_history = vec![best_length];

        for _ in 0..config.iterations {
            if is_cancelled(&cancel) {
                debug!("simulated annealing: cancelled after {iterations} iterations");
                cancelled = true;
                break;
            }

            let (i, j) = if config.use_adjacent_swap {
                let i = rng.random_range(0..n);
                (i, (i + 1) % n)
            } else {
                distinct_pair(n, &mut rng)
            };

            // Evaluate the neighbor in place; undone below if rejected.
            current.swap(i, j);
            let candidate_length = instance.tour_length(&current);

            let accept = if candidate_length < current_length {
                improving_moves += 1;
                true
            } else {
                let probability =
                    acceptance_probability(current_length, candidate_length, temperature);
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current_length = candidate_length;
                accepted_moves += 1;
            } else {
                current.swap(i, j);
                let drifted = config
                    .restart_distance_threshold
                    .is_some_and(|limit| current_length - best_length > limit);
                if since_best > config.restart_after_iterations || drifted {
                    current.copy_from_slice(&best);
                    current_length = best_length;
                    restarts += 1;
                    debug!(
                        "simulated annealing: restart at iteration {iterations} (since best {since_best})"
                    );
                }
            }

            if current_length < best_length {
                best.copy_from_slice(&current);
                best_length = current_length;
                since_best = 0;
                trace!("simulated annealing: new best {best_length:.6} at iteration {iterations}");
            } else {
                since_best += 1;
            }

            temperature *= config.cooling_rate;
            iterations += 1;

            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                length_history.push(best_length);
            }
        }

        if length_history
            .last()
            .is_none_or(|&last| (last - best_length).abs() > 1e-15)
        {
            length_history.push(best_length);
        }

        let tour = Tour::from_order(instance, best);
        info!(
            "simulated annealing: length {:.6}, {accepted_moves} accepted, {restarts} restarts",
            tour.length()
        );

        Ok(SaResult {
            tour,
            iterations,
            accepted_moves,
            improving_moves,
            restarts,
            final_temperature: temperature,
            cancelled,
            length_history,
        })
    }
}

/// Metropolis probability of moving from `current` to a candidate that is
/// not shorter.
///
/// The exponent `(current - candidate) / temperature` is never positive, so
/// the result lies in (0, 1]; it is 0 only once the temperature has
/// underflowed to zero.
fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    ((current - candidate) / temperature).exp()
}

/// Two distinct positions in `0..n`, uniformly. Requires `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
