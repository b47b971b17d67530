//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random tour and put it on the tabu list
//! 2. At each iteration:
//!    a. Sample adjacent-swap positions without replacement
//!    b. Skip candidates that are on the tabu list
//!    c. Move to the shortest remaining candidate, even if it is worse
//!    d. Push the new current tour onto the tabu list
//!    e. Update the global best if improved
//! 3. Stop after the iteration budget

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info, trace};
use rand::seq::index;

use super::config::TabuConfig;
use super::list::TabuList;
use crate::cancel::is_cancelled;
use crate::error::{Result, TspError};
use crate::geometry::{Tour, TspInstance};
use crate::random::create_rng;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best tour found.
    pub tour: Tour,
    /// Total iterations executed.
    pub iterations: usize,
    /// 1-based iteration that found the best tour; 0 if the start tour was
    /// never beaten.
    pub best_iteration: usize,
    /// Iterations in which every sampled neighbor was tabu.
    pub all_tabu_iterations: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
    /// Best length at the start and after each iteration.
    pub length_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::geometry::TspInstance;
    /// use u_tsp::tabu::{TabuConfig, TabuRunner};
    ///
    /// let instance = TspInstance::from_coords(&[
    ///     (0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (5.0, 15.0), (15.0, 5.0), (25.0, -5.0),
    /// ]).unwrap();
    /// let result = TabuRunner::run(&instance, &TabuConfig::default().with_seed(42)).unwrap();
    /// assert!(result.tour.is_permutation_of(6));
    /// ```
    pub fn run(instance: &TspInstance, config: &TabuConfig) -> Result<TabuResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Executes Tabu Search with an optional cancellation token.
    pub fn run_with_cancel(
        instance: &TspInstance,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult> {
        config.validate()?;

        let n = instance.len();
        info!(
            "tabu search: {n} cities, {} iterations, {} neighbors, list size {}",
            config.iterations, config.neighbors_per_iteration, config.tabu_list_max_size
        );

        // Every ordering of at most three cities is the same cycle.
        if n <= 3 {
            let tour = Tour::from_order(instance, instance.identity_order());
            return Ok(TabuResult {
                length_history: vec![tour.length()],
                tour,
                iterations: 0,
                best_iteration: 0,
                all_tabu_iterations: 0,
                cancelled: false,
            });
        }

        if config.neighbors_per_iteration > n {
            return Err(TspError::invalid_input(format!(
                "neighbors_per_iteration {} exceeds the {n} swap positions of the tour",
                config.neighbors_per_iteration
            )));
        }

        let mut rng = create_rng(config.seed);

        let mut current = instance.random_order(&mut rng);
        let mut best = current.clone();
        let mut best_length = instance.tour_length(&current);
        let mut best_iteration = 0;

        let mut tabu = TabuList::new(config.tabu_list_max_size);
        tabu.push(current.clone());

        let mut length_history = Vec::with_capacity(config.iterations + 1);
        length_history.push(best_length);
        let mut all_tabu_iterations = 0;
        let mut cancelled = false;

        for iteration in 0..config.iterations {
            if is_cancelled(&cancel) {
                debug!("tabu search: cancelled after {iteration} iterations");
                cancelled = true;
                break;
            }

            // Best admissible swap position and the resulting length.
            let mut chosen: Option<(usize, f64)> = None;
            for i in index::sample(&mut rng, n, config.neighbors_per_iteration).into_iter() {
                let j = (i + 1) % n;
                current.swap(i, j);
                if !tabu.contains(&current) {
                    let length = instance.tour_length(&current);
                    if chosen.is_none_or(|(_, chosen_length)| length < chosen_length) {
                        chosen = Some((i, length));
                    }
                }
                current.swap(i, j);
            }

            match chosen {
                Some((i, length)) => {
                    current.swap(i, (i + 1) % n);
                    tabu.push(current.clone());

                    if length < best_length {
                        best.copy_from_slice(&current);
                        best_length = length;
                        best_iteration = iteration + 1;
                        trace!("tabu search: new best {best_length:.6} at iteration {iteration}");
                    }
                }
                None => {
                    // Nothing admissible: stay put this iteration.
                    all_tabu_iterations += 1;
                    debug!("tabu search: all sampled neighbors tabu at iteration {iteration}");
                }
            }

            length_history.push(best_length);
        }

        let tour = Tour::from_order(instance, best);
        info!(
            "tabu search: length {:.6}, best at iteration {best_iteration}",
            tour.length()
        );

        Ok(TabuResult {
            tour,
            iterations: length_history.len() - 1,
            best_iteration,
            all_tabu_iterations,
            cancelled,
            length_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(n: usize) -> TspInstance {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                (50.0 * a.cos(), 50.0 * a.sin())
            })
            .collect();
        TspInstance::from_coords(&coords).unwrap()
    }

    #[test]
    fn test_tabu_returns_permutation() {
        let instance = circle(9);
        let result = TabuRunner::run(&instance, &TabuConfig::default().with_seed(42)).unwrap();
        assert!(result.tour.is_permutation_of(9));
        assert_eq!(result.iterations, 1000);
        assert!(
            (result.tour.length() - instance.tour_length(result.tour.order())).abs() < 1e-9
        );
    }

    #[test]
    fn test_tabu_length_history_non_increasing() {
        let config = TabuConfig::default().with_iterations(300).with_seed(42);
        let result = TabuRunner::run(&circle(10), &config).unwrap();
        assert_eq!(result.length_history.len(), 301);
        for window in result.length_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best length history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_tabu_best_iteration_recorded() {
        let config = TabuConfig::default().with_iterations(200).with_seed(42);
        let result = TabuRunner::run(&circle(8), &config).unwrap();
        assert!(
            result.best_iteration <= result.iterations,
            "best_iteration {} should be <= total iterations {}",
            result.best_iteration,
            result.iterations
        );
    }

    #[test]
    fn test_tabu_best_iteration_matches_history() {
        // history[k] is the best length after k iterations, so the first
        // entry equal to the final best marks the improving iteration.
        for seed in 0..20 {
            let config = TabuConfig::default().with_iterations(5).with_seed(seed);
            let result = TabuRunner::run(&circle(8), &config).unwrap();
            let best = *result.length_history.last().unwrap();
            let first = result
                .length_history
                .iter()
                .position(|&length| length == best)
                .unwrap();
            assert_eq!(result.best_iteration, first, "seed {seed}");
        }
    }

    #[test]
    fn test_tabu_best_iteration_zero_without_iterations() {
        let config = TabuConfig::default().with_iterations(0).with_seed(1);
        let result = TabuRunner::run(&circle(8), &config).unwrap();
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_tabu_all_neighbors_tabu_keeps_current() {
        // Four cities have 24 orderings and four swap positions; with a list
        // that never forgets, the walk runs out of admissible moves.
        let instance =
            TspInstance::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0), (0.0, 4.0)]).unwrap();
        let config = TabuConfig::default()
            .with_iterations(200)
            .with_neighbors_per_iteration(4)
            .with_tabu_list_max_size(1000)
            .with_seed(5);
        let result = TabuRunner::run(&instance, &config).unwrap();
        assert!(result.all_tabu_iterations > 0);
        assert!(result.tour.is_permutation_of(4));
        assert!((result.tour.length() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_tabu_too_many_neighbors() {
        let config = TabuConfig::default().with_neighbors_per_iteration(6);
        let err = TabuRunner::run(&circle(5), &config).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_tabu_neighbor_bound_skipped_for_tiny_instances() {
        let two = TspInstance::from_coords(&[(0.0, 0.0), (10.0, 0.0)]).unwrap();
        let config = TabuConfig::default().with_neighbors_per_iteration(100);
        let result = TabuRunner::run(&two, &config).unwrap();
        assert!((result.tour.length() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_tabu_tiny_instances() {
        let two = TspInstance::from_coords(&[(0.0, 0.0), (10.0, 0.0)]).unwrap();
        let result = TabuRunner::run(&two, &TabuConfig::default()).unwrap();
        assert!((result.tour.length() - 20.0).abs() < 1e-12);

        let one = TspInstance::from_coords(&[(7.0, 7.0)]).unwrap();
        let result = TabuRunner::run(&one, &TabuConfig::default()).unwrap();
        assert_eq!(result.tour.length(), 0.0);
    }

    #[test]
    fn test_tabu_same_seed_same_tour() {
        let config = TabuConfig::default().with_seed(11);
        let a = TabuRunner::run(&circle(12), &config).unwrap();
        let b = TabuRunner::run(&circle(12), &config).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.best_iteration, b.best_iteration);
    }

    #[test]
    fn test_tabu_cancellation() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result = TabuRunner::run_with_cancel(
            &circle(10),
            &TabuConfig::default().with_seed(1),
            Some(cancel),
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }
}
