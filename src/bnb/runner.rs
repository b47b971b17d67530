//! Branch-and-bound execution loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info, trace};

use super::config::BnbConfig;
use crate::cancel::is_cancelled;
use crate::error::{Result, TspError};
use crate::geometry::{Tour, TspInstance, VisitedSet};

/// Expanded nodes between two looks at the cancellation flag.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Result of a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// An optimal tour, starting at city 0.
    pub tour: Tour,

    /// Partial routes pushed onto the search stack.
    pub nodes_expanded: u64,

    /// Extensions discarded because they already reached the incumbent.
    pub pruned: u64,

    /// Number of times a shorter complete tour replaced the incumbent.
    pub improvements: u64,
}

/// Executes the exact branch-and-bound search.
pub struct BnbRunner;

impl BnbRunner {
    /// Finds an optimal tour.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::bnb::{BnbConfig, BnbRunner};
    /// use u_tsp::geometry::TspInstance;
    ///
    /// let instance = TspInstance::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
    /// let result = BnbRunner::run(&instance, &BnbConfig::default()).unwrap();
    /// assert!((result.tour.length() - 4.0).abs() < 1e-12);
    /// ```
    pub fn run(instance: &TspInstance, config: &BnbConfig) -> Result<BnbResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// A cancelled search returns [`TspError::Cancelled`]: the incumbent
    /// at that point carries no optimality guarantee.
    pub fn run_with_cancel(
        instance: &TspInstance,
        config: &BnbConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BnbResult> {
        config.validate()?;

        let n = instance.len();
        info!("branch-and-bound: {n} cities");

        // Incumbent starts as the input order.
        let mut best_order = instance.identity_order();
        let mut best_length = instance.tour_length(&best_order);

        let mut nodes_expanded = 0u64;
        let mut pruned = 0u64;
        let mut improvements = 0u64;

        if n > 1 {
            // Explicit stack. `route` is the arena shared by all frames;
            // frame `d` owns `cursor[d]` (next candidate for position d)
            // and `partial[d]` (length of route[..=d]).
            let mut route: Vec<usize> = Vec::with_capacity(n);
            let mut visited = VisitedSet::with_capacity(n);
            let mut cursor = vec![0usize; n];
            let mut partial = vec![0.0f64; n];

            route.push(0);
            visited.insert(0);
            cursor[1] = 1;

            loop {
                let depth = route.len();

                if depth == n {
                    let total = partial[n - 1] + instance.distance(route[n - 1], 0);
                    if total < best_length {
                        best_length = total;
                        best_order.copy_from_slice(&route);
                        improvements += 1;
                        trace!("branch-and-bound: new incumbent {best_length:.6}");
                    }
                    if let Some(city) = route.pop() {
                        visited.remove(city);
                    }
                    continue;
                }

                let last = route[depth - 1];
                let mut next = None;
                while cursor[depth] < n {
                    let city = cursor[depth];
                    cursor[depth] += 1;
                    if visited.contains(city) {
                        continue;
                    }
                    let extended = partial[depth - 1] + instance.distance(last, city);
                    if extended >= best_length {
                        pruned += 1;
                        continue;
                    }
                    next = Some((city, extended));
                    break;
                }

                match next {
                    Some((city, extended)) => {
                        if nodes_expanded % CANCEL_CHECK_INTERVAL == 0 && is_cancelled(&cancel) {
                            debug!("branch-and-bound: cancelled after {nodes_expanded} nodes");
                            return Err(TspError::Cancelled);
                        }
                        nodes_expanded += 1;
                        route.push(city);
                        visited.insert(city);
                        partial[depth] = extended;
                        if depth + 1 < n {
                            cursor[depth + 1] = 1;
                        }
                    }
                    None => {
                        if depth == 1 {
                            break;
                        }
                        if let Some(city) = route.pop() {
                            visited.remove(city);
                        }
                    }
                }
            }
        }

        let tour = Tour::from_order(instance, best_order);
        info!(
            "branch-and-bound: length {:.6}, {nodes_expanded} nodes, {pruned} pruned",
            tour.length()
        );

        Ok(BnbResult {
            tour,
            nodes_expanded,
            pruned,
            improvements,
        })
    }
}
