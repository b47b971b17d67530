//! Held-Karp table construction and route reconstruction.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::HeldKarpConfig;
use crate::cancel::is_cancelled;
use crate::error::{Result, TspError};
use crate::geometry::{Tour, TspInstance};

/// Largest instance the `u64` subset masks can address.
///
/// City 0 is the fixed start and needs no bit, so 64 cities use 63 bits.
pub const MAX_CITIES: usize = 64;

/// Bytes per table entry: the distance and the predecessor city.
const ENTRY_BYTES: u128 = (std::mem::size_of::<f64>() + std::mem::size_of::<u8>()) as u128;

/// Result of a Held-Karp run.
#[derive(Debug, Clone)]
pub struct HeldKarpResult {
    /// An optimal tour, starting at city 0.
    pub tour: Tour,

    /// Number of (subset, last city) entries filled in.
    pub states: u64,
}

/// Bytes the DP table needs for `cities` cities.
///
/// Saturates at `u128::MAX` instead of overflowing.
pub fn required_table_bytes(cities: usize) -> u128 {
    if cities < 2 {
        return 0;
    }
    let width = cities - 1;
    if width >= 127 {
        return u128::MAX;
    }
    (1u128 << width)
        .saturating_mul(width as u128)
        .saturating_mul(ENTRY_BYTES)
}

/// Executes the Held-Karp dynamic program.
pub struct HeldKarpRunner;

impl HeldKarpRunner {
    /// Finds an optimal tour.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::geometry::TspInstance;
    /// use u_tsp::held_karp::{HeldKarpConfig, HeldKarpRunner};
    ///
    /// let instance = TspInstance::from_coords(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
    /// let result = HeldKarpRunner::run(&instance, &HeldKarpConfig::default()).unwrap();
    /// assert!((result.tour.length() - 4.0).abs() < 1e-12);
    /// ```
    pub fn run(instance: &TspInstance, config: &HeldKarpConfig) -> Result<HeldKarpResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs Held-Karp with an optional cancellation token, checked between
    /// subset-size layers.
    pub fn run_with_cancel(
        instance: &TspInstance,
        config: &HeldKarpConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HeldKarpResult> {
        config.validate()?;

        let n = instance.len();
        let required_bytes = required_table_bytes(n);
        if n > MAX_CITIES || required_bytes > config.memory_limit_bytes as u128 {
            return Err(TspError::Capacity {
                cities: n,
                required_bytes,
                limit_bytes: config.memory_limit_bytes,
            });
        }

        info!("held-karp: {n} cities, {required_bytes} bytes of table");

        if n == 1 {
            return Ok(HeldKarpResult {
                tour: Tour::from_order(instance, vec![0]),
                states: 0,
            });
        }

        let mut table = DpTable::new(n).ok_or(TspError::Capacity {
            cities: n,
            required_bytes,
            limit_bytes: config.memory_limit_bytes,
        })?;
        let width = table.width as u32;
        let mut states = 0u64;

        // Singletons: straight from the start.
        for city in 1..n {
            table.set(1 << (city - 1), city, instance.distance(0, city), 0);
            states += 1;
        }

        for size in 2..=width {
            if is_cancelled(&cancel) {
                debug!("held-karp: cancelled before layer {size}");
                return Err(TspError::Cancelled);
            }
            states += fill_layer(instance, &mut table, size, config.parallel);
            debug!("held-karp: layer {size}/{width} done");
        }

        // Close the loop back to city 0.
        let full = table.full_mask();
        let mut best_length = f64::INFINITY;
        let mut best_last = 1;
        for last in 1..n {
            let length = table.cost(full, last) + instance.distance(last, 0);
            if length < best_length {
                best_length = length;
                best_last = last;
            }
        }

        let tour = Tour::from_order(instance, table.reconstruct(best_last));
        info!("held-karp: length {:.6}, {states} states", tour.length());

        Ok(HeldKarpResult { tour, states })
    }
}

/// Dense table over `(subset of cities 1..n, last city)`.
///
/// Bit `c - 1` of a mask stands for city `c`.
struct DpTable {
    cost: Vec<f64>,
    parent: Vec<u8>,
    width: usize,
}

impl DpTable {
    /// `None` if the entry count does not fit in `usize`.
    fn new(cities: usize) -> Option<Self> {
        let width = cities - 1;
        let entries = 1usize.checked_shl(width as u32)?.checked_mul(width)?;
        Some(Self {
            cost: vec![f64::INFINITY; entries],
            parent: vec![0; entries],
            width,
        })
    }

    fn full_mask(&self) -> u64 {
        (1u64 << self.width) - 1
    }

    #[inline]
    fn index(&self, mask: u64, city: usize) -> usize {
        mask as usize * self.width + (city - 1)
    }

    #[inline]
    fn cost(&self, mask: u64, city: usize) -> f64 {
        self.cost[self.index(mask, city)]
    }

    #[inline]
    fn set(&mut self, mask: u64, city: usize, cost: f64, parent: usize) {
        let idx = self.index(mask, city);
        self.cost[idx] = cost;
        self.parent[idx] = parent as u8;
    }

    /// Walks predecessors back from `last` and returns the tour from city 0.
    fn reconstruct(&self, last: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.width + 1);
        let mut mask = self.full_mask();
        let mut city = last;
        while city != 0 {
            order.push(city);
            let prev = self.parent[self.index(mask, city)] as usize;
            mask &= !(1u64 << (city - 1));
            city = prev;
        }
        order.push(0);
        order.reverse();
        order
    }
}

/// One computed entry: (last city, cost, predecessor).
type Entry = (usize, f64, usize);

/// Best way to cover exactly `mask`, for each possible last city.
///
/// Reads only entries of `mask` minus one city. Ties go to the lowest
/// predecessor index.
fn solve_subset(instance: &TspInstance, table: &DpTable, mask: u64, out: &mut Vec<Entry>) {
    out.clear();
    for end_bit in bits(mask) {
        let end = end_bit + 1;
        let without_end = mask & !(1u64 << end_bit);
        let mut best = f64::INFINITY;
        let mut best_prev = 0;
        for prev_bit in bits(without_end) {
            let prev = prev_bit + 1;
            let cost = table.cost(without_end, prev) + instance.distance(prev, end);
            if cost < best {
                best = cost;
                best_prev = prev;
            }
        }
        out.push((end, best, best_prev));
    }
}

/// Fills every subset of `size` cities. Returns the number of entries set.
fn fill_layer(instance: &TspInstance, table: &mut DpTable, size: u32, parallel: bool) -> u64 {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return fill_layer_parallel(instance, table, size);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    let mut filled = 0u64;
    let mut entries = Vec::with_capacity(size as usize);
    for mask in subsets_of_size(size, table.width as u32) {
        solve_subset(instance, table, mask, &mut entries);
        for &(end, cost, prev) in &entries {
            table.set(mask, end, cost, prev);
            filled += 1;
        }
    }
    filled
}

/// Same as the sequential path, with the subsets of the layer spread over
/// the rayon pool and written back in enumeration order.
#[cfg(feature = "parallel")]
fn fill_layer_parallel(instance: &TspInstance, table: &mut DpTable, size: u32) -> u64 {
    let masks: Vec<u64> = subsets_of_size(size, table.width as u32).collect();
    let shared: &DpTable = table;
    let computed: Vec<(u64, Vec<Entry>)> = masks
        .par_iter()
        .map(|&mask| {
            let mut entries = Vec::with_capacity(size as usize);
            solve_subset(instance, shared, mask, &mut entries);
            (mask, entries)
        })
        .collect();

    let mut filled = 0u64;
    for (mask, entries) in computed {
        for (end, cost, prev) in entries {
            table.set(mask, end, cost, prev);
            filled += 1;
        }
    }
    filled
}

/// Indices of the set bits of `mask`, lowest first.
fn bits(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let bit = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(bit)
    })
}

/// All `width`-bit masks with exactly `size` bits set, in increasing order
/// (Gosper's hack).
fn subsets_of_size(size: u32, width: u32) -> impl Iterator<Item = u64> {
    let limit = 1u64 << width;
    let mut next = if size == 0 || size > width {
        None
    } else {
        Some((1u64 << size) - 1)
    };
    std::iter::from_fn(move || {
        let current = next?;
        if current >= limit {
            next = None;
            return None;
        }
        let lowest = current & current.wrapping_neg();
        let ripple = current.wrapping_add(lowest);
        next = if ripple == 0 {
            None
        } else {
            Some((((ripple ^ current) >> 2) / lowest) | ripple)
        };
        Some(current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::{BnbConfig, BnbRunner};

    fn six_cities() -> TspInstance {
        TspInstance::from_coords(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (20.0, 20.0),
            (5.0, 15.0),
            (15.0, 5.0),
            (25.0, -5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_subsets_of_size_counts() {
        let masks: Vec<u64> = subsets_of_size(2, 4).collect();
        assert_eq!(masks, vec![0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]);
        assert_eq!(subsets_of_size(3, 10).count(), 120);
        assert_eq!(subsets_of_size(5, 5).collect::<Vec<_>>(), vec![0b11111]);
        assert_eq!(subsets_of_size(6, 5).count(), 0);
    }

    #[test]
    fn test_bits() {
        assert_eq!(bits(0b1010_0001).collect::<Vec<_>>(), vec![0, 5, 7]);
        assert_eq!(bits(0).count(), 0);
    }

    #[test]
    fn test_six_city_regression_baseline() {
        let result = HeldKarpRunner::run(&six_cities(), &HeldKarpConfig::default()).unwrap();
        assert!(
            (result.tour.length() - 92.4732132289751).abs() < 1e-9,
            "got {}",
            result.tour.length()
        );
        assert!(result.tour.is_permutation_of(6));
        assert_eq!(result.tour.order()[0], 0);
        // 5 singletons + C(5,k)*k for k = 2..=5
        assert_eq!(result.states, 5 + 20 + 30 + 20 + 5);
    }

    #[test]
    fn test_matches_branch_and_bound_exactly() {
        let instance = six_cities();
        let hk = HeldKarpRunner::run(&instance, &HeldKarpConfig::default()).unwrap();
        let bnb = BnbRunner::run(&instance, &BnbConfig::default()).unwrap();
        assert_eq!(hk.tour.length(), bnb.tour.length());
    }

    #[test]
    fn test_single_and_two_cities() {
        let one = TspInstance::from_coords(&[(1.0, 1.0)]).unwrap();
        let result = HeldKarpRunner::run(&one, &HeldKarpConfig::default()).unwrap();
        assert_eq!(result.tour.order(), &[0]);
        assert_eq!(result.tour.length(), 0.0);

        let two = TspInstance::from_coords(&[(0.0, 0.0), (10.0, 0.0)]).unwrap();
        let result = HeldKarpRunner::run(&two, &HeldKarpConfig::default()).unwrap();
        assert_eq!(result.tour.order(), &[0, 1]);
        assert!((result.tour.length() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_error_before_allocation() {
        let coords: Vec<(f64, f64)> = (0..30).map(|i| (i as f64, (i * i) as f64)).collect();
        let instance = TspInstance::from_coords(&coords).unwrap();
        let err = HeldKarpRunner::run(&instance, &HeldKarpConfig::default()).unwrap_err();
        match err {
            TspError::Capacity {
                cities,
                required_bytes,
                limit_bytes,
            } => {
                assert_eq!(cities, 30);
                assert_eq!(required_bytes, (1u128 << 29) * 29 * 9);
                assert_eq!(limit_bytes, 1 << 30);
            }
            other => panic!("expected capacity error, got {other:?}"),
        }
    }

    #[test]
    fn test_capacity_error_beyond_mask_width() {
        let coords: Vec<(f64, f64)> = (0..70).map(|i| (i as f64, 0.0)).collect();
        let instance = TspInstance::from_coords(&coords).unwrap();
        let config = HeldKarpConfig::default().with_memory_limit_bytes(u64::MAX);
        assert!(matches!(
            HeldKarpRunner::run(&instance, &config),
            Err(TspError::Capacity { cities: 70, .. })
        ));
    }

    #[test]
    fn test_required_table_bytes() {
        assert_eq!(required_table_bytes(1), 0);
        assert_eq!(required_table_bytes(2), 18);
        assert_eq!(required_table_bytes(6), 32 * 5 * 9);
        assert_eq!(required_table_bytes(500), u128::MAX);
    }

    #[test]
    fn test_cancellation() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            HeldKarpRunner::run_with_cancel(&six_cities(), &HeldKarpConfig::default(), Some(cancel));
        assert_eq!(result.unwrap_err(), TspError::Cancelled);
    }

    #[test]
    fn test_parallel_flag_gives_same_tour() {
        let coords: Vec<(f64, f64)> = (0..9)
            .map(|i| {
                let a = i as f64 * 2.4;
                (a.cos() * (5.0 + i as f64), a.sin() * 7.0)
            })
            .collect();
        let instance = TspInstance::from_coords(&coords).unwrap();
        let sequential = HeldKarpRunner::run(&instance, &HeldKarpConfig::default()).unwrap();
        let parallel =
            HeldKarpRunner::run(&instance, &HeldKarpConfig::default().with_parallel(true)).unwrap();
        assert_eq!(sequential.tour, parallel.tour);
        assert_eq!(sequential.states, parallel.states);
    }
}
