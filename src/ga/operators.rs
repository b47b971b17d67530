//! Permutation operators for tour chromosomes.
//!
//! All operators work on `&[usize]` index permutations of `0..n`.
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves the
//!   absolute positions of a parental segment
//! - [`random_cut_points`]: picks the half-open PMX segment
//! - [`adjacent_swap_mutation`]: exchanges two neighboring positions, O(1)

use rand::seq::index;
use rand::Rng;

use crate::error::{Result, TspError};

// ============================================================================
// Crossover
// ============================================================================

/// Partially Mapped Crossover (PMX) with explicit cut points.
///
/// # Algorithm (Goldberg & Lingle, 1985)
///
/// 1. Copy `parent1[start..end]` into the child at the same positions
/// 2. For each position `k` of the segment whose `parent2` city is not in
///    the copied segment, follow the mapping chain
///    `parent1[k] -> position of that city in parent2 -> ...` until it
///    leaves the segment, and put the city there
/// 3. Fill the remaining positions with the cities of `parent2` not yet
///    placed, scanning `parent2` left to right
///
/// # Errors
///
/// `InvalidInput` if the parents differ in length, are not permutations of
/// `0..n`, or the segment is empty or runs past the end.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::operators::pmx_crossover;
///
/// let child = pmx_crossover(&[0, 1, 2, 3, 4], &[1, 2, 0, 4, 3], 1, 3).unwrap();
/// assert_eq!(&child[1..3], &[1, 2]);
/// ```
///
/// # Complexity
/// O(n) time, O(n) space
pub fn pmx_crossover(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Result<Vec<usize>> {
    let n = parent1.len();
    if parent2.len() != n {
        return Err(TspError::invalid_input(format!(
            "parents must have equal length, got {n} and {}",
            parent2.len()
        )));
    }
    if start >= end || end > n {
        return Err(TspError::invalid_input(format!(
            "cut points ({start}, {end}) do not delimit a segment of a {n}-city tour"
        )));
    }
    // Position lookups double as permutation checks.
    positions(parent1)?;
    let in_parent2 = positions(parent2)?;

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut in_segment = vec![false; n];

    // Step 1: copy segment from parent1
    for k in start..end {
        child[k] = Some(parent1[k]);
        in_segment[parent1[k]] = true;
    }

    // Step 2: relocate displaced parent2 cities through the mapping chain
    for k in start..end {
        let city = parent2[k];
        if in_segment[city] {
            continue;
        }
        let mut slot = k;
        loop {
            slot = in_parent2[parent1[slot]];
            if slot < start || slot >= end {
                break;
            }
        }
        child[slot] = Some(city);
    }

    // Step 3: fill the rest in parent2 order
    let mut placed = vec![false; n];
    for city in child.iter().flatten() {
        placed[*city] = true;
    }
    let mut remaining = parent2.iter().copied().filter(|&city| !placed[city]);
    child
        .into_iter()
        .map(|slot| slot.or_else(|| remaining.next()))
        .collect::<Option<Vec<usize>>>()
        .ok_or_else(|| TspError::invalid_input("PMX left a position unfilled"))
}

/// Two distinct cut points `start < end <= n`, uniformly over all pairs.
///
/// The half-open segment `start..end` is never empty. Requires `n >= 1`.
pub fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picks = index::sample(rng, n + 1, 2);
    let (a, b) = (picks.index(0), picks.index(1));
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Swaps a random position with its successor, wrapping at the end.
///
/// # Complexity
/// O(1)
pub fn adjacent_swap_mutation<R: Rng>(order: &mut [usize], rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    order.swap(i, (i + 1) % n);
}

// ============================================================================
// Helpers
// ============================================================================

/// `result[city]` is the position of `city` in `order`.
fn positions(order: &[usize]) -> Result<Vec<usize>> {
    let n = order.len();
    let mut position = vec![usize::MAX; n];
    for (i, &city) in order.iter().enumerate() {
        if city >= n || position[city] != usize::MAX {
            return Err(TspError::invalid_input(format!(
                "parent is not a permutation of 0..{n}: city {city} at position {i}"
            )));
        }
        position[city] = i;
    }
    Ok(position)
}

// ============================================================================
// Tests
// ============================================================================
