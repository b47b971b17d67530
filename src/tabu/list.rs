//! Bounded FIFO tabu list.

use std::collections::{HashMap, VecDeque};

/// The most recently accepted tours, oldest evicted first.
///
/// Membership is O(1) through a multiset of the queued tours, so pushing
/// the same tour twice keeps it tabu until both copies have aged out.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::TabuList;
///
/// let mut list = TabuList::new(2);
/// list.push(vec![0, 1, 2, 3]);
/// list.push(vec![1, 0, 2, 3]);
/// list.push(vec![1, 2, 0, 3]);
/// assert!(!list.contains(&[0, 1, 2, 3]));
/// assert!(list.contains(&[1, 2, 0, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList {
    queue: VecDeque<Vec<usize>>,
    counts: HashMap<Vec<usize>, usize>,
    max_size: usize,
}

impl TabuList {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size + 1),
            counts: HashMap::new(),
            max_size,
        }
    }

    /// Appends a tour, evicting from the front while over capacity.
    pub fn push(&mut self, tour: Vec<usize>) {
        *self.counts.entry(tour.clone()).or_insert(0) += 1;
        self.queue.push_back(tour);
        while self.queue.len() > self.max_size {
            if let Some(old) = self.queue.pop_front() {
                if let Some(count) = self.counts.get_mut(&old) {
                    *count -= 1;
                    if *count == 0 {
                        self.counts.remove(&old);
                    }
                }
            }
        }
    }

    pub fn contains(&self, tour: &[usize]) -> bool {
        self.counts.contains_key(tour)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
