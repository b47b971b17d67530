//! The tour value returned by every solver.

use super::city::City;
use super::instance::TspInstance;

/// A closed tour: a permutation of city indices and its total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    pub fn new(order: Vec<usize>, length: f64) -> Self {
        Self { order, length }
    }

    /// Builds a tour and computes its length against `instance`.
    ///
    /// Edge lengths are summed in ascending order, so every rotation and
    /// the reversal of the same cycle report a bit-identical length.
    pub fn from_order(instance: &TspInstance, order: Vec<usize>) -> Self {
        let n = order.len();
        let mut edges: Vec<f64> = if n < 2 {
            Vec::new()
        } else {
            (0..n)
                .map(|i| instance.distance(order[i], order[(i + 1) % n]))
                .collect()
        };
        edges.sort_by(f64::total_cmp);
        let length: f64 = edges.iter().sum();
        Self { order, length }
    }

    /// City indices in visiting order. The closing edge is implicit.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The tour as coordinates, in visiting order.
    pub fn route(&self, instance: &TspInstance) -> Vec<City> {
        self.order.iter().map(|&i| instance.cities()[i]).collect()
    }

    /// Returns `true` if the tour visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in &self.order {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_maps_indices() {
        let instance = TspInstance::from_coords(&[(0.0, 0.0), (1.0, 2.0), (3.0, 4.0)]).unwrap();
        let tour = Tour::from_order(&instance, vec![2, 0, 1]);
        assert_eq!(
            tour.route(&instance),
            vec![City::new(3.0, 4.0), City::new(0.0, 0.0), City::new(1.0, 2.0)]
        );
    }

    #[test]
    fn test_length_bit_identical_under_rotation_and_reversal() {
        let instance = TspInstance::from_coords(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (20.0, 20.0),
            (5.0, 15.0),
            (15.0, 5.0),
            (25.0, -5.0),
        ])
        .unwrap();
        let base = Tour::from_order(&instance, vec![0, 1, 3, 2, 4, 5]);
        let rotated = Tour::from_order(&instance, vec![2, 4, 5, 0, 1, 3]);
        let reversed = Tour::from_order(&instance, vec![5, 4, 2, 3, 1, 0]);
        assert_eq!(base.length(), rotated.length());
        assert_eq!(base.length(), reversed.length());
        assert!((base.length() - instance.tour_length(base.order())).abs() < 1e-9);
    }

    #[test]
    fn test_single_city_length_zero() {
        let instance = TspInstance::from_coords(&[(4.0, 4.0)]).unwrap();
        assert_eq!(Tour::from_order(&instance, vec![0]).length(), 0.0);
    }

    #[test]
    fn test_is_permutation_of() {
        assert!(Tour::new(vec![1, 0, 2], 0.0).is_permutation_of(3));
        assert!(!Tour::new(vec![1, 1, 2], 0.0).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1], 0.0).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1, 3], 0.0).is_permutation_of(3));
    }
}
