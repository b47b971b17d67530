//! Validated problem instance.

use rand::seq::SliceRandom;
use rand::Rng;

use super::city::City;
use super::matrix::DistanceMatrix;
use crate::error::{Result, TspError};

/// An immutable, validated set of cities with precomputed distances.
///
/// Solvers address cities by index into [`cities`](Self::cities); two
/// cities with equal coordinates are still two cities.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::TspInstance;
///
/// let instance = TspInstance::from_coords(&[(0.0, 0.0), (10.0, 0.0)]).unwrap();
/// assert_eq!(instance.len(), 2);
/// assert!((instance.tour_length(&[0, 1]) - 20.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TspInstance {
    cities: Vec<City>,
    matrix: DistanceMatrix,
}

impl TspInstance {
    /// Builds an instance, rejecting empty lists and non-finite coordinates.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(TspError::invalid_input("city list must not be empty"));
        }
        if let Some(i) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(TspError::invalid_input(format!(
                "city {i} has non-finite coordinates ({}, {})",
                cities[i].x, cities[i].y
            )));
        }
        let matrix = DistanceMatrix::from_cities(&cities);
        Ok(Self { cities, matrix })
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().copied().map(City::from).collect())
    }

    /// Number of cities. Always at least 1.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    /// Closed tour length of an index permutation.
    ///
    /// Index counterpart of [`tour_length`](super::tour_length): 0 for
    /// fewer than two cities, otherwise every consecutive edge plus the
    /// closing edge.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(order[order.len() - 1], order[0])
    }

    /// `[0, 1, ..., n-1]`.
    pub fn identity_order(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    /// A uniformly random permutation of the city indices.
    pub fn random_order<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut order = self.identity_order();
        order.shuffle(rng);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tour_length;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_rejected() {
        let err = TspInstance::new(Vec::new()).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = TspInstance::from_coords(&[(0.0, 0.0), (f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
        assert!(TspInstance::from_coords(&[(f64::INFINITY, 0.0)]).is_err());
    }

    #[test]
    fn test_index_length_matches_coordinate_length() {
        let instance =
            TspInstance::from_coords(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (5.0, 15.0)])
                .unwrap();
        let order = vec![2, 0, 3, 1];
        let route: Vec<City> = order.iter().map(|&i| instance.cities()[i]).collect();
        assert!((instance.tour_length(&order) - tour_length(&route)).abs() < 1e-12);
    }

    #[test]
    fn test_random_order_is_permutation() {
        let instance =
            TspInstance::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut order = instance.random_order(&mut rng);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
