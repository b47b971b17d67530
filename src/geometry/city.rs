//! Coordinates and the Euclidean metric.

/// A city at a fixed point in the plane.
///
/// Cities are identified by their position in a [`TspInstance`](super::TspInstance),
/// never by their coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        distance(self, other)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two cities.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::{distance, City};
///
/// let d = distance(&City::new(0.0, 0.0), &City::new(3.0, 4.0));
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
pub fn distance(a: &City, b: &City) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Length of the closed route visiting `route` in order.
///
/// Includes the edge from the last city back to the first. Routes with
/// fewer than two cities have no edges and length 0.
pub fn tour_length(route: &[City]) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }
    let open: f64 = route.windows(2).map(|w| distance(&w[0], &w[1])).sum();
    open + distance(&route[route.len() - 1], &route[0])
}
