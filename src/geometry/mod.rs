//! Geometry kernel shared by every solver.
//!
//! - [`City`], [`distance`] and [`tour_length`] work on raw coordinates.
//! - [`TspInstance`] validates a city list once and precomputes its
//!   [`DistanceMatrix`]; solvers then work purely on index permutations.
//! - [`Tour`] is the value every solver returns.
//! - [`VisitedSet`] tracks placed cities by index, so duplicate
//!   coordinates stay distinct cities.

mod city;
mod instance;
mod matrix;
mod tour;
mod visited;

pub use city::{distance, tour_length, City};
pub use instance::TspInstance;
pub use matrix::DistanceMatrix;
pub use tour::Tour;
pub use visited::VisitedSet;
