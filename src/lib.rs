//! round-trip: closed tours over a handful of geographic waypoints.
//!
//! Build a distance matrix from coordinates, then find a round trip from the
//! first location with an exact Held-Karp solver or one of two greedy
//! heuristics.

pub mod error;
pub mod location;
pub mod traits;
pub mod matrix;
pub mod haversine;
pub mod geodesic;
pub mod osrm;
pub mod tour;
pub mod solver;
pub mod held_karp;
pub mod nearest_neighbor;
pub mod best_edge;

pub use error::{Error, Result};
pub use location::Location;
pub use matrix::DistanceMatrix;
pub use solver::{Algorithm, OversizePolicy, SolveOptions, compare, solve, solve_matrix};
pub use tour::{Leg, Tour, TourResult};
