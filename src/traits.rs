//! Core seams of the engine.
//!
//! Distance collaborators and tour solvers are kept behind small traits so
//! callers can plug in their own metric or road-network backend.

use crate::error::Result;
use crate::location::Location;
use crate::matrix::DistanceMatrix;
use crate::solver::Algorithm;
use crate::tour::Tour;

/// Point-to-point distance in kilometers.
///
/// Implementations must be symmetric, non-negative and deterministic.
pub trait DistanceMetric {
    fn distance_km(&self, from: &Location, to: &Location) -> Result<f64>;
}

/// Provides a full distance matrix for a set of locations.
///
/// The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix>;
}

/// A closed-tour algorithm over a prebuilt matrix.
///
/// Solvers hold no state between calls; the same matrix always yields the
/// same tour.
pub trait TourSolver {
    fn algorithm(&self) -> Algorithm;

    fn solve(&self, matrix: &DistanceMatrix) -> Result<Tour>;
}
