//! Round-trip solving entry points.
//!
//! `solve` validates the input, builds the distance matrix once and runs one
//! solver. `compare` runs several solvers over the same matrix in parallel.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::best_edge::BestEdge;
use crate::error::{Error, Result};
use crate::held_karp::{DEFAULT_EXACT_LIMIT, HeldKarp, MAX_EXACT_LOCATIONS};
use crate::location::{Location, validate_locations};
use crate::matrix::DistanceMatrix;
use crate::nearest_neighbor::NearestNeighbor;
use crate::tour::{Tour, TourResult};
use crate::traits::{DistanceMatrixProvider, TourSolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exact, exponential.
    HeldKarp,
    NearestNeighbor,
    BestEdge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::HeldKarp,
        Algorithm::NearestNeighbor,
        Algorithm::BestEdge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::HeldKarp => "held-karp",
            Algorithm::NearestNeighbor => "nearest-neighbor",
            Algorithm::BestEdge => "best-edge",
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Algorithm::HeldKarp)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == value)
            .ok_or_else(|| Error::invalid_input(format!("unknown algorithm: {}", value)))
    }
}

/// What to do when the exact solver is asked for too many locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OversizePolicy {
    Reject,
    /// Run this heuristic instead.
    Fallback(Algorithm),
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Largest input the exact solver accepts. Never more than
    /// `MAX_EXACT_LOCATIONS`.
    pub exact_limit: usize,
    pub oversize_policy: OversizePolicy,
    /// Used to estimate tour duration.
    pub average_speed_kmh: f64,
}

impl SolveOptions {
    /// `exact_limit` clamped to what the exact solver can hold.
    pub fn effective_exact_limit(&self) -> usize {
        self.exact_limit.min(MAX_EXACT_LOCATIONS)
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            exact_limit: DEFAULT_EXACT_LIMIT,
            oversize_policy: OversizePolicy::Reject,
            average_speed_kmh: 40.0,
        }
    }
}

/// Boxed solver for `algorithm`, configured from `options`.
pub fn solver_for(algorithm: Algorithm, options: &SolveOptions) -> Box<dyn TourSolver + Send + Sync> {
    match algorithm {
        Algorithm::HeldKarp => Box::new(HeldKarp::new(options.exact_limit)),
        Algorithm::NearestNeighbor => Box::new(NearestNeighbor),
        Algorithm::BestEdge => Box::new(BestEdge),
    }
}

/// The algorithm that will actually run for `n` locations.
pub fn effective_algorithm(n: usize, algorithm: Algorithm, options: &SolveOptions) -> Result<Algorithm> {
    let limit = options.effective_exact_limit();
    if !algorithm.is_exact() || n <= limit {
        return Ok(algorithm);
    }

    match options.oversize_policy {
        OversizePolicy::Reject => Err(Error::OversizeInput {
            locations: n,
            limit,
        }),
        OversizePolicy::Fallback(fallback) if !fallback.is_exact() => {
            warn!(
                locations = n,
                limit,
                fallback = %fallback,
                "too many locations for the exact solver, using heuristic"
            );
            Ok(fallback)
        }
        OversizePolicy::Fallback(_) => Err(Error::OversizeInput {
            locations: n,
            limit,
        }),
    }
}

/// Solve over a caller-supplied matrix.
pub fn solve_matrix(matrix: &DistanceMatrix, algorithm: Algorithm, options: &SolveOptions) -> Result<Tour> {
    let algorithm = effective_algorithm(matrix.size(), algorithm, options)?;
    solver_for(algorithm, options).solve(matrix)
}

/// Compute a round trip starting and ending at `locations[0]`.
pub fn solve<P>(
    locations: &[Location],
    algorithm: Algorithm,
    provider: &P,
    options: &SolveOptions,
) -> Result<TourResult>
where
    P: DistanceMatrixProvider + ?Sized,
{
    validate_locations(locations)?;
    let algorithm = effective_algorithm(locations.len(), algorithm, options)?;
    let matrix = build_matrix(locations, provider)?;

    debug!(locations = locations.len(), %algorithm, "solving round trip");
    let tour = solver_for(algorithm, options).solve(&matrix)?;
    Ok(TourResult::new(
        algorithm,
        &tour,
        locations,
        &matrix,
        options.average_speed_kmh,
    ))
}

/// Run each of `algorithms` over one shared matrix, in parallel.
///
/// Results come back in request order. Any failure fails the comparison.
pub fn compare<P>(
    locations: &[Location],
    algorithms: &[Algorithm],
    provider: &P,
    options: &SolveOptions,
) -> Result<Vec<TourResult>>
where
    P: DistanceMatrixProvider + ?Sized,
{
    validate_locations(locations)?;
    let planned = algorithms
        .iter()
        .map(|&algorithm| effective_algorithm(locations.len(), algorithm, options))
        .collect::<Result<Vec<_>>>()?;
    let matrix = build_matrix(locations, provider)?;

    planned
        .par_iter()
        .map(|&algorithm| -> Result<TourResult> {
            let tour = solver_for(algorithm, options).solve(&matrix)?;
            Ok(TourResult::new(
                algorithm,
                &tour,
                locations,
                &matrix,
                options.average_speed_kmh,
            ))
        })
        .collect()
}

fn build_matrix<P>(locations: &[Location], provider: &P) -> Result<DistanceMatrix>
where
    P: DistanceMatrixProvider + ?Sized,
{
    let matrix = provider.matrix_for(locations)?;
    if matrix.size() != locations.len() {
        return Err(Error::provider(format!(
            "matrix has {} rows for {} locations",
            matrix.size(),
            locations.len()
        )));
    }
    Ok(matrix)
}
