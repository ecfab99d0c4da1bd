//! Solver output and its client-facing presentation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::location::Location;
use crate::matrix::DistanceMatrix;
use crate::solver::Algorithm;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Index of the fixed start and end of every tour.
pub const DEPOT: usize = 0;

/// A closed tour: `path` starts and ends at the depot and visits every other
/// index exactly once. `cost` is unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub cost: f64,
    pub path: Vec<usize>,
}

impl Tour {
    /// Whether `path` is a round trip over exactly `n` locations.
    pub fn is_closed_tour(&self, n: usize) -> bool {
        if n < 2 || self.path.len() != n + 1 {
            return false;
        }
        if self.path[0] != DEPOT || self.path[n] != DEPOT {
            return false;
        }

        let mut seen = vec![false; n];
        seen[DEPOT] = true;
        for &index in &self.path[1..n] {
            if index >= n || seen[index] {
                return false;
            }
            seen[index] = true;
        }
        true
    }
}

/// One hop of a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: usize,
    pub to: usize,
    pub distance_km: f64,
}

/// A tour with everything a client needs to display it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourResult {
    pub algorithm: Algorithm,
    /// Total kilometers, rounded to two decimals.
    pub cost: f64,
    pub path: Vec<usize>,
    pub coords: Vec<Location>,
    pub legs: Vec<Leg>,
    pub estimated_duration_secs: u64,
}

impl TourResult {
    pub fn new(
        algorithm: Algorithm,
        tour: &Tour,
        locations: &[Location],
        matrix: &DistanceMatrix,
        average_speed_kmh: f64,
    ) -> Self {
        let coords = tour.path.iter().map(|&index| locations[index]).collect();
        let legs = tour
            .path
            .windows(2)
            .map(|hop| Leg {
                from: hop[0],
                to: hop[1],
                distance_km: matrix.get(hop[0], hop[1]),
            })
            .collect();

        Self {
            algorithm,
            cost: round_cents(tour.cost),
            path: tour.path.clone(),
            coords,
            legs,
            estimated_duration_secs: km_to_seconds(tour.cost, average_speed_kmh),
        }
    }

    /// Shareable driving directions for the tour in visiting order.
    pub fn directions_url(&self) -> Result<String> {
        let (origin, destination) = match (self.coords.first(), self.coords.last()) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => return Err(Error::invalid_input("tour has no coordinates")),
        };
        let waypoints = self.coords[1..self.coords.len().saturating_sub(1).max(1)]
            .iter()
            .map(lat_lng)
            .collect::<Vec<_>>()
            .join("|");

        let url = reqwest::Url::parse_with_params(
            DIRECTIONS_BASE_URL,
            &[
                ("origin", lat_lng(origin)),
                ("destination", lat_lng(destination)),
                ("waypoints", waypoints),
                ("travelmode", "driving".to_string()),
            ],
        )
        .map_err(|err| Error::invalid_input(err.to_string()))?;

        Ok(url.to_string())
    }
}

fn lat_lng(location: &Location) -> String {
    format!("{},{}", location.lat, location.lng)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Travel time for `km` at a constant speed.
fn km_to_seconds(km: f64, speed_kmh: f64) -> u64 {
    if speed_kmh <= 0.0 {
        return 0;
    }
    let hours = km / speed_kmh;
    (hours * 3600.0).round() as u64
}
