//! Geographic waypoints.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const NINETY: f64 = 90.0;
const ONE_EIGHTY: f64 = NINETY * 2.0;

/// Fewest locations that form a round trip.
pub const MIN_LOCATIONS: usize = 2;

/// A waypoint in degrees. Identified by its position in the input list;
/// index 0 is the depot every tour starts and ends at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// (lat, lng) tuple.
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-NINETY..=NINETY).contains(&self.lat)
            && (-ONE_EIGHTY..=ONE_EIGHTY).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Reject inputs that cannot be turned into a distance matrix.
pub fn validate_locations(locations: &[Location]) -> Result<()> {
    if locations.len() < MIN_LOCATIONS {
        return Err(Error::invalid_input(format!(
            "at least {} locations are required, got {}",
            MIN_LOCATIONS,
            locations.len()
        )));
    }

    if let Some((index, location)) = locations
        .iter()
        .enumerate()
        .find(|(_, location)| !location.is_valid())
    {
        return Err(Error::invalid_input(format!(
            "location {} has invalid coordinates ({}, {})",
            index, location.lat, location.lng
        )));
    }

    Ok(())
}
