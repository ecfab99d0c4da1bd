//! Haversine distance (spherical earth).
//!
//! Uses great-circle distance. Less accurate than an ellipsoidal geodesic
//! or road distances but infallible and cheap.

use crate::error::Result;
use crate::location::Location;
use crate::matrix::DistanceMatrix;
use crate::traits::{DistanceMatrixProvider, DistanceMetric};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance provider.
#[derive(Debug, Clone)]
pub struct Haversine {
    pub radius_km: f64,
}

impl Default for Haversine {
    fn default() -> Self {
        Self {
            radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl Haversine {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        // Rounding can push `a` a hair above 1 for antipodal points.
        let c = 2.0 * a.sqrt().min(1.0).asin();

        self.radius_km * c
    }
}

impl DistanceMetric for Haversine {
    fn distance_km(&self, from: &Location, to: &Location) -> Result<f64> {
        Ok(self.haversine_km(from.coords(), to.coords()))
    }
}

impl DistanceMatrixProvider for Haversine {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix> {
        DistanceMatrix::from_metric(locations, self)
    }
}
