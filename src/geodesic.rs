//! Ellipsoidal distance on WGS-84 using Vincenty's inverse formula.

use crate::error::{Error, Result};
use crate::location::Location;
use crate::matrix::DistanceMatrix;
use crate::traits::{DistanceMatrixProvider, DistanceMetric};

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const WGS84_B: f64 = (1.0 - WGS84_F) * WGS84_A;

/// Geodesic distance on an ellipsoid.
///
/// Accurate to well under a meter, but the iteration does not converge for
/// nearly antipodal points; those pairs fail instead of returning a guess.
#[derive(Debug, Clone)]
pub struct Geodesic {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for Geodesic {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-12,
        }
    }
}

impl Geodesic {
    pub fn geodesic_km(&self, from: (f64, f64), to: (f64, f64)) -> Result<f64> {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let l = (lng2 - lng1).to_radians();
        let u1 = ((1.0 - WGS84_F) * lat1.to_radians().tan()).atan();
        let u2 = ((1.0 - WGS84_F) * lat2.to_radians().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        for _ in 0..self.max_iterations {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();
            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;

            if sin_sigma == 0.0 {
                if cos_sigma > 0.0 {
                    return Ok(0.0);
                }
                return Err(Error::provider(format!(
                    "geodesic between {:?} and {:?} is undefined for antipodal points",
                    from, to
                )));
            }

            let sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            // Equatorial lines have cos²α = 0.
            let cos_2sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                0.0
            };
            let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));

            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * WGS84_F
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

            if (lambda - previous).abs() < self.tolerance {
                let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
                let a = 1.0
                    + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
                let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
                let delta_sigma = b
                    * sin_sigma
                    * (cos_2sigma_m
                        + b / 4.0
                            * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                                - b / 6.0
                                    * cos_2sigma_m
                                    * (-3.0 + 4.0 * sin_sigma.powi(2))
                                    * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

                let meters = WGS84_B * a * (sigma - delta_sigma);
                return Ok(meters / 1000.0);
            }
        }

        Err(Error::provider(format!(
            "geodesic between {:?} and {:?} did not converge after {} iterations",
            from, to, self.max_iterations
        )))
    }
}

impl DistanceMetric for Geodesic {
    fn distance_km(&self, from: &Location, to: &Location) -> Result<f64> {
        self.geodesic_km(from.coords(), to.coords())
    }
}

impl DistanceMatrixProvider for Geodesic {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix> {
        DistanceMatrix::from_metric(locations, self)
    }
}
