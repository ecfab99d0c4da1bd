//! Dense pairwise distance matrix.

use tracing::debug;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::traits::DistanceMetric;

/// An n×n distance matrix in kilometers, stored row-major.
///
/// Built once per solve and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Query `metric` for every ordered pair `i != j`. The diagonal stays zero.
    ///
    /// The first failing pair aborts construction.
    pub fn from_metric<M>(locations: &[Location], metric: &M) -> Result<Self>
    where
        M: DistanceMetric + ?Sized,
    {
        let size = locations.len();
        let mut data = vec![0.0; size * size];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i == j {
                    continue;
                }
                let km = metric
                    .distance_km(from, to)
                    .map_err(|err| Error::DistanceComputation {
                        from: i,
                        to: j,
                        reason: err.to_string(),
                    })?;
                if !km.is_finite() || km < 0.0 {
                    return Err(Error::DistanceComputation {
                        from: i,
                        to: j,
                        reason: format!("metric returned {}", km),
                    });
                }
                data[i * size + j] = km;
            }
        }

        debug!(locations = size, "built distance matrix");
        Ok(Self { data, size })
    }

    /// Create a matrix from explicit rows.
    ///
    /// Rows must be square, finite and non-negative, with a zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_input(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::invalid_input(format!(
                        "entry ({}, {}) is not a non-negative distance: {}",
                        i, j, value
                    )));
                }
                if i == j && value != 0.0 {
                    return Err(Error::invalid_input(format!(
                        "diagonal entry ({}, {}) must be zero, got {}",
                        i, j, value
                    )));
                }
            }
            data.extend(row);
        }

        Ok(Self { data, size })
    }

    /// Distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of consecutive hops along `path`.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|hop| self.get(hop[0], hop[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Manhattan;

    impl DistanceMetric for Manhattan {
        fn distance_km(&self, from: &Location, to: &Location) -> Result<f64> {
            Ok((from.lat - to.lat).abs() + (from.lng - to.lng).abs())
        }
    }

    struct FailsOn(usize);

    impl DistanceMetric for FailsOn {
        fn distance_km(&self, from: &Location, to: &Location) -> Result<f64> {
            if to.lat as usize == self.0 {
                return Err(Error::provider("lookup failed"));
            }
            Ok((from.lat - to.lat).abs())
        }
    }

    fn line(n: usize) -> Vec<Location> {
        (0..n).map(|i| Location::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn diagonal_is_zero_and_pairs_are_filled() {
        let matrix = DistanceMatrix::from_metric(&line(3), &Manhattan).unwrap();
        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0.0);
        }
        assert_eq!(matrix.get(0, 2), 2.0);
        assert_eq!(matrix.get(2, 1), 1.0);
        assert!(matrix.is_symmetric(1e-12));
    }

    #[test]
    fn metric_failure_is_propagated_with_pair() {
        let err = DistanceMatrix::from_metric(&line(4), &FailsOn(2)).unwrap_err();
        match err {
            Error::DistanceComputation { from, to, reason } => {
                assert_eq!((from, to), (0, 2));
                assert!(reason.contains("lookup failed"));
            }
            other => panic!("expected distance failure, got {:?}", other),
        }
    }

    #[test]
    fn negative_metric_output_is_rejected() {
        struct Negative;
        impl DistanceMetric for Negative {
            fn distance_km(&self, _: &Location, _: &Location) -> Result<f64> {
                Ok(-1.0)
            }
        }
        let err = DistanceMatrix::from_metric(&line(2), &Negative).unwrap_err();
        assert!(matches!(err, Error::DistanceComputation { from: 0, to: 1, .. }));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn from_rows_rejects_nonzero_diagonal() {
        let err = DistanceMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn path_cost_sums_hops() {
        let matrix = DistanceMatrix::from_metric(&line(3), &Manhattan).unwrap();
        assert_eq!(matrix.path_cost(&[0, 1, 2, 0]), 4.0);
        assert_eq!(matrix.path_cost(&[0]), 0.0);
    }
}
