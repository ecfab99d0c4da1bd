//! Greedy walk to the closest unvisited location. O(n²), no backtracking.

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::solver::Algorithm;
use crate::tour::{DEPOT, Tour};
use crate::traits::TourSolver;

#[derive(Debug, Clone, Default)]
pub struct NearestNeighbor;

impl TourSolver for NearestNeighbor {
    fn algorithm(&self) -> Algorithm {
        Algorithm::NearestNeighbor
    }

    fn solve(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let n = matrix.size();
        if n < 2 {
            return Err(Error::invalid_input(format!(
                "a round trip needs at least 2 locations, got {}",
                n
            )));
        }

        let mut visited = vec![false; n];
        let mut path = Vec::with_capacity(n + 1);
        let mut total = 0.0;
        visited[DEPOT] = true;
        path.push(DEPOT);

        let mut current = DEPOT;
        while path.len() < n {
            // Ascending scan with strict `<`: the lowest index wins a tie.
            let mut next = None;
            let mut best = f64::INFINITY;
            for candidate in (0..n).filter(|&candidate| !visited[candidate]) {
                let distance = matrix.get(current, candidate);
                if next.is_none() || distance < best {
                    best = distance;
                    next = Some(candidate);
                }
            }

            let Some(next) = next else {
                break;
            };
            visited[next] = true;
            path.push(next);
            total += best;
            current = next;
        }

        total += matrix.get(current, DEPOT);
        path.push(DEPOT);

        debug!(locations = n, cost = total, "nearest neighbor solved");
        Ok(Tour { cost: total, path })
    }
}
