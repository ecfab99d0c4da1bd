//! Exact solver: Held-Karp dynamic program over (visited subset, last stop).
//!
//! O(n² · 2ⁿ) time and O(n · 2ⁿ) memory. Only usable for small inputs; at 16
//! locations the table already holds a million states.

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::solver::Algorithm;
use crate::tour::{DEPOT, Tour};
use crate::traits::TourSolver;

/// Default ceiling on locations for the exact solver.
pub const DEFAULT_EXACT_LIMIT: usize = 16;

/// Hard ceiling regardless of configuration. At 30 locations the table
/// already needs about 500 GiB.
pub const MAX_EXACT_LOCATIONS: usize = 30;

const NO_PARENT: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct HeldKarp {
    /// Inputs above this size fail with `OversizeInput`.
    pub max_locations: usize,
}

impl Default for HeldKarp {
    fn default() -> Self {
        Self {
            max_locations: DEFAULT_EXACT_LIMIT,
        }
    }
}

impl HeldKarp {
    pub fn new(max_locations: usize) -> Self {
        Self { max_locations }
    }

    fn limit(&self) -> usize {
        self.max_locations.min(MAX_EXACT_LOCATIONS)
    }
}

/// Cost and back-pointer table indexed by `subset * n + last`.
struct StateTable {
    n: usize,
    cost: Vec<f64>,
    parent: Vec<usize>,
}

impl StateTable {
    /// `None` when `2ⁿ · n` does not fit in a usize.
    fn new(n: usize) -> Option<Self> {
        let states = u32::try_from(n)
            .ok()
            .and_then(|bits| 1usize.checked_shl(bits))
            .and_then(|subsets| subsets.checked_mul(n))?;
        Some(Self {
            n,
            cost: vec![f64::INFINITY; states],
            parent: vec![NO_PARENT; states],
        })
    }

    fn slot(&self, subset: usize, last: usize) -> usize {
        subset * self.n + last
    }
}

impl TourSolver for HeldKarp {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HeldKarp
    }

    fn solve(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let n = matrix.size();
        if n < 2 {
            return Err(Error::invalid_input(format!(
                "a round trip needs at least 2 locations, got {}",
                n
            )));
        }
        if n > self.limit() {
            return Err(Error::OversizeInput {
                locations: n,
                limit: self.limit(),
            });
        }

        let full = (1usize << n) - 1;
        let mut table = StateTable::new(n).ok_or(Error::OversizeInput {
            locations: n,
            limit: self.limit(),
        })?;
        let base = table.slot(1 << DEPOT, DEPOT);
        table.cost[base] = 0.0;

        // Numeric order visits every subset after all of its proper subsets.
        // Only subsets containing the depot are reachable.
        for subset in (1..=full).filter(|subset| subset & (1 << DEPOT) != 0) {
            for last in (0..n).filter(|&last| last != DEPOT && subset & (1 << last) != 0) {
                let prev_subset = subset & !(1 << last);
                let mut best = f64::INFINITY;
                let mut best_prev = NO_PARENT;

                for prev in (0..n).filter(|&prev| prev_subset & (1 << prev) != 0) {
                    let reached = table.cost[table.slot(prev_subset, prev)];
                    if reached.is_infinite() {
                        continue;
                    }
                    let cost = reached + matrix.get(prev, last);
                    if cost < best {
                        best = cost;
                        best_prev = prev;
                    }
                }

                let slot = table.slot(subset, last);
                table.cost[slot] = best;
                table.parent[slot] = best_prev;
            }
        }

        let mut min_cost = f64::INFINITY;
        let mut last_stop = NO_PARENT;
        for last in (0..n).filter(|&last| last != DEPOT) {
            let cost = table.cost[table.slot(full, last)] + matrix.get(last, DEPOT);
            if cost < min_cost {
                min_cost = cost;
                last_stop = last;
            }
        }

        let mut path = Vec::with_capacity(n + 1);
        let mut subset = full;
        let mut node = last_stop;
        while node != NO_PARENT {
            path.push(node);
            let parent = table.parent[table.slot(subset, node)];
            subset &= !(1 << node);
            node = parent;
        }
        path.reverse();
        path.push(DEPOT);

        let tour = Tour {
            cost: min_cost,
            path,
        };
        if !tour.is_closed_tour(n) {
            return Err(Error::degenerate(format!(
                "exact solver reconstructed an invalid path {:?}",
                tour.path
            )));
        }

        debug!(locations = n, cost = tour.cost, "held-karp solved");
        Ok(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn two_locations_go_there_and_back() {
        let tour = HeldKarp::default()
            .solve(&matrix(vec![vec![0.0, 3.5], vec![3.5, 0.0]]))
            .unwrap();
        assert_eq!(tour.path, vec![0, 1, 0]);
        assert_eq!(tour.cost, 7.0);
    }

    #[test]
    fn finds_optimum_where_greedy_fails() {
        // Nearest neighbor walks 0-1-2-3-0 for 14.5.
        let tour = HeldKarp::default()
            .solve(&matrix(vec![
                vec![0.0, 1.0, 3.0, 2.0],
                vec![1.0, 0.0, 1.5, 2.5],
                vec![3.0, 1.5, 0.0, 10.0],
                vec![2.0, 2.5, 10.0, 0.0],
            ]))
            .unwrap();
        assert_eq!(tour.cost, 9.0);
        assert_eq!(tour.path, vec![0, 3, 1, 2, 0]);
    }

    #[test]
    fn exact_tie_keeps_first_found_tour() {
        // Every tour over four equidistant points costs 4.
        let mut rows = vec![vec![1.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        let tour = HeldKarp::default().solve(&matrix(rows)).unwrap();
        assert_eq!(tour.cost, 4.0);
        assert_eq!(tour.path, vec![0, 3, 2, 1, 0]);
    }

    #[test]
    fn oversize_input_is_rejected() {
        let rows = vec![vec![0.0; 5]; 5];
        let err = HeldKarp::new(4).solve(&matrix(rows)).unwrap_err();
        assert!(matches!(err, Error::OversizeInput { locations: 5, limit: 4 }));
    }

    #[test]
    fn configured_limit_is_capped_by_table_ceiling() {
        let size = 60;
        let rows = vec![vec![0.0; size]; size];
        let err = HeldKarp::new(64).solve(&matrix(rows)).unwrap_err();
        assert!(matches!(
            err,
            Error::OversizeInput { locations: 60, limit: MAX_EXACT_LOCATIONS }
        ));
    }

    #[test]
    fn just_above_ceiling_is_rejected_without_allocating() {
        let size = MAX_EXACT_LOCATIONS + 1;
        let rows = vec![vec![0.0; size]; size];
        let err = HeldKarp::new(usize::MAX).solve(&matrix(rows)).unwrap_err();
        assert!(matches!(err, Error::OversizeInput { limit: MAX_EXACT_LOCATIONS, .. }));
    }

    #[test]
    fn state_count_overflow_is_detected() {
        assert!(StateTable::new(64).is_none());
        assert!(StateTable::new(60).is_none());
        assert!(StateTable::new(3).is_some_and(|table| table.cost.len() == 24));
    }

    #[test]
    fn single_location_is_invalid() {
        let err = HeldKarp::default().solve(&matrix(vec![vec![0.0]])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
