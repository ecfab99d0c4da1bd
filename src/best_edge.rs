//! Greedy edge heuristic.
//!
//! Edges are taken cheapest first as long as no location gets a third edge
//! and no cycle closes before every location is on it. The accepted edges are
//! then walked from the depot to recover a visiting order.

use petgraph::unionfind::UnionFind;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::solver::Algorithm;
use crate::tour::{DEPOT, Tour};
use crate::traits::TourSolver;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    u: usize,
    v: usize,
    weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct BestEdge;

impl TourSolver for BestEdge {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BestEdge
    }

    fn solve(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let n = matrix.size();
        if n < 2 {
            return Err(Error::invalid_input(format!(
                "a round trip needs at least 2 locations, got {}",
                n
            )));
        }
        if n == 2 {
            // The only cycle uses the single edge in both directions.
            let weight = matrix.get(DEPOT, 1);
            return Ok(Tour {
                cost: 2.0 * weight,
                path: vec![DEPOT, 1, DEPOT],
            });
        }

        let selected = select_edges(matrix);
        let tour = tour_from_edges(&selected, n)?;

        debug!(locations = n, cost = tour.cost, "best edge solved");
        Ok(tour)
    }
}

/// All undirected edges `i < j`, cheapest first. Equal weights keep `(i, j)`
/// order.
fn sorted_edges(matrix: &DistanceMatrix) -> Vec<Edge> {
    let n = matrix.size();
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for u in 0..n {
        for v in (u + 1)..n {
            edges.push(Edge {
                u,
                v,
                weight: matrix.get(u, v),
            });
        }
    }
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    edges
}

fn select_edges(matrix: &DistanceMatrix) -> Vec<Edge> {
    let n = matrix.size();
    let mut degree = vec![0u8; n];
    let mut components = UnionFind::<usize>::new(n);
    let mut selected: Vec<Edge> = Vec::with_capacity(n);

    for edge in sorted_edges(matrix) {
        if degree[edge.u] >= 2 || degree[edge.v] >= 2 {
            continue;
        }
        // Joining two ends of one fragment closes a cycle, which is only
        // allowed once that fragment already spans every location.
        if components.equiv(edge.u, edge.v) && selected.len() != n - 1 {
            continue;
        }

        trace!(u = edge.u, v = edge.v, weight = edge.weight, "accepted edge");
        components.union(edge.u, edge.v);
        degree[edge.u] += 1;
        degree[edge.v] += 1;
        selected.push(edge);

        if selected.len() == n {
            return selected;
        }
    }

    selected
}

/// Turn `n` accepted edges into a round trip from the depot.
///
/// Fails unless the edges form one cycle through all `n` locations.
fn tour_from_edges(selected: &[Edge], n: usize) -> Result<Tour> {
    if selected.len() != n {
        return Err(Error::degenerate(format!(
            "accepted {} edges for {} locations",
            selected.len(),
            n
        )));
    }

    let adjacency = adjacency(selected, n);
    if !is_single_cycle(&adjacency) {
        return Err(Error::degenerate(
            "accepted edges do not form a single cycle through every location",
        ));
    }

    let mut path = walk_from_depot(&adjacency);
    path.push(DEPOT);
    let tour = Tour {
        cost: selected.iter().map(|edge| edge.weight).sum(),
        path,
    };
    if !tour.is_closed_tour(n) {
        return Err(Error::degenerate(format!(
            "reconstructed path {:?} is not a round trip",
            tour.path
        )));
    }
    Ok(tour)
}

fn adjacency(edges: &[Edge], n: usize) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::with_capacity(2); n];
    for edge in edges {
        adjacency[edge.u].push(edge.v);
        adjacency[edge.v].push(edge.u);
    }
    adjacency
}

/// Every node has degree two and all are reachable from the depot.
fn is_single_cycle(adjacency: &[Vec<usize>]) -> bool {
    if adjacency.iter().any(|neighbors| neighbors.len() != 2) {
        return false;
    }

    let mut visited = vec![false; adjacency.len()];
    let mut stack = vec![DEPOT];
    let mut reached = 0;
    while let Some(node) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        reached += 1;
        stack.extend(adjacency[node].iter().copied().filter(|&next| !visited[next]));
    }
    reached == adjacency.len()
}

/// Depth-first order from the depot, following each node's first edge first.
fn walk_from_depot(adjacency: &[Vec<usize>]) -> Vec<usize> {
    let mut visited = vec![false; adjacency.len()];
    let mut path = Vec::with_capacity(adjacency.len() + 1);
    let mut stack = vec![DEPOT];

    while let Some(node) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        path.push(node);
        stack.extend(adjacency[node].iter().rev().copied().filter(|&next| !visited[next]));
    }
    path
}
