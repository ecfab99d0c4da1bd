//! Named waypoints with real coordinates.

#![allow(dead_code)]

use round_trip::error::Result;
use round_trip::matrix::DistanceMatrix;
use round_trip::traits::{DistanceMatrixProvider, DistanceMetric};
use round_trip::Location;

/// A named place.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn location(&self) -> Location {
        Location::new(self.lat, self.lng)
    }
}

// ============================================================================
// Lyon landmarks (a delivery-sized round trip)
// ============================================================================

pub const LYON_STOPS: &[Place] = &[
    Place::new("Place Bellecour", 45.7578, 4.8320),
    Place::new("Basilique de Fourvière", 45.7623, 4.8227),
    Place::new("Hôtel de Ville", 45.7676, 4.8344),
    Place::new("Gare Part-Dieu", 45.7606, 4.8595),
    Place::new("Parc de la Tête d'Or", 45.7772, 4.8553),
    Place::new("Confluence", 45.7405, 4.8180),
    Place::new("Croix-Rousse", 45.7745, 4.8320),
    Place::new("Stade de Gerland", 45.7239, 4.8321),
    Place::new("Gare Perrache", 45.7485, 4.8262),
    Place::new("Vieux Lyon", 45.7620, 4.8270),
];

// ============================================================================
// French cities (country-wide tour)
// ============================================================================

pub const FRENCH_CITIES: &[Place] = &[
    Place::new("Paris", 48.8566, 2.3522),
    Place::new("Lyon", 45.7640, 4.8357),
    Place::new("Marseille", 43.2965, 5.3698),
    Place::new("Toulouse", 43.6047, 1.4442),
    Place::new("Nice", 43.7102, 7.2620),
    Place::new("Nantes", 47.2184, -1.5536),
    Place::new("Strasbourg", 48.5734, 7.7521),
    Place::new("Montpellier", 43.6108, 3.8767),
    Place::new("Bordeaux", 44.8378, -0.5792),
    Place::new("Lille", 50.6292, 3.0573),
    Place::new("Rennes", 48.1173, -1.6778),
    Place::new("Reims", 49.2583, 4.0317),
];

pub fn locations(places: &[Place]) -> Vec<Location> {
    places.iter().map(Place::location).collect()
}

/// The first `count` places of `places`.
pub fn sample(places: &[Place], count: usize) -> Vec<Location> {
    places.iter().take(count).map(Place::location).collect()
}

/// Euclidean distance treating degrees as plain units.
pub struct Flat;

impl DistanceMetric for Flat {
    fn distance_km(&self, from: &Location, to: &Location) -> Result<f64> {
        Ok(((from.lat - to.lat).powi(2) + (from.lng - to.lng).powi(2)).sqrt())
    }
}

impl DistanceMatrixProvider for Flat {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix> {
        DistanceMatrix::from_metric(locations, self)
    }
}

/// Cheapest closed tour by trying every order of the non-depot locations.
pub fn brute_force_cost(matrix: &DistanceMatrix) -> f64 {
    let mut rest: Vec<usize> = (1..matrix.size()).collect();
    let mut best = f64::INFINITY;
    permute(&mut rest, 0, matrix, &mut best);
    best
}

fn permute(order: &mut Vec<usize>, k: usize, matrix: &DistanceMatrix, best: &mut f64) {
    if k == order.len() {
        let mut path = Vec::with_capacity(order.len() + 2);
        path.push(0);
        path.extend_from_slice(order);
        path.push(0);
        *best = best.min(matrix.path_cost(&path));
        return;
    }
    for i in k..order.len() {
        order.swap(k, i);
        permute(order, k + 1, matrix, best);
        order.swap(k, i);
    }
}
