//! Test fixtures for round-trip.
//!
//! Real French waypoints plus a flat metric for hand-checkable geometry.

pub mod waypoints;

pub use waypoints::*;
