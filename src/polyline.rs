//! Polyline representation for route geometries.
//!
//! A route's geometry is its start location, each stop's coordinate in
//! visiting order, then its end location. Map rendering and deep-link
//! builders both consume this form; encoding to a compact string format
//! happens at those boundaries, not here.

use serde::{Deserialize, Serialize};

use crate::haversine::path_miles;
use crate::traits::Stop;
use crate::types::{Coordinate, Route};

/// A polyline of decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Start, stops in order, end. Stops without a coordinate are skipped.
    pub fn from_route<S: Stop>(route: &Route<S>) -> Self {
        let mut points = Vec::with_capacity(route.stops.len() + 2);
        points.push(route.start_location.coordinate);
        points.extend(route.stops.iter().filter_map(|stop| stop.coordinate()));
        points.push(route.end_location.coordinate);
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Total great-circle length in miles.
    pub fn length_miles(&self) -> f64 {
        path_miles(&self.points)
    }
}
