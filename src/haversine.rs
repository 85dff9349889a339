//! Great-circle distance between coordinates.
//!
//! Used as a travel-distance proxy everywhere in the planner. Ignores roads.

use crate::types::Coordinate;

/// Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two points in miles.
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Sum of consecutive leg distances along a path.
pub fn path_miles(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|leg| haversine_miles(leg[0], leg[1]))
        .sum()
}
