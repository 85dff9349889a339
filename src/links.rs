//! Navigation deep links for finished routes.
//!
//! Links never reorder stops. Google directions links accept a limited number
//! of waypoints, so only the first [`DEFAULT_WAYPOINT_LIMIT`] stops are
//! included; check [`crate::solver::RouteSummary::exceeds_waypoint_limit`]
//! to warn users before handing one out.

use crate::polyline::Polyline;
use crate::solver::DEFAULT_WAYPOINT_LIMIT;
use crate::traits::Stop;
use crate::types::{Coordinate, Route};

const GOOGLE_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

fn waypoint(coordinate: &Coordinate) -> String {
    format!("{},{}", coordinate.lat, coordinate.lng)
}

/// Google Maps directions: start, at most the first 10 stops, end.
pub fn google_maps_url<S: Stop>(route: &Route<S>) -> String {
    google_maps_url_with_limit(route, DEFAULT_WAYPOINT_LIMIT)
}

pub fn google_maps_url_with_limit<S: Stop>(route: &Route<S>, limit: usize) -> String {
    let mut waypoints = vec![waypoint(&route.start_location.coordinate)];
    waypoints.extend(
        route
            .stops
            .iter()
            .take(limit)
            .filter_map(|stop| stop.coordinate())
            .map(|coordinate| waypoint(&coordinate)),
    );
    waypoints.push(waypoint(&route.end_location.coordinate));

    format!("{}{}", GOOGLE_DIRECTIONS_URL, waypoints.join("/"))
}

/// Apple Maps directions with every stop as a chained destination.
pub fn apple_maps_url<S: Stop>(route: &Route<S>) -> String {
    let polyline = Polyline::from_route(route);
    let points = polyline.points();

    // A polyline always holds the start and end points.
    let (source, destinations) = match points.split_first() {
        Some((source, rest)) => (waypoint(source), rest),
        None => return String::new(),
    };
    let destinations = destinations.iter().map(waypoint).collect::<Vec<_>>().join("+to:");

    format!("maps://?saddr={}&daddr={}", source, destinations)
}
