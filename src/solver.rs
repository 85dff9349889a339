//! Route assembly: cluster the stops, sequence each cluster, package routes.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cluster::{ClusterOptions, cluster_stops};
use crate::error::{PlannerError, Result};
use crate::polyline::Polyline;
use crate::sequence::order_stops;
use crate::traits::Stop;
use crate::types::{Location, Route, RouteSettings};

/// Display colors, cycled when there are more routes than entries.
pub const ROUTE_COLORS: [&str; 10] = [
    "#3b82f6", // Blue
    "#ef4444", // Red
    "#22c55e", // Green
    "#f59e0b", // Amber
    "#a855f7", // Purple
    "#ec4899", // Pink
    "#14b8a6", // Teal
    "#f97316", // Orange
    "#6366f1", // Indigo
    "#84cc16", // Lime
];

/// Waypoint cap of common navigation links.
pub const DEFAULT_WAYPOINT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    pub cluster: ClusterOptions,
    /// Sequence clusters on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            cluster: ClusterOptions::default(),
            parallel: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannerResult<S: Stop> {
    pub routes: Vec<Route<S>>,
    /// Stops left out for lack of a usable coordinate, in input order.
    pub excluded: Vec<S::Id>,
    /// Clustering rounds run.
    pub iterations: usize,
    /// False when clustering stopped at the iteration cap.
    pub converged: bool,
}

/// Plan routes and report clustering diagnostics alongside them.
///
/// `end` defaults to `start`. Fails only on a zero route count, or on a
/// missing/invalid start (or invalid end) when there is something to route.
pub fn solve<S, R>(
    stops: &[S],
    route_count: usize,
    start: Option<&Location>,
    end: Option<&Location>,
    options: &OptimizeOptions,
    rng: &mut R,
) -> Result<PlannerResult<S>>
where
    S: Stop + Clone + Sync,
    R: Rng + ?Sized,
{
    if route_count == 0 {
        return Err(PlannerError::InvalidArgument(
            "route count must be at least 1".to_string(),
        ));
    }

    let excluded: Vec<S::Id> = stops
        .iter()
        .filter(|stop| stop.routable_coordinate().is_none())
        .map(|stop| stop.id().clone())
        .collect();
    if !excluded.is_empty() {
        warn!(count = excluded.len(), "excluding stops without a usable coordinate");
    }

    if excluded.len() == stops.len() {
        debug!("no routable stops");
        return Ok(PlannerResult {
            routes: Vec::new(),
            excluded,
            iterations: 0,
            converged: true,
        });
    }

    let start = validated("start", start)?;
    let end = match end {
        Some(end) => validated("end", Some(end))?,
        None => start,
    };

    let outcome = cluster_stops(stops, route_count, &options.cluster, rng);
    debug!(
        clusters = outcome.clusters.len(),
        iterations = outcome.iterations,
        converged = outcome.converged,
        "clustered stops"
    );

    let origin = start.coordinate;
    let ordered: Vec<Vec<&S>> = if options.parallel {
        outcome.clusters.par_iter().map(|cluster| order_stops(cluster, origin)).collect()
    } else {
        outcome.clusters.iter().map(|cluster| order_stops(cluster, origin)).collect()
    };

    let routes: Vec<Route<S>> = ordered
        .into_iter()
        .enumerate()
        .map(|(index, stops)| Route {
            id: index + 1,
            color: ROUTE_COLORS[index % ROUTE_COLORS.len()].to_string(),
            stops: stops.into_iter().cloned().collect(),
            start_location: start.clone(),
            end_location: end.clone(),
        })
        .collect();

    info!(
        requested = route_count,
        routes = routes.len(),
        stops = stops.len() - excluded.len(),
        excluded = excluded.len(),
        "planned routes"
    );

    Ok(PlannerResult {
        routes,
        excluded,
        iterations: outcome.iterations,
        converged: outcome.converged,
    })
}

/// Plan routes. See [`solve`] for the error contract.
pub fn optimize_routes<S, R>(
    stops: &[S],
    route_count: usize,
    start: Option<&Location>,
    end: Option<&Location>,
    rng: &mut R,
) -> Result<Vec<Route<S>>>
where
    S: Stop + Clone + Sync,
    R: Rng + ?Sized,
{
    solve(stops, route_count, start, end, &OptimizeOptions::default(), rng).map(|result| result.routes)
}

/// [`optimize_routes`] with the thread-local random source.
pub fn optimize_routes_default<S>(
    stops: &[S],
    route_count: usize,
    start: Option<&Location>,
    end: Option<&Location>,
) -> Result<Vec<Route<S>>>
where
    S: Stop + Clone + Sync,
{
    optimize_routes(stops, route_count, start, end, &mut rand::thread_rng())
}

/// Plan routes from caller settings, honoring `return_to_start`.
pub fn optimize_with_settings<S, R>(
    stops: &[S],
    settings: &RouteSettings,
    options: &OptimizeOptions,
    rng: &mut R,
) -> Result<PlannerResult<S>>
where
    S: Stop + Clone + Sync,
    R: Rng + ?Sized,
{
    solve(
        stops,
        settings.number_of_routes,
        settings.start_location.as_ref(),
        settings.effective_end_location(),
        options,
        rng,
    )
}

fn validated<'a>(which: &str, location: Option<&'a Location>) -> Result<&'a Location> {
    match location {
        Some(location) if location.coordinate.is_valid() => Ok(location),
        Some(location) => Err(PlannerError::InvalidArgument(format!(
            "{} location has an invalid coordinate ({}, {})",
            which, location.coordinate.lat, location.coordinate.lng
        ))),
        None => Err(PlannerError::InvalidArgument(format!("{} location is required", which))),
    }
}

/// Total route length in miles: start to first stop, stop to stop, last stop
/// to end. A route with no stops has length zero.
pub fn route_distance<S: Stop>(route: &Route<S>) -> f64 {
    if route.stops.is_empty() {
        return 0.0;
    }
    Polyline::from_route(route).length_miles()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub route_id: usize,
    pub stop_count: usize,
    pub distance_miles: f64,
    /// Downstream links capped at the waypoint limit will drop stops.
    pub exceeds_waypoint_limit: bool,
}

impl RouteSummary {
    pub fn from_route<S: Stop>(route: &Route<S>, waypoint_limit: usize) -> Self {
        Self {
            route_id: route.id,
            stop_count: route.stops.len(),
            distance_miles: route_distance(route),
            exceeds_waypoint_limit: route.stops.len() > waypoint_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub route_count: usize,
    pub total_stops: usize,
    pub total_distance_miles: f64,
}

impl PlanSummary {
    pub fn from_routes<S: Stop>(routes: &[Route<S>]) -> Self {
        Self {
            route_count: routes.len(),
            total_stops: routes.iter().map(|route| route.stops.len()).sum(),
            total_distance_miles: routes.iter().map(route_distance).sum(),
        }
    }
}
