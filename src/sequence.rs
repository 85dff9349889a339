//! Nearest-neighbor ordering of a cluster's stops.

use crate::haversine::haversine_miles;
use crate::traits::Stop;
use crate::types::Coordinate;

/// Order `stops` greedily: from `start`, repeatedly visit the nearest stop not
/// yet visited.
///
/// Ties go to the stop that comes first in `stops`. Stops without a routable
/// coordinate are never chosen as "nearest" and end up at the tail in their
/// input order. Quadratic in the number of stops.
pub fn order_stops<'a, S: Stop>(stops: &[&'a S], start: Coordinate) -> Vec<&'a S> {
    if stops.len() <= 1 {
        return stops.to_vec();
    }

    let mut remaining: Vec<(&'a S, Coordinate)> = Vec::with_capacity(stops.len());
    let mut unroutable: Vec<&'a S> = Vec::new();
    for stop in stops {
        match stop.routable_coordinate() {
            Some(coord) => remaining.push((*stop, coord)),
            None => unroutable.push(*stop),
        }
    }

    let mut ordered = Vec::with_capacity(stops.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut nearest_index = 0;
        let mut nearest_dist = f64::INFINITY;
        for (index, (_, coord)) in remaining.iter().enumerate() {
            let dist = haversine_miles(current, *coord);
            if dist < nearest_dist {
                nearest_dist = dist;
                nearest_index = index;
            }
        }

        let (stop, coord) = remaining.remove(nearest_index);
        ordered.push(stop);
        current = coord;
    }

    ordered.extend(unroutable);
    ordered
}
