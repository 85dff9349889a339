//! Centroid clustering of stops into route groups.
//!
//! k-means with k-means++ seeding over great-circle distance. Centroids are
//! updated with a planar mean of latitude/longitude, which holds for compact
//! regional service areas but not across the poles or the antimeridian.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::haversine::haversine_miles;
use crate::traits::Stop;
use crate::types::Coordinate;

/// A group of stops assigned to the same route. Order is not meaningful.
pub type Cluster<'a, S> = Vec<&'a S>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterOptions {
    /// Upper bound on assignment/update rounds.
    pub max_iterations: usize,
    /// A centroid moving less than this (per axis, in degrees) counts as settled.
    pub tolerance_degrees: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance_degrees: 0.0001,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClusterOutcome<'a, S> {
    /// Non-empty clusters in centroid order.
    pub clusters: Vec<Cluster<'a, S>>,
    /// Assignment/update rounds actually run (0 for the singleton shortcut).
    pub iterations: usize,
    /// False when the iteration cap stopped the loop.
    pub converged: bool,
}

/// Partition `stops` into at most `k` non-empty clusters.
///
/// Stops without a routable coordinate are ignored. With no more stops than
/// `k`, every stop becomes its own cluster.
pub fn cluster_stops<'a, S, R>(
    stops: &'a [S],
    k: usize,
    options: &ClusterOptions,
    rng: &mut R,
) -> ClusterOutcome<'a, S>
where
    S: Stop,
    R: Rng + ?Sized,
{
    let points: Vec<(&'a S, Coordinate)> = stops
        .iter()
        .filter_map(|stop| stop.routable_coordinate().map(|coord| (stop, coord)))
        .collect();

    if points.is_empty() || k == 0 {
        return ClusterOutcome {
            clusters: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    if points.len() <= k {
        debug!(stops = points.len(), k, "fewer stops than clusters, using singletons");
        return ClusterOutcome {
            clusters: points.into_iter().map(|(stop, _)| vec![stop]).collect(),
            iterations: 0,
            converged: true,
        };
    }

    let coords: Vec<Coordinate> = points.iter().map(|(_, coord)| *coord).collect();
    let mut centroids = seed_centroids(&coords, k, rng);
    debug!(k, stops = coords.len(), "seeded centroids");

    let mut assignments: Vec<usize> = Vec::new();
    let mut iterations = 0;
    let mut converged = false;
    // At least one assignment round, or every stop would be dropped.
    let max_iterations = options.max_iterations.max(1);

    while iterations < max_iterations {
        iterations += 1;

        assignments = coords
            .par_iter()
            .map(|coord| nearest_centroid(*coord, &centroids))
            .collect();

        converged = update_centroids(&coords, &assignments, &mut centroids, options.tolerance_degrees);
        if converged {
            break;
        }
    }

    debug!(iterations, converged, "clustering finished");

    let mut clusters: Vec<Cluster<'a, S>> = vec![Vec::new(); k];
    for ((stop, _), &cluster) in points.iter().zip(&assignments) {
        clusters[cluster].push(*stop);
    }
    clusters.retain(|cluster| !cluster.is_empty());

    ClusterOutcome {
        clusters,
        iterations,
        converged,
    }
}

/// k-means++ seeding: the first centroid uniformly at random, each further one
/// sampled with probability proportional to its squared distance from the
/// nearest centroid chosen so far.
///
/// Requires `coords.len() > k`.
fn seed_centroids<R>(coords: &[Coordinate], k: usize, rng: &mut R) -> Vec<Coordinate>
where
    R: Rng + ?Sized,
{
    let mut used = vec![false; coords.len()];
    let mut centroids = Vec::with_capacity(k);

    let first = rng.gen_range(0..coords.len());
    used[first] = true;
    centroids.push(coords[first]);

    while centroids.len() < k {
        let weights: Vec<f64> = coords
            .iter()
            .map(|coord| {
                let nearest = centroids
                    .iter()
                    .map(|centroid| haversine_miles(*coord, *centroid))
                    .fold(f64::INFINITY, f64::min);
                nearest * nearest
            })
            .collect();

        let total: f64 = weights.iter().sum();
        let pick = if total > 0.0 {
            sample_weighted(&weights, rng.gen_range(0.0..total))
        } else {
            None
        };

        // All remaining stops sit on a centroid: take the first unused one.
        let pick = pick.or_else(|| used.iter().position(|taken| !taken)).unwrap_or(0);

        used[pick] = true;
        centroids.push(coords[pick]);
    }

    centroids
}

/// First index with positive weight whose running total reaches `target`.
fn sample_weighted(weights: &[f64], target: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if cumulative >= target {
            return Some(index);
        }
    }
    last_positive
}

/// Index of the nearest centroid; ties go to the lowest index.
fn nearest_centroid(coord: Coordinate, centroids: &[Coordinate]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let dist = haversine_miles(coord, *centroid);
        if dist < best_dist {
            best_dist = dist;
            best = index;
        }
    }
    best
}

/// Move each centroid to the mean of its members. Empty clusters keep their
/// centroid. Returns true when no centroid moved beyond `tolerance`.
fn update_centroids(
    coords: &[Coordinate],
    assignments: &[usize],
    centroids: &mut [Coordinate],
    tolerance: f64,
) -> bool {
    let mut sums = vec![(0.0, 0.0); centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (coord, &cluster) in coords.iter().zip(assignments) {
        sums[cluster].0 += coord.lat;
        sums[cluster].1 += coord.lng;
        counts[cluster] += 1;
    }

    let mut settled = true;
    for (index, centroid) in centroids.iter_mut().enumerate() {
        if counts[index] == 0 {
            continue;
        }
        let count = counts[index] as f64;
        let updated = Coordinate::new(sums[index].0 / count, sums[index].1 / count);

        if (updated.lat - centroid.lat).abs() > tolerance || (updated.lng - centroid.lng).abs() > tolerance {
            settled = false;
        }
        *centroid = updated;
    }
    settled
}
