//! Comprehensive solver tests
//!
//! Coverage, cardinality, singleton shortcut, distance aggregation and the
//! line/empty/two-group scenarios, run against a caller-defined stop type.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use route_planner::haversine::haversine_miles;
use route_planner::solver::{route_distance, solve, OptimizeOptions};
use route_planner::traits::Stop;
use route_planner::types::{Coordinate, Location, Route};
use route_planner::PlannerError;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
struct TestId(String);

impl TestId {
    fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Builder for test stops with sensible defaults.
#[derive(Clone, Debug)]
struct TestStop {
    id: TestId,
    coordinate: Option<Coordinate>,
}

impl TestStop {
    fn new(id: &str) -> Self {
        Self {
            id: TestId::new(id),
            coordinate: None,
        }
    }

    fn at(mut self, lat: f64, lng: f64) -> Self {
        self.coordinate = Some(Coordinate::new(lat, lng));
        self
    }
}

impl Stop for TestStop {
    type Id = TestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

fn start() -> Location {
    Location::new(36.0, -115.0).with_label("Shop")
}

/// Random stops around the shop; roughly one in five has no coordinate.
fn random_stops(rng: &mut SmallRng, count: usize) -> Vec<TestStop> {
    (0..count)
        .map(|i| {
            let stop = TestStop::new(&format!("s{}", i));
            if rng.gen_bool(0.2) {
                stop
            } else {
                stop.at(36.0 + rng.gen_range(-0.3..0.3), -115.0 + rng.gen_range(-0.3..0.3))
            }
        })
        .collect()
}

fn run(stops: &[TestStop], count: usize, seed: u64) -> Vec<Route<TestStop>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    solve(stops, count, Some(&start()), None, &OptimizeOptions::default(), &mut rng)
        .expect("valid arguments")
        .routes
}

fn route_ids(route: &Route<TestStop>) -> Vec<&str> {
    route.stops.iter().map(|stop| stop.id.0.as_str()).collect()
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn every_located_stop_routed_exactly_once() {
    let mut data_rng = SmallRng::seed_from_u64(2024);
    for seed in 0..25 {
        let count = data_rng.gen_range(0..60);
        let stops = random_stops(&mut data_rng, count);
        let requested = data_rng.gen_range(1..8);

        let routes = run(&stops, requested, seed);

        let mut seen: HashMap<&TestId, usize> = HashMap::new();
        for route in &routes {
            for stop in &route.stops {
                *seen.entry(&stop.id).or_default() += 1;
            }
        }

        for stop in &stops {
            let expected = usize::from(stop.coordinate.is_some());
            assert_eq!(seen.get(&stop.id).copied().unwrap_or(0), expected, "seed {} stop {:?}", seed, stop.id);
        }
    }
}

#[test]
fn route_count_bounded_by_request_and_stops() {
    let mut data_rng = SmallRng::seed_from_u64(77);
    for seed in 0..25 {
        let count = data_rng.gen_range(0..30);
        let stops = random_stops(&mut data_rng, count);
        let requested = data_rng.gen_range(1..12);
        let valid = stops.iter().filter(|stop| stop.coordinate.is_some()).count();

        let routes = run(&stops, requested, seed);

        assert!(routes.len() <= requested.min(valid), "seed {}", seed);
        assert_eq!(routes.is_empty(), valid == 0, "seed {}", seed);
        assert!(routes.iter().all(|route| !route.stops.is_empty()));
        for (index, route) in routes.iter().enumerate() {
            assert_eq!(route.id, index + 1);
        }
    }
}

#[test]
fn singleton_routes_when_request_covers_stops() {
    let stops = vec![
        TestStop::new("a").at(36.1, -115.1),
        TestStop::new("b").at(36.2, -115.2),
        TestStop::new("c").at(36.3, -115.3),
    ];
    for requested in [3, 4, 50] {
        let routes = run(&stops, requested, 1);
        assert_eq!(routes.len(), 3);
        assert!(routes.iter().all(|route| route.stops.len() == 1));
    }
}

#[test]
fn distance_matches_independent_leg_sum() {
    let mut data_rng = SmallRng::seed_from_u64(5);
    let stops = random_stops(&mut data_rng, 40);
    let end = Location::new(36.2, -115.3);

    let mut rng = SmallRng::seed_from_u64(5);
    let routes = solve(&stops, 3, Some(&start()), Some(&end), &OptimizeOptions::default(), &mut rng)
        .unwrap()
        .routes;

    for route in &routes {
        let mut points = vec![route.start_location.coordinate];
        points.extend(route.stops.iter().map(|stop| stop.coordinate.unwrap()));
        points.push(route.end_location.coordinate);
        let expected: f64 = points.windows(2).map(|leg| haversine_miles(leg[0], leg[1])).sum();

        assert!((route_distance(route) - expected).abs() < 1e-9);
        assert_eq!(route.end_location, end);
    }
}

#[test]
fn same_seed_same_routes() {
    let mut data_rng = SmallRng::seed_from_u64(9);
    let stops = random_stops(&mut data_rng, 50);

    let first: Vec<Vec<String>> = run(&stops, 4, 123)
        .iter()
        .map(|route| route_ids(route).into_iter().map(str::to_string).collect())
        .collect();
    let second: Vec<Vec<String>> = run(&stops, 4, 123)
        .iter()
        .map(|route| route_ids(route).into_iter().map(str::to_string).collect())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn zero_route_count_is_rejected() {
    let stops = vec![TestStop::new("a").at(36.1, -115.1)];
    let mut rng = SmallRng::seed_from_u64(1);
    let result = solve(&stops, 0, Some(&start()), None, &OptimizeOptions::default(), &mut rng);
    assert!(matches!(result, Err(PlannerError::InvalidArgument(_))));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn stops_on_a_line_visited_outward_from_start() {
    // The start is one endpoint of the line.
    let stops = vec![
        TestStop::new("far").at(36.0, -114.8),
        TestStop::new("near").at(36.0, -114.9),
    ];

    let routes = run(&stops, 1, 3);

    assert_eq!(routes.len(), 1);
    assert_eq!(route_ids(&routes[0]), vec!["near", "far"]);
}

#[test]
fn more_routes_than_stops_gives_singletons() {
    let stops: Vec<TestStop> = (0..5)
        .map(|i| TestStop::new(&format!("s{}", i)).at(36.0 + i as f64 * 0.05, -115.0))
        .collect();

    let routes = run(&stops, 10, 8);

    assert_eq!(routes.len(), 5);
    assert!(routes.iter().all(|route| route.stops.len() == 1));
}

#[test]
fn no_located_stops_gives_no_routes() {
    let stops = vec![TestStop::new("a"), TestStop::new("b"), TestStop::new("c")];
    let routes = run(&stops, 3, 1);
    assert!(routes.is_empty());
}

#[test]
fn two_distant_groups_split_into_two_routes() {
    let stops = vec![
        TestStop::new("west-1").at(36.100, -115.300),
        TestStop::new("east-1").at(36.100, -114.700),
        TestStop::new("west-2").at(36.104, -115.296),
        TestStop::new("east-2").at(36.103, -114.704),
        TestStop::new("west-3").at(36.097, -115.303),
        TestStop::new("east-3").at(36.098, -114.698),
    ];

    for seed in 0..10 {
        let routes = run(&stops, 2, seed);
        assert_eq!(routes.len(), 2, "seed {}", seed);

        let within = routes
            .iter()
            .flat_map(|route| {
                route.stops.iter().flat_map(move |a| {
                    route.stops.iter().map(move |b| haversine_miles(a.coordinate.unwrap(), b.coordinate.unwrap()))
                })
            })
            .fold(0.0, f64::max);
        let between = routes[0]
            .stops
            .iter()
            .flat_map(|a| {
                routes[1]
                    .stops
                    .iter()
                    .map(move |b| haversine_miles(a.coordinate.unwrap(), b.coordinate.unwrap()))
            })
            .fold(f64::INFINITY, f64::min);

        assert!(within * 10.0 < between, "seed {}: within {} between {}", seed, within, between);
        for route in &routes {
            let prefix = &route.stops[0].id.0[..4];
            assert!(route.stops.iter().all(|stop| stop.id.0.starts_with(prefix)), "seed {}", seed);
        }
    }
}
