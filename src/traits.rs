//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. Apps with their own customer records
//! implement `Stop` for them; `types::Customer` is the bundled record.

use std::hash::Hash;

use crate::types::{AddressQuery, Coordinate, GeocodeResult};

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A stop is a single place to be visited on a route.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Resolved coordinate, if address resolution succeeded upstream.
    fn coordinate(&self) -> Option<Coordinate>;

    /// Coordinate usable for optimization: present and within range.
    fn routable_coordinate(&self) -> Option<Coordinate> {
        self.coordinate().filter(Coordinate::is_valid)
    }
}

impl<T: Stop> Stop for &T {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

/// Resolves a free-text address into a coordinate.
///
/// Failure of any kind is reported as `None`; the planner treats such stops
/// the same as stops whose resolution has not happened yet.
pub trait AddressResolver {
    fn resolve(&self, query: &AddressQuery) -> Option<GeocodeResult>;
}

/// Resolves a coordinate into a human-readable label.
pub trait ReverseResolver {
    fn reverse(&self, coordinate: Coordinate) -> Option<String>;
}
