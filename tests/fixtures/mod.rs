//! Test fixtures for route-planner.
//!
//! Real Las Vegas valley coordinates grouped by neighborhood, plus a
//! builder for customers.

pub mod valley_stops;

pub use valley_stops::*;
