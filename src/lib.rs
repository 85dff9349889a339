//! route-planner core
//!
//! Groups service stops into a bounded number of routes and orders each
//! route's stops into a visiting sequence between a start and end location.

pub mod error;
pub mod traits;
pub mod types;
pub mod haversine;
pub mod cluster;
pub mod sequence;
pub mod solver;
pub mod polyline;
pub mod links;
pub mod nominatim;

pub use error::{PlannerError, Result};
