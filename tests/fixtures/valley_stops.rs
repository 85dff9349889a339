//! Las Vegas valley service stops, grouped by neighborhood.
//!
//! Neighborhoods are 10+ miles apart while stops within one are a few miles
//! apart, so a correct partition is unambiguous.

use route_planner::types::{Customer, Location};

/// A named place with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn location(&self) -> Location {
        Location::new(self.lat, self.lng).with_label(self.name)
    }
}

pub const WAREHOUSE: Place = Place::new("Warehouse, Paradise", 36.0840, -115.1537);

pub const HENDERSON: &[Place] = &[
    Place::new("Green Valley Ranch", 36.0155, -115.0860),
    Place::new("Henderson City Hall", 36.0306, -114.9817),
    Place::new("Anthem Hills", 35.9730, -115.0980),
    Place::new("Inspirada", 35.9545, -115.1140),
];

pub const SUMMERLIN: &[Place] = &[
    Place::new("Downtown Summerlin", 36.1497, -115.3328),
    Place::new("Red Rock Casino", 36.1572, -115.3117),
    Place::new("Summerlin Hospital", 36.1925, -115.3080),
    Place::new("The Vistas", 36.1826, -115.3350),
];

pub const NORTH_LAS_VEGAS: &[Place] = &[
    Place::new("Aliante", 36.2870, -115.1855),
    Place::new("Craig Ranch Park", 36.2420, -115.1510),
    Place::new("Cannery", 36.2452, -115.1147),
];

/// Customers for the given places, ids `"{prefix}-{index}"`.
pub fn customers(prefix: &str, places: &[Place]) -> Vec<Customer> {
    places
        .iter()
        .enumerate()
        .map(|(index, place)| {
            let mut customer = Customer::new(format!("{}-{}", prefix, index), place.name).at(place.lat, place.lng);
            customer.city = "Las Vegas".to_string();
            customer.state = "NV".to_string();
            customer
        })
        .collect()
}

/// A customer whose address never resolved.
pub fn unresolved(id: &str) -> Customer {
    let mut customer = Customer::new(id, "Unresolved");
    customer.address = "0 Unknown Way".to_string();
    customer
}
