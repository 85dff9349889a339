//! Plain data records exchanged with the planner.

use serde::{Deserialize, Serialize};

use crate::traits::Stop;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within the latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A coordinate with an optional label, used for route start/end points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            coordinate: Coordinate::new(lat, lng),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label if present, otherwise the coordinate at four decimals.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{:.4}, {:.4}", self.coordinate.lat, self.coordinate.lng),
        }
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            label: None,
        }
    }
}

/// A customer record; the stop type most callers route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn address_query(&self) -> AddressQuery {
        AddressQuery {
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        }
    }

    /// Returns a copy carrying the resolved coordinate.
    pub fn resolved(&self, result: &GeocodeResult) -> Self {
        Self {
            lat: Some(result.coordinate.lat),
            lng: Some(result.coordinate.lng),
            ..self.clone()
        }
    }
}

impl Stop for Customer {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lng?))
    }
}

/// Address fields sent to an address resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressQuery {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressQuery {
    /// Splits `"street, city, state zip"`; anything with fewer than three
    /// comma-separated parts is kept whole as the street address.
    pub fn parse(text: &str) -> Self {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return Self {
                address: text.trim().to_string(),
                ..Self::default()
            };
        }

        let mut state_zip = parts[2].split_whitespace();
        Self {
            address: parts[0].to_string(),
            city: parts[1].to_string(),
            state: state_zip.next().unwrap_or_default().to_string(),
            zip: state_zip.next().unwrap_or_default().to_string(),
        }
    }

    /// Single-line form: `"address, city, state zip"`.
    pub fn full_text(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }
}

/// A successful address resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub coordinate: Coordinate,
    pub display_name: String,
}

/// One optimized route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route<S> {
    /// 1-based position among the generated routes.
    pub id: usize,
    pub color: String,
    /// Stops in visiting order.
    pub stops: Vec<S>,
    pub start_location: Location,
    pub end_location: Location,
}

impl<S> Route<S> {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// Caller-facing settings for a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSettings {
    pub number_of_routes: usize,
    pub start_location: Option<Location>,
    pub end_location: Option<Location>,
    pub return_to_start: bool,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            number_of_routes: 1,
            start_location: None,
            end_location: None,
            return_to_start: true,
        }
    }
}

impl RouteSettings {
    /// The start location when returning to start or no end was given.
    pub fn effective_end_location(&self) -> Option<&Location> {
        if self.return_to_start {
            return self.start_location.as_ref();
        }
        self.end_location.as_ref().or(self.start_location.as_ref())
    }
}
