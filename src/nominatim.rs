//! Nominatim HTTP adapter for address resolution.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::traits::{AddressResolver, ReverseResolver, Stop};
use crate::types::{AddressQuery, Coordinate, Customer, GeocodeResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Pause between consecutive batch requests.
    pub min_interval_ms: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "RoutePlanner/1.0".to_string(),
            timeout_secs: 10,
            min_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn search_url(&self, query: &AddressQuery) -> Option<Url> {
        let text = query.full_text();
        Url::parse_with_params(
            &format!("{}/search", self.config.base_url.trim_end_matches('/')),
            &[("format", "json"), ("q", text.as_str()), ("limit", "1")],
        )
        .ok()
    }

    pub fn reverse_url(&self, coordinate: Coordinate) -> Option<Url> {
        Url::parse_with_params(
            &format!("{}/reverse", self.config.base_url.trim_end_matches('/')),
            &[
                ("format", "json".to_string()),
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lng.to_string()),
            ],
        )
        .ok()
    }

    /// Resolve queries one at a time, pausing between requests.
    pub fn resolve_batch<F>(&self, queries: &[AddressQuery], on_progress: F) -> Vec<Option<GeocodeResult>>
    where
        F: FnMut(usize, usize),
    {
        resolve_batch(self, queries, self.interval(), on_progress)
    }

    /// Fill in coordinates for customers that have none yet.
    pub fn resolve_pending<F>(&self, customers: &[Customer], on_progress: F) -> Vec<Customer>
    where
        F: FnMut(usize, usize),
    {
        resolve_pending(self, customers, self.interval(), on_progress)
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.config.min_interval_ms)
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Option<T> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<T>());

        match response {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(error = %err, "nominatim request failed");
                None
            }
        }
    }
}

impl AddressResolver for NominatimClient {
    fn resolve(&self, query: &AddressQuery) -> Option<GeocodeResult> {
        let url = self.search_url(query)?;
        let hits: Vec<SearchHit> = self.get_json(url)?;
        let result = first_hit(hits);
        if result.is_none() {
            debug!(address = %query.full_text(), "no nominatim match");
        }
        result
    }
}

impl ReverseResolver for NominatimClient {
    fn reverse(&self, coordinate: Coordinate) -> Option<String> {
        let url = self.reverse_url(coordinate)?;
        let body: ReverseResponse = self.get_json(url)?;
        body.display_name
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

fn first_hit(hits: Vec<SearchHit>) -> Option<GeocodeResult> {
    let hit = hits.into_iter().next()?;
    let lat = hit.lat.trim().parse::<f64>().ok()?;
    let lng = hit.lon.trim().parse::<f64>().ok()?;
    Some(GeocodeResult {
        coordinate: Coordinate::new(lat, lng),
        display_name: hit.display_name,
    })
}

/// Resolve queries sequentially, sleeping `interval` between requests (not
/// after the last) and reporting `(completed, total)` after each.
pub fn resolve_batch<A, F>(
    resolver: &A,
    queries: &[AddressQuery],
    interval: Duration,
    mut on_progress: F,
) -> Vec<Option<GeocodeResult>>
where
    A: AddressResolver + ?Sized,
    F: FnMut(usize, usize),
{
    let total = queries.len();
    let mut results = Vec::with_capacity(total);

    for (index, query) in queries.iter().enumerate() {
        results.push(resolver.resolve(query));
        on_progress(index + 1, total);

        if index + 1 < total && !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    let resolved = results.iter().filter(|result| result.is_some()).count();
    debug!(resolved, total, "batch resolution finished");
    results
}

/// Resolve every customer lacking a coordinate. Customers that already have
/// one, or whose resolution fails, are returned unchanged.
pub fn resolve_pending<A, F>(
    resolver: &A,
    customers: &[Customer],
    interval: Duration,
    on_progress: F,
) -> Vec<Customer>
where
    A: AddressResolver + ?Sized,
    F: FnMut(usize, usize),
{
    let pending: Vec<usize> = customers
        .iter()
        .enumerate()
        .filter(|(_, customer)| customer.coordinate().is_none())
        .map(|(index, _)| index)
        .collect();
    let queries: Vec<AddressQuery> = pending.iter().map(|&index| customers[index].address_query()).collect();
    let results = resolve_batch(resolver, &queries, interval, on_progress);

    let mut updated = customers.to_vec();
    for (&index, result) in pending.iter().zip(results) {
        match result {
            Some(result) => updated[index] = customers[index].resolved(&result),
            None => warn!(customer = %customers[index].id, "address could not be resolved"),
        }
    }
    updated
}
