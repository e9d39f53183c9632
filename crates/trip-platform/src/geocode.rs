//! Nominatim geocoding, used to center the map on the destination.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;

use trip_core::ports::GeocodePort;
use trip_types::{Result, TripError, config::GeocodeConfig, itinerary::Coordinates};

/// Map center used when the destination cannot be resolved.
pub const WORLD_CENTER: (f64, f64) = (20.0, 0.0);

const CITY_ZOOM: u8 = 12;
const WORLD_ZOOM: u8 = 2;

/// Initial map viewport for a destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
}

impl MapView {
    /// City-level view on a resolved destination, world view otherwise.
    pub fn for_destination(resolved: Option<Coordinates>) -> Self {
        match resolved {
            Some(c) => Self {
                center: (c.lat, c.lng),
                zoom: CITY_ZOOM,
            },
            None => Self {
                center: WORLD_CENTER,
                zoom: WORLD_ZOOM,
            },
        }
    }
}

pub struct Nominatim {
    config: GeocodeConfig,
}

impl Nominatim {
    pub fn new(config: GeocodeConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl GeocodePort for Nominatim {
    async fn resolve(&self, place: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.config.api_base.trim_end_matches('/'));
        let response = Request::get(&url)
            .query([("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(TripError::Collaborator(format!("geocoding failed: HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;
        parse_geocode_body(&body)
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// First hit of a `/search?format=json` body, if it carries valid coordinates.
pub fn parse_geocode_body(body: &str) -> Result<Option<Coordinates>> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)
        .map_err(|e| TripError::Collaborator(format!("unreadable geocoding response: {}", e)))?;
    Ok(hits.first().and_then(|hit| {
        let lat = hit.lat.trim().parse().ok()?;
        let lng = hit.lon.trim().parse().ok()?;
        Coordinates::new(lat, lng)
    }))
}
