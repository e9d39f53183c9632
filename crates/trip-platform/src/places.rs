//! Foursquare venue-explore adapter.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use trip_core::ports::PlacesPort;
use trip_types::{Result, TripError, config::PlacesConfig, lookup::Place};

pub struct Foursquare {
    config: PlacesConfig,
}

impl Foursquare {
    pub fn new(config: PlacesConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl PlacesPort for Foursquare {
    async fn famous_places(&self, city: &str) -> Result<Vec<Place>> {
        if self.config.api_key.is_empty() {
            return Err(TripError::Config("places API key is not configured".to_string()));
        }

        let url = format!("{}/venues/explore", self.config.api_base.trim_end_matches('/'));
        let response = Request::get(&url)
            .query([
                ("near", city),
                ("client_id", self.config.api_key.as_str()),
                ("v", self.config.version.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(TripError::Collaborator(format!(
                "Failed to fetch famous places: HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;
        let places = parse_places_body(&body)?;
        log::debug!("Found {} famous places near {}", places.len(), city);
        Ok(places)
    }
}

/// Decode an explore body. Accepts a flat `results` list as well as the
/// grouped `response.groups[].items[].venue` layout.
pub fn parse_places_body(body: &str) -> Result<Vec<Place>> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| TripError::Collaborator(format!("unreadable places response: {}", e)))?;

    if let Some(results) = data.get("results").and_then(Value::as_array) {
        return Ok(results.iter().filter_map(flat_place).collect());
    }

    let groups = data
        .pointer("/response/groups")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    Ok(groups
        .iter()
        .filter_map(|g| g.get("items").and_then(Value::as_array))
        .flatten()
        .filter_map(|item| item.get("venue"))
        .filter_map(venue_place)
        .collect())
}

fn flat_place(value: &Value) -> Option<Place> {
    Some(Place {
        name: value.get("name")?.as_str()?.to_string(),
        address: text(value.get("formatted_address")),
        image_url: value
            .get("imageUrl")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
            .map(String::from),
    })
}

fn venue_place(venue: &Value) -> Option<Place> {
    let address = match venue.pointer("/location/formattedAddress") {
        Some(Value::Array(lines)) => lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => text(venue.pointer("/location/address")),
    };
    Some(Place {
        name: venue.get("name")?.as_str()?.to_string(),
        address,
        image_url: None,
    })
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}
