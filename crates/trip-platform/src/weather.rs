//! OpenWeatherMap current-weather adapter.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use trip_core::ports::WeatherPort;
use trip_types::{Result, TripError, config::WeatherConfig, lookup::WeatherReport};

pub struct OpenWeatherMap {
    config: WeatherConfig,
}

impl OpenWeatherMap {
    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl WeatherPort for OpenWeatherMap {
    async fn current(&self, city: &str) -> Result<WeatherReport> {
        if self.config.api_key.is_empty() {
            return Err(TripError::Config("weather API key is not configured".to_string()));
        }

        let url = format!("{}/weather", self.config.api_base.trim_end_matches('/'));
        let response = Request::get(&url)
            .query([
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;

        let report = parse_weather_body(&body)?;
        if !(200..300).contains(&status) {
            return Err(TripError::Collaborator(format!("weather lookup failed: HTTP {}", status)));
        }
        Ok(report)
    }
}

/// Decode a `/weather` body. An error payload (`cod` other than 200)
/// becomes `Collaborator` carrying the API's message.
pub fn parse_weather_body(body: &str) -> Result<WeatherReport> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| TripError::Collaborator(format!("unreadable weather response: {}", e)))?;

    let cod = match data.get("cod") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    if cod.is_some_and(|c| c != 200) {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(TripError::Collaborator(message.to_string()));
    }

    let location = data
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| TripError::Collaborator("weather response has no location".to_string()))?;
    let temperature = data
        .pointer("/main/temp")
        .and_then(Value::as_f64)
        .ok_or_else(|| TripError::Collaborator("weather response has no temperature".to_string()))?;

    Ok(WeatherReport {
        location: location.to_string(),
        temperature_celsius: temperature,
    })
}
