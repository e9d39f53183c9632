use serde::{Deserialize, Serialize};

/// Current conditions returned by the weather collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature_celsius: f64,
}

impl WeatherReport {
    pub fn summary(&self) -> String {
        format!("Weather in {}: {}°C", self.location, self.temperature_celsius)
    }
}

/// A point of interest returned by the places collaborator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
