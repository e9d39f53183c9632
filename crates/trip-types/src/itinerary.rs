//! Canonical itinerary schema.
//!
//! This is both the model's output contract and the persisted "save trip"
//! layout: `{ daily_plans: [ { day, activities: [ { time, activity,
//! location, coordinates?, weather? } ] } ] }`.
//!
//! Field decoding is lenient (numbers where strings are expected, coordinate
//! pairs as arrays or objects) because model output is untrusted; encoding is
//! always the canonical shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Result;

/// A latitude/longitude pair that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Parse a `"lat,lng"` string. Anything malformed, non-finite or out of
    /// range yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat, lng) = text.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        Self::new(lat, lng)
    }

    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }
}

/// A single scheduled activity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(
        default,
        deserialize_with = "lenient_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather: Option<String>,
}

impl Activity {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates.as_deref().and_then(Coordinates::parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl DayPlan {
    pub fn new(day: u32, activities: Vec<Activity>) -> Self {
        Self { day, activities }
    }
}

/// A day-by-day itinerary in the canonical shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    pub daily_plans: Vec<DayPlan>,
}

impl Itinerary {
    pub fn new(daily_plans: Vec<DayPlan>) -> Self {
        Self { daily_plans }
    }

    pub fn is_empty(&self) -> bool {
        self.daily_plans.is_empty()
    }

    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.daily_plans.iter().find(|p| p.day == day)
    }

    pub fn activity_count(&self) -> usize {
        self.daily_plans.iter().map(|p| p.activities.len()).sum()
    }

    /// Map markers for every activity with usable coordinates.
    pub fn markers(&self) -> Vec<MapMarker> {
        self.daily_plans
            .iter()
            .flat_map(|p| p.activities.iter())
            .filter_map(|a| MapMarker::from_raw(&a.location, a.coordinates.as_deref()))
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An extra location proposed by the model. Suggestions accumulate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestedLocation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(
        default,
        deserialize_with = "lenient_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather: Option<String>,
}

impl SuggestedLocation {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates.as_deref().and_then(Coordinates::parse)
    }
}

/// A labelled point to place on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub label: String,
    pub coordinates: Coordinates,
}

impl MapMarker {
    /// Build a marker from raw coordinate text. Missing coordinates are
    /// silently skipped; present-but-invalid ones are logged and skipped.
    pub fn from_raw(label: &str, coordinates: Option<&str>) -> Option<Self> {
        let raw = coordinates.filter(|c| !c.trim().is_empty())?;
        match Coordinates::parse(raw) {
            Some(coordinates) => Some(Self {
                label: label.to_string(),
                coordinates,
            }),
            None => {
                log::warn!("Invalid coordinates for location: {} ({:?})", label, raw);
                None
            }
        }
    }
}

// ─── Lenient decoding ────────────────────────────────────────

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// Accepts `"lat,lng"`, `[lat, lng]`, `{lat, lng}` or `{lat, lon}` and
/// re-encodes pairs as `"lat,lng"`. String text is kept verbatim so that marker
/// building can report it; validation happens in [`Coordinates::parse`].
fn lenient_coordinates<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let pair = match &value {
        Value::String(s) => return Ok(Some(s.clone())),
        Value::Array(items) if items.len() == 2 => (items.first(), items.get(1)),
        Value::Object(map) => (map.get("lat"), map.get("lng").or_else(|| map.get("lon"))),
        _ => return Ok(None),
    };
    Ok(match pair {
        (Some(lat), Some(lng)) => match (scalar_to_string(lat), scalar_to_string(lng)) {
            (Some(lat), Some(lng)) => Some(format!("{},{}", lat.trim(), lng.trim())),
            _ => None,
        },
        _ => None,
    })
}
