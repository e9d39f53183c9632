//! Reconcile model JSON into the canonical itinerary schema.
//!
//! Model output is an untrusted wire payload. A small ordered set of shape
//! detectors each try a structural match; the first hit produces the
//! canonical [`Itinerary`]. When none match, the whole object is accepted as
//! a single synthetic day and a warning is reported to the caller.

use serde_json::{Map, Value};
use trip_types::{
    Result, TripError,
    itinerary::{Activity, DayPlan, Itinerary, SuggestedLocation},
};

use crate::extract::extract_json;

pub const DAILY_PLANS_KEY: &str = "daily_plans";
pub const SUGGESTED_LOCATIONS_KEY: &str = "suggested_locations";

pub const UNEXPECTED_SHAPE_WARNING: &str =
    "Received unexpected JSON structure. Attempting to use as-is.";

/// Which accepted input shape an itinerary was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItineraryShape {
    /// `{daily_plans: [...]}`
    Canonical,
    /// `{days: [{day, activities}]}`
    Days,
    /// `{itinerary: [{activities}]}`, numbered by position
    Positional,
    /// Anything else, wrapped as day 1
    Synthetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub itinerary: Itinerary,
    pub shape: ItineraryShape,
    /// Set when the payload was only accepted through the synthetic fallback
    pub warning: Option<String>,
}

type Detector = fn(&Map<String, Value>) -> Option<Vec<DayPlan>>;

const DETECTORS: &[(ItineraryShape, Detector)] = &[
    (ItineraryShape::Canonical, detect_canonical),
    (ItineraryShape::Days, detect_days),
    (ItineraryShape::Positional, detect_positional),
];

/// Extract and parse the JSON payload of a model reply.
/// A parse failure carries the full reply text for diagnosis.
pub fn parse_model_json(content: &str) -> Result<Value> {
    serde_json::from_str(extract_json(content)).map_err(|e| TripError::Parse {
        message: e.to_string(),
        raw: content.to_string(),
    })
}

/// True when `value` carries a `daily_plans` array.
pub fn has_daily_plans(value: &Value) -> bool {
    value.get(DAILY_PLANS_KEY).is_some_and(Value::is_array)
}

pub fn normalize(raw: &Value) -> Result<Normalized> {
    let obj = raw.as_object().ok_or_else(|| {
        TripError::Normalization(format!("expected a JSON object, got {}", type_name(raw)))
    })?;

    for (shape, detect) in DETECTORS {
        if let Some(daily_plans) = detect(obj) {
            log::debug!("Itinerary decoded from {:?} shape", shape);
            return Ok(Normalized {
                itinerary: Itinerary::new(daily_plans),
                shape: *shape,
                warning: None,
            });
        }
    }

    log::warn!("{}", UNEXPECTED_SHAPE_WARNING);
    Ok(Normalized {
        itinerary: Itinerary::new(vec![DayPlan::new(1, activities(obj.get("activities")))]),
        shape: ItineraryShape::Synthetic,
        warning: Some(UNEXPECTED_SHAPE_WARNING.to_string()),
    })
}

/// Decode a `{suggested_locations: [...]}` payload.
pub fn normalize_suggestions(raw: &Value) -> Result<Vec<SuggestedLocation>> {
    let entries = raw
        .get(SUGGESTED_LOCATIONS_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| TripError::Schema(format!("missing `{}` list", SUGGESTED_LOCATIONS_KEY)))?;

    Ok(entries
        .iter()
        .filter_map(|entry| decode_entry::<SuggestedLocation>(entry, "suggested location"))
        .collect())
}

// ─── Shape detectors ─────────────────────────────────────────

fn detect_canonical(obj: &Map<String, Value>) -> Option<Vec<DayPlan>> {
    obj.get(DAILY_PLANS_KEY)?.as_array().map(|plans| numbered_days(plans))
}

fn detect_days(obj: &Map<String, Value>) -> Option<Vec<DayPlan>> {
    obj.get("days")?.as_array().map(|plans| numbered_days(plans))
}

fn detect_positional(obj: &Map<String, Value>) -> Option<Vec<DayPlan>> {
    let plans = obj.get("itinerary")?.as_array()?;
    Some(
        day_objects(plans)
            .enumerate()
            .map(|(i, plan)| DayPlan::new(position(i), activities(plan.get("activities"))))
            .collect(),
    )
}

/// Day entries that carry their own number; a missing or unusable number
/// falls back to the entry's position.
fn numbered_days(plans: &[Value]) -> Vec<DayPlan> {
    day_objects(plans)
        .enumerate()
        .map(|(i, plan)| {
            DayPlan::new(
                day_number(plan.get("day")).unwrap_or_else(|| position(i)),
                activities(plan.get("activities")),
            )
        })
        .collect()
}

fn day_objects(plans: &[Value]) -> impl Iterator<Item = &Map<String, Value>> {
    plans.iter().filter_map(|plan| {
        let obj = plan.as_object();
        if obj.is_none() {
            log::warn!("Skipping non-object day entry: {}", plan);
        }
        obj
    })
}

fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn day_number(value: Option<&Value>) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|&n| n >= 1)
}

fn activities(value: Option<&Value>) -> Vec<Activity> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| decode_entry::<Activity>(item, "activity"))
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            log::warn!("Ignoring non-list activities: {}", other);
            Vec::new()
        }
    }
}

fn decode_entry<T: serde::de::DeserializeOwned>(value: &Value, what: &str) -> Option<T> {
    if !value.is_object() {
        log::warn!("Skipping non-object {}: {}", what, value);
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("Skipping malformed {}: {}", what, e);
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
