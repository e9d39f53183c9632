//! WASM-target tests for trip-types.
//!
//! Mirrors a subset of the native unit tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chrono::NaiveDate;
use trip_types::config::*;
use trip_types::intake::*;
use trip_types::itinerary::*;
use trip_types::message::*;
use trip_types::trip::*;
use trip_types::{ErrorKind, TripError};

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_constructors() {
    assert_eq!(Message::system("s").role, Role::System);
    assert_eq!(Message::user("u").role, Role::User);
    assert_eq!(Message::assistant("a").content, "a");
}

// ─── Intake Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn trip_duration_inclusive() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    assert_eq!(trip_duration(start, end), Some(3));
    assert_eq!(trip_duration(start, start), Some(1));
    assert_eq!(trip_duration(end, start), None);
}

#[wasm_bindgen_test]
fn travel_mode_parse() {
    assert_eq!(TravelMode::parse(" Plane "), TravelMode::Flight);
    assert_eq!(TravelMode::parse("ferry"), TravelMode::Other("ferry".to_string()));
    assert!(TravelMode::Vehicle.booking_hint().is_none());
}

#[wasm_bindgen_test]
fn interests_split() {
    assert_eq!(parse_interests("art, , food"), vec!["art", "food"]);
}

// ─── Itinerary Tests ─────────────────────────────────────

#[wasm_bindgen_test]
fn coordinates_validate_range() {
    assert!(Coordinates::parse("48.85, 2.35").is_some());
    assert!(Coordinates::parse("95,0").is_none());
    assert!(Coordinates::parse("nan,0").is_none());
}

#[wasm_bindgen_test]
fn itinerary_canonical_wire_format() {
    let json = r#"{"daily_plans":[{"day":1,"activities":[{"time":"09:00","activity":"Tram 28","location":"Alfama","coordinates":[38.71,-9.13]}]}]}"#;
    let itinerary: Itinerary = serde_json::from_str(json).unwrap();
    assert_eq!(itinerary.daily_plans[0].activities[0].coordinates.as_deref(), Some("38.71,-9.13"));
    assert_eq!(itinerary.markers().len(), 1);
}

// ─── Trip & Config Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn saved_trip_summary() {
    let trip = SavedTrip::new("Lisbon", Itinerary::default());
    let summary = trip.summary();
    assert_eq!(summary.id, trip.id);
    assert_eq!(summary.day_count, 0);
}

#[wasm_bindgen_test]
fn config_requires_api_key() {
    let err = PlannerConfig::default().validate().unwrap_err();
    assert!(matches!(err, TripError::Config(_)));
    assert_eq!(TripError::Timeout(5).kind(), ErrorKind::Model);
}
