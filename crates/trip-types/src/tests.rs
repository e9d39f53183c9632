#[cfg(test)]
mod tests {
    use crate::{ErrorKind, TripError};
    use crate::config::*;
    use crate::event::*;
    use crate::intake::*;
    use crate::itinerary::*;
    use crate::lookup::*;
    use crate::message::*;
    use crate::trip::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn paris_intake() -> TripIntake {
        TripIntake {
            destination: "Paris".to_string(),
            start_date: date(2024, 6, 1),
            end_date: date(2024, 6, 3),
            arrival_time: time(9, 30),
            departure_time: time(18, 0),
            traveling_via: TravelMode::Train,
            traveling_with: false,
            interests: vec!["museums".to_string(), "food".to_string()],
        }
    }

    // ─── Intake Tests ────────────────────────────────────────

    #[test]
    fn test_duration_is_inclusive() {
        assert_eq!(paris_intake().duration(), 3);
    }

    #[test]
    fn test_duration_single_day() {
        let mut intake = paris_intake();
        intake.end_date = intake.start_date;
        assert_eq!(intake.duration(), 1);
    }

    #[test]
    fn test_duration_follows_dates() {
        let mut intake = paris_intake();
        intake.end_date = date(2024, 6, 10);
        assert_eq!(intake.duration(), 10);
    }

    #[test]
    fn test_trip_duration_rejects_reversed_dates() {
        assert_eq!(trip_duration(date(2024, 6, 3), date(2024, 6, 1)), None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(paris_intake().validate().is_ok());
    }

    #[test]
    fn test_validate_blank_destination() {
        let mut intake = paris_intake();
        intake.destination = "   ".to_string();
        let err = intake.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_validate_reversed_dates() {
        let mut intake = paris_intake();
        intake.end_date = date(2024, 5, 30);
        assert!(matches!(intake.validate(), Err(TripError::Validation(_))));
    }

    #[test]
    fn test_parse_interests() {
        assert_eq!(
            parse_interests(" museums, food ,, hiking ,"),
            vec!["museums", "food", "hiking"]
        );
        assert!(parse_interests(" , ").is_empty());
    }

    #[test]
    fn test_parse_interests_keeps_duplicates() {
        assert_eq!(parse_interests("food, food"), vec!["food", "food"]);
    }

    #[test]
    fn test_travel_mode_parse() {
        assert_eq!(TravelMode::parse("Flight"), TravelMode::Flight);
        assert_eq!(TravelMode::parse(" train "), TravelMode::Train);
        assert_eq!(
            TravelMode::parse("Bicycle"),
            TravelMode::Other("Bicycle".to_string())
        );
    }

    #[test]
    fn test_travel_mode_booking_hint() {
        assert!(TravelMode::Flight.booking_hint().unwrap().contains("Skyscanner"));
        assert!(TravelMode::Vehicle.booking_hint().is_none());
        assert_eq!(TravelMode::suggested().len(), 3);
    }

    #[test]
    fn test_travel_mode_serializes_as_label() {
        let json = serde_json::to_string(&TravelMode::Bus).unwrap();
        assert_eq!(json, r#""Bus""#);
        let mode: TravelMode = serde_json::from_str(r#""ferry""#).unwrap();
        assert_eq!(mode, TravelMode::Other("ferry".to_string()));
    }

    #[test]
    fn test_intake_serialization_roundtrip() {
        let intake = paris_intake();
        let json = serde_json::to_string(&intake).unwrap();
        let back: TripIntake = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intake);
    }

    // ─── Coordinates Tests ───────────────────────────────────

    #[test]
    fn test_coordinates_parse_valid() {
        let c = Coordinates::parse("48.85,2.35").unwrap();
        assert_eq!(c.lat, 48.85);
        assert_eq!(c.lng, 2.35);
    }

    #[test]
    fn test_coordinates_parse_with_spaces() {
        let c = Coordinates::parse(" 48.85 , 2.35 ").unwrap();
        assert_eq!(c.lat, 48.85);
    }

    #[test]
    fn test_coordinates_parse_invalid() {
        assert!(Coordinates::parse("abc").is_none());
        assert!(Coordinates::parse("48.85").is_none());
        assert!(Coordinates::parse("48.85,east").is_none());
        assert!(Coordinates::parse("NaN,2.0").is_none());
        assert!(Coordinates::parse("inf,2.0").is_none());
        assert!(Coordinates::parse("95.0,2.0").is_none());
        assert!(Coordinates::parse("1.0,200.0").is_none());
    }

    #[test]
    fn test_activity_coordinates_absent() {
        let activity = Activity {
            location: "Louvre".to_string(),
            coordinates: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(activity.coordinates().is_none());
    }

    // ─── Itinerary Schema Tests ──────────────────────────────

    #[test]
    fn test_itinerary_wire_format() {
        let itinerary = Itinerary::new(vec![DayPlan::new(
            1,
            vec![Activity {
                time: "14:00".to_string(),
                activity: "Visit".to_string(),
                location: "Louvre".to_string(),
                coordinates: Some("48.86,2.33".to_string()),
                weather: None,
            }],
        )]);
        let value = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "daily_plans": [{
                    "day": 1,
                    "activities": [{
                        "time": "14:00",
                        "activity": "Visit",
                        "location": "Louvre",
                        "coordinates": "48.86,2.33"
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_activity_lenient_fields() {
        let activity: Activity = serde_json::from_value(serde_json::json!({
            "time": 9,
            "activity": "Breakfast",
            "coordinates": [48.85, 2.35],
            "weather": ""
        }))
        .unwrap();
        assert_eq!(activity.time, "9");
        assert_eq!(activity.location, "");
        assert_eq!(activity.coordinates.as_deref(), Some("48.85,2.35"));
        assert_eq!(activity.weather.as_deref(), Some(""));
    }

    #[test]
    fn test_activity_coordinates_object() {
        let activity: Activity = serde_json::from_value(serde_json::json!({
            "coordinates": {"lat": 48.85, "lon": 2.35}
        }))
        .unwrap();
        assert_eq!(activity.coordinates().unwrap().lng, 2.35);
    }

    #[test]
    fn test_activity_coordinates_null() {
        let activity: Activity =
            serde_json::from_value(serde_json::json!({"coordinates": null})).unwrap();
        assert!(activity.coordinates.is_none());
    }

    #[test]
    fn test_canonical_itinerary_roundtrips_verbatim() {
        let raw = serde_json::json!({"daily_plans": [{"day": 1, "activities": [{
            "time": "10:00",
            "activity": "Louvre",
            "location": "Louvre",
            "coordinates": " 48.86, 2.33 ",
            "weather": ""
        }]}]});
        let itinerary: Itinerary = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&itinerary).unwrap(), raw);
        assert_eq!(itinerary.markers().len(), 1);
    }

    #[test]
    fn test_blank_coordinates_make_no_marker() {
        assert!(MapMarker::from_raw("Somewhere", Some("")).is_none());
        assert!(MapMarker::from_raw("Somewhere", Some("  ")).is_none());
        assert!(MapMarker::from_raw("Somewhere", None).is_none());
    }

    #[test]
    fn test_itinerary_markers_skip_invalid() {
        let itinerary = Itinerary::new(vec![
            DayPlan::new(
                1,
                vec![
                    Activity {
                        location: "Louvre".to_string(),
                        coordinates: Some("48.86,2.33".to_string()),
                        ..Default::default()
                    },
                    Activity {
                        location: "Nowhere".to_string(),
                        coordinates: Some("abc".to_string()),
                        ..Default::default()
                    },
                ],
            ),
            DayPlan::new(2, vec![Activity::default()]),
        ]);
        let markers = itinerary.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label, "Louvre");
        assert_eq!(itinerary.activity_count(), 3);
    }

    #[test]
    fn test_itinerary_day_lookup() {
        let itinerary = Itinerary::new(vec![DayPlan::new(2, vec![]), DayPlan::new(5, vec![])]);
        assert!(itinerary.day(5).is_some());
        assert!(itinerary.day(1).is_none());
    }

    #[test]
    fn test_suggested_location_defaults() {
        let loc: SuggestedLocation =
            serde_json::from_value(serde_json::json!({"name": "Sainte-Chapelle"})).unwrap();
        assert_eq!(loc.name, "Sainte-Chapelle");
        assert!(loc.description.is_empty());
        assert!(loc.coordinates().is_none());
    }

    // ─── Message / Event Tests ───────────────────────────────

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("u").content, "u");
        assert_eq!(Message::assistant("a").role.as_str(), "assistant");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    }

    #[test]
    fn test_planner_event_serialization() {
        let event = PlannerEvent::ItineraryUpdated {
            request: "add a museum".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ItineraryUpdated"));
        assert!(json.contains("add a museum"));
    }

    // ─── Lookup / Trip Tests ─────────────────────────────────

    #[test]
    fn test_weather_summary() {
        let report = WeatherReport {
            location: "Paris".to_string(),
            temperature_celsius: 21.5,
        };
        assert_eq!(report.summary(), "Weather in Paris: 21.5°C");
    }

    #[test]
    fn test_saved_trip_summary() {
        let trip = SavedTrip::new("Paris", Itinerary::new(vec![DayPlan::new(1, vec![])]));
        assert!(!trip.id.is_empty());
        let summary = trip.summary();
        assert_eq!(summary.destination, "Paris");
        assert_eq!(summary.day_count, 1);
    }

    #[test]
    fn test_saved_trip_ids_unique() {
        let a = SavedTrip::new("Paris", Itinerary::default());
        let b = SavedTrip::new("Paris", Itinerary::default());
        assert_ne!(a.id, b.id);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.llm.provider, LlmProvider::Groq);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.timeout_ms, 30_000);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
    }

    #[test]
    fn test_config_validate_requires_key() {
        let mut config = PlannerConfig::default();
        assert!(matches!(config.validate(), Err(TripError::Config(_))));
        config.llm.api_key = "gsk-test".to_string();
        assert!(config.validate().is_ok());
        config.llm.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_base_url_override() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.base_url(), "https://api.groq.com/openai");
        llm.api_base = Some("http://localhost:8080".to_string());
        assert_eq!(llm.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_config_missing_timeout_uses_default() {
        let mut value = serde_json::to_value(PlannerConfig::default()).unwrap();
        value["llm"].as_object_mut().unwrap().remove("timeout_ms");
        let config: PlannerConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.llm.timeout_ms, 30_000);
    }

    #[test]
    fn test_provider_labels() {
        for provider in LlmProvider::all() {
            assert!(!provider.label().is_empty());
        }
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_kinds() {
        assert_eq!(TripError::Timeout(10).kind(), ErrorKind::Model);
        assert_eq!(TripError::Schema("x".into()).kind(), ErrorKind::Schema);
        assert_eq!(TripError::Collaborator("x".into()).kind(), ErrorKind::Collaborator);
        let parse = TripError::Parse {
            message: "eof".into(),
            raw: "not json".into(),
        };
        assert_eq!(parse.kind(), ErrorKind::Parse);
        assert_eq!(parse.raw_output(), Some("not json"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(TripError::Timeout(30000).to_string(), "Timeout after 30000ms");
        let err: TripError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, TripError::Serialization(_)));
    }
}
