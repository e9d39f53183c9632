//! Prompt construction for the three model operations.
//!
//! Every builder is pure: the same inputs always produce the same
//! (system, user) pair.

use trip_types::{
    Result,
    intake::{TIME_FORMAT, TripIntake},
    itinerary::Itinerary,
    message::Message,
};

const JSON_ONLY: &str = "YOU MUST RESPOND WITH ONLY A VALID JSON OBJECT, with no additional text before or after.";

const ITINERARY_SCHEMA: &str = r#"{
    "daily_plans": [
        {
            "day": 1,
            "activities": [
                {
                    "time": "14:00",
                    "activity": "description",
                    "location": "place name",
                    "coordinates": "lat,lng",
                    "weather": "weather forecast"
                }
            ]
        }
    ]
}"#;

const SUGGESTION_SCHEMA: &str = r#"{
    "suggested_locations": [
        {
            "name": "Location name",
            "description": "Brief description",
            "reason": "Why it matches user interests",
            "coordinates": "lat,lng",
            "weather": "weather forecast"
        }
    ]
}"#;

/// A system/user message pair for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn into_messages(self) -> Vec<Message> {
        vec![Message::system(self.system), Message::user(self.user)]
    }
}

pub fn build_generate_prompt(intake: &TripIntake, weather: &str) -> PromptPair {
    let system = format!(
        "You are a smart AI travel assistant.\n\
         Generate a detailed itinerary for {destination} from {start} to {end}, based on these interests: {interests}.\n\
         The trip is planned for {duration} days.\n\
         Traveling via: {via}\n\
         Traveling with pets or children: {companions}\n\
         Arrival time on first day: {arrival}\n\
         Departure time on last day: {departure}\n\
         Consider the weather forecast: {weather}\n\
         \n\
         Important timing notes:\n\
         - On the first day, only plan activities after the arrival time\n\
         - On the last day, only plan activities before the departure time\n\
         - For other days, plan a full day of activities\n\
         \n\
         {JSON_ONLY}\n\
         The response must follow this exact structure:\n\
         {ITINERARY_SCHEMA}",
        destination = intake.destination,
        start = intake.start_date,
        end = intake.end_date,
        interests = intake.interests_label(),
        duration = intake.duration(),
        via = intake.traveling_via,
        companions = intake.companions_label(),
        arrival = intake.arrival_time.format(TIME_FORMAT),
        departure = intake.departure_time.format(TIME_FORMAT),
    );

    PromptPair {
        system,
        user: "Generate my travel itinerary in JSON format only.".to_string(),
    }
}

/// Full-replace edit: the model sees the whole current itinerary and must
/// return the whole updated one.
pub fn build_edit_prompt(
    intake: &TripIntake,
    current: &Itinerary,
    request: &str,
) -> Result<PromptPair> {
    let system = format!(
        "You are a helpful travel assistant modifying an existing itinerary.\n\
         The user has the following itinerary for {destination}:\n\
         \n\
         {current}\n\
         \n\
         The user wants to modify this itinerary with this request: \"{request}\"\n\
         \n\
         Return the complete updated itinerary, not only the changed days.\n\
         {JSON_ONLY}\n\
         Your response must follow this exact structure:\n\
         {ITINERARY_SCHEMA}",
        destination = intake.destination,
        current = current.to_json_pretty()?,
    );

    Ok(PromptPair {
        system,
        user: format!("Update the itinerary with these changes: {}", request),
    })
}

pub fn build_suggest_prompt(intake: &TripIntake, request: &str) -> PromptPair {
    let system = format!(
        "You are a helpful travel assistant suggesting additional locations for a trip to {destination}.\n\
         The user is interested in: {interests}.\n\
         The user request is: \"{request}\"\n\
         \n\
         Only suggest new locations.\n\
         {JSON_ONLY}\n\
         The response must follow this exact structure:\n\
         {SUGGESTION_SCHEMA}",
        destination = intake.destination,
        interests = intake.interests_label(),
    );

    PromptPair {
        system,
        user: request.to_string(),
    }
}
