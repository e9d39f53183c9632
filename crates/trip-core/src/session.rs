//! Itinerary session: owns one trip's intake, itinerary and suggestions.
//!
//! Every mutating operation is parse → normalize → commit: the stored
//! itinerary is either replaced by a fully decoded value or left exactly as
//! it was. Operations take `&mut self`, so one session never has two model
//! calls in flight.

use trip_types::{
    Result, TripError,
    config::LlmConfig,
    event::PlannerEvent,
    intake::TripIntake,
    itinerary::{Itinerary, MapMarker, SuggestedLocation},
    lookup::Place,
    trip::SavedTrip,
};

use crate::event_bus::EventBus;
use crate::intent::RequestIntent;
use crate::normalize::{has_daily_plans, normalize, normalize_suggestions, parse_model_json};
use crate::ports::{ChatRequest, LlmPort, PlacesPort, WeatherPort};
use crate::prompts::{PromptPair, build_edit_prompt, build_generate_prompt, build_suggest_prompt};
use crate::store::TripStore;

pub const WEATHER_UNAVAILABLE: &str = "Weather data not available";
pub const NO_PLACES_MESSAGE: &str = "No famous places found.";
pub const NO_ITINERARY_MESSAGE: &str =
    "I don't have an itinerary to edit yet. Please generate one first.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Generating,
    Editing,
    Suggesting,
    Error(String),
}

/// Outcome of [`ItinerarySession::edit`].
#[derive(Debug, Clone)]
pub enum EditResult {
    /// The stored itinerary was replaced wholesale
    Updated { request: String },
    NoItinerary,
    /// The model reply was not JSON; `raw` is the full reply
    InvalidOutput { raw: String },
    /// Valid JSON without a `daily_plans` list
    SchemaMismatch,
    /// The model call itself failed
    Failed { error: TripError },
}

impl EditResult {
    pub fn is_updated(&self) -> bool {
        matches!(self, EditResult::Updated { .. })
    }

    pub fn message(&self) -> String {
        match self {
            EditResult::Updated { request } => format!(
                "I've updated your itinerary based on your request: '{}'. You can see the changes in the itinerary section.",
                request
            ),
            EditResult::NoItinerary => NO_ITINERARY_MESSAGE.to_string(),
            EditResult::InvalidOutput { raw } => format!(
                "I couldn't process the itinerary update. Here's what I understand about your request: {}",
                raw
            ),
            EditResult::SchemaMismatch => "I received an invalid response format. Please try again with more specific instructions.".to_string(),
            EditResult::Failed { error } => format!(
                "I encountered an error while trying to update your itinerary: {}. Please try again later.",
                error
            ),
        }
    }
}

/// Outcome of [`ItinerarySession::suggest`].
#[derive(Debug, Clone)]
pub enum SuggestResult {
    /// Cached famous places, returned without a model call
    Places { city: String, places: Vec<Place> },
    NoResults,
    /// Locations appended to the session's suggestion list
    Added { locations: Vec<SuggestedLocation> },
    InvalidOutput { raw: String },
    SchemaMismatch,
    Failed { error: TripError },
}

impl SuggestResult {
    pub fn message(&self) -> String {
        match self {
            SuggestResult::Places { city, places } => {
                let lines: Vec<String> = places
                    .iter()
                    .map(|p| match &p.image_url {
                        Some(url) => format!("{} - {} ![Image]({})", p.name, p.address, url),
                        None => format!("{} - {}", p.name, p.address),
                    })
                    .collect();
                format!("Here are some famous places in {}:\n{}", city, lines.join("\n"))
            }
            SuggestResult::NoResults => NO_PLACES_MESSAGE.to_string(),
            SuggestResult::Added { locations } => {
                let lines: Vec<String> = locations
                    .iter()
                    .map(|l| format!("• **{}**: {}", l.name, l.description))
                    .collect();
                format!("I've added these new locations to your map:\n\n{}", lines.join("\n\n"))
            }
            SuggestResult::InvalidOutput { raw } => format!(
                "I couldn't process the location suggestions. Here's what I understand about your request: {}",
                raw
            ),
            SuggestResult::SchemaMismatch => {
                "I received invalid suggestions. Please try again with more specific instructions.".to_string()
            }
            SuggestResult::Failed { error } => {
                format!("I encountered an error while suggesting locations: {}", error)
            }
        }
    }
}

pub struct ItinerarySession {
    pub config: LlmConfig,
    pub event_bus: EventBus,
    pub state: SessionState,
    intake: Option<TripIntake>,
    itinerary: Option<Itinerary>,
    suggested_locations: Vec<SuggestedLocation>,
    famous_places: Vec<Place>,
    turn_counter: u64,
    tokens_used: u64,
}

impl ItinerarySession {
    pub fn new(config: LlmConfig, event_bus: EventBus) -> Self {
        Self {
            config,
            event_bus,
            state: SessionState::Idle,
            intake: None,
            itinerary: None,
            suggested_locations: Vec::new(),
            famous_places: Vec::new(),
            turn_counter: 0,
            tokens_used: 0,
        }
    }

    pub fn intake(&self) -> Option<&TripIntake> {
        self.intake.as_ref()
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.itinerary.as_ref()
    }

    pub fn suggested_locations(&self) -> &[SuggestedLocation] {
        &self.suggested_locations
    }

    pub fn famous_places(&self) -> &[Place] {
        &self.famous_places
    }

    /// Number of model calls made by this session
    pub fn turns(&self) -> u64 {
        self.turn_counter
    }

    /// Total tokens reported by the model across this session's calls
    pub fn tokens_used(&self) -> u64 {
        self.tokens_used
    }

    pub fn set_intake(&mut self, intake: TripIntake) {
        self.intake = Some(intake);
    }

    /// Generate a fresh itinerary from the stored intake.
    ///
    /// Weather and places lookups are best-effort. On any model or parse
    /// failure the previous itinerary (if any) is kept.
    pub async fn generate(
        &mut self,
        llm: &dyn LlmPort,
        weather: &dyn WeatherPort,
        places: &dyn PlacesPort,
    ) -> Result<Itinerary> {
        let intake = self
            .intake
            .clone()
            .ok_or_else(|| TripError::Validation("trip details are incomplete".to_string()))?;
        intake.validate()?;

        self.state = SessionState::Generating;
        self.event_bus.emit(PlannerEvent::GenerationStarted {
            destination: intake.destination.clone(),
        });

        let weather_text = match weather.current(&intake.destination).await {
            Ok(report) => report.summary(),
            Err(e) => {
                log::warn!("Could not fetch weather data: {}", e);
                WEATHER_UNAVAILABLE.to_string()
            }
        };

        let prompt = build_generate_prompt(&intake, &weather_text);
        let normalized = match self.invoke(llm, prompt).await.and_then(|content| {
            let raw = parse_model_json(&content)?;
            normalize(&raw)
        }) {
            Ok(n) => n,
            Err(e) => return Err(self.fail(e)),
        };

        if let Some(warning) = normalized.warning {
            self.event_bus.emit(PlannerEvent::Warning { message: warning });
        }

        let itinerary = normalized.itinerary;
        self.itinerary = Some(itinerary.clone());
        self.event_bus.emit(PlannerEvent::ItineraryReady {
            days: itinerary.daily_plans.len(),
        });
        log::info!(
            "Generated a {}-day itinerary for {}",
            itinerary.daily_plans.len(),
            intake.destination
        );

        self.famous_places = match places.famous_places(&intake.destination).await {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Failed to fetch famous places: {}", e);
                Vec::new()
            }
        };

        self.state = SessionState::Idle;
        Ok(itinerary)
    }

    /// Apply a free-text edit. A valid reply replaces the itinerary
    /// wholesale; anything else leaves it untouched.
    pub async fn edit(&mut self, request: &str, llm: &dyn LlmPort) -> EditResult {
        let (Some(intake), Some(current)) = (&self.intake, &self.itinerary) else {
            return EditResult::NoItinerary;
        };
        let prompt = match build_edit_prompt(intake, current, request) {
            Ok(p) => p,
            Err(error) => return EditResult::Failed { error },
        };

        self.state = SessionState::Editing;
        let content = match self.invoke(llm, prompt).await {
            Ok(c) => c,
            Err(error) => {
                let error = self.fail(error);
                return EditResult::Failed { error };
            }
        };

        let raw = match parse_model_json(&content) {
            Ok(v) => v,
            Err(e) => {
                self.fail(e);
                return EditResult::InvalidOutput { raw: content };
            }
        };
        if !has_daily_plans(&raw) {
            self.fail(TripError::Schema("edit reply has no `daily_plans` list".to_string()));
            return EditResult::SchemaMismatch;
        }
        let normalized = match normalize(&raw) {
            Ok(n) => n,
            Err(e) => {
                self.fail(e);
                return EditResult::SchemaMismatch;
            }
        };

        self.itinerary = Some(normalized.itinerary);
        self.state = SessionState::Idle;
        self.event_bus.emit(PlannerEvent::ItineraryUpdated {
            request: request.to_string(),
        });
        EditResult::Updated {
            request: request.to_string(),
        }
    }

    /// Without a request, list the cached famous places (no model call).
    /// With one, ask the model for new locations and append them.
    pub async fn suggest(&mut self, request: Option<&str>, llm: &dyn LlmPort) -> SuggestResult {
        let request = request.map(str::trim).filter(|r| !r.is_empty());
        let Some(request) = request else {
            if self.famous_places.is_empty() {
                return SuggestResult::NoResults;
            }
            return SuggestResult::Places {
                city: self.destination().to_string(),
                places: self.famous_places.clone(),
            };
        };

        let Some(intake) = &self.intake else {
            return SuggestResult::Failed {
                error: TripError::Validation("trip details are incomplete".to_string()),
            };
        };
        let prompt = build_suggest_prompt(intake, request);

        self.state = SessionState::Suggesting;
        let content = match self.invoke(llm, prompt).await {
            Ok(c) => c,
            Err(error) => {
                let error = self.fail(error);
                return SuggestResult::Failed { error };
            }
        };

        let raw = match parse_model_json(&content) {
            Ok(v) => v,
            Err(e) => {
                self.fail(e);
                return SuggestResult::InvalidOutput { raw: content };
            }
        };
        let locations = match normalize_suggestions(&raw) {
            Ok(l) => l,
            Err(e) => {
                self.fail(e);
                return SuggestResult::SchemaMismatch;
            }
        };

        self.suggested_locations.extend(locations.iter().cloned());
        self.state = SessionState::Idle;
        self.event_bus.emit(PlannerEvent::SuggestionsAdded {
            count: locations.len(),
        });
        SuggestResult::Added { locations }
    }

    /// Route a free-text message to edit, suggest or plain chat.
    pub async fn handle_message(&mut self, text: &str, llm: &dyn LlmPort) -> String {
        match RequestIntent::classify(text) {
            RequestIntent::Edit => self.edit(text, llm).await.message(),
            RequestIntent::Suggest => self.suggest(Some(text), llm).await.message(),
            RequestIntent::Chat => match self.chat(text, llm).await {
                Ok(reply) => reply,
                Err(e) => format!("I encountered an error: {}", e),
            },
        }
    }

    async fn chat(&mut self, text: &str, llm: &dyn LlmPort) -> Result<String> {
        let system = match &self.intake {
            Some(intake) => format!(
                "You are a helpful travel assistant. The user is planning a trip to {}.",
                intake.destination
            ),
            None => "You are a helpful travel assistant.".to_string(),
        };
        let reply = self
            .invoke(llm, PromptPair { system, user: text.to_string() })
            .await;
        match reply {
            Ok(r) => {
                self.state = SessionState::Idle;
                Ok(r)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Markers for itinerary activities and suggested locations.
    pub fn map_markers(&self) -> Vec<MapMarker> {
        let mut markers = self
            .itinerary
            .as_ref()
            .map(Itinerary::markers)
            .unwrap_or_default();
        markers.extend(
            self.suggested_locations
                .iter()
                .filter_map(|l| MapMarker::from_raw(&l.name, l.coordinates.as_deref())),
        );
        markers
    }

    /// Persist the current itinerary ("save trip").
    pub async fn save_trip(&self, store: &TripStore) -> Result<SavedTrip> {
        let itinerary = self
            .itinerary
            .clone()
            .ok_or_else(|| TripError::Validation("there is no itinerary to save".to_string()))?;
        let trip = SavedTrip::new(self.destination(), itinerary);
        store.save_trip(&trip).await?;
        Ok(trip)
    }

    /// Drop all trip state; the event bus and config are kept.
    pub fn reset(&mut self) {
        self.intake = None;
        self.itinerary = None;
        self.suggested_locations.clear();
        self.famous_places.clear();
        self.state = SessionState::Idle;
        self.turn_counter = 0;
        self.tokens_used = 0;
    }

    fn destination(&self) -> &str {
        self.intake
            .as_ref()
            .map(|i| i.destination.as_str())
            .unwrap_or("your destination")
    }

    async fn invoke(&mut self, llm: &dyn LlmPort, prompt: PromptPair) -> Result<String> {
        self.turn_counter += 1;
        let req = ChatRequest {
            messages: prompt.into_messages(),
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let response = llm.complete(req).await?;
        if let Some(usage) = &response.usage {
            self.tokens_used += u64::from(usage.total_tokens);
        }
        Ok(response.content)
    }

    fn fail(&mut self, error: TripError) -> TripError {
        log::warn!("Session operation failed: {}", error);
        self.state = SessionState::Error(error.to_string());
        self.event_bus.emit(PlannerEvent::Error {
            message: error.to_string(),
        });
        error
    }
}

