use serde::{Deserialize, Serialize};

/// Events emitted by the wizard and the itinerary session.
/// Hosts drain these after each turn to refresh their views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlannerEvent {
    /// Wizard moved between steps
    StepChanged { from: String, to: String },

    /// Itinerary generation started for a destination
    GenerationStarted { destination: String },

    /// A new itinerary was stored
    ItineraryReady { days: usize },

    /// An edit replaced the stored itinerary
    ItineraryUpdated { request: String },

    /// Suggested locations were appended
    SuggestionsAdded { count: usize },

    /// Non-fatal condition, e.g. an unexpected itinerary shape
    Warning { message: String },

    /// An operation failed; prior state is unchanged
    Error { message: String },
}
