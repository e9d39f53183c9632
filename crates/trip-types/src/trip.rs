use serde::{Deserialize, Serialize};

use crate::itinerary::Itinerary;

/// An itinerary the traveler chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrip {
    pub id: String,
    pub destination: String,
    pub itinerary: Itinerary,
    pub saved_at: String,
}

impl SavedTrip {
    pub fn new(destination: impl Into<String>, itinerary: Itinerary) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            destination: destination.into(),
            itinerary,
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn summary(&self) -> SavedTripSummary {
        SavedTripSummary {
            id: self.id.clone(),
            destination: self.destination.clone(),
            saved_at: self.saved_at.clone(),
            day_count: self.itinerary.daily_plans.len(),
        }
    }
}

/// Summary of a saved trip for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTripSummary {
    pub id: String,
    pub destination: String,
    pub saved_at: String,
    pub day_count: usize,
}
