//! Saved trips and planner config on top of a [`StoragePort`].

use std::rc::Rc;

use trip_types::{
    Result,
    config::PlannerConfig,
    trip::{SavedTrip, SavedTripSummary},
};

use crate::ports::StoragePort;

const TRIP_PREFIX: &str = "trip:";
const CONFIG_KEY: &str = "planner:config";

pub struct TripStore {
    storage: Rc<dyn StoragePort>,
}

impl TripStore {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    pub async fn save_trip(&self, trip: &SavedTrip) -> Result<()> {
        let json = serde_json::to_string(trip)?;
        self.storage.set(&trip_key(&trip.id), &json).await?;
        log::info!("Saved trip {} to {}", trip.id, self.storage.backend_name());
        Ok(())
    }

    pub async fn load_trip(&self, id: &str) -> Result<Option<SavedTrip>> {
        match self.storage.get(&trip_key(id)).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn delete_trip(&self, id: &str) -> Result<()> {
        self.storage.delete(&trip_key(id)).await
    }

    /// Newest first. Entries that no longer decode are skipped.
    pub async fn list_trips(&self) -> Result<Vec<SavedTripSummary>> {
        let mut summaries = Vec::new();
        for key in self.storage.list_keys(TRIP_PREFIX).await? {
            let Some(json) = self.storage.get(&key).await? else {
                continue;
            };
            match serde_json::from_str::<SavedTrip>(&json) {
                Ok(trip) => summaries.push(trip.summary()),
                Err(e) => log::warn!("Skipping unreadable saved trip {}: {}", key, e),
            }
        }
        summaries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(summaries)
    }

    pub async fn save_config(&self, config: &PlannerConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        self.storage.set(CONFIG_KEY, &json).await
    }

    pub async fn load_config(&self) -> Result<Option<PlannerConfig>> {
        match self.storage.get(CONFIG_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

fn trip_key(id: &str) -> String {
    format!("{}{}", TRIP_PREFIX, id)
}
