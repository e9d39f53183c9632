//! Port traits: the boundary to every external collaborator.
//!
//! The core only depends on these traits. Browser implementations live in
//! `trip-platform`; tests use in-memory mocks.

use async_trait::async_trait;
use trip_types::{
    Result,
    itinerary::Coordinates,
    lookup::{Place, WeatherReport},
    message::Message,
};

// ─── Model Port ──────────────────────────────────────────────

/// Request to send to the model
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Complete response from the model
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The sole model collaborator: an opaque text-completion function.
#[async_trait(?Send)]
pub trait LlmPort {
    /// Fails with `Model`, `Network` or `Timeout` on transport/auth failure.
    async fn complete(&self, req: ChatRequest) -> Result<ChatResponse>;
}

// ─── Lookup Ports ────────────────────────────────────────────

/// Current weather by city name. Best-effort.
#[async_trait(?Send)]
pub trait WeatherPort {
    async fn current(&self, city: &str) -> Result<WeatherReport>;
}

/// Famous places for a city. Best-effort.
#[async_trait(?Send)]
pub trait PlacesPort {
    async fn famous_places(&self, city: &str) -> Result<Vec<Place>>;
}

/// Place-name geocoding, used for map centering only.
#[async_trait(?Send)]
pub trait GeocodePort {
    async fn resolve(&self, place: &str) -> Result<Option<Coordinates>>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Text key/value storage for saved trips and config.
#[async_trait(?Send)]
pub trait StoragePort {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
