//! WASM-target tests for trip-platform (Node.js runtime).
//!
//! Covers MemoryStorage, TripStore on top of it and the model timeout
//! wrapper under wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! IndexedDB and the HTTP adapters need a browser and real endpoints and
//! are not exercised here.

use wasm_bindgen_test::*;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;

use trip_core::ports::{ChatRequest, ChatResponse, LlmPort, StoragePort};
use trip_core::store::TripStore;
use trip_platform::llm::TimeoutLlm;
use trip_platform::storage::{MemoryStorage, open_storage};
use trip_types::config::{StorageBackendType, StorageConfig};
use trip_types::itinerary::{DayPlan, Itinerary};
use trip_types::trip::SavedTrip;
use trip_types::{Result, TripError};

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    assert_eq!(MemoryStorage::new().backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").await.unwrap().is_none());
    assert!(!storage.exists("nonexistent").await.unwrap());
}

#[wasm_bindgen_test]
async fn memory_storage_overwrite_and_delete() {
    let storage = MemoryStorage::new();
    storage.set("key", "v1").await.unwrap();
    storage.set("key", "v2").await.unwrap();
    assert_eq!(storage.get("key").await.unwrap().as_deref(), Some("v2"));

    storage.delete("key").await.unwrap();
    assert!(storage.get("key").await.unwrap().is_none());
    storage.delete("key").await.unwrap();
}

#[wasm_bindgen_test]
async fn memory_storage_list_keys_by_prefix() {
    let storage = MemoryStorage::new();
    storage.set("trip:b", "{}").await.unwrap();
    storage.set("trip:a", "{}").await.unwrap();
    storage.set("planner:config", "{}").await.unwrap();

    let keys = storage.list_keys("trip:").await.unwrap();
    assert_eq!(keys, vec!["trip:a".to_string(), "trip:b".to_string()]);
}

#[wasm_bindgen_test]
async fn open_storage_memory_backend() {
    let config = StorageConfig {
        backend: StorageBackendType::Memory,
    };
    let storage = open_storage(&config).await.unwrap();
    assert_eq!(storage.backend_name(), "memory");
}

// ─── TripStore Tests ─────────────────────────────────────

#[wasm_bindgen_test]
async fn trip_store_on_memory() {
    let store = TripStore::new(Rc::new(MemoryStorage::new()));
    let trip = SavedTrip::new("Lisbon", Itinerary::new(vec![DayPlan::new(1, vec![])]));

    store.save_trip(&trip).await.unwrap();
    let loaded = store.load_trip(&trip.id).await.unwrap();
    assert_eq!(loaded, Some(trip.clone()));

    let listed = store.list_trips().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].destination, "Lisbon");
}

// ─── TimeoutLlm Tests ────────────────────────────────────

struct SlowLlm {
    delay_ms: u32,
}

#[async_trait(?Send)]
impl LlmPort for SlowLlm {
    async fn complete(&self, _req: ChatRequest) -> Result<ChatResponse> {
        TimeoutFuture::new(self.delay_ms).await;
        Ok(ChatResponse {
            content: "{\"daily_plans\":[]}".to_string(),
            usage: None,
        })
    }
}

fn request() -> ChatRequest {
    ChatRequest {
        messages: vec![],
        model: "test".to_string(),
        max_tokens: 16,
        temperature: 0.0,
    }
}

#[wasm_bindgen_test]
async fn timeout_llm_passes_fast_reply() {
    let llm = TimeoutLlm::new(SlowLlm { delay_ms: 1 }, 1_000);
    let response = llm.complete(request()).await.unwrap();
    assert_eq!(response.content, "{\"daily_plans\":[]}");
}

#[wasm_bindgen_test]
async fn timeout_llm_fails_slow_reply() {
    let llm = TimeoutLlm::new(SlowLlm { delay_ms: 500 }, 10);
    let err = llm.complete(request()).await.unwrap_err();
    assert!(matches!(err, TripError::Timeout(10)));
}
