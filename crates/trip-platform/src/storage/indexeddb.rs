//! IndexedDB storage backend, persistent across page reloads.
//!
//! Values are stored as JS strings in a single object store.

use async_trait::async_trait;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{IdbDatabase, IdbObjectStore, IdbRequest, IdbTransactionMode};

use trip_core::ports::StoragePort;
use trip_types::{Result, TripError};

const DB_NAME: &str = "trip_planner";
const STORE_NAME: &str = "kv";
const DB_VERSION: u32 = 1;

pub struct IndexedDbStorage {
    db: IdbDatabase,
}

impl IndexedDbStorage {
    /// Open (or create) the database.
    pub async fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| TripError::Storage("No window object".to_string()))?;

        let idb_factory = window
            .indexed_db()
            .map_err(js_err)?
            .ok_or_else(|| TripError::Storage("IndexedDB not available".to_string()))?;

        let open_req = idb_factory
            .open_with_u32(DB_NAME, DB_VERSION)
            .map_err(js_err)?;

        let upgrade_req = open_req.clone();
        let onupgrade = Closure::once(move |_event: web_sys::Event| {
            let db = upgrade_req
                .result()
                .ok()
                .and_then(|r| r.dyn_into::<IdbDatabase>().ok());
            match db {
                Some(db) if !db.object_store_names().contains(STORE_NAME) => {
                    if let Err(e) = db.create_object_store(STORE_NAME) {
                        log::error!("Failed to create object store: {:?}", e);
                    }
                }
                Some(_) => {}
                None => log::error!("IndexedDB upgrade without a database"),
            }
        });
        open_req.set_onupgradeneeded(Some(onupgrade.as_ref().unchecked_ref()));
        onupgrade.forget();

        let db: IdbDatabase = request_result(&open_req)
            .await?
            .dyn_into()
            .map_err(js_err)?;

        Ok(Self { db })
    }

    fn store(&self, mode: IdbTransactionMode) -> Result<IdbObjectStore> {
        let tx = self
            .db
            .transaction_with_str_and_mode(STORE_NAME, mode)
            .map_err(js_err)?;
        tx.object_store(STORE_NAME).map_err(js_err)
    }
}

#[async_trait(?Send)]
impl StoragePort for IndexedDbStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self.store(IdbTransactionMode::Readonly)?;
        let req = store.get(&JsValue::from_str(key)).map_err(js_err)?;
        let result = request_result(&req).await?;

        if result.is_undefined() || result.is_null() {
            return Ok(None);
        }
        result
            .as_string()
            .map(Some)
            .ok_or_else(|| TripError::Storage(format!("value under {} is not text", key)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let store = self.store(IdbTransactionMode::Readwrite)?;
        let req = store
            .put_with_key(&JsValue::from_str(value), &JsValue::from_str(key))
            .map_err(js_err)?;
        request_result(&req).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let store = self.store(IdbTransactionMode::Readwrite)?;
        let req = store.delete(&JsValue::from_str(key)).map_err(js_err)?;
        request_result(&req).await?;
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let store = self.store(IdbTransactionMode::Readonly)?;
        let req = store.get_all_keys().map_err(js_err)?;
        let array: Array = request_result(&req).await?.dyn_into().map_err(js_err)?;

        Ok(array
            .iter()
            .filter_map(|k| k.as_string())
            .filter(|k| k.starts_with(prefix))
            .collect())
    }

    fn backend_name(&self) -> &str {
        "indexeddb"
    }
}

fn js_err(e: JsValue) -> TripError {
    TripError::Storage(format!("{:?}", e))
}

/// Await an IdbRequest by bridging its callbacks into a JS Promise.
async fn request_result(req: &IdbRequest) -> Result<JsValue> {
    let req_for_callbacks = req.clone();
    let req_for_success = req.clone();

    let promise = js_sys::Promise::new(&mut move |resolve, reject| {
        let req_inner = req_for_success.clone();
        let onsuccess = Closure::once(move |_: web_sys::Event| {
            let _ = resolve.call1(
                &JsValue::NULL,
                &req_inner.result().unwrap_or(JsValue::UNDEFINED),
            );
        });
        let onerror = Closure::once(move |_: web_sys::Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("IDB request failed"));
        });
        req_for_callbacks.set_onsuccess(Some(onsuccess.as_ref().unchecked_ref()));
        req_for_callbacks.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onsuccess.forget();
        onerror.forget();
    });

    JsFuture::from(promise).await.map_err(js_err)
}
