//! Backend selection.
//!
//! Priority for `Auto`: IndexedDB, then memory.

use std::rc::Rc;
use trip_core::ports::StoragePort;
use trip_types::{Result, config::{StorageBackendType, StorageConfig}};
use super::{IndexedDbStorage, MemoryStorage};

/// Open the backend named by `config`.
pub async fn open_storage(config: &StorageConfig) -> Result<Rc<dyn StoragePort>> {
    match config.backend {
        StorageBackendType::Auto => auto_detect_storage().await,
        StorageBackendType::Memory => Ok(Rc::new(MemoryStorage::new())),
        StorageBackendType::IndexedDb => Ok(Rc::new(IndexedDbStorage::open().await?)),
    }
}

/// Try IndexedDB, falling back to memory when it cannot be opened.
pub async fn auto_detect_storage() -> Result<Rc<dyn StoragePort>> {
    match IndexedDbStorage::open().await {
        Ok(idb) => {
            log::info!("Storage backend: IndexedDB");
            Ok(Rc::new(idb))
        }
        Err(e) => {
            log::warn!("IndexedDB unavailable ({}), falling back to memory", e);
            Ok(Rc::new(MemoryStorage::new()))
        }
    }
}
