//! Save/load persistence
//!
//! Features:
//! - JSON envelope holding settings, stats and the daily mission record
//! - Pluggable backends (memory, JSON file, browser LocalStorage)
//! - Cached snapshot: reads never touch the backend
//! - Backend failures are logged and never reach the tick loop

mod backend;
mod error;

pub use backend::{MemoryBackend, StorageBackend};
#[cfg(not(target_arch = "wasm32"))]
pub use backend::FileBackend;
#[cfg(target_arch = "wasm32")]
pub use backend::LocalStorageBackend;
pub use error::StoreError;

use serde::{Deserialize, Serialize};

use crate::missions::DailyRecord;
use crate::settings::Settings;
use crate::stats::PersistentStats;

/// Everything the game keeps between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub settings: Settings,
    pub stats: PersistentStats,
    pub daily: DailyRecord,
}

impl SaveData {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Synchronous, cached view over a storage backend
pub struct Storage {
    backend: Box<dyn StorageBackend>,
    data: SaveData,
}

impl Storage {
    /// Load from `backend`, falling back to defaults when it is empty,
    /// unreadable or corrupt
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let data = match backend.read() {
            Ok(Some(json)) => match SaveData::from_json(&json) {
                Ok(data) => {
                    log::info!("Loaded save data from {}", backend.name());
                    data
                }
                Err(e) => {
                    log::warn!("Corrupt save data in {} ({}), using defaults", backend.name(), e);
                    SaveData::default()
                }
            },
            Ok(None) => {
                log::info!("No save data in {}, starting fresh", backend.name());
                SaveData::default()
            }
            Err(e) => {
                log::warn!("Failed to read {} ({}), using defaults", backend.name(), e);
                SaveData::default()
            }
        };

        let mut storage = Self { backend, data };
        storage.persist();
        storage
    }

    /// In-memory storage with default contents
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryBackend::default()))
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.data.settings = settings;
        self.persist();
    }

    pub fn stats(&self) -> &PersistentStats {
        &self.data.stats
    }

    pub fn set_stats(&mut self, stats: PersistentStats) {
        self.data.stats = stats;
        self.persist();
    }

    pub fn daily(&self) -> DailyRecord {
        self.data.daily.clone()
    }

    pub fn set_daily(&mut self, daily: DailyRecord) {
        self.data.daily = daily;
        self.persist();
    }

    /// Restore factory defaults (settings, stats and daily record)
    pub fn reset_all(&mut self) {
        log::info!("Resetting all save data");
        self.data = SaveData::default();
        self.persist();
    }

    /// Write the cached snapshot; failures leave the cache authoritative
    fn persist(&mut self) {
        let json = match self.data.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode save data: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.write(&json) {
            log::warn!("Failed to write {}: {}", self.backend.name(), e);
        }
    }
}
