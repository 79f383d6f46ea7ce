//! Resume persistence: one JSON record in one key-value slot.
//!
//! `ResumeStore` never fails on load: unusable data falls back to the bundled
//! default. Saves always write the complete record.

pub mod file;
pub mod memory;
pub mod redis_backend;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::StorageBackend;
use crate::models::resume::ResumeRecord;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use redis_backend::RedisStorage;

/// The slot holding the serialized record.
pub const STORAGE_KEY: &str = "resumeData";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value backend. Carried as `Arc<dyn KeyValueStorage>`.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Stored resume data is corrupt: {0}")]
    CorruptState(String),

    #[error("Resume could not be persisted: {0}")]
    PersistenceUnavailable(#[source] StorageError),

    #[error("Resume could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// How `ResumeStore::load` obtained its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The stored record parsed cleanly.
    Loaded,
    /// The slot was empty; the default was written.
    Seeded,
    /// The slot held malformed data; the default was written over it.
    RecoveredFromCorruption,
    /// The backend could not be read; the default is used without writing.
    Unreadable,
}

#[derive(Clone)]
pub struct ResumeStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl ResumeStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    pub async fn load(&self) -> (ResumeRecord, LoadOutcome) {
        let raw = match self.storage.get(STORAGE_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                let err = StoreError::CorruptState(format!("read failed: {e}"));
                warn!("{err}; using the default resume without overwriting the slot");
                return (ResumeRecord::default_record(), LoadOutcome::Unreadable);
            }
        };

        let Some(raw) = raw else {
            info!("No stored resume under '{STORAGE_KEY}', seeding the default");
            return (self.seed_default().await, LoadOutcome::Seeded);
        };

        match serde_json::from_str::<ResumeRecord>(&raw) {
            Ok(record) => {
                info!("Loaded resume for '{}' from {}", record.name, self.backend_name());
                (record, LoadOutcome::Loaded)
            }
            Err(e) => {
                let err = StoreError::CorruptState(e.to_string());
                warn!("{err}; replacing it with the default resume");
                (self.seed_default().await, LoadOutcome::RecoveredFromCorruption)
            }
        }
    }

    /// Overwrites the slot with the full record.
    pub async fn save(&self, record: &ResumeRecord) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(record)?;
        self.storage
            .set(STORAGE_KEY, &encoded)
            .await
            .map_err(StoreError::PersistenceUnavailable)?;
        info!(
            "Saved resume ({} bytes) to {}",
            encoded.len(),
            self.backend_name()
        );
        Ok(())
    }

    async fn seed_default(&self) -> ResumeRecord {
        let record = ResumeRecord::default_record();
        if let Err(e) = self.save(&record).await {
            warn!("Failed to persist default resume: {e}");
        }
        record
    }
}

/// Builds the storage backend selected by configuration.
pub async fn connect(backend: &StorageBackend) -> Result<Arc<dyn KeyValueStorage>> {
    let storage: Arc<dyn KeyValueStorage> = match backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File { dir } => Arc::new(
            FileStorage::open(dir)
                .await
                .with_context(|| format!("Failed to open data directory {}", dir.display()))?,
        ),
        StorageBackend::Redis { url } => Arc::new(
            RedisStorage::connect(url)
                .await
                .context("Failed to connect to Redis")?,
        ),
    };
    info!("Storage backend initialized ({})", storage.backend_name());
    Ok(storage)
}
