pub mod file;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

pub use file::FileStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key {0:?}")]
    InvalidKey(String),
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Opaque byte storage. Values are whole JSON documents; there is no partial update.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    HealthData,
    ReportAnalysis,
    ConsultationPrescription,
    User,
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] = [
        StoreKey::HealthData,
        StoreKey::ReportAnalysis,
        StoreKey::ConsultationPrescription,
        StoreKey::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::HealthData => "healthData",
            StoreKey::ReportAnalysis => "reportAnalysis",
            StoreKey::ConsultationPrescription => "consultationPrescription",
            StoreKey::User => "user",
        }
    }

    /// `<profile id>/<key>`
    pub fn scoped(&self, profile_id: Uuid) -> String {
        format!("{}/{}", profile_id, self.as_str())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Read and decode a profile's value. A payload that no longer decodes is
/// logged and reported as absent.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    profile_id: Uuid,
    key: StoreKey,
) -> Result<Option<T>, StoreError> {
    let scoped = key.scoped(profile_id);
    let Some(bytes) = store.get(&scoped).await? else {
        return Ok(None);
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!("Ignoring unreadable stored value {}: {}", scoped, e);
            Ok(None)
        }
    }
}

/// Remove every stored value of a profile. Missing keys are not an error.
pub async fn delete_profile(store: &dyn KeyValueStore, profile_id: Uuid) -> Result<(), StoreError> {
    for key in StoreKey::ALL {
        store.delete(&key.scoped(profile_id)).await?;
    }
    Ok(())
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    profile_id: Uuid,
    key: StoreKey,
    value: &T,
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(value)?;
    store.put(&key.scoped(profile_id), bytes).await
}
