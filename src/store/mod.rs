//! Persistent key-value storage.
//!
//! The device store holds small string values under fixed keys: the session
//! token, the serialized user profile, the device id and user preferences.
//! Structured values are stored as JSON strings.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fixed key names.
pub mod keys {
    /// Bearer token of the active session.
    pub const USER_TOKEN: &str = "userToken";
    /// JSON-serialized user profile.
    pub const USER_DATA: &str = "userData";
    /// Installation identifier sent with push registration.
    pub const DEVICE_ID: &str = "deviceId";
    /// Theme preference.
    pub const THEME: &str = "theme";
    /// JSON-serialized signal/notification thresholds.
    pub const SIGNAL_THRESHOLDS: &str = "signalThresholds";
}

/// Asynchronous string key-value store.
///
/// Single operations are atomic. Composite updates (several keys) are not
/// transactional; concurrent writers resolve as last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Delete a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON value.
pub async fn get_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value.
pub async fn set_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        level: u8,
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryStore::new();
        let sample = Sample {
            name: "EURUSD".to_string(),
            level: 3,
        };

        set_json(&store, "sample", &sample).await.unwrap();
        let loaded: Option<Sample> = get_json(&store, "sample").await.unwrap();
        assert_eq!(loaded, Some(sample));

        let missing: Option<Sample> = get_json(&store, "absent").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_json_is_an_error() {
        let store = MemoryStore::new();
        store.set("sample", "{not json".to_string()).await.unwrap();
        let loaded: Result<Option<Sample>> = get_json(&store, "sample").await;
        assert!(matches!(loaded, Err(crate::Error::Serialization(_))));
    }
}
