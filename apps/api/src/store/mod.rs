//! Persistence: a stand-in key-value store.
//!
//! Each collection is one JSON array stored under `jobmatch:<collection>`.
//! `Store` is the typed facade handlers use; the byte-level backend is
//! injected as `Arc<dyn KeyValueStore>` (Redis in production, memory in tests).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

const KEY_PREFIX: &str = "jobmatch";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt collection '{collection}': {source}")]
    Corrupt {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw key-value backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn write(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// A record that lives in a named collection and carries a stable id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Typed access to collections. Writes are serialised within this process;
/// there are no transactions across processes.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

fn collection_key(collection: &str) -> String {
    format!("{KEY_PREFIX}:{collection}")
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// All records of a collection in insertion order.
    pub async fn get<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        match self.backend.read(&collection_key(T::COLLECTION)).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                collection: T::COLLECTION,
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    pub async fn find<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.get::<T>().await?.into_iter().find(|r| r.id() == id))
    }

    /// Replaces the record with the same id, or appends it.
    pub async fn put<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.get::<T>().await?;
        match records.iter().position(|r| r.id() == record.id()) {
            Some(idx) => {
                debug!("Updating {} record {}", T::COLLECTION, record.id());
                records[idx] = record.clone();
            }
            None => {
                debug!("Appending {} record {}", T::COLLECTION, record.id());
                records.push(record.clone());
            }
        }

        let raw = serde_json::to_string(&records)?;
        self.backend
            .write(&collection_key(T::COLLECTION), raw)
            .await
    }

    /// Writes `records` only if the collection has never been written.
    pub async fn seed<T: Record>(&self, records: &[T]) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let key = collection_key(T::COLLECTION);
        if self.backend.read(&key).await?.is_some() {
            return Ok(false);
        }
        self.backend.write(&key, serde_json::to_string(records)?).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_collection_reads_as_empty() {
        let store = Store::in_memory();
        assert!(store.get::<Note>().await.unwrap().is_empty());
        assert!(store.find::<Note>("n1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_appends_in_order() {
        let store = Store::in_memory();
        store.put(&note("n1", "first")).await.unwrap();
        store.put(&note("n2", "second")).await.unwrap();

        let notes = store.get::<Note>().await.unwrap();
        assert_eq!(notes, vec![note("n1", "first"), note("n2", "second")]);
    }

    #[tokio::test]
    async fn test_put_upserts_by_id_in_place() {
        let store = Store::in_memory();
        store.put(&note("n1", "first")).await.unwrap();
        store.put(&note("n2", "second")).await.unwrap();
        store.put(&note("n1", "edited")).await.unwrap();

        let notes = store.get::<Note>().await.unwrap();
        assert_eq!(notes, vec![note("n1", "edited"), note("n2", "second")]);
        assert_eq!(
            store.find::<Note>("n1").await.unwrap(),
            Some(note("n1", "edited"))
        );
    }

    #[tokio::test]
    async fn test_seed_only_writes_once() {
        let store = Store::in_memory();
        assert!(store.seed(&[note("n1", "seeded")]).await.unwrap());
        assert!(!store.seed(&[note("n9", "again")]).await.unwrap());
        assert_eq!(store.get::<Note>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_reported() {
        let backend = Arc::new(MemoryStore::default());
        backend
            .write("jobmatch:notes", "not json".to_string())
            .await
            .unwrap();
        let store = Store::new(backend);

        let err = store.get::<Note>().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { collection: "notes", .. }));
    }

    #[tokio::test]
    async fn test_concurrent_puts_are_not_lost() {
        let store = Store::in_memory();
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(&note(&format!("n{i}"), "x")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.get::<Note>().await.unwrap().len(), 20);
    }
}
