//! # Snapshot Store Boundary
//!
//! The injected persistence interface: string blobs by key, nothing else.
//!
//! ## Why Opaque Blobs?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     The Storage Boundary                                │
//! │                                                                         │
//! │  bodega-cart                          bodega-storage                    │
//! │  ───────────                          ──────────────                    │
//! │  decides WHAT is stored               decides WHERE it lives            │
//! │  (serialized cart record)             (memory, SQLite, ...)             │
//! │  decides WHEN to write                never inspects the payload        │
//! │                                                                         │
//! │  CartStore::open(Arc<dyn SnapshotStore>)                                │
//! │       └── backends swap without touching cart code                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Trait
// =============================================================================

/// Keyed blob storage for state snapshots.
///
/// Implementations must be safe to share across tasks (`Send + Sync`);
/// callers hold them behind `Arc<dyn SnapshotStore>`.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    async fn put(&self, key: &str, blob: &str) -> StorageResult<()>;

    /// Deletes the blob under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// In-memory snapshot store.
///
/// Intended for tests and ephemeral hosts. Contents vanish on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().map(|blobs| blobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let blobs = self.blobs.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, blob: &str) -> StorageResult<()> {
        let mut blobs = self.blobs.write().map_err(|_| StorageError::LockPoisoned)?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut blobs = self.blobs.write().map_err(|_| StorageError::LockPoisoned)?;
        blobs.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
