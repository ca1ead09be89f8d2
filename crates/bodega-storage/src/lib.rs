//! # bodega-storage: Snapshot Persistence for Bodega
//!
//! This crate provides the snapshot store boundary: keyed string blobs with
//! swappable backends. It knows nothing about carts; the payloads are opaque.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bodega Data Flow                                 │
//! │                                                                         │
//! │  bodega-cart (snapshot writer task)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bodega-storage (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐   ┌───────────────┐   ┌──────────────┐   │   │
//! │  │   │  SnapshotStore   │   │  MemoryStore  │   │ SqliteStore  │   │   │
//! │  │   │  (snapshot.rs)   │◄──│  RwLock map   │   │ pooled WAL   │   │   │
//! │  │   │  get/put/remove  │   │  (tests)      │   │ kv table     │   │   │
//! │  │   └──────────────────┘   └───────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/bodega/bodega.db  (platform app data dir)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`snapshot`] - The `SnapshotStore` trait and the in-memory backend
//! - [`sqlite`] - SQLite backend with pool configuration
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bodega_storage::{SqliteStore, SqliteStoreConfig, default_data_path};
//!
//! let config = SqliteStoreConfig::new(default_data_path()?);
//! let store = SqliteStore::open(config).await?;
//!
//! store.put("cart", "{\"items\":[]}").await?;
//! let blob = store.get("cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod snapshot;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use snapshot::{MemoryStore, SnapshotStore};
pub use sqlite::{default_data_path, SqliteStore, SqliteStoreConfig};
