//! # SQLite Snapshot Store
//!
//! Durable snapshot backend on a pooled SQLite connection.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     SQLite Snapshot Store                               │
//! │                                                                         │
//! │  Host Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStoreConfig::new(path) ← Configure pool settings                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::open(config).await ← Create pool + ensure table           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────┐                           │
//! │  │  snapshots                               │                           │
//! │  │  ┌───────┬──────────────┬────────────┐   │  one row per key,         │
//! │  │  │ key   │ payload      │ updated_at │   │  whole-blob upsert        │
//! │  │  ├───────┼──────────────┼────────────┤   │  on every put             │
//! │  │  │ cart  │ {"items":[..]│ 2026-08-.. │   │                           │
//! │  │  └───────┴──────────────┴────────────┘   │                           │
//! │  └──────────────────────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) keeps snapshot writes from blocking the
//! startup read and vice versa, and improves crash recovery.
//!
//! ## No Migration Machinery
//! One kv table created with `CREATE TABLE IF NOT EXISTS` on open. A
//! versioned migration runner would be more moving parts than the schema.

use async_trait::async_trait;
use chrono::Utc;
use directories::ProjectDirs;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::snapshot::SnapshotStore;

// =============================================================================
// Configuration
// =============================================================================

/// SQLite snapshot store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = SqliteStoreConfig::new("/path/to/bodega.db")
///     .max_connections(4);
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 2 (one background writer plus occasional reads)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl SqliteStoreConfig {
    /// Creates a configuration with the given database path.
    ///
    /// The file is created on open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteStoreConfig {
            database_path: path.into(),
            max_connections: 2,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = SqliteStore::open(SqliteStoreConfig::in_memory()).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        SqliteStoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

/// Resolves the default on-disk location for the snapshot database.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/dev.bodega.bodega/bodega.db`
/// - **Windows**: `%APPDATA%\bodega\bodega\data\bodega.db`
/// - **Linux**: `~/.local/share/bodega/bodega.db`
///
/// ## Development Override
/// Set `BODEGA_DB_PATH` to use a custom path.
pub fn default_data_path() -> StorageResult<PathBuf> {
    if let Ok(path) = std::env::var("BODEGA_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("dev", "bodega", "bodega").ok_or_else(|| {
        StorageError::ConnectionFailed("Could not determine app data directory".to_string())
    })?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

    Ok(data_dir.join("bodega.db"))
}

// =============================================================================
// Store
// =============================================================================

/// SQLite-backed snapshot store.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the store: creates the pool and ensures the snapshot table.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous
    /// 3. Creates the connection pool
    /// 4. Ensures the `snapshots` table exists
    pub async fn open(config: SqliteStoreConfig) -> StorageResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening snapshot store"
        );

        // sqlite://path with mode=rwc creates the file if missing
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
            // WAL: the writer task and the startup read never block each other
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL: safe from corruption, may lose the last write on crash,
            // acceptable for a best-effort snapshot
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                key        TEXT PRIMARY KEY,
                payload    TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        debug!("Snapshot table ready");

        Ok(SqliteStore { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks if the store can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool.
    ///
    /// After this, all store operations fail. Call on host shutdown, after
    /// the cart service has been closed.
    pub async fn close(&self) {
        info!("Closing snapshot store pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM snapshots WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    async fn put(&self, key: &str, blob: &str) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO snapshots (key, payload, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                payload    = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(blob)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        sqlx::query("DELETE FROM snapshots WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
