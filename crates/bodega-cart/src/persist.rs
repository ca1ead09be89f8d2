//! # Snapshot Writer
//!
//! Background task that persists cart snapshots without blocking mutations.
//!
//! ## Write Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Writer Flow                                │
//! │                                                                         │
//! │  CartStore mutation (sync, holds the cart mutex)                        │
//! │       │                                                                 │
//! │       │ serialize, enqueue, return   ← never awaits the write           │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────┐                                       │
//! │  │  unbounded queue of blobs    │   snapshot N+1 supersedes N:          │
//! │  │  [ blob3, blob4, blob5 ]     │   each blob is the WHOLE state        │
//! │  └──────────────┬───────────────┘                                       │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  ┌──────────────────────────────┐      ┌──────────────────────────┐     │
//! │  │  SnapshotWriter task         │─────►│  SnapshotStore.put(      │     │
//! │  │  1. recv one blob            │      │    "cart", blob5)        │     │
//! │  │  2. drain backlog to newest  │      └──────────────────────────┘     │
//! │  │  3. write it                 │                                       │
//! │  │  4. failure? warn, keep on   │   memory is the source of truth;      │
//! │  └──────────────────────────────┘   a failed write rolls nothing back   │
//! │                                                                         │
//! │  SHUTDOWN: drain queue, write the final snapshot, stop                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use bodega_storage::SnapshotStore;

// =============================================================================
// Snapshot Writer
// =============================================================================

/// Owns the injected store and applies queued snapshot writes in order.
pub struct SnapshotWriter {
    /// The injected persistence medium.
    store: Arc<dyn SnapshotStore>,

    /// Namespace key all snapshots are written under.
    key: String,

    /// Incoming serialized snapshots.
    rx: mpsc::UnboundedReceiver<String>,

    /// Shutdown receiver.
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for feeding and stopping the snapshot writer.
#[derive(Clone)]
pub struct WriterHandle {
    /// Snapshot sender.
    tx: mpsc::UnboundedSender<String>,

    /// Shutdown sender.
    shutdown_tx: mpsc::Sender<()>,
}

impl WriterHandle {
    /// Queues a serialized snapshot. Never blocks, never fails the caller.
    pub fn enqueue(&self, blob: String) {
        if self.tx.send(blob).is_err() {
            // Writer already stopped; state is still live in memory
            warn!("Snapshot writer gone, dropping snapshot");
        }
    }

    /// Signals graceful shutdown.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

impl SnapshotWriter {
    /// Creates a writer for `key` and returns it with its handle.
    pub fn new(store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> (Self, WriterHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let writer = SnapshotWriter {
            store,
            key: key.into(),
            rx,
            shutdown_rx,
        };

        let handle = WriterHandle { tx, shutdown_tx };

        (writer, handle)
    }

    /// Runs the writer loop.
    ///
    /// This should be spawned as a background task; [`crate::CartStore`]
    /// does so in `open()`.
    pub async fn run(mut self) {
        info!(key = %self.key, "Snapshot writer starting");

        loop {
            tokio::select! {
                maybe_blob = self.rx.recv() => {
                    match maybe_blob {
                        Some(blob) => {
                            let blob = self.newest(blob);
                            self.write(&blob).await;
                        }
                        // All senders dropped
                        None => break,
                    }
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Snapshot writer shutting down");
                    self.flush_backlog().await;
                    break;
                }
            }
        }

        info!("Snapshot writer stopped");
    }

    /// Drains any queued backlog and keeps only the most recent snapshot.
    ///
    /// Whole-state snapshots supersede each other, so writing anything but
    /// the newest would be wasted I/O.
    fn newest(&mut self, first: String) -> String {
        let mut newest = first;
        let mut superseded = 0_u64;

        while let Ok(blob) = self.rx.try_recv() {
            newest = blob;
            superseded += 1;
        }

        if superseded > 0 {
            debug!(superseded, "Coalesced snapshot backlog");
        }

        newest
    }

    /// Writes one final snapshot if any are still queued.
    async fn flush_backlog(&mut self) {
        let mut last = None;
        while let Ok(blob) = self.rx.try_recv() {
            last = Some(blob);
        }

        if let Some(blob) = last {
            self.write(&blob).await;
        }
    }

    async fn write(&self, blob: &str) {
        match self.store.put(&self.key, blob).await {
            Ok(()) => debug!(bytes = blob.len(), "Snapshot written"),
            // Memory stays authoritative; the next mutation retries with
            // a fresh snapshot anyway
            Err(e) => warn!(error = %e, "Snapshot write failed"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
