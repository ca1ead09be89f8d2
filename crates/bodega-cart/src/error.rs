//! # Cart Service Error Types
//!
//! Errors for the cart service lifecycle.
//!
//! ## What Can Fail (and what cannot)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open()      ── fails when the initial snapshot READ fails              │
//! │                 (an undecodable snapshot is NOT an error: warn + empty) │
//! │                                                                         │
//! │  mutations   ── never fail; snapshot writes are fire-and-forget and     │
//! │                 write failures are logged, memory stays authoritative   │
//! │                                                                         │
//! │  close()     ── fails when the writer task cannot be joined             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use bodega_storage::StorageError;

/// Cart service errors.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The snapshot store failed during the startup read.
    #[error("Snapshot storage error: {0}")]
    Storage(#[from] StorageError),

    /// The background snapshot writer ended abnormally.
    #[error("Snapshot writer failed: {0}")]
    Writer(String),
}

/// Result type for cart service operations.
pub type CartStoreResult<T> = Result<T, CartStoreError>;
