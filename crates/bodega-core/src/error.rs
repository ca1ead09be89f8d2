//! # Error Types
//!
//! Domain error types for bodega-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bodega-core errors (this file)                                         │
//! │  ├── CoreError        - Top-level domain errors                         │
//! │  └── ValidationError  - Input validation failures at the edges          │
//! │                                                                         │
//! │  bodega-storage errors (separate crate)                                 │
//! │  └── StorageError     - Snapshot read/write failures                    │
//! │                                                                         │
//! │  bodega-cart errors (separate crate)                                    │
//! │  └── CartStoreError   - Open/close failures of the cart service         │
//! │                                                                         │
//! │  NOTE: Cart mutations themselves are total functions and never fail.    │
//! │        These types cover the edges: validating untrusted input before   │
//! │        it reaches the cart, and the I/O layers around it.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Top-level domain errors.
///
/// Mutation methods on [`crate::Cart`] never produce these; they arise from
/// the validating constructors and edge checks only.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before untrusted data (catalog payloads, user-entered quantities)
/// is handed to the cart. The cart itself treats out-of-range input as a
/// no-op; hosts that prefer a hard rejection use these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
