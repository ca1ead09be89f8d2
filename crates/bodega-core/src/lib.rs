//! # bodega-core: Pure Cart Domain for Bodega
//!
//! This crate is the **heart** of Bodega. It contains the cart state
//! container as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bodega Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront UI                              │   │
//! │  │    Product grid ──► Cart badge ──► Cart page ──► Totals         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bodega-cart (CartStore service)                 │   │
//! │  │    one mutex, one writer task, fire-and-forget snapshots        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bodega-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│   │   │
//! │  │   │ ProductId │  │   Money   │  │   Cart    │  │   rules   │   │   │
//! │  │   │ CatalogItem│ │  (cents)  │  │ LineItem  │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bodega-storage (SnapshotStore)                     │   │
//! │  │           opaque key/value blobs, memory or SQLite              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, CatalogItem, Metadata)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate, its operations and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Edge validation for untrusted input
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is deterministic and synchronous
//! 2. **No I/O**: persistence and networking live in sibling crates
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Total Operations**: cart mutations cannot fail; input that matches
//!    nothing is a reported no-op, not an error
//!
//! ## Example Usage
//!
//! ```rust
//! use bodega_core::{Cart, CatalogItem};
//!
//! let mut cart = Cart::new();
//!
//! // Two units of product 1 at $10.00
//! cart.add_item_with_quantity(CatalogItem::new(1.into(), 1000), 2);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().to_string(), "$20.00");
//!
//! // Stepping the quantity down to zero removes the line
//! cart.decrement_quantity(1.into());
//! cart.decrement_quantity(1.into());
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::Cart` instead of
// `use bodega_core::cart::Cart`

pub use cart::{Cart, CartTotals, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{CatalogItem, Metadata, ProductId};
