//! # Bodega Cart
//!
//! The cart service crate: owns live cart state, serializes mutations, and
//! persists snapshots in the background.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Storefront Host (UI)                       │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │ add_item / totals / items
//!                                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    bodega-cart (this crate)                     │
//! │                                                                 │
//! │   ┌───────────────┐   whole-state blobs   ┌──────────────────┐  │
//! │   │   CartStore   │ ────────────────────► │  SnapshotWriter  │  │
//! │   │  Mutex<Cart>  │    (never awaited)    │  background task │  │
//! │   └───────┬───────┘                       └────────┬─────────┘  │
//! │           │ pure operations                        │ put()      │
//! │           ▼                                        ▼            │
//! │      bodega-core                          dyn SnapshotStore     │
//! │    (domain types)                          (bodega-storage)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! - **Mutations are synchronous**: callers get the result before any I/O
//! - **Persistence is fire-and-forget**: a failed write warns, never errors
//! - **One lock**: every compound operation runs alone; reads always see
//!   the latest completed mutation

pub mod error;
pub mod persist;
pub mod store;

pub use error::{CartStoreError, CartStoreResult};
pub use persist::{SnapshotWriter, WriterHandle};
pub use store::CartStore;

/// Key the whole cart state is persisted under.
pub const CART_STATE_KEY: &str = "cart";
