//! # Bodega Catalog
//!
//! Fetch client for the remote product catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Storefront Host (UI)                     │
//! │                                                             │
//! │   FetchState<Vec<Product>> ◄── binds {data,loading,error}   │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ fetch / fetch_by_id
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 bodega-catalog (this crate)                 │
//! │                                                             │
//! │   CatalogConfig ──► CatalogClient ──► remote catalog API    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never calls the catalog. The host fetches products here, then
//! hands chosen items to the cart as add-time snapshots.
//!
//! ## Design Principles
//! - **Generic payloads**: callers pick the decode target per endpoint
//! - **Fail-soft**: every failure collapses to one display string and the
//!   loading flag always resets

pub mod client;
pub mod config;
pub mod error;
pub mod state;

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use state::FetchState;
