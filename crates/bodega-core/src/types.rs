//! # Domain Types
//!
//! Core domain types shared across the workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │   ProductId     │   │    CatalogItem      │   │    Metadata     │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  u64 newtype    │   │  id: ProductId      │   │  opaque JSON    │   │
//! │  │  catalog's own  │   │  price_cents: i64   │   │  map (title,    │   │
//! │  │  numeric id     │   │  metadata (flat)    │   │  image, ...)    │   │
//! │  └─────────────────┘   └─────────────────────┘   └─────────────────┘   │
//! │                                                                         │
//! │  CatalogItem is the add-time snapshot: everything the cart needs to     │
//! │  know about a product, frozen the moment the shopper picks it.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Opaque Metadata
//! The catalog serves display fields the cart never interprets (title,
//! description, category, image URL, ratings). They ride along as a JSON
//! map, serialized inline with the line item so the persisted record stays
//! flat.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::validate_price_cents;

// =============================================================================
// Product Identity
// =============================================================================

/// The catalog's numeric product identifier.
///
/// The catalog API assigns these; the cart only compares them. Wrapping the
/// raw integer keeps product ids from mixing with quantities and prices in
/// call signatures.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    /// Creates a product id from the catalog's raw integer.
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    /// Returns the raw integer value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    #[inline]
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Metadata
// =============================================================================

/// Opaque display fields carried with a catalog item.
///
/// Keys and values pass through untouched; the cart never reads them.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// Catalog Item
// =============================================================================

/// A product as handed to the cart, captured at add time.
///
/// ## Price Freezing
/// The price here is what the shopper saw when they clicked "add". If the
/// catalog reprices the product later, existing cart lines keep this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Catalog product id.
    pub id: ProductId,

    /// Price in cents at the moment of capture.
    /// Caller contract: non-negative. Use [`CatalogItem::try_new`] to enforce.
    pub price_cents: i64,

    /// Display fields (title, image, category, ...), passed through opaquely.
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl CatalogItem {
    /// Creates a catalog item with no metadata.
    pub fn new(id: ProductId, price_cents: i64) -> Self {
        CatalogItem {
            id,
            price_cents,
            metadata: Metadata::new(),
        }
    }

    /// Creates a catalog item, rejecting negative prices.
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::types::CatalogItem;
    ///
    /// assert!(CatalogItem::try_new(1.into(), 1099).is_ok());
    /// assert!(CatalogItem::try_new(1.into(), -1).is_err());
    /// ```
    pub fn try_new(id: ProductId, price_cents: i64) -> CoreResult<Self> {
        validate_price_cents(price_cents)?;
        Ok(CatalogItem::new(id, price_cents))
    }

    /// Attaches display metadata (builder style).
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_product_id_display_and_conversion() {
        let id: ProductId = 42.into();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id, ProductId::new(42));
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new(7);
        assert_eq!(serde_json::to_value(id).unwrap(), json!(7));

        let back: ProductId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_try_new_rejects_negative_price() {
        assert!(CatalogItem::try_new(ProductId::new(1), 0).is_ok());
        assert!(CatalogItem::try_new(ProductId::new(1), -100).is_err());
    }

    #[test]
    fn test_metadata_flattens_into_item_json() {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Mens Casual T-Shirt"));
        metadata.insert("category".to_string(), json!("men's clothing"));

        let item = CatalogItem::new(ProductId::new(1), 2295).with_metadata(metadata);
        let value = serde_json::to_value(&item).unwrap();

        // Metadata keys sit beside id/priceCents, not nested under a key
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["priceCents"], json!(2295));
        assert_eq!(value["title"], json!("Mens Casual T-Shirt"));
        assert_eq!(value["category"], json!("men's clothing"));
        assert!(value.get("metadata").is_none());

        let back: CatalogItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
        assert_eq!(back.metadata["title"], Value::from("Mens Casual T-Shirt"));
    }
}
