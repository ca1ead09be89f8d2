//! # Cart Module
//!
//! The cart aggregate: line items, mutation operations, derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Operations                              │
//! │                                                                         │
//! │  Storefront Action          Cart Operation            State Change      │
//! │  ─────────────────          ──────────────            ────────────      │
//! │                                                                         │
//! │  Click "Add to Cart" ─────► add_item() ─────────────► merge or append   │
//! │                                                                         │
//! │  Quantity stepper (+) ────► increment_quantity() ───► quantity += 1     │
//! │                                                                         │
//! │  Quantity stepper (-) ────► decrement_quantity() ───► quantity -= 1,    │
//! │                                                       remove at 1       │
//! │                                                                         │
//! │  Click trash icon ────────► remove_item() ──────────► drop the line     │
//! │                                                                         │
//! │  Click "Empty Cart" ──────► clear() ────────────────► drop all lines    │
//! │                                                                         │
//! │  Cart badge / totals ─────► total_items()           (read only,         │
//! │                             total_price()            recomputed)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id; adding an id already present
//!   increases its quantity and keeps the originally captured price and
//!   metadata
//! - `quantity >= 1` while a line item exists; a decrement at 1 removes it
//! - Line items keep insertion order; merging never reorders
//! - Every operation is total: input that matches nothing (or a non-positive
//!   quantity) leaves the cart untouched and reports `false`
//!
//! Each mutation returns whether it changed state, so the service layer can
//! skip snapshot writes for no-ops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CatalogItem, Metadata, ProductId};

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product the shopper intends to purchase.
///
/// ## Design Notes
/// - `price_cents` and `metadata` are frozen copies taken from the
///   [`CatalogItem`] on first add. Later adds of the same product only touch
///   `quantity`; the line keeps displaying what the shopper first saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product id, the line's unique key within the cart.
    pub id: ProductId,

    /// Price in cents at time of adding (frozen).
    pub price_cents: i64,

    /// Quantity in the cart. Always >= 1 while the line exists.
    pub quantity: i64,

    /// Display fields captured at add time, stored inline in the record.
    #[serde(flatten)]
    pub metadata: Metadata,

    /// When this line first entered the cart. Untouched by merges.
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line item from a catalog snapshot and quantity.
    ///
    /// Callers guarantee `quantity >= 1`; [`Cart`] enforces it before
    /// constructing lines.
    pub fn from_catalog(item: CatalogItem, quantity: i64) -> Self {
        LineItem {
            id: item.id,
            price_cents: item.price_cents,
            quantity,
            metadata: item.metadata,
            added_at: Utc::now(),
        }
    }

    /// Returns the captured unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// Fields are private; all changes flow through the mutation methods below,
/// which uphold the module invariants. The struct is also the persisted
/// snapshot record: line items in insertion order plus the loading flag,
/// serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items in insertion order.
    items: Vec<LineItem>,

    /// Transient UI flag. Carried in the record, ignored by cart math.
    #[serde(default)]
    is_loading: bool,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart with an explicit quantity.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity grows by `quantity`; the
    ///   stored price and metadata stay as first captured, the new item's
    ///   values are dropped
    /// - Product not in cart: appended as a new last line
    /// - `quantity <= 0`: no-op, never creates an invalid line
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::cart::Cart;
    /// use bodega_core::types::CatalogItem;
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item_with_quantity(CatalogItem::new(1.into(), 1000), 2);
    /// cart.add_item_with_quantity(CatalogItem::new(1.into(), 1000), 3);
    ///
    /// assert_eq!(cart.len(), 1);
    /// assert_eq!(cart.total_items(), 5);
    /// assert_eq!(cart.total_price().cents(), 5000);
    /// ```
    pub fn add_item_with_quantity(&mut self, item: CatalogItem, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }

        // Merge: the existing line keeps its captured price and metadata
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity += quantity;
            return true;
        }

        self.items.push(LineItem::from_catalog(item, quantity));
        true
    }

    /// Adds a single unit of a product (the plain "Add to Cart" click).
    pub fn add_item(&mut self, item: CatalogItem) -> bool {
        self.add_item_with_quantity(item, 1)
    }

    /// Removes a line item by product id, whatever its quantity.
    ///
    /// No-op if the id is not in the cart.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != initial_len
    }

    /// Increases a line item's quantity by one.
    ///
    /// No-op if the id is not in the cart.
    pub fn increment_quantity(&mut self, id: ProductId) -> bool {
        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decreases a line item's quantity by one, removing the line at 1.
    ///
    /// ## Behavior
    /// - quantity > 1: decremented in place
    /// - quantity == 1: the line is removed (a quantity-0 line never exists)
    /// - id absent: no-op
    pub fn decrement_quantity(&mut self, id: ProductId) -> bool {
        let Some(pos) = self.items.iter().position(|line| line.id == id) else {
            return false;
        };

        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
        } else {
            self.items.remove(pos);
        }
        true
    }

    /// Clears all line items. The loading flag is untouched.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }

    /// Sets the transient loading flag, reporting whether it changed.
    pub fn set_loading(&mut self, loading: bool) -> bool {
        if self.is_loading == loading {
            return false;
        }
        self.is_loading = loading;
        true
    }

    // =========================================================================
    // Derived Aggregates
    // =========================================================================
    // Recomputed from current line items on every call. Nothing is cached,
    // so reads can never drift from state.

    /// Total monetary value: Σ price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|line| line.line_total()).sum()
    }

    /// Total unit count: Σ quantity over all lines (the cart badge number).
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line item by product id.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current value of the transient loading flag.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Totals summary for read models and UI badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub total_items: i64,
    pub total_price_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            total_items: cart.total_items(),
            total_price_cents: cart.total_price().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: u64, price_cents: i64) -> CatalogItem {
        CatalogItem::new(ProductId::new(id), price_cents)
    }

    fn titled_item(id: u64, price_cents: i64, title: &str) -> CatalogItem {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!(title));
        item(id, price_cents).with_metadata(metadata)
    }

    fn totals(cart: &Cart) -> (i64, i64) {
        (cart.total_items(), cart.total_price().cents())
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(totals(&cart), (0, 0));
        assert!(!cart.is_loading());
    }

    #[test]
    fn test_add_item_with_quantity() {
        let mut cart = Cart::new();

        assert!(cart.add_item_with_quantity(item(1, 1000), 2));

        assert_eq!(cart.len(), 1);
        assert_eq!(totals(&cart), (2, 2000));
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();

        cart.add_item_with_quantity(item(1, 1000), 2);
        cart.add_item_with_quantity(item(1, 1000), 3);

        assert_eq!(cart.len(), 1); // Still one distinct line
        assert_eq!(totals(&cart), (5, 5000));
    }

    #[test]
    fn test_merge_keeps_first_capture() {
        let mut cart = Cart::new();

        cart.add_item(titled_item(1, 1000, "first capture"));
        // Same product arrives again, repriced and retitled
        cart.add_item_with_quantity(titled_item(1, 9999, "second capture"), 2);

        let line = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.price_cents, 1000);
        assert_eq!(line.metadata["title"], json!("first capture"));
        assert_eq!(totals(&cart), (3, 3000));
    }

    #[test]
    fn test_add_item_defaults_to_quantity_one() {
        let mut cart = Cart::new();

        assert!(cart.add_item(item(1, 500)));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_non_positive_quantity_is_noop() {
        let mut cart = Cart::new();

        assert!(!cart.add_item_with_quantity(item(1, 1000), 0));
        assert!(!cart.add_item_with_quantity(item(1, 1000), -3));
        assert!(cart.is_empty());

        // Also a no-op as a merge target
        cart.add_item(item(2, 500));
        assert!(!cart.add_item_with_quantity(item(2, 500), 0));
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item_with_quantity(item(1, 1000), 5);

        assert!(cart.remove_item(ProductId::new(1)));
        assert!(cart.is_empty());
        assert_eq!(totals(&cart), (0, 0));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000));

        assert!(!cart.remove_item(ProductId::new(99)));
        assert_eq!(cart.len(), 1);
        assert_eq!(totals(&cart), (1, 1000));
    }

    #[test]
    fn test_increment_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 250));

        assert!(cart.increment_quantity(ProductId::new(1)));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);

        assert!(!cart.increment_quantity(ProductId::new(99)));
        assert_eq!(totals(&cart), (2, 500));
    }

    #[test]
    fn test_decrement_above_one() {
        let mut cart = Cart::new();
        cart.add_item_with_quantity(item(1, 1000), 3);

        assert!(cart.decrement_quantity(ProductId::new(1)));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000));

        assert!(cart.decrement_quantity(ProductId::new(1)));
        assert!(cart.get(ProductId::new(1)).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000));

        assert!(!cart.decrement_quantity(ProductId::new(2)));
        assert_eq!(totals(&cart), (1, 1000));
    }

    #[test]
    fn test_repeated_decrements_drain_line() {
        let mut cart = Cart::new();
        cart.add_item_with_quantity(item(1, 1000), 2);
        cart.add_item_with_quantity(item(1, 1000), 3);
        assert_eq!(totals(&cart), (5, 5000));

        for _ in 0..3 {
            assert!(cart.decrement_quantity(ProductId::new(1)));
        }
        assert_eq!(totals(&cart), (2, 2000));

        assert!(cart.decrement_quantity(ProductId::new(1)));
        assert!(cart.decrement_quantity(ProductId::new(1)));
        assert!(cart.is_empty());
        assert_eq!(totals(&cart), (0, 0));
    }

    #[test]
    fn test_two_line_totals_after_removal() {
        let mut cart = Cart::new();
        cart.add_item_with_quantity(item(1, 1000), 1);
        cart.add_item_with_quantity(item(2, 500), 3);
        assert_eq!(totals(&cart), (4, 2500));

        assert!(cart.remove_item(ProductId::new(1)));
        assert_eq!(totals(&cart), (3, 1500));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert!(!cart.clear()); // Already empty

        cart.add_item(item(1, 1000));
        cart.add_item(item(2, 500));
        cart.set_loading(true);

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert_eq!(totals(&cart), (0, 0));
        assert!(cart.is_loading()); // Flag survives a clear
    }

    #[test]
    fn test_set_loading_reports_changes() {
        let mut cart = Cart::new();

        assert!(cart.set_loading(true));
        assert!(!cart.set_loading(true)); // Unchanged
        assert!(cart.is_loading());
        assert!(cart.set_loading(false));
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = Cart::new();
        cart.add_item(item(3, 100));
        cart.add_item(item(1, 200));
        cart.add_item(item(2, 300));

        // Merging into the middle line must not reorder anything
        cart.add_item_with_quantity(item(1, 200), 4);

        let ids: Vec<u64> = cart.items().iter().map(|line| line.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_cart_totals_summary() {
        let mut cart = Cart::new();
        cart.add_item_with_quantity(item(1, 1000), 2);
        cart.add_item_with_quantity(item(2, 500), 1);

        let summary = CartTotals::from(&cart);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_price_cents, 2500);
    }

    #[test]
    fn test_serde_round_trip_preserves_everything() {
        let mut cart = Cart::new();
        cart.add_item_with_quantity(titled_item(7, 2295, "Rain Jacket"), 2);
        cart.add_item(titled_item(3, 5599, "Cotton Jacket"));
        cart.set_loading(true);

        let blob = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&blob).unwrap();

        assert_eq!(back, cart);
        assert_eq!(totals(&back), totals(&cart));
        let ids: Vec<u64> = back.items().iter().map(|line| line.id.value()).collect();
        assert_eq!(ids, vec![7, 3]);
        assert!(back.is_loading());
    }

    #[test]
    fn test_record_layout_is_flat_camel_case() {
        let mut cart = Cart::new();
        cart.add_item(titled_item(1, 1000, "Backpack"));

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value["isLoading"], json!(false));

        let line = &value["items"][0];
        assert_eq!(line["id"], json!(1));
        assert_eq!(line["priceCents"], json!(1000));
        assert_eq!(line["quantity"], json!(1));
        assert_eq!(line["title"], json!("Backpack")); // Metadata inline
        assert!(line["addedAt"].is_string());
        assert!(line.get("metadata").is_none());
    }

    #[test]
    fn test_record_without_loading_flag_still_decodes() {
        // Records written before the flag existed must rehydrate
        let blob = r#"{"items":[]}"#;
        let cart: Cart = serde_json::from_str(blob).unwrap();
        assert!(!cart.is_loading());
        assert!(cart.is_empty());
    }
}
