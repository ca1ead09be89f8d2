//! # Cart Store
//!
//! The owned cart state object: rehydrates once at startup, serializes all
//! mutations behind one mutex, persists snapshots in the background.
//!
//! ## Thread Safety
//! The cart is wrapped in `Mutex<Cart>` because:
//! 1. Multiple host tasks may read/modify the cart concurrently
//! 2. Each compound operation (find item, then modify it) must run alone
//! 3. Interleaving two find-then-modify sequences could double-create a line
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CartStore Mutation Flow                             │
//! │                                                                         │
//! │  add_item(item)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock cart mutex ──► apply Cart operation ──► changed?                  │
//! │                                                  │        │             │
//! │                                          yes ────┘        └── no        │
//! │                                           │                    │        │
//! │                              serialize whole state        unlock,       │
//! │                              enqueue to writer            return false  │
//! │                              (no await!)                                │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                              unlock, return true                        │
//! │                                                                         │
//! │  The snapshot is taken under the same lock as the mutation, so queued   │
//! │  blobs always appear in mutation order. The write itself happens on     │
//! │  the background task and never delays or fails the mutation.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use bodega_core::{Cart, CartTotals, CatalogItem, LineItem, Money, ProductId};
use bodega_storage::SnapshotStore;

use crate::error::{CartStoreError, CartStoreResult};
use crate::persist::{SnapshotWriter, WriterHandle};
use crate::CART_STATE_KEY;

/// The cart service.
///
/// Constructed once at application start via [`CartStore::open`] and shared
/// (hosts typically wrap it in `Arc`). All mutations are synchronous; reads
/// reflect every completed mutation immediately.
pub struct CartStore {
    /// The single source of truth for cart state.
    cart: Mutex<Cart>,

    /// Feed into the background snapshot writer.
    writer: WriterHandle,

    /// Writer task, joined on close. `None` once closed.
    writer_task: Mutex<Option<JoinHandle<()>>>,
}

impl CartStore {
    /// Opens the cart store: rehydrates state and starts the writer.
    ///
    /// ## Startup Sequence
    /// 1. Read the blob under `"cart"` from the injected store
    /// 2. Missing blob → start with an empty cart
    /// 3. Undecodable blob → warn and start empty (state is best-effort;
    ///    a corrupt snapshot must not brick the storefront)
    /// 4. Spawn the snapshot writer task
    ///
    /// ## Errors
    /// Only a failing storage read makes `open` fail.
    pub async fn open(store: Arc<dyn SnapshotStore>) -> CartStoreResult<Self> {
        let cart = match store.get(CART_STATE_KEY).await? {
            Some(blob) => match serde_json::from_str::<Cart>(&blob) {
                Ok(cart) => {
                    info!(
                        lines = cart.len(),
                        total_items = cart.total_items(),
                        "Cart rehydrated from snapshot"
                    );
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Undecodable cart snapshot, starting empty");
                    Cart::new()
                }
            },
            None => {
                info!("No cart snapshot found, starting empty");
                Cart::new()
            }
        };

        let (writer, handle) = SnapshotWriter::new(store, CART_STATE_KEY);
        let writer_task = tokio::spawn(writer.run());

        Ok(CartStore {
            cart: Mutex::new(cart),
            writer: handle,
            writer_task: Mutex::new(Some(writer_task)),
        })
    }

    /// Shuts the store down gracefully.
    ///
    /// Drains the snapshot queue, writes the final snapshot, and joins the
    /// writer task. For hosts that want a durable snapshot at exit; ordinary
    /// mutation flow never waits on persistence. Idempotent.
    pub async fn close(&self) -> CartStoreResult<()> {
        info!("Closing cart store");
        self.writer.shutdown().await;

        let task = self
            .writer_task
            .lock()
            .expect("Writer task mutex poisoned")
            .take();

        match task {
            Some(task) => task
                .await
                .map_err(|e| CartStoreError::Writer(e.to_string())),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product with an explicit quantity. See [`Cart::add_item_with_quantity`].
    pub fn add_item_with_quantity(&self, item: CatalogItem, quantity: i64) -> bool {
        debug!(product_id = %item.id, quantity, "add_item_with_quantity");
        if quantity <= 0 {
            debug!(quantity, "Ignoring non-positive quantity");
            return false;
        }
        self.mutate(|cart| cart.add_item_with_quantity(item, quantity))
    }

    /// Adds a single unit of a product.
    pub fn add_item(&self, item: CatalogItem) -> bool {
        debug!(product_id = %item.id, "add_item");
        self.mutate(|cart| cart.add_item(item))
    }

    /// Removes a line item by product id.
    pub fn remove_item(&self, id: ProductId) -> bool {
        debug!(product_id = %id, "remove_item");
        self.mutate(|cart| cart.remove_item(id))
    }

    /// Increases a line item's quantity by one.
    pub fn increment_quantity(&self, id: ProductId) -> bool {
        debug!(product_id = %id, "increment_quantity");
        self.mutate(|cart| cart.increment_quantity(id))
    }

    /// Decreases a line item's quantity by one, removing the line at 1.
    pub fn decrement_quantity(&self, id: ProductId) -> bool {
        debug!(product_id = %id, "decrement_quantity");
        self.mutate(|cart| cart.decrement_quantity(id))
    }

    /// Clears all line items.
    pub fn clear(&self) -> bool {
        debug!("clear");
        self.mutate(|cart| cart.clear())
    }

    /// Sets the transient loading flag.
    ///
    /// Snapshot-persisted like any other change: the persisted record
    /// carries the whole state, flag included.
    pub fn set_loading(&self, loading: bool) -> bool {
        self.mutate(|cart| cart.set_loading(loading))
    }

    // =========================================================================
    // Reads
    // =========================================================================
    // Lock, compute, release. Aggregates are recomputed from live state on
    // every call.

    /// Current totals summary.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    /// Total monetary value of the cart.
    pub fn total_price(&self) -> Money {
        self.with_cart(|cart| cart.total_price())
    }

    /// Total unit count (the cart badge number).
    pub fn total_items(&self) -> i64 {
        self.with_cart(|cart| cart.total_items())
    }

    /// Snapshot of the line items in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.with_cart(|cart| cart.items().to_vec())
    }

    /// Looks up one line item by product id.
    pub fn get(&self, id: ProductId) -> Option<LineItem> {
        self.with_cart(|cart| cart.get(id).cloned())
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.with_cart(|cart| cart.len())
    }

    /// Checks if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.with_cart(|cart| cart.is_empty())
    }

    /// Current value of the transient loading flag.
    pub fn is_loading(&self) -> bool {
        self.with_cart(|cart| cart.is_loading())
    }

    /// Executes a closure with read access to the cart.
    ///
    /// For compound reads that must see one consistent state. Mutation goes
    /// through the named methods only; they are what schedules persistence.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let (badge, price) = store.with_cart(|c| (c.total_items(), c.total_price()));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Applies one mutation under the lock; enqueues a snapshot if it
    /// changed state.
    fn mutate<F>(&self, op: F) -> bool
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        let changed = op(&mut cart);
        if changed {
            self.enqueue_snapshot(&cart);
        }
        changed
    }

    /// Serializes the full state and hands it to the writer.
    ///
    /// Runs under the cart lock so queued snapshots are in mutation order.
    fn enqueue_snapshot(&self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(blob) => self.writer.enqueue(blob),
            // Unreachable with this record shape; losing one snapshot is
            // still preferable to failing the mutation
            Err(e) => error!(error = %e, "Failed to serialize cart snapshot"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_core::Metadata;
    use bodega_storage::MemoryStore;
    use serde_json::json;

    fn item(id: u64, price_cents: i64) -> CatalogItem {
        CatalogItem::new(ProductId::new(id), price_cents)
    }

    fn titled_item(id: u64, price_cents: i64, title: &str) -> CatalogItem {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!(title));
        item(id, price_cents).with_metadata(metadata)
    }

    async fn open_with(store: &Arc<MemoryStore>) -> CartStore {
        CartStore::open(store.clone() as Arc<dyn SnapshotStore>)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_without_snapshot_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(!cart.is_loading());
    }

    #[tokio::test]
    async fn test_mutations_are_visible_immediately() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;

        assert!(cart.add_item_with_quantity(item(1, 1000), 2));
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price().cents(), 2000);

        assert!(cart.increment_quantity(ProductId::new(1)));
        let totals = cart.totals();
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price_cents, 3000);
    }

    #[tokio::test]
    async fn test_merge_through_service() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;

        cart.add_item(item(1, 500));
        cart.add_item_with_quantity(item(1, 500), 4);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_close_persists_final_state() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;

        cart.add_item_with_quantity(titled_item(1, 1000, "Backpack"), 2);
        cart.add_item(item(2, 500));
        cart.close().await.unwrap();

        let blob = store.get(CART_STATE_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["items"][0]["id"], json!(1));
        assert_eq!(value["items"][0]["quantity"], json!(2));
        assert_eq!(value["items"][0]["title"], json!("Backpack"));
        assert_eq!(value["items"][1]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_reopen_restores_items_and_totals() {
        let store = Arc::new(MemoryStore::new());

        let cart = open_with(&store).await;
        cart.add_item_with_quantity(item(1, 1000), 1);
        cart.add_item_with_quantity(item(2, 500), 3);
        cart.close().await.unwrap();

        let reopened = open_with(&store).await;
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.total_items(), 4);
        assert_eq!(reopened.total_price().cents(), 2500);

        let ids: Vec<u64> = reopened.items().iter().map(|l| l.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_undecodable_snapshot_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        store.put(CART_STATE_KEY, "not json at all").await.unwrap();

        let cart = open_with(&store).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_noops_write_no_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;

        assert!(!cart.remove_item(ProductId::new(9)));
        assert!(!cart.decrement_quantity(ProductId::new(9)));
        assert!(!cart.add_item_with_quantity(item(1, 1000), 0));
        assert!(!cart.clear());
        cart.close().await.unwrap();

        // Nothing changed, so nothing was ever persisted
        assert_eq!(store.get(CART_STATE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_loading_flag_round_trips() {
        let store = Arc::new(MemoryStore::new());

        let cart = open_with(&store).await;
        assert!(cart.set_loading(true));
        assert!(!cart.set_loading(true));
        cart.close().await.unwrap();

        let blob = store.get(CART_STATE_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["isLoading"], json!(true));

        let reopened = open_with(&store).await;
        assert!(reopened.is_loading());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;

        cart.add_item(item(1, 100));
        cart.close().await.unwrap();
        cart.close().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_parallel_mutations_stay_serialized() {
        let store = Arc::new(MemoryStore::new());
        let cart = Arc::new(open_with(&store).await);
        cart.add_item(item(1, 100));

        // Two threads hammer the same line; every find-then-modify runs
        // under the lock, so no increment can be lost
        let a = {
            let cart = cart.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    cart.increment_quantity(ProductId::new(1));
                }
            })
        };
        let b = {
            let cart = cart.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    cart.increment_quantity(ProductId::new(1));
                }
            })
        };
        a.join().unwrap();
        b.join().unwrap();

        assert_eq!(cart.total_items(), 101);
        cart.close().await.unwrap();

        let blob = store.get(CART_STATE_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["items"][0]["quantity"], json!(101));
    }

    #[tokio::test]
    async fn test_with_cart_compound_read() {
        let store = Arc::new(MemoryStore::new());
        let cart = open_with(&store).await;
        cart.add_item_with_quantity(item(1, 1000), 2);

        let (badge, price) = cart.with_cart(|c| (c.total_items(), c.total_price()));
        assert_eq!(badge, 2);
        assert_eq!(price.cents(), 2000);
    }
}
