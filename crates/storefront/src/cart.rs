//! Cart manager.
//!
//! Owns the authoritative [`Cart`], mirrors it to a [`KeyValueStore`] after
//! every mutation and tells subscribers what changed. Rendering, checkout and
//! the CLI only read from it.
//!
//! Storage problems never reach the caller:
//! - a missing or unparsable snapshot loads as an empty cart
//! - a failed write keeps the in-memory change, logs a warning and reports
//!   `persisted: false` to subscribers

use rust_decimal::Decimal;
use tracing::instrument;

use las_torres_core::{Cart, CartItem, ProductId, ProductInput};

use crate::storage::KeyValueStore;

/// Storage key of the cart snapshot.
pub const CART_KEY: &str = "panaderia_cart_v1";

/// What happened to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// The cart was restored from storage.
    Loaded,
    /// One unit of a product was added.
    Added { id: ProductId, quantity: u32 },
    /// A remove was requested; `found` is false for unknown ids.
    Removed { id: ProductId, found: bool },
    /// An entry's quantity was set or decremented.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// The cart was emptied.
    Cleared,
}

impl CartEvent {
    /// Whether the display should briefly acknowledge the change (the badge
    /// pulse shown after adding a product).
    #[must_use]
    pub const fn acknowledge(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// Snapshot handed to subscribers after every load or mutation.
#[derive(Debug, Clone, Copy)]
pub struct CartChange<'a> {
    pub event: &'a CartEvent,
    pub cart: &'a Cart,
    pub total: Decimal,
    pub item_count: u32,
    /// False when the write to storage failed.
    pub persisted: bool,
}

type Listener = Box<dyn FnMut(&CartChange<'_>)>;

/// The cart service.
pub struct CartManager<S> {
    store: S,
    key: String,
    cart: Cart,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> CartManager<S> {
    /// A manager with an empty cart under the default key. Call
    /// [`load`](Self::load) to restore a saved cart.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_KEY)
    }

    /// A manager persisting under a custom key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cart: Cart::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a callback run after every load and mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartChange<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Restore the cart from storage.
    ///
    /// Falls back to an empty cart when nothing is stored or the snapshot
    /// cannot be read or parsed.
    #[instrument(skip_all, fields(cart_key = %self.key))]
    pub fn load(&mut self) -> &Cart {
        self.cart = match self.store.get(&self.key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable cart snapshot");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart snapshot");
                Cart::new()
            }
        };

        tracing::debug!(items = self.cart.len(), "Cart loaded");
        self.notify(&CartEvent::Loaded, true);
        &self.cart
    }

    /// Add one unit of a product and return its new quantity.
    ///
    /// The price is resolved from whatever the product source supplied;
    /// unparsable prices count as zero.
    #[instrument(skip_all, fields(product_id = %input.id))]
    pub fn add(&mut self, input: ProductInput) -> u32 {
        let price = input.price.resolve();
        let id = input.id;
        let quantity = self.cart.add(id.clone(), input.title, price);

        tracing::info!(quantity, %price, "Added to cart");
        self.commit(&CartEvent::Added { id, quantity });
        quantity
    }

    /// Remove a product. Unknown ids are not an error.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let removed = self.cart.remove(id);
        self.commit(&CartEvent::Removed {
            id: id.clone(),
            found: removed.is_some(),
        });
        removed
    }

    /// Set a product's quantity; zero removes it. Returns `false` for
    /// unknown ids, which leave the cart and storage untouched.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if !self.cart.set_quantity(id, quantity) {
            return false;
        }
        self.commit(&CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        });
        true
    }

    /// Take one unit off a product. Returns the remaining quantity, or
    /// `None` for unknown ids.
    #[instrument(skip(self))]
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let quantity = self.cart.decrement(id)?;
        self.commit(&CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        });
        Some(quantity)
    }

    /// Empty the cart.
    #[instrument(skip_all)]
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit(&CartEvent::Cleared);
    }

    /// Sum of `price * quantity`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store, dropping the manager.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn commit(&mut self, event: &CartEvent) {
        let persisted = self.persist();
        self.notify(event, persisted);
    }

    fn persist(&mut self) -> bool {
        let snapshot = match serde_json::to_string(&self.cart) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode cart snapshot");
                return false;
            }
        };

        match self.store.set(&self.key, &snapshot) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(cart_key = %self.key, error = %e, "Cart not saved");
                false
            }
        }
    }

    fn notify(&mut self, event: &CartEvent, persisted: bool) {
        let change = CartChange {
            event,
            cart: &self.cart,
            total: self.cart.total(),
            item_count: self.cart.item_count(),
            persisted,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}

impl<S> std::fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
